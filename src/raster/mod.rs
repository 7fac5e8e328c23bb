//! Raster buffers and geometry.
//!
//! - `geom` - `Rect`, `EdgeMask`, `ViewScale`
//! - `image_formats` - RGBA `Pixel`/`Pixmap`, decode/encode, crop, masked paste

pub mod geom;
pub mod image_formats;

pub use geom::{EdgeMask, Rect, ViewScale};
pub use image_formats::{Pixel, Pixmap, PixmapCompositeExt};
