//! Stitching aligned sprites into a sheet.
//!
//! ## Module Map
//!
//! - `layout` - grid and group placement, tight canvas bounds.
//! - `compositor` - decoding, alpha-masked pasting, saving.

pub mod compositor;
pub mod layout;

pub use compositor::{StitchedSheet, compose, compose_images};
pub use layout::{Placement, SheetLayout, StitchParams, plan_layout};
