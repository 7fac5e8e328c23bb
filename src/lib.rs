//! A Rust library for splitting sprite sheets into sprites and stitching
//! sprites back into sheets.
//!
//! The splitter side finds sprites on a sheet by flood-filling everything that
//! differs from the background, orders them the way a person reads the sheet,
//! lets a host edit the boxes interactively, and exports each box as its own
//! PNG. The stitcher side imports sprite files, keeps per-sprite alignment
//! offsets, and packs them into one transparent sheet.
//!
//! # Quick Start
//!
//! ```no_run
//! use sprite_sheet_kit::{
//!     DetectParams, ExportOptions, NoProgress, RegionEditor, detect_file, export_sheet,
//! };
//!
//! let params = DetectParams::new().with_threshold(40);
//! let regions = detect_file("sheet.png", &params, &mut NoProgress)?;
//!
//! let mut editor = RegionEditor::new();
//! editor.replace_regions(regions);
//! editor.swap(0, 1)?;
//!
//! export_sheet(
//!     "sheet.png",
//!     editor.regions(),
//!     editor.areas(),
//!     &ExportOptions::new().with_transparent_background(50),
//!     "out",
//! )?;
//! # Ok::<(), sprite_sheet_kit::SpriteError>(())
//! ```
//!
//! ```no_run
//! use sprite_sheet_kit::{AlignPreset, AlignSession, StitchParams, compose};
//!
//! let mut session = AlignSession::new();
//! session.import(&["walk_01.png", "walk_02.png"], false)?;
//! session.apply_preset_all(AlignPreset::Bottom);
//!
//! let sheet = compose(session.records(), &StitchParams::new().with_grid(2, 1))?;
//! sheet.save_png("walk_sheet.png")?;
//! # Ok::<(), sprite_sheet_kit::SpriteError>(())
//! ```
//!
//! # Features
//!
//! - **Scan areas**: restrict detection to parts of the sheet and group exports by area
//! - **Background worker**: run detection off the calling thread with progress events
//! - **Undo**: every edit of regions or areas can be reverted
//! - **Optional parallelism**: Enable `rayon` feature for parallel sprite decoding

// Core modules
pub mod align;
pub mod compose;
pub mod detect;
pub mod edit;
pub mod export;
pub mod raster;
pub mod utils;

// Detection
pub use detect::{
    BackgroundClassifier, DetectParams, DetectionEvent, DetectionHandle, DetectionSource,
    RegionDetector, detect_background, detect_file, detect_sprites, is_background,
    sort_reading_order, spawn_detection,
};

// Editing
pub use edit::{EditorConfig, Layer, PressOutcome, RegionEditor, Snapshot, SwapOutcome, Target};

// Alignment and stitching
pub use align::{AlignPreset, AlignSession, SpriteImageRecord, read_offsets, write_offsets};
pub use compose::{StitchParams, StitchedSheet, compose, compose_images};

// Export
pub use export::{ExportOptions, export_sheet, export_sprites};

// Image types
pub use raster::{EdgeMask, Pixel, Pixmap, PixmapCompositeExt, Rect, ViewScale};

// Error and progress types
pub use utils::error::{Result, SpriteError};
pub use utils::progress::{NoProgress, ProgressSink};

// Constants
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");
