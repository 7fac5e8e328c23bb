//! Interactive editing of sprite regions and scan areas.
//!
//! ## Module Map
//!
//! - `regions` - the per-session editor: add, delete, resize, drag, swap,
//!   hit testing and pointer gestures.
//! - `undo` - whole-state snapshots and the stack that holds them.

pub mod regions;
pub mod undo;

pub use regions::{
    EditorConfig, Layer, PressOutcome, RegionEditor, SwapOutcome, Target, resize_screen_rect,
};
pub use undo::{Snapshot, SnapshotStack, UndoStack};
