//! Sprite alignment: imported records, their offsets, and offset files.
//!
//! ## Module Map
//!
//! - `record` - `SpriteImageRecord`, alignment presets and the session that
//!   imports, orders and edits records.
//! - `offsets` - JSON export/import of offsets keyed by file name.

pub mod offsets;
pub mod record;

pub use offsets::{
    OffsetEntry, apply_offsets, decode_offsets, encode_offsets, import_offsets, read_offsets,
    write_offsets,
};
pub use record::{AlignPreset, AlignSession, SpriteImageRecord};
