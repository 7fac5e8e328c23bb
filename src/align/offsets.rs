//! JSON interchange for per-sprite offsets.
//!
//! The file is an array of objects:
//!
//! ```json
//! [
//!   { "source_path": "walk/hero_01.png", "filename": "hero_01.png", "offset_x": 3, "offset_y": -2 }
//! ]
//! ```
//!
//! Import matches entries to records by `filename` (the basename), so a file
//! written on one machine applies to the same sprites loaded from elsewhere.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::align::record::SpriteImageRecord;
use crate::utils::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OffsetEntry {
    pub source_path: String,
    pub filename: String,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl From<&SpriteImageRecord> for OffsetEntry {
    fn from(record: &SpriteImageRecord) -> Self {
        Self {
            source_path: record.source_path.to_string_lossy().into_owned(),
            filename: record.filename(),
            offset_x: record.offset_x,
            offset_y: record.offset_y,
        }
    }
}

/// Serializes the offsets of `records`, in order, as pretty-printed JSON.
pub fn encode_offsets(records: &[SpriteImageRecord]) -> Result<String> {
    let entries: Vec<OffsetEntry> = records.iter().map(OffsetEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

pub fn decode_offsets(json: &str) -> Result<Vec<OffsetEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// Applies `entries` to the records with the same basename and returns how
/// many entries matched. For each entry only the first matching record is
/// updated; entries with no match are skipped.
pub fn apply_offsets(records: &mut [SpriteImageRecord], entries: &[OffsetEntry]) -> usize {
    let mut applied = 0;
    for entry in entries {
        match records.iter_mut().find(|r| r.filename() == entry.filename) {
            Some(record) => {
                record.set_offset(entry.offset_x, entry.offset_y);
                applied += 1;
            }
            None => warn!("no loaded sprite named {}, offset skipped", entry.filename),
        }
    }
    applied
}

/// Parses `json` and applies it. Nothing is changed if parsing fails.
pub fn import_offsets(json: &str, records: &mut [SpriteImageRecord]) -> Result<usize> {
    let entries = decode_offsets(json)?;
    Ok(apply_offsets(records, &entries))
}

pub fn write_offsets(path: impl AsRef<Path>, records: &[SpriteImageRecord]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode_offsets(records)?)?;
    info!("wrote {} offsets to {}", records.len(), path.display());
    Ok(())
}

pub fn read_offsets(path: impl AsRef<Path>, records: &mut [SpriteImageRecord]) -> Result<usize> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let applied = import_offsets(&json, records)?;
    info!("applied {} offsets from {}", applied, path.display());
    Ok(applied)
}
