//! Imported sprite images and the alignment session that edits their offsets.
//!
//! A record's `width`/`height` are read from the image header once, at import,
//! and never recomputed; the compositor trusts them. Offsets are signed pixel
//! displacements of the sprite's center from its cell center.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::utils::error::{Result, SpriteError};
use crate::utils::file_path::{basename, parent_folder_name};

/// One imported source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImageRecord {
    pub source_path: PathBuf,
    pub offset_x: i32,
    pub offset_y: i32,
    width: u32,
    height: u32,
    /// Label used by grouped stitching (one row per group)
    pub group: Option<String>,
}

impl SpriteImageRecord {
    pub fn new(source_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            source_path: source_path.into(),
            offset_x: 0,
            offset_y: 0,
            width,
            height,
            group: None,
        }
    }

    /// Reads the image dimensions from the file header without decoding
    /// pixel data.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (width, height) =
            image::image_dimensions(path).map_err(|source| SpriteError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(path, width, height))
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// File name used to match records in the offset interchange format.
    pub fn filename(&self) -> String {
        basename(&self.source_path)
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, offset_x: i32, offset_y: i32) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    pub fn nudge(&mut self, dx: i32, dy: i32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset_offset(&mut self) {
        self.set_offset(0, 0);
    }

    pub fn apply_preset(&mut self, preset: AlignPreset) {
        let (x, y) = preset.offset_for(self.width, self.height);
        self.set_offset(x, y);
    }
}

/// Quick alignments relative to the cell center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignPreset {
    Center,
    /// Sprite's center moves left by half its width
    Left,
    Right,
    /// Sprite's center moves up by half its height
    Top,
    Bottom,
}

impl AlignPreset {
    /// Offset this preset assigns to a `width x height` sprite. Halves round
    /// toward negative infinity.
    pub fn offset_for(self, width: u32, height: u32) -> (i32, i32) {
        let (w, h) = (width as i32, height as i32);
        match self {
            AlignPreset::Center => (0, 0),
            AlignPreset::Left => ((-w).div_euclid(2), 0),
            AlignPreset::Right => (w.div_euclid(2), 0),
            AlignPreset::Top => (0, (-h).div_euclid(2)),
            AlignPreset::Bottom => (0, h.div_euclid(2)),
        }
    }
}

/// Ordered record list with selection and reference-overlay state.
///
/// The reference index always points at a live record or is `None`; deleting
/// or reordering records keeps it attached to the same record.
#[derive(Debug, Clone, Default)]
pub struct AlignSession {
    records: Vec<SpriteImageRecord>,
    selected: Option<usize>,
    reference: Option<usize>,
}

impl AlignSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session with the images at `paths`.
    ///
    /// All headers are read before anything changes, so a failure leaves the
    /// previous records intact. With `group_by_folder`, each record is labeled
    /// with its parent directory name.
    pub fn import<P: AsRef<Path>>(&mut self, paths: &[P], group_by_folder: bool) -> Result<usize> {
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let mut record = SpriteImageRecord::from_file(path)?;
            if group_by_folder {
                record.group = parent_folder_name(path);
            }
            records.push(record);
        }
        let count = records.len();
        self.replace(records);
        info!("imported {} sprite images", count);
        Ok(count)
    }

    /// Replaces the session with already-built records.
    pub fn replace(&mut self, records: Vec<SpriteImageRecord>) {
        let first = if records.is_empty() { None } else { Some(0) };
        self.records = records;
        self.selected = first;
        self.reference = first;
    }

    pub fn records(&self) -> &[SpriteImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpriteImageRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SpriteImageRecord> {
        self.records.get_mut(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&SpriteImageRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn select_previous(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => self.select(i - 1),
            _ => false,
        }
    }

    pub fn select_next(&mut self) -> bool {
        match self.selected {
            Some(i) => self.select(i + 1),
            None => self.select(0),
        }
    }

    pub fn reference(&self) -> Option<usize> {
        self.reference
    }

    /// Sets or clears the reference overlay. Out-of-range indices are refused.
    pub fn set_reference(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.records.len() => false,
            _ => {
                self.reference = index;
                true
            }
        }
    }

    pub fn set_selected_as_reference(&mut self) -> bool {
        match self.selected {
            Some(index) => self.set_reference(Some(index)),
            None => false,
        }
    }

    /// Removes the record at `index`.
    ///
    /// The reference is cleared if it was this record and shifted down if it
    /// came after it. The selection moves to the record now at the same
    /// position (or the new last one).
    pub fn delete(&mut self, index: usize) -> Result<SpriteImageRecord> {
        if index >= self.records.len() {
            return Err(SpriteError::InvalidArg(format!(
                "record index {} out of range ({} records)",
                index,
                self.records.len()
            )));
        }
        let removed = self.records.remove(index);
        self.reference = match self.reference {
            Some(r) if r == index => None,
            Some(r) if r > index => Some(r - 1),
            other => other,
        };
        self.selected = match self.selected {
            _ if self.records.is_empty() => None,
            Some(s) if s > index => Some(s - 1),
            Some(s) => Some(s.min(self.records.len() - 1)),
            None => None,
        };
        debug!("removed record {}", removed.filename());
        Ok(removed)
    }

    pub fn delete_selected(&mut self) -> Option<SpriteImageRecord> {
        let index = self.selected?;
        self.delete(index).ok()
    }

    /// Moves the record at `from` to position `to`, shifting the ones between.
    /// Selection and reference follow the records they point at.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.records.len();
        if from >= len || to >= len {
            return Err(SpriteError::InvalidArg(format!(
                "cannot move record {} to {} ({} records)",
                from, to, len
            )));
        }
        if from == to {
            return Ok(());
        }
        let record = self.records.remove(from);
        self.records.insert(to, record);
        self.selected = self.selected.map(|i| remap_after_move(i, from, to));
        self.reference = self.reference.map(|i| remap_after_move(i, from, to));
        Ok(())
    }

    pub fn move_selected_up(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => self.move_to(i, i - 1).is_ok(),
            _ => false,
        }
    }

    pub fn move_selected_down(&mut self) -> bool {
        match self.selected {
            Some(i) if i + 1 < self.records.len() => self.move_to(i, i + 1).is_ok(),
            _ => false,
        }
    }

    /// Shifts the selected record's offset by `(dx, dy)`.
    pub fn nudge_selected(&mut self, dx: i32, dy: i32) -> bool {
        match self.selected_mut() {
            Some(record) => {
                record.nudge(dx, dy);
                true
            }
            None => false,
        }
    }

    pub fn set_selected_offset(&mut self, offset_x: i32, offset_y: i32) -> bool {
        match self.selected_mut() {
            Some(record) => {
                record.set_offset(offset_x, offset_y);
                true
            }
            None => false,
        }
    }

    pub fn reset_selected_offset(&mut self) -> bool {
        self.set_selected_offset(0, 0)
    }

    pub fn apply_preset_selected(&mut self, preset: AlignPreset) -> bool {
        match self.selected_mut() {
            Some(record) => {
                record.apply_preset(preset);
                true
            }
            None => false,
        }
    }

    pub fn apply_preset_all(&mut self, preset: AlignPreset) {
        for record in &mut self.records {
            record.apply_preset(preset);
        }
    }

    fn selected_mut(&mut self) -> Option<&mut SpriteImageRecord> {
        let index = self.selected?;
        self.records.get_mut(index)
    }
}

fn remap_after_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}
