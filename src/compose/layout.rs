//! Placement math for stitched sheets.
//!
//! Every sprite is centered on its grid cell and then displaced by its own
//! offset:
//!
//! ```text
//! center = cell_top_left + base_cell / 2 + offset
//! left   = center - w / 2        right  = left + w
//! ```
//!
//! The sheet is the tight bounding box of all placed sprites, so large
//! offsets grow the canvas instead of being clipped. Placements are reported
//! in canvas coordinates (the box's top-left moved to `(0, 0)`).

use log::debug;

use crate::align::record::SpriteImageRecord;
use crate::raster::geom::Rect;
use crate::utils::error::{Result, SpriteError};

/// Grid configuration for one stitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchParams {
    /// Cells per row (default 4)
    pub columns: u32,
    /// Rows in flat mode (default 4); ignored when stitching by group
    pub rows: u32,
    /// Extra horizontal space between cells
    pub h_spacing: u32,
    /// Extra vertical space between cells
    pub v_spacing: u32,
    /// Uniform cell size; each sprite is centered, not scaled, onto it
    pub single_size: Option<(u32, u32)>,
    /// One row per group label instead of a flat row-major grid
    pub by_group: bool,
}

impl Default for StitchParams {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
            h_spacing: 0,
            v_spacing: 0,
            single_size: None,
            by_group: false,
        }
    }
}

impl StitchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_spacing(mut self, h_spacing: u32, v_spacing: u32) -> Self {
        self.h_spacing = h_spacing;
        self.v_spacing = v_spacing;
        self
    }

    pub fn with_single_size(mut self, width: u32, height: u32) -> Self {
        self.single_size = Some((width, height));
        self
    }

    pub fn with_by_group(mut self, by_group: bool) -> Self {
        self.by_group = by_group;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SpriteError::Validation(format!(
                "grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        if let Some((w, h)) = self.single_size
            && (w == 0 || h == 0)
        {
            return Err(SpriteError::Validation(format!(
                "forced sprite size must be positive, got {}x{}",
                w, h
            )));
        }
        Ok(())
    }
}

/// Where one record lands on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the record slice given to [`plan_layout`]
    pub record_index: usize,
    pub row: u32,
    pub column: u32,
    /// Pasted image bounds in canvas pixels
    pub rect: Rect,
}

/// Result of [`plan_layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    /// Records that did not fit the grid
    pub dropped: Vec<usize>,
}

/// Computes placements and canvas size for `records`.
///
/// Flat mode fills `columns x rows` cells row-major; records past the last
/// cell are dropped. Group mode gives each distinct `group` label one row in
/// first-seen order (unlabeled records share a row of their own) and drops
/// records past `columns` within a group.
pub fn plan_layout(records: &[SpriteImageRecord], params: &StitchParams) -> Result<SheetLayout> {
    params.validate()?;
    if records.is_empty() {
        return Err(SpriteError::InvalidArg("no sprites to stitch".to_string()));
    }

    let (cell_width, cell_height) = params.single_size.unwrap_or_else(|| {
        records.iter().fold((0, 0), |(w, h), r| {
            (w.max(r.width()), h.max(r.height()))
        })
    });
    let pitch_x = cell_width as i64 + params.h_spacing as i64;
    let pitch_y = cell_height as i64 + params.v_spacing as i64;

    let (cells, dropped) = if params.by_group {
        assign_grouped(records, params.columns)
    } else {
        assign_flat(records.len(), params.columns, params.rows)
    };

    let mut boxes: Vec<(usize, u32, u32, i64, i64, u32, u32)> = Vec::with_capacity(cells.len());
    for (record_index, row, column) in cells {
        let record = &records[record_index];
        let (w, h) = params
            .single_size
            .unwrap_or((record.width(), record.height()));
        let center_x = column as i64 * pitch_x + (cell_width / 2) as i64 + record.offset_x as i64;
        let center_y = row as i64 * pitch_y + (cell_height / 2) as i64 + record.offset_y as i64;
        let left = center_x - (w / 2) as i64;
        let top = center_y - (h / 2) as i64;
        boxes.push((record_index, row, column, left, top, w, h));
    }

    let min_x = boxes.iter().map(|b| b.3).min().unwrap_or(0);
    let min_y = boxes.iter().map(|b| b.4).min().unwrap_or(0);
    let max_x = boxes.iter().map(|b| b.3 + b.5 as i64).max().unwrap_or(0);
    let max_y = boxes.iter().map(|b| b.4 + b.6 as i64).max().unwrap_or(0);

    let placements = boxes
        .into_iter()
        .map(|(record_index, row, column, left, top, w, h)| Placement {
            record_index,
            row,
            column,
            rect: Rect::new((left - min_x) as i32, (top - min_y) as i32, w, h),
        })
        .collect::<Vec<_>>();

    let layout = SheetLayout {
        cell_width,
        cell_height,
        width: (max_x - min_x).max(0) as u32,
        height: (max_y - min_y).max(0) as u32,
        placements,
        dropped,
    };
    debug!(
        "planned {}x{} sheet: {} placed, {} dropped, cell {}x{}",
        layout.width,
        layout.height,
        layout.placements.len(),
        layout.dropped.len(),
        cell_width,
        cell_height
    );
    Ok(layout)
}

type CellAssignment = (Vec<(usize, u32, u32)>, Vec<usize>);

fn assign_flat(count: usize, columns: u32, rows: u32) -> CellAssignment {
    let capacity = columns as usize * rows as usize;
    let cells = (0..count.min(capacity))
        .map(|i| (i, (i / columns as usize) as u32, (i % columns as usize) as u32))
        .collect();
    let dropped = (capacity..count).collect();
    (cells, dropped)
}

fn assign_grouped(records: &[SpriteImageRecord], columns: u32) -> CellAssignment {
    let mut groups: Vec<(Option<&str>, Vec<usize>)> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let label = record.group.as_deref();
        match groups.iter_mut().find(|(g, _)| *g == label) {
            Some((_, members)) => members.push(i),
            None => groups.push((label, vec![i])),
        }
    }

    let mut cells = Vec::new();
    let mut dropped = Vec::new();
    for (row, (_, members)) in groups.into_iter().enumerate() {
        for (column, index) in members.into_iter().enumerate() {
            if column < columns as usize {
                cells.push((index, row as u32, column as u32));
            } else {
                dropped.push(index);
            }
        }
    }
    dropped.sort_unstable();
    (cells, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(w: u32, h: u32) -> SpriteImageRecord {
        SpriteImageRecord::new("s.png", w, h)
    }

    #[test]
    fn test_single_sprite_canvas_is_native_size() -> Result<()> {
        for (w, h) in [(16, 16), (15, 9), (1, 1)] {
            let layout = plan_layout(&[rec(w, h)], &StitchParams::new())?;
            assert_eq!((layout.width, layout.height), (w, h));
            assert_eq!(layout.placements[0].rect, Rect::new(0, 0, w, h));
        }
        Ok(())
    }

    #[test]
    fn test_flat_grid_row_major_with_spacing() -> Result<()> {
        let records = vec![rec(10, 10); 5];
        let params = StitchParams::new().with_grid(2, 3).with_spacing(4, 2);
        let layout = plan_layout(&records, &params)?;
        let cells: Vec<(u32, u32)> = layout.placements.iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        assert_eq!(layout.placements[3].rect, Rect::new(14, 12, 10, 10));
        // two columns of 10 with one 4px gap, three rows of 10 with two 2px gaps
        assert_eq!((layout.width, layout.height), (24, 34));
        Ok(())
    }

    #[test]
    fn test_flat_overflow_is_dropped() -> Result<()> {
        let records = vec![rec(8, 8); 7];
        let layout = plan_layout(&records, &StitchParams::new().with_grid(2, 2))?;
        assert_eq!(layout.placements.len(), 4);
        assert_eq!(layout.dropped, vec![4, 5, 6]);
        Ok(())
    }

    #[test]
    fn test_offsets_grow_the_canvas() -> Result<()> {
        let records = vec![rec(10, 10), rec(10, 10).with_offset(-5, 20)];
        let layout = plan_layout(&records, &StitchParams::new().with_grid(2, 1))?;
        // second sprite: center (15 - 5, 5 + 20) → box (5..15, 20..30)
        assert_eq!((layout.width, layout.height), (15, 30));
        assert_eq!(layout.placements[1].rect, Rect::new(5, 20, 10, 10));
        Ok(())
    }

    #[test]
    fn test_cells_use_largest_sprite() -> Result<()> {
        let records = vec![rec(20, 10), rec(10, 30)];
        let layout = plan_layout(&records, &StitchParams::new())?;
        assert_eq!((layout.cell_width, layout.cell_height), (20, 30));
        // first: center (10, 15) → top 10; second: center (30, 15) → left 25
        assert_eq!(layout.placements[0].rect, Rect::new(0, 10, 20, 10));
        assert_eq!(layout.placements[1].rect, Rect::new(25, 0, 10, 30));
        Ok(())
    }

    #[test]
    fn test_grouped_rows_and_truncation() -> Result<()> {
        let records = vec![
            rec(8, 8).with_group("walk"),
            rec(8, 8).with_group("idle"),
            rec(8, 8).with_group("walk"),
            rec(8, 8),
            rec(8, 8).with_group("walk"),
        ];
        let params = StitchParams::new().with_grid(2, 1).with_by_group(true);
        let layout = plan_layout(&records, &params)?;
        let cells: Vec<(usize, u32, u32)> = layout
            .placements
            .iter()
            .map(|p| (p.record_index, p.row, p.column))
            .collect();
        assert_eq!(cells, [(0, 0, 0), (2, 0, 1), (1, 1, 0), (3, 2, 0)]);
        assert_eq!(layout.dropped, vec![4]);
        assert_eq!(layout.height, 24);
        Ok(())
    }

    #[test]
    fn test_forced_size_sets_cell_and_box() -> Result<()> {
        let records = vec![rec(5, 7), rec(12, 3)];
        let params = StitchParams::new().with_single_size(16, 16);
        let layout = plan_layout(&records, &params)?;
        assert_eq!((layout.width, layout.height), (32, 16));
        assert_eq!(layout.placements[1].rect, Rect::new(16, 0, 16, 16));
        Ok(())
    }

    #[test]
    fn test_invalid_params() {
        assert!(plan_layout(&[rec(4, 4)], &StitchParams::new().with_grid(0, 3)).is_err());
        assert!(plan_layout(&[rec(4, 4)], &StitchParams::new().with_single_size(0, 3)).is_err());
        assert!(matches!(
            plan_layout(&[], &StitchParams::new()),
            Err(SpriteError::InvalidArg(_))
        ));
    }
}
