//! Top-to-bottom, left-to-right ordering of detected regions.
//!
//! Regions are first sorted by vertical center, then grouped greedily into
//! rows: a region joins the current row while its vertical center stays
//! within `0.7 * average height` of the row's running mean center. Each row is
//! finally sorted left-to-right by horizontal center.

use crate::raster::geom::Rect;

/// Fraction of the mean region height tolerated between a region's center and
/// its row's mean center.
pub const ROW_TOLERANCE_FACTOR: f64 = 0.7;

/// Returns `regions` in reading order. The input is not modified.
pub fn sort_reading_order(regions: &[Rect]) -> Vec<Rect> {
    if regions.len() < 2 {
        return regions.to_vec();
    }

    let mut by_center: Vec<Rect> = regions.to_vec();
    by_center.sort_by(|a, b| a.center().1.total_cmp(&b.center().1));

    let avg_height =
        by_center.iter().map(|r| r.height as f64).sum::<f64>() / by_center.len() as f64;
    let tolerance = ROW_TOLERANCE_FACTOR * avg_height;

    let mut rows: Vec<Vec<Rect>> = Vec::new();
    let mut row: Vec<Rect> = Vec::new();
    let mut row_center_sum = 0.0;

    for rect in by_center {
        let cy = rect.center().1;
        if !row.is_empty() {
            let row_center = row_center_sum / row.len() as f64;
            if (cy - row_center).abs() > tolerance {
                rows.push(std::mem::take(&mut row));
                row_center_sum = 0.0;
            }
        }
        row_center_sum += cy;
        row.push(rect);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    let mut ordered = Vec::with_capacity(regions.len());
    for mut row in rows {
        row.sort_by(|a, b| a.center().0.total_cmp(&b.center().0));
        ordered.extend(row);
    }
    ordered
}
