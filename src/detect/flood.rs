//! Flood-fill sprite region detection.
//!
//! Pixels are scanned row-major inside each scan area. Every unvisited
//! foreground pixel seeds an 8-connected breadth-first fill that absorbs all
//! reachable foreground pixels and records their bounding box. The visited
//! grid is shared by all scan areas of one call, so overlapping areas never
//! report the same component twice, and a fill may run past the edge of the
//! area that seeded it.
//!
//! Components whose bounding box is smaller than `min_size` in either
//! dimension are dropped as noise; their pixels stay visited so no later seed
//! re-offers them.
//!
//! ## Coordinate System
//!
//! - **Top-down**: y=0 is the TOP of the image, matching `Pixmap`.
//! - Bounding boxes are emitted as `Rect` with inclusive min and
//!   `width = max_x - min_x + 1`.

use std::collections::VecDeque;

use bitvec::prelude::*;
use log::{debug, warn};

use crate::detect::background::BackgroundClassifier;
use crate::raster::geom::Rect;
use crate::raster::image_formats::Pixmap;
use crate::utils::progress::{ProgressSink, ProgressTracker};

/// Default noise floor: regions narrower or shorter than this are discarded.
pub const DEFAULT_MIN_SIZE: u32 = 5;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Connected-component detector over one decoded image.
///
/// Owns its scratch `visited` grid for the duration of a call; a new grid is
/// allocated on every [`RegionDetector::detect`].
pub struct RegionDetector<'a> {
    image: &'a Pixmap,
    classifier: BackgroundClassifier,
    min_size: u32,
    visited: BitVec,
}

impl<'a> RegionDetector<'a> {
    pub fn new(image: &'a Pixmap, classifier: BackgroundClassifier) -> Self {
        Self {
            image,
            classifier,
            min_size: DEFAULT_MIN_SIZE,
            visited: BitVec::new(),
        }
    }

    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    /// Finds all sprite regions inside `scan_areas` (the whole image when
    /// empty), in discovery order.
    ///
    /// Areas are clipped to the image; an area entirely outside it is skipped.
    /// Progress is reported once per scanned row, as a share of all rows
    /// across all areas, and ends at 100.
    pub fn detect<P: ProgressSink + ?Sized>(
        &mut self,
        scan_areas: &[Rect],
        progress: &mut P,
    ) -> Vec<Rect> {
        let bounds = self.image.bounds();
        let areas: Vec<Rect> = if scan_areas.is_empty() {
            vec![bounds]
        } else {
            scan_areas
                .iter()
                .filter_map(|area| {
                    let clipped = area.intersection(&bounds);
                    if clipped.is_empty() {
                        warn!("scan area {:?} lies outside the image, skipping", area);
                        None
                    } else {
                        Some(clipped)
                    }
                })
                .collect()
        };

        let pixel_count = self.image.width() as usize * self.image.height() as usize;
        self.visited = bitvec![0; pixel_count];

        let total_rows: u64 = areas.iter().map(|a| a.height as u64).sum();
        let mut tracker = ProgressTracker::new(progress, total_rows);
        let mut regions = Vec::new();
        let mut rejected = 0usize;

        for area in &areas {
            for y in area.y..area.y_max() {
                for x in area.x..area.x_max() {
                    let (x, y) = (x as u32, y as u32);
                    let idx = self.index(x, y);
                    if self.visited[idx] {
                        continue;
                    }
                    if !self.classifier.is_foreground(self.image.get_pixel(x, y)) {
                        continue;
                    }
                    match self.flood(x, y) {
                        Some(rect) => regions.push(rect),
                        None => rejected += 1,
                    }
                }
                tracker.step();
            }
        }
        tracker.finish();

        debug!(
            "detected {} regions in {} scan areas ({} below {}px discarded)",
            regions.len(),
            areas.len(),
            rejected,
            self.min_size
        );
        regions
    }

    /// Breadth-first 8-connected fill from a foreground seed. Returns the
    /// bounding box, or `None` when it is below the noise floor.
    fn flood(&mut self, start_x: u32, start_y: u32) -> Option<Rect> {
        let (width, height) = self.image.dimensions();
        let mut queue = VecDeque::new();
        let seed = self.index(start_x, start_y);
        self.visited.set(seed, true);
        queue.push_back((start_x, start_y));

        let (mut min_x, mut min_y) = (start_x, start_y);
        let (mut max_x, mut max_y) = (start_x, start_y);

        while let Some((x, y)) = queue.pop_front() {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            for (dx, dy) in NEIGHBORS {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                let idx = self.index(nx, ny);
                if self.visited[idx] {
                    continue;
                }
                if self.classifier.is_foreground(self.image.get_pixel(nx, ny)) {
                    self.visited.set(idx, true);
                    queue.push_back((nx, ny));
                }
            }
        }

        let region_width = max_x - min_x + 1;
        let region_height = max_y - min_y + 1;
        if region_width < self.min_size || region_height < self.min_size {
            return None;
        }
        Some(Rect::new(
            min_x as i32,
            min_y as i32,
            region_width,
            region_height,
        ))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.image.width() as usize + x as usize
    }
}
