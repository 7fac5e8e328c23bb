//! Sprite region detection.
//!
//! ## Module Map
//!
//! - `background` - corner-sampled background color and the per-pixel
//!   background predicate.
//! - `flood` - 8-connected flood fill over scan areas producing bounding boxes.
//! - `reading_order` - row clustering into top-to-bottom, left-to-right order.
//! - `worker` - runs a detection on a background thread and streams progress.
//!
//! [`detect_sprites`] chains the three passes: background estimation (unless a
//! reference color is given), flood fill, then the optional reading-order sort.

pub mod background;
pub mod flood;
pub mod reading_order;
pub mod worker;

use std::path::Path;

use log::info;

use crate::raster::geom::Rect;
use crate::raster::image_formats::{Pixel, Pixmap};
use crate::utils::error::Result;
use crate::utils::progress::ProgressSink;

pub use background::{BackgroundClassifier, detect_background, is_background};
pub use flood::RegionDetector;
pub use reading_order::sort_reading_order;
pub use worker::{DetectionEvent, DetectionHandle, DetectionSource, spawn_detection};

/// Parameters for one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectParams {
    /// Euclidean RGB distance below which a pixel matches the background
    /// (10..=200, default 50)
    pub threshold: u32,
    /// Regions narrower or shorter than this are dropped (default 5)
    pub min_size: u32,
    /// Reference background; sampled from the corners when `None`
    pub background: Option<Pixel>,
    /// Areas to scan; the whole image when empty
    pub scan_areas: Vec<Rect>,
    /// Reorder the result top-to-bottom, left-to-right (default true)
    pub sort: bool,
}

impl DetectParams {
    pub const MIN_THRESHOLD: u32 = 10;
    pub const MAX_THRESHOLD: u32 = 200;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the background distance threshold, clamped to `10..=200`.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold.clamp(Self::MIN_THRESHOLD, Self::MAX_THRESHOLD);
        self
    }

    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_background(mut self, background: Pixel) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_scan_areas(mut self, scan_areas: Vec<Rect>) -> Self {
        self.scan_areas = scan_areas;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Resolves the classifier for `image`, sampling corners if needed.
    pub fn classifier_for(&self, image: &Pixmap) -> BackgroundClassifier {
        let reference = self
            .background
            .unwrap_or_else(|| detect_background(image));
        BackgroundClassifier::new(reference, self.threshold)
    }
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            threshold: 50,
            min_size: flood::DEFAULT_MIN_SIZE,
            background: None,
            scan_areas: Vec::new(),
            sort: true,
        }
    }
}

/// Detects sprite regions in an already decoded image.
pub fn detect_sprites<P: ProgressSink + ?Sized>(
    image: &Pixmap,
    params: &DetectParams,
    progress: &mut P,
) -> Vec<Rect> {
    let classifier = params.classifier_for(image);
    let regions = RegionDetector::new(image, classifier)
        .with_min_size(params.min_size)
        .detect(&params.scan_areas, progress);

    info!(
        "detection found {} sprites in {}x{} image",
        regions.len(),
        image.width(),
        image.height()
    );

    if params.sort {
        sort_reading_order(&regions)
    } else {
        regions
    }
}

/// Decodes `path` and detects its sprite regions.
///
/// A decode failure is returned as an error; no partial result is produced.
pub fn detect_file<P: ProgressSink + ?Sized>(
    path: impl AsRef<Path>,
    params: &DetectParams,
    progress: &mut P,
) -> Result<Vec<Rect>> {
    let image = Pixmap::open(path)?;
    Ok(detect_sprites(&image, params, progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::progress::NoProgress;

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(DetectParams::new().with_threshold(1).threshold, 10);
        assert_eq!(DetectParams::new().with_threshold(999).threshold, 200);
        assert_eq!(DetectParams::new().with_threshold(75).threshold, 75);
    }

    #[test]
    fn test_detect_sprites_sorts_by_default() {
        // lower-left blob is discovered after upper-right in raster order
        let blobs = [Rect::new(30, 0, 8, 8), Rect::new(0, 2, 8, 8)];
        let img = Pixmap::from_fn(40, 12, |x, y| {
            if blobs.iter().any(|b| b.contains(x as i32, y as i32)) {
                Pixel::black()
            } else {
                Pixel::white()
            }
        });

        let sorted = detect_sprites(&img, &DetectParams::new(), &mut NoProgress);
        assert_eq!(sorted, vec![blobs[1], blobs[0]]);

        let raw = detect_sprites(&img, &DetectParams::new().with_sort(false), &mut NoProgress);
        assert_eq!(raw, vec![blobs[0], blobs[1]]);
    }

    #[test]
    fn test_explicit_background_overrides_corners() {
        // white sheet with one black square: using black as background hides it
        let img = Pixmap::from_fn(20, 20, |x, y| {
            if (5..15).contains(&x) && (5..15).contains(&y) {
                Pixel::black()
            } else {
                Pixel::white()
            }
        });
        let params = DetectParams::new().with_background(Pixel::black());
        let regions = detect_sprites(&img, &params, &mut NoProgress);
        // the white frame becomes the only foreground component
        assert_eq!(regions, vec![Rect::new(0, 0, 20, 20)]);
    }

    #[test]
    fn test_detect_file_reports_decode_errors() {
        let err = detect_file("no/such/sheet.png", &DetectParams::new(), &mut NoProgress)
            .unwrap_err();
        assert!(matches!(err, crate::utils::error::SpriteError::Decode { .. }));
    }
}
