//! Background color estimation and per-pixel classification.

use crate::raster::image_formats::{Pixel, Pixmap};

/// Pixels at or below this alpha count as background regardless of color.
pub const OPAQUE_ALPHA: u8 = 128;

/// Estimates the sheet background from its four corners.
///
/// Returns the most frequent corner color (full RGBA equality); ties go to the
/// color seen first in top-left, top-right, bottom-left, bottom-right order.
/// An empty image has no corners and yields a transparent pixel.
pub fn detect_background(image: &Pixmap) -> Pixel {
    let Some(corners) = image.corners() else {
        return Pixel::transparent();
    };

    let mut counts: Vec<(Pixel, usize)> = Vec::with_capacity(4);
    for corner in corners {
        match counts.iter_mut().find(|(color, _)| *color == corner) {
            Some((_, count)) => *count += 1,
            None => counts.push((corner, 1)),
        }
    }

    let mut best = counts[0];
    for &candidate in &counts[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0
}

/// True if `pixel` is mostly transparent or within `threshold` (Euclidean RGB
/// distance, strictly less) of `reference`.
pub fn is_background(pixel: Pixel, reference: Pixel, threshold: u32) -> bool {
    pixel.a <= OPAQUE_ALPHA
        || pixel.rgb_distance_sq(&reference) < threshold.saturating_mul(threshold)
}

/// A background reference color paired with its distance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundClassifier {
    pub reference: Pixel,
    pub threshold: u32,
}

impl BackgroundClassifier {
    pub fn new(reference: Pixel, threshold: u32) -> Self {
        Self {
            reference,
            threshold,
        }
    }

    /// Builds a classifier from the corner-sampled background of `image`.
    pub fn from_corners(image: &Pixmap, threshold: u32) -> Self {
        Self::new(detect_background(image), threshold)
    }

    pub fn is_background(&self, pixel: Pixel) -> bool {
        is_background(pixel, self.reference, self.threshold)
    }

    /// Opaque (alpha > 128) and not background: a pixel the flood fill absorbs.
    pub fn is_foreground(&self, pixel: Pixel) -> bool {
        pixel.a > OPAQUE_ALPHA && !self.is_background(pixel)
    }
}
