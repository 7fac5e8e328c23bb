//! Cutting detected regions out of a sheet into individual PNG files.
//!
//! Files are named `{stem}_{NNNN}.png`. With grouping enabled, a region whose
//! center lies in a scan area goes to that area's `A{n}` folder and takes the
//! next number of that area's own counter; the first containing area wins.
//! Regions outside every area stay in the output directory and keep their
//! 1-based position in the region list as their number.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::detect::DetectParams;
use crate::detect::background::detect_background;
use crate::raster::geom::Rect;
use crate::raster::image_formats::Pixmap;
use crate::utils::error::{Result, SpriteError};
use crate::utils::file_path::{area_folder_name, sprite_output_path, stem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Sort crops into one folder per scan area
    pub group_by_area: bool,
    /// Make pixels within this RGB distance of the sheet background transparent
    pub transparent_background: Option<u32>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_by_area(mut self, group_by_area: bool) -> Self {
        self.group_by_area = group_by_area;
        self
    }

    /// Enables background clearing; the threshold is clamped like the
    /// detection threshold.
    pub fn with_transparent_background(mut self, threshold: u32) -> Self {
        self.transparent_background = Some(
            threshold.clamp(DetectParams::MIN_THRESHOLD, DetectParams::MAX_THRESHOLD),
        );
        self
    }
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub region_index: usize,
    pub region: Rect,
    /// Scan area the region was assigned to, if grouping
    pub area: Option<usize>,
    /// 1-based number in the file name
    pub number: usize,
    pub path: PathBuf,
}

/// Index of the first area containing the center of `region`.
pub fn area_for_region(region: &Rect, areas: &[Rect]) -> Option<usize> {
    let (cx, cy) = region.center();
    areas.iter().position(|area| area.contains_point(cx, cy))
}

/// Decides the output path of every region without touching the disk.
pub fn plan_export(
    regions: &[Rect],
    areas: &[Rect],
    options: &ExportOptions,
    out_dir: &Path,
    file_stem: &str,
) -> Vec<ExportEntry> {
    let grouping = options.group_by_area && !areas.is_empty();
    let mut counters = vec![0usize; areas.len()];

    regions
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let area = if grouping {
                area_for_region(region, areas)
            } else {
                None
            };
            let number = match area {
                Some(a) => {
                    counters[a] += 1;
                    counters[a]
                }
                None => i + 1,
            };
            ExportEntry {
                region_index: i,
                region: *region,
                area,
                number,
                path: sprite_output_path(out_dir, area, file_stem, number),
            }
        })
        .collect()
}

/// Crops every region out of `image` and writes it to `out_dir`.
///
/// Area folders are created up front, one per scan area, even if no region
/// lands in some of them. Returns the written paths in region order.
pub fn export_sprites(
    image: &Pixmap,
    regions: &[Rect],
    areas: &[Rect],
    options: &ExportOptions,
    out_dir: &Path,
    file_stem: &str,
) -> Result<Vec<PathBuf>> {
    if regions.is_empty() {
        return Err(SpriteError::InvalidArg("no sprite regions to export".to_string()));
    }

    fs::create_dir_all(out_dir)?;
    if options.group_by_area {
        for i in 0..areas.len() {
            fs::create_dir_all(out_dir.join(area_folder_name(i)))?;
        }
    }

    let background = options
        .transparent_background
        .map(|threshold| (detect_background(image), threshold));

    let plan = plan_export(regions, areas, options, out_dir, file_stem);
    let mut written = Vec::with_capacity(plan.len());
    for entry in plan {
        let mut sprite = image.crop(entry.region);
        if let Some((color, threshold)) = background {
            sprite.clear_background(color, threshold);
        }
        sprite.save_png(&entry.path)?;
        debug!("wrote region {} to {}", entry.region_index, entry.path.display());
        written.push(entry.path);
    }

    info!("exported {} sprites to {}", written.len(), out_dir.display());
    Ok(written)
}

/// Opens the sheet at `sheet_path` and exports its regions, naming files
/// after the sheet's file stem.
pub fn export_sheet(
    sheet_path: impl AsRef<Path>,
    regions: &[Rect],
    areas: &[Rect],
    options: &ExportOptions,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let sheet_path = sheet_path.as_ref();
    let image = Pixmap::open(sheet_path)?;
    export_sprites(
        &image,
        regions,
        areas,
        options,
        out_dir.as_ref(),
        &stem(sheet_path),
    )
}
