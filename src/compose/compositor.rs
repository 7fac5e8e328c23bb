//! Assembles sprite images into one transparent sheet.

use std::path::Path;

use log::info;

use crate::align::record::SpriteImageRecord;
use crate::compose::layout::{SheetLayout, StitchParams, plan_layout};
use crate::raster::image_formats::{Pixmap, PixmapCompositeExt};
use crate::utils::error::{Result, SpriteError};

/// A finished sheet and the layout that produced it.
#[derive(Debug, Clone)]
pub struct StitchedSheet {
    pub canvas: Pixmap,
    pub layout: SheetLayout,
}

impl StitchedSheet {
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Writes the sheet as an RGBA PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.canvas.save_png(path)?;
        info!(
            "saved {}x{} sheet to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

/// Decodes every placed record's image and stitches them.
///
/// Any decode failure aborts the whole stitch; no partial sheet is returned.
pub fn compose(records: &[SpriteImageRecord], params: &StitchParams) -> Result<StitchedSheet> {
    let layout = plan_layout(records, params)?;
    let paths: Vec<&Path> = layout
        .placements
        .iter()
        .map(|p| records[p.record_index].source_path.as_path())
        .collect();
    let images = load_images(&paths)?;
    Ok(assemble(layout, &images, params))
}

/// Stitches already decoded images; `images[i]` belongs to `records[i]`.
///
/// Layout uses the dimensions cached on each record, as [`compose`] does.
pub fn compose_images(
    records: &[SpriteImageRecord],
    images: &[Pixmap],
    params: &StitchParams,
) -> Result<StitchedSheet> {
    if records.len() != images.len() {
        return Err(SpriteError::InvalidArg(format!(
            "{} records but {} images",
            records.len(),
            images.len()
        )));
    }
    let layout = plan_layout(records, params)?;
    let placed: Vec<Pixmap> = layout
        .placements
        .iter()
        .map(|p| images[p.record_index].clone())
        .collect();
    Ok(assemble(layout, &placed, params))
}

/// Pastes `images` (one per placement, in placement order) onto a
/// transparent canvas.
fn assemble(layout: SheetLayout, images: &[Pixmap], params: &StitchParams) -> StitchedSheet {
    let mut canvas = Pixmap::new(layout.width, layout.height);
    for (placement, image) in layout.placements.iter().zip(images) {
        match params.single_size {
            Some((w, h)) => {
                let cell = image.centered_on(w, h);
                canvas.paste(&cell, placement.rect.x, placement.rect.y);
            }
            None => canvas.paste(image, placement.rect.x, placement.rect.y),
        }
    }
    info!(
        "stitched {} sprites into {}x{} sheet",
        layout.placements.len(),
        layout.width,
        layout.height
    );
    StitchedSheet { canvas, layout }
}

#[cfg(feature = "rayon")]
fn load_images(paths: &[&Path]) -> Result<Vec<Pixmap>> {
    use rayon::prelude::*;
    paths.par_iter().map(|path| Pixmap::open(path)).collect()
}

#[cfg(not(feature = "rayon"))]
fn load_images(paths: &[&Path]) -> Result<Vec<Pixmap>> {
    paths.iter().map(|path| Pixmap::open(path)).collect()
}
