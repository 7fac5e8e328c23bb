// src/image_formats.rs

//! In-memory RGBA raster used by detection, export and stitching.
//!
//! Every image entering the toolkit is normalized to 8-bit RGBA on load, so
//! the detector, the exporter and the compositor all sample the same `Pixel`
//! layout. Decoding and encoding go through the `image` crate; the buffer
//! itself stays a plain row-major `Vec<Pixel>` that can be viewed as bytes.
//!
//! An extension trait, `PixmapCompositeExt`, adds the alpha-masked paste used
//! to assemble sprite sheets.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use image::RgbaImage;

use crate::raster::geom::Rect;
use crate::utils::error::{Result, SpriteError};

// --- Pixel Type Definitions ---

/// A single RGBA pixel with 8-bit components.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }

    /// An opaque pixel.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Pixel::default()
    }

    pub fn black() -> Self {
        Pixel::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Pixel::rgb(255, 255, 255)
    }

    /// Squared Euclidean distance between the RGB parts, alpha ignored.
    pub fn rgb_distance_sq(&self, other: &Pixel) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(arr: [u8; 4]) -> Self {
        Pixel {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}

// --- Pixmap Type (RGBA Image Buffer) ---

/// A 2D buffer of RGBA pixels stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl Pixmap {
    /// Creates a new fully transparent pixmap with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Pixmap::from_pixel(width, height, Pixel::transparent())
    }

    /// Creates a pixmap filled with a single pixel value.
    pub fn from_pixel(width: u32, height: u32, pixel: Pixel) -> Self {
        Pixmap {
            width,
            height,
            data: vec![pixel; width as usize * height as usize],
        }
    }

    /// Creates a pixmap by calling a function for each pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Pixmap {
            width,
            height,
            data,
        }
    }

    /// Decodes an image file (PNG/JPEG/BMP/GIF) and normalizes it to RGBA.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| SpriteError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Pixmap::from(decoded.to_rgba8()))
    }

    /// Encodes the pixmap losslessly as PNG, keeping the alpha channel.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| SpriteError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        // Length always matches width * height * 4.
        RgbaImage::from_raw(self.width, self.height, self.as_raw().to_vec())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as a tuple (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the full image as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height);
        self.data[self.index(x, y)]
    }

    pub fn get_pixel_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        self.data[idx] = pixel;
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Returns raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The four corner pixels in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> Option<[Pixel; 4]> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let (w, h) = (self.width - 1, self.height - 1);
        Some([
            self.get_pixel(0, 0),
            self.get_pixel(w, 0),
            self.get_pixel(0, h),
            self.get_pixel(w, h),
        ])
    }

    /// Copies `rect` out of the image. Parts of `rect` outside the image come
    /// back transparent.
    pub fn crop(&self, rect: Rect) -> Pixmap {
        let mut out = Pixmap::new(rect.width, rect.height);
        let overlap = self.bounds().intersection(&rect);
        if overlap.is_empty() {
            return out;
        }
        for y in overlap.y..overlap.y_max() {
            let src_start = self.index(overlap.x as u32, y as u32);
            let src = &self.data[src_start..src_start + overlap.width as usize];
            let dst_start = out.index((overlap.x - rect.x) as u32, (y - rect.y) as u32);
            out.data[dst_start..dst_start + overlap.width as usize].copy_from_slice(src);
        }
        out
    }

    /// Centers this image (without scaling) on a transparent canvas of the
    /// given size. Images larger than the canvas are clipped symmetrically.
    pub fn centered_on(&self, width: u32, height: u32) -> Pixmap {
        let mut canvas = Pixmap::new(width, height);
        let x = (width as i64 - self.width as i64).div_euclid(2) as i32;
        let y = (height as i64 - self.height as i64).div_euclid(2) as i32;
        canvas.paste(self, x, y);
        canvas
    }

    /// Replaces every pixel whose RGB lies within `threshold` of `background`
    /// with fully transparent black.
    pub fn clear_background(&mut self, background: Pixel, threshold: u32) {
        let limit = threshold.saturating_mul(threshold);
        for pixel in &mut self.data {
            if pixel.rgb_distance_sq(&background) < limit {
                *pixel = Pixel::transparent();
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl From<RgbaImage> for Pixmap {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let data: Vec<Pixel> = bytemuck::cast_slice(img.as_raw()).to_vec();
        Pixmap {
            width,
            height,
            data,
        }
    }
}

/// Alpha-masked compositing used when stitching sheets.
pub trait PixmapCompositeExt {
    /// Pastes `source` with its top-left corner at `(x_pos, y_pos)`, using the
    /// source alpha as the paste mask.
    ///
    /// For each channel (alpha included) the new value `D'` is computed from
    /// the destination `D`, the source `S` and the mask `A` (0.0 to 1.0) as
    /// `D' = D + (S - D) * A`. Fully opaque source pixels are copied verbatim
    /// and fully transparent ones leave the destination untouched. Parts of
    /// the source outside the destination are clipped.
    fn paste(&mut self, source: &Pixmap, x_pos: i32, y_pos: i32);
}

impl PixmapCompositeExt for Pixmap {
    fn paste(&mut self, source: &Pixmap, x_pos: i32, y_pos: i32) {
        let self_rect = self.bounds();
        let src_rect = Rect::new(x_pos, y_pos, source.width, source.height);
        let overlap = self_rect.intersection(&src_rect);

        if overlap.is_empty() {
            return;
        }

        let multipliers: Vec<i32> = (0..=255).map(|i| 0x10000 * i / 255).collect();

        for y in 0..overlap.height {
            for x in 0..overlap.width {
                let self_x = (overlap.x + x as i32) as u32;
                let self_y = (overlap.y + y as i32) as u32;
                let src_x = (self_x as i32 - x_pos) as u32;
                let src_y = (self_y as i32 - y_pos) as u32;

                let src = source.get_pixel(src_x, src_y);
                if src.a == 0 {
                    continue;
                }

                let dst = self.get_pixel_mut(self_x, self_y);

                if src.a == 255 {
                    *dst = src;
                } else {
                    let level = multipliers[src.a as usize];
                    let blend = |d: u8, s: u8| -> u8 {
                        let d = d as i32;
                        let s = s as i32;
                        (d + (((s - d) * level) >> 16)) as u8
                    };
                    *dst = Pixel::new(
                        blend(dst.r, src.r),
                        blend(dst.g, src.g),
                        blend(dst.b, src.b),
                        blend(dst.a, src.a),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_pads_outside_with_transparency() {
        let img = Pixmap::from_pixel(4, 4, Pixel::rgb(10, 20, 30));
        let crop = img.crop(Rect::new(2, 2, 4, 4));
        assert_eq!(crop.dimensions(), (4, 4));
        assert_eq!(crop.get_pixel(0, 0), Pixel::rgb(10, 20, 30));
        assert_eq!(crop.get_pixel(1, 1), Pixel::rgb(10, 20, 30));
        assert_eq!(crop.get_pixel(2, 2), Pixel::transparent());
    }

    #[test]
    fn test_paste_opaque_copies_and_clips() {
        let mut canvas = Pixmap::new(3, 3);
        let src = Pixmap::from_pixel(2, 2, Pixel::rgb(255, 0, 0));
        canvas.paste(&src, 2, 2);
        assert_eq!(canvas.get_pixel(2, 2), Pixel::rgb(255, 0, 0));
        assert_eq!(canvas.get_pixel(1, 1), Pixel::transparent());
    }

    #[test]
    fn test_paste_transparent_source_keeps_destination() {
        let mut canvas = Pixmap::from_pixel(2, 2, Pixel::rgb(0, 0, 255));
        let src = Pixmap::from_pixel(2, 2, Pixel::new(255, 0, 0, 0));
        canvas.paste(&src, 0, 0);
        assert_eq!(canvas.get_pixel(0, 0), Pixel::rgb(0, 0, 255));
    }

    #[test]
    fn test_paste_half_alpha_blends() {
        let mut canvas = Pixmap::from_pixel(1, 1, Pixel::rgb(0, 0, 0));
        let src = Pixmap::from_pixel(1, 1, Pixel::new(200, 100, 0, 128));
        canvas.paste(&src, 0, 0);
        let p = canvas.get_pixel(0, 0);
        assert!((99..=101).contains(&p.r), "r = {}", p.r);
        assert!((49..=51).contains(&p.g), "g = {}", p.g);
        assert_eq!(p.b, 0);
    }

    #[test]
    fn test_centered_on_larger_canvas() {
        let src = Pixmap::from_pixel(2, 2, Pixel::white());
        let out = src.centered_on(6, 4);
        assert_eq!(out.dimensions(), (6, 4));
        assert_eq!(out.get_pixel(2, 1), Pixel::white());
        assert_eq!(out.get_pixel(3, 2), Pixel::white());
        assert_eq!(out.get_pixel(1, 1), Pixel::transparent());
        assert_eq!(out.get_pixel(4, 1), Pixel::transparent());
    }

    #[test]
    fn test_clear_background_uses_threshold() {
        let mut img = Pixmap::from_fn(3, 1, |x, _| match x {
            0 => Pixel::rgb(255, 255, 255),
            1 => Pixel::rgb(250, 250, 250),
            _ => Pixel::rgb(0, 0, 0),
        });
        img.clear_background(Pixel::white(), 50);
        assert_eq!(img.get_pixel(0, 0), Pixel::transparent());
        assert_eq!(img.get_pixel(1, 0), Pixel::transparent());
        assert_eq!(img.get_pixel(2, 0), Pixel::black());
    }

    #[test]
    fn test_clear_background_with_huge_threshold() {
        let mut img = Pixmap::from_fn(2, 1, |x, _| {
            if x == 0 { Pixel::black() } else { Pixel::white() }
        });
        img.clear_background(Pixel::white(), 70_000);
        assert!(img.pixels().iter().all(|p| *p == Pixel::transparent()));
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let img = Pixmap::from_fn(3, 2, |x, y| Pixel::new(x as u8, y as u8, 7, 200));
        let back = Pixmap::from(img.to_rgba_image());
        assert_eq!(back, img);
    }
}
