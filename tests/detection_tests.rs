use image::{Rgb, RgbImage};
use sprite_sheet_kit::{
    DetectParams, DetectionSource, NoProgress, Pixel, Pixmap, Rect, Result, detect_file,
    detect_sprites, sort_reading_order, spawn_detection,
};
use tempfile::tempdir;

const BACKGROUND: Pixel = Pixel {
    r: 255,
    g: 0,
    b: 255,
    a: 255,
};

/// Magenta sheet with solid blobs of varying colors.
fn sheet(width: u32, height: u32, blobs: &[Rect]) -> Pixmap {
    Pixmap::from_fn(width, height, |x, y| {
        match blobs.iter().position(|b| b.contains(x as i32, y as i32)) {
            Some(i) => Pixel::rgb((i * 37 % 128) as u8, (i * 91 % 200) as u8, 40),
            None => BACKGROUND,
        }
    })
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    !a.intersection(b).is_empty()
}

#[test]
fn test_blobs_are_found_with_exact_bounds() {
    let blobs = vec![
        Rect::new(3, 4, 5, 5),
        Rect::new(20, 2, 17, 9),
        Rect::new(50, 30, 6, 22),
        Rect::new(4, 40, 30, 12),
        Rect::new(70, 3, 9, 9),
    ];
    let img = sheet(90, 60, &blobs);
    let params = DetectParams::new().with_sort(false);
    let mut found = detect_sprites(&img, &params, &mut NoProgress);

    let mut expected = blobs.clone();
    let key = |r: &Rect| (r.y, r.x);
    found.sort_by_key(key);
    expected.sort_by_key(key);
    assert_eq!(found, expected);

    for (i, a) in found.iter().enumerate() {
        for b in &found[i + 1..] {
            assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn test_components_below_five_pixels_are_dropped() {
    let blobs = [
        Rect::new(2, 2, 4, 4),
        Rect::new(10, 2, 5, 5),
        Rect::new(20, 2, 30, 4),
        Rect::new(2, 12, 4, 30),
    ];
    let img = sheet(60, 50, &blobs);
    let regions = detect_sprites(&img, &DetectParams::new(), &mut NoProgress);
    assert_eq!(regions, vec![Rect::new(10, 2, 5, 5)]);
}

#[test]
fn test_grid_comes_back_in_reading_order() {
    let (rows, cols) = (3, 4);
    let mut blobs = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            blobs.push(Rect::new(5 + c * 20, 5 + r * 20, 10, 10));
        }
    }
    let mut shuffled = blobs.clone();
    shuffled.reverse();
    shuffled.swap(1, 7);
    assert_eq!(sort_reading_order(&shuffled), blobs);

    let img = sheet(90, 70, &blobs);
    assert_eq!(detect_sprites(&img, &DetectParams::new(), &mut NoProgress), blobs);
}

#[test]
fn test_scan_areas_restrict_detection() {
    let blobs = [Rect::new(5, 5, 10, 10), Rect::new(40, 5, 10, 10), Rect::new(5, 40, 10, 10)];
    let img = sheet(60, 60, &blobs);
    let params = DetectParams::new().with_scan_areas(vec![Rect::new(0, 0, 30, 60)]);
    let regions = detect_sprites(&img, &params, &mut NoProgress);
    assert_eq!(regions, vec![blobs[0], blobs[2]]);
}

#[test]
fn test_detect_file_decodes_rgb_png() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("sheet.png");

    let mut img = RgbImage::from_pixel(40, 30, Rgb([255, 255, 255]));
    for y in 10..20 {
        for x in 5..12 {
            img.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    img.save(&path).expect("write fixture");

    let regions = detect_file(&path, &DetectParams::new(), &mut NoProgress)?;
    assert_eq!(regions, vec![Rect::new(5, 10, 7, 10)]);
    Ok(())
}

#[test]
fn test_worker_streams_progress_then_result() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("sheet.png");
    let blobs = [Rect::new(5, 5, 10, 10), Rect::new(30, 8, 8, 12)];
    sheet(50, 30, &blobs).save_png(&path)?;

    let handle = spawn_detection(DetectionSource::Path(path), DetectParams::new())?;
    let mut progress = Vec::new();
    let mut sink = |p: u8| progress.push(p);
    let regions = handle.wait(&mut sink)?;

    assert_eq!(regions, blobs.to_vec());
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));
    Ok(())
}
