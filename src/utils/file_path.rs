//! File naming helpers for sprite imports and exports.
//!
//! Exported crops are named `{stem}_{NNNN}.png` with a 1-based, zero-padded
//! counter; grouped exports go into one folder per scan area named `A{n}`.

use std::path::{Path, PathBuf};

/// Returns the final path component as a string (`"a/b/hero.png"` → `"hero.png"`).
///
/// Paths without a file name (e.g. `".."`) fall back to the lossy full path.
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Returns the file name without its extension (`"a/b/hero.png"` → `"hero"`).
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(path))
}

/// Returns the name of the directory containing `path`, if any.
///
/// Used as the group label when sprites are imported from per-animation folders.
pub fn parent_folder_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

/// Builds the file name of the `number`-th exported sprite (1-based).
///
/// # Examples
///
/// ```
/// use sprite_sheet_kit::utils::file_path::sprite_file_name;
///
/// assert_eq!(sprite_file_name("sheet", 7), "sheet_0007.png");
/// ```
pub fn sprite_file_name(stem: &str, number: usize) -> String {
    format!("{}_{:04}.png", stem, number)
}

/// Builds the folder name for the scan area at `area_index` (0-based → `A1`, `A2`, ...).
pub fn area_folder_name(area_index: usize) -> String {
    format!("A{}", area_index + 1)
}

/// Resolves the output path of one exported sprite.
pub fn sprite_output_path(
    out_dir: &Path,
    area_index: Option<usize>,
    stem: &str,
    number: usize,
) -> PathBuf {
    match area_index {
        Some(area) => out_dir
            .join(area_folder_name(area))
            .join(sprite_file_name(stem, number)),
        None => out_dir.join(sprite_file_name(stem, number)),
    }
}
