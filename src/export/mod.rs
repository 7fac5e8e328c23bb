//! Exporting detected sprites as individual files.

pub mod splitter;

pub use splitter::{
    ExportEntry, ExportOptions, area_for_region, export_sheet, export_sprites, plan_export,
};
