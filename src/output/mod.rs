//! Output module: file export and console summary

mod export;
mod summary;

pub use export::{export, export_csv, export_json, output_path, ExportFormat};
pub use summary::print_summary;
