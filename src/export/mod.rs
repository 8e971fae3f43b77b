pub mod json;

pub use json::{export_json_to_path, export_stats, import_json, import_reviews, import_stats};
