pub mod assets;
pub mod build;
pub mod markdown;

pub use build::{BuildSummary, build_site, output_path_for};
