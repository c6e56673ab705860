pub mod launcher;

pub use launcher::{launch_download_browser, validate_paths, write_download_preferences};
