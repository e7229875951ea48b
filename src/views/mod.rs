pub mod image_viewer;
pub mod metadata_panel;

pub use image_viewer::{image_panel, window_controls};
pub use metadata_panel::metadata_panel;
