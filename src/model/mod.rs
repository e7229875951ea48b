pub mod dataset;
pub mod descriptor;
pub mod loader;
pub mod session;

pub use descriptor::{ImageDescriptor, PhotometricInterpretation};
pub use loader::LoadedImage;
pub use session::Session;
