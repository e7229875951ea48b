//! Raw pixel bytes to displayable RGBA.
//!
//! Decoding happens once per file; [`compose`] runs again on every window
//! change against the same [`SampleBuffer`].

pub mod compose;
pub mod samples;
pub mod surface;
pub mod window;

pub use compose::compose;
pub use samples::SampleBuffer;
pub use surface::{present, DisplaySurface, HandleSurface};
pub use window::{WindowLevel, WindowParameters};
