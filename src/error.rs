//! Failure modes of the load and render pipeline.

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read file `{}`", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Malformed DICOM data: {source}"))]
    Parse { source: dicom::object::ReadError },

    #[snafu(display("Pixel data not found in DICOM file"))]
    MissingPixelData,

    #[snafu(display("Pixel data is encapsulated (compressed transfer syntax), which is not supported"))]
    EncapsulatedPixelData,

    #[snafu(display("Missing required attribute `{name}`"))]
    MissingAttribute { name: &'static str },

    #[snafu(display(
        "Pixel data is truncated: expected at least {expected} bytes, found {actual}"
    ))]
    TruncatedPixelData { expected: usize, actual: usize },

    #[snafu(display("Unsupported Bits Allocated: {bits_allocated}"))]
    UnsupportedBitDepth { bits_allocated: u16 },

    #[snafu(display("Unsupported Photometric Interpretation: `{interpretation}`"))]
    UnsupportedPhotometricInterpretation { interpretation: String },

    #[snafu(display(
        "Photometric Interpretation `{interpretation}` requires {expected} samples per pixel, found {actual}"
    ))]
    InvalidSamplesPerPixel {
        interpretation: String,
        expected: u16,
        actual: u16,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
