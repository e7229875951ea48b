use super::dataset;
use super::descriptor::ImageDescriptor;
use crate::error::{IoSnafu, Result};
use crate::pipeline::{SampleBuffer, WindowParameters};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded file, ready to be windowed and displayed any number of times.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub file_path: PathBuf,
    pub descriptor: ImageDescriptor,
    pub samples: Arc<SampleBuffer>,
}

impl LoadedImage {
    /// The window stored in the file; unset values are auto-ranged later.
    pub fn default_window(&self) -> WindowParameters {
        WindowParameters::new(
            self.descriptor.default_window_center,
            self.descriptor.default_window_width,
        )
    }
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).context(IoSnafu { path })
}

pub fn load_dicom(path: PathBuf) -> Result<LoadedImage> {
    log::info!("Loading DICOM file: {}", path.display());
    let bytes = read_file(&path).inspect_err(|err| log::error!("{err}"))?;
    decode_dicom(path, &bytes)
}

/// Parse, extract and decode a DICOM file already held in memory.
pub fn decode_dicom(file_path: PathBuf, bytes: &[u8]) -> Result<LoadedImage> {
    let object = dataset::parse(bytes).inspect_err(|err| {
        log::error!("{}: failed to parse DICOM file ({err})", file_path.display());
    })?;
    let descriptor = ImageDescriptor::from_dataset(&*object).inspect_err(|err| {
        log::error!("{}: {err}", file_path.display());
    })?;
    let samples = SampleBuffer::decode(
        &descriptor.pixel_bytes,
        descriptor.bits_allocated,
        descriptor.pixel_representation,
        descriptor.sample_count(),
    )?;

    log::debug!(
        "{}: {}x{} {} ({} bits allocated, {} stored, representation {})",
        file_path.display(),
        descriptor.width,
        descriptor.height,
        descriptor.photometric_interpretation,
        descriptor.bits_allocated,
        descriptor.bits_stored,
        descriptor.pixel_representation,
    );

    Ok(LoadedImage {
        file_path,
        descriptor,
        samples: Arc::new(samples),
    })
}
