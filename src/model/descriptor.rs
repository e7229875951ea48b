use super::dataset::{Dataset, ImageTag, PixelBytes};
use crate::error::{
    EncapsulatedPixelDataSnafu, InvalidSamplesPerPixelSnafu, MissingAttributeSnafu,
    MissingPixelDataSnafu, Result, TruncatedPixelDataSnafu, UnsupportedBitDepthSnafu,
};
use snafu::{ensure, OptionExt};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    Monochrome1,
    Monochrome2,
    Rgb,
    Other(String),
}

impl PhotometricInterpretation {
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_ascii_uppercase();
        match value.as_str() {
            "MONOCHROME1" => Self::Monochrome1,
            "MONOCHROME2" => Self::Monochrome2,
            "RGB" => Self::Rgb,
            _ => Self::Other(value),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Monochrome1 => "MONOCHROME1",
            Self::Monochrome2 => "MONOCHROME2",
            Self::Rgb => "RGB",
            Self::Other(value) => value,
        }
    }

    pub fn is_monochrome(&self) -> bool {
        matches!(self, Self::Monochrome1 | Self::Monochrome2)
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to turn one DICOM instance into pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    pub pixel_representation: u16,
    pub samples_per_pixel: u16,
    pub photometric_interpretation: PhotometricInterpretation,
    pub default_window_center: Option<f64>,
    pub default_window_width: Option<f64>,
    pub pixel_bytes: Arc<[u8]>,
}

impl ImageDescriptor {
    pub fn from_dataset(dataset: &impl Dataset) -> Result<Self> {
        let pixel_bytes = match dataset.pixel_data().context(MissingPixelDataSnafu)? {
            PixelBytes::Native(bytes) => Arc::<[u8]>::from(bytes.as_ref()),
            PixelBytes::Encapsulated => return EncapsulatedPixelDataSnafu.fail(),
        };

        let width = required_u16(dataset, ImageTag::Columns)?;
        let height = required_u16(dataset, ImageTag::Rows)?;
        let bits_allocated = required_u16(dataset, ImageTag::BitsAllocated)?;
        let bits_stored = dataset
            .read_u16(ImageTag::BitsStored)
            .unwrap_or(bits_allocated);
        let pixel_representation = dataset
            .read_u16(ImageTag::PixelRepresentation)
            .unwrap_or(0);
        let samples_per_pixel = dataset.read_u16(ImageTag::SamplesPerPixel).unwrap_or(1);
        let photometric_interpretation = PhotometricInterpretation::parse(
            &dataset
                .read_string(ImageTag::PhotometricInterpretation)
                .unwrap_or_default(),
        );
        ensure!(
            samples_per_pixel > 0,
            InvalidSamplesPerPixelSnafu {
                interpretation: photometric_interpretation.as_str(),
                expected: match photometric_interpretation {
                    PhotometricInterpretation::Rgb => 3_u16,
                    _ => 1,
                },
                actual: samples_per_pixel,
            }
        );

        let descriptor = ImageDescriptor {
            width: width.into(),
            height: height.into(),
            bits_allocated,
            bits_stored,
            pixel_representation,
            samples_per_pixel,
            photometric_interpretation,
            default_window_center: dataset.read_float_string(ImageTag::WindowCenter),
            default_window_width: dataset.read_float_string(ImageTag::WindowWidth),
            pixel_bytes,
        };

        let expected = descriptor.expected_len()?;
        ensure!(
            descriptor.pixel_bytes.len() >= expected,
            TruncatedPixelDataSnafu {
                expected,
                actual: descriptor.pixel_bytes.len(),
            }
        );

        Ok(descriptor)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn bytes_per_sample(&self) -> Result<usize> {
        match self.bits_allocated {
            8 => Ok(1),
            16 => Ok(2),
            bits_allocated => UnsupportedBitDepthSnafu { bits_allocated }.fail(),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.pixel_count()
            .saturating_mul(usize::from(self.samples_per_pixel))
    }

    /// Minimum pixel data length implied by the declared geometry.
    pub fn expected_len(&self) -> Result<usize> {
        let bytes_per_sample = self.bytes_per_sample()?;
        Ok(self.sample_count().saturating_mul(bytes_per_sample))
    }
}

fn required_u16(dataset: &impl Dataset, tag: ImageTag) -> Result<u16> {
    dataset
        .read_u16(tag)
        .context(MissingAttributeSnafu { name: tag.name() })
}
