//! Narrow view over a parsed DICOM data set.
//!
//! The pipeline only ever looks at the handful of attributes in [`ImageTag`],
//! through typed accessors. Parsing itself is left to the `dicom` crate.

use crate::error::{ParseSnafu, Result};
use dicom::core::{DataDictionary, Tag};
use dicom::dictionary_std::tags;
use dicom::object::file::ReadPreamble;
use dicom::object::{DefaultDicomObject, InMemDicomObject, OpenFileOptions};
use snafu::ResultExt;
use std::borrow::Cow;

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

/// The attributes needed to render an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTag {
    SamplesPerPixel,
    PhotometricInterpretation,
    Rows,
    Columns,
    BitsAllocated,
    BitsStored,
    PixelRepresentation,
    WindowCenter,
    WindowWidth,
    PixelData,
}

impl ImageTag {
    pub fn tag(self) -> Tag {
        match self {
            Self::SamplesPerPixel => tags::SAMPLES_PER_PIXEL,
            Self::PhotometricInterpretation => tags::PHOTOMETRIC_INTERPRETATION,
            Self::Rows => tags::ROWS,
            Self::Columns => tags::COLUMNS,
            Self::BitsAllocated => tags::BITS_ALLOCATED,
            Self::BitsStored => tags::BITS_STORED,
            Self::PixelRepresentation => tags::PIXEL_REPRESENTATION,
            Self::WindowCenter => tags::WINDOW_CENTER,
            Self::WindowWidth => tags::WINDOW_WIDTH,
            Self::PixelData => tags::PIXEL_DATA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SamplesPerPixel => "SamplesPerPixel",
            Self::PhotometricInterpretation => "PhotometricInterpretation",
            Self::Rows => "Rows",
            Self::Columns => "Columns",
            Self::BitsAllocated => "BitsAllocated",
            Self::BitsStored => "BitsStored",
            Self::PixelRepresentation => "PixelRepresentation",
            Self::WindowCenter => "WindowCenter",
            Self::WindowWidth => "WindowWidth",
            Self::PixelData => "PixelData",
        }
    }
}

/// Raw contents of the pixel data element.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBytes<'a> {
    /// Native (uncompressed) samples, little-endian.
    Native(Cow<'a, [u8]>),
    /// Fragments of a compressed transfer syntax.
    Encapsulated,
}

pub trait Dataset {
    fn read_u16(&self, tag: ImageTag) -> Option<u16>;

    /// Trimmed string value, `None` when absent or blank.
    fn read_string(&self, tag: ImageTag) -> Option<String>;

    /// First value of a decimal string attribute, `None` when absent or not finite.
    fn read_float_string(&self, tag: ImageTag) -> Option<f64>;

    fn pixel_data(&self) -> Option<PixelBytes<'_>>;
}

impl<D> Dataset for InMemDicomObject<D>
where
    D: DataDictionary + Clone,
{
    fn read_u16(&self, tag: ImageTag) -> Option<u16> {
        self.element(tag.tag()).ok()?.to_int::<u16>().ok()
    }

    fn read_string(&self, tag: ImageTag) -> Option<String> {
        let element = self.element(tag.tag()).ok()?;
        let value = element.to_str().ok()?;
        let value = value.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        (!value.is_empty()).then(|| value.to_string())
    }

    fn read_float_string(&self, tag: ImageTag) -> Option<f64> {
        let text = self.read_string(tag)?;
        let first = text.split('\\').next()?.trim();
        first.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    fn pixel_data(&self) -> Option<PixelBytes<'_>> {
        let element = self.element(ImageTag::PixelData.tag()).ok()?;
        match element.to_bytes() {
            Ok(bytes) => Some(PixelBytes::Native(bytes)),
            Err(_) => Some(PixelBytes::Encapsulated),
        }
    }
}

/// Parse a complete DICOM file held in memory.
///
/// The 128-byte preamble is optional; the `DICM` magic code is not.
pub fn parse(bytes: &[u8]) -> Result<DefaultDicomObject> {
    let body = if has_preamble(bytes) {
        &bytes[PREAMBLE_LEN..]
    } else {
        bytes
    };

    OpenFileOptions::new()
        .read_preamble(ReadPreamble::Never)
        .from_reader(body)
        .context(ParseSnafu)
}

fn has_preamble(bytes: &[u8]) -> bool {
    bytes
        .get(PREAMBLE_LEN..PREAMBLE_LEN + MAGIC.len())
        .is_some_and(|magic| magic == MAGIC)
}
