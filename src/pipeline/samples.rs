use crate::error::{Result, TruncatedPixelDataSnafu, UnsupportedBitDepthSnafu};
use snafu::ensure;

/// Pixel samples reinterpreted from the raw pixel data bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
}

impl SampleBuffer {
    /// Decode the first `count` samples of `bytes`.
    ///
    /// Multi-byte samples are little-endian; `pixel_representation` 1 selects
    /// two's complement for 16-bit data and is ignored for 8-bit data.
    pub fn decode(
        bytes: &[u8],
        bits_allocated: u16,
        pixel_representation: u16,
        count: usize,
    ) -> Result<Self> {
        let bytes_per_sample = match bits_allocated {
            8 => 1,
            16 => 2,
            _ => return UnsupportedBitDepthSnafu { bits_allocated }.fail(),
        };
        let expected = count.saturating_mul(bytes_per_sample);
        ensure!(
            bytes.len() >= expected,
            TruncatedPixelDataSnafu {
                expected,
                actual: bytes.len(),
            }
        );
        let bytes = &bytes[..expected];

        Ok(match (bits_allocated, pixel_representation) {
            (8, _) => SampleBuffer::U8(bytes.to_vec()),
            (_, 1) => SampleBuffer::I16(
                bytes
                    .chunks_exact(2)
                    .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                    .collect(),
            ),
            _ => SampleBuffer::U16(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect(),
            ),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(values) => values.len(),
            SampleBuffer::U16(values) => values.len(),
            SampleBuffer::I16(values) => values.len(),
        }
    }

    /// Smallest and largest sample, found in one pass.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        match self {
            SampleBuffer::U8(values) => min_max(values),
            SampleBuffer::U16(values) => min_max(values),
            SampleBuffer::I16(values) => min_max(values),
        }
    }
}

fn min_max<T>(values: &[T]) -> Option<(f64, f64)>
where
    T: Copy + PartialOrd + Into<f64>,
{
    let (&first, rest) = values.split_first()?;
    let (min, max) = rest.iter().fold((first, first), |(min, max), &value| {
        (
            if value < min { value } else { min },
            if value > max { value } else { max },
        )
    });
    Some((min.into(), max.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;

    #[test]
    fn decodes_unsigned_bytes() {
        let samples = SampleBuffer::decode(&[0, 127, 255], 8, 1, 3).unwrap();
        assert_eq!(samples, SampleBuffer::U8(vec![0, 127, 255]));
    }

    #[test]
    fn decodes_unsigned_words_little_endian() {
        let samples = SampleBuffer::decode(&[0x34, 0x12, 0xFF, 0xFF], 16, 0, 2).unwrap();
        assert_eq!(samples, SampleBuffer::U16(vec![0x1234, 0xFFFF]));
    }

    #[test]
    fn decodes_signed_words_twos_complement() {
        let samples = SampleBuffer::decode(&[0x00, 0xFC, 0xFF, 0xFF, 0xFF, 0x7F], 16, 1, 3).unwrap();
        assert_eq!(samples, SampleBuffer::I16(vec![-1024, -1, i16::MAX]));
        assert_eq!(samples.min_max(), Some((-1024.0, 32767.0)));
    }

    #[test]
    fn trailing_padding_is_dropped() {
        let samples = SampleBuffer::decode(&[1, 0, 2, 0, 0], 16, 0, 2).unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[rstest]
    #[case(1)]
    #[case(12)]
    #[case(32)]
    fn rejects_other_bit_depths(#[case] bits: u16) {
        let err = SampleBuffer::decode(&[0; 16], bits, 0, 1).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitDepth { .. }), "{err}");
    }

    #[test]
    fn short_buffer_is_truncated() {
        let err = SampleBuffer::decode(&[0; 3], 16, 0, 2).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedPixelData { expected: 4, actual: 3 }),
            "{err}"
        );
    }

    #[test]
    fn min_max_of_empty_buffer() {
        assert_eq!(SampleBuffer::U16(Vec::new()).min_max(), None);
    }

    #[test]
    fn min_max_scans_large_buffers() {
        let values: Vec<u16> = (0..512 * 512).map(|i| (i % 4096) as u16).collect();
        assert_eq!(SampleBuffer::U16(values).min_max(), Some((0.0, 4095.0)));
    }
}
