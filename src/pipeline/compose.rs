use super::samples::SampleBuffer;
use super::window::{self, Polarity, WindowLevel, WindowParameters};
use crate::error::{
    InvalidSamplesPerPixelSnafu, Result, TruncatedPixelDataSnafu,
    UnsupportedPhotometricInterpretationSnafu,
};
use crate::model::{ImageDescriptor, PhotometricInterpretation};
use snafu::ensure;

const OPAQUE: u8 = 255;

/// Row-major 8-bit RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Render one image under the given window.
///
/// The window is resolved against `samples` and ignored for RGB data.
/// Nothing is produced unless the whole image can be rendered.
pub fn compose(
    descriptor: &ImageDescriptor,
    samples: &SampleBuffer,
    window: WindowParameters,
) -> Result<RgbaImage> {
    match &descriptor.photometric_interpretation {
        PhotometricInterpretation::Monochrome1 => {
            grayscale(descriptor, samples, window.resolve(samples), Polarity::Inverted)
        }
        PhotometricInterpretation::Monochrome2 => {
            grayscale(descriptor, samples, window.resolve(samples), Polarity::Normal)
        }
        PhotometricInterpretation::Rgb => rgb(descriptor),
        PhotometricInterpretation::Other(interpretation) => {
            UnsupportedPhotometricInterpretationSnafu {
                interpretation: interpretation.clone(),
            }
            .fail()
        }
    }
}

fn grayscale(
    descriptor: &ImageDescriptor,
    samples: &SampleBuffer,
    window: WindowLevel,
    polarity: Polarity,
) -> Result<RgbaImage> {
    let pixel_count = descriptor.pixel_count();
    ensure!(
        samples.len() >= pixel_count,
        TruncatedPixelDataSnafu {
            expected: pixel_count,
            actual: samples.len(),
        }
    );

    let intensities = window::apply(samples, window, polarity);
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for &gray in &intensities[..pixel_count] {
        pixels.extend_from_slice(&[gray, gray, gray, OPAQUE]);
    }

    Ok(RgbaImage {
        width: descriptor.width,
        height: descriptor.height,
        pixels,
    })
}

fn rgb(descriptor: &ImageDescriptor) -> Result<RgbaImage> {
    ensure!(
        descriptor.samples_per_pixel == 3,
        InvalidSamplesPerPixelSnafu {
            interpretation: "RGB",
            expected: 3_u16,
            actual: descriptor.samples_per_pixel,
        }
    );

    let bytes_per_pixel = usize::from(descriptor.samples_per_pixel) * descriptor.bytes_per_sample()?;
    let pixel_count = descriptor.pixel_count();
    let source = &descriptor.pixel_bytes;
    let expected = pixel_count * bytes_per_pixel;
    ensure!(
        source.len() >= expected,
        TruncatedPixelDataSnafu {
            expected,
            actual: source.len(),
        }
    );

    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for pixel in source[..expected].chunks_exact(bytes_per_pixel) {
        pixels.extend_from_slice(&[pixel[0], pixel[1], pixel[2], OPAQUE]);
    }

    Ok(RgbaImage {
        width: descriptor.width,
        height: descriptor.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::descriptor::tests::descriptor;

    fn render(
        descriptor: &ImageDescriptor,
        window: WindowParameters,
    ) -> Result<RgbaImage> {
        let samples = SampleBuffer::decode(
            &descriptor.pixel_bytes,
            descriptor.bits_allocated,
            descriptor.pixel_representation,
            descriptor.sample_count(),
        )?;
        compose(descriptor, &samples, window)
    }

    fn words(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|value| value.to_le_bytes()).collect()
    }

    #[test]
    fn monochrome2_replicates_intensity() {
        let image = descriptor(2, 1, 16, 0, 1, "MONOCHROME2", words(&[0, 1000]));
        let rgba = render(&image, WindowParameters::new(Some(500.0), Some(1000.0))).unwrap();
        assert_eq!(rgba.width, 2);
        assert_eq!(rgba.height, 1);
        assert_eq!(rgba.pixels, &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn monochrome1_is_inverted() {
        let image = descriptor(2, 1, 16, 0, 1, "MONOCHROME1", words(&[0, 1000]));
        let rgba = render(&image, WindowParameters::new(Some(500.0), Some(1000.0))).unwrap();
        assert_eq!(rgba.pixels, &[255, 255, 255, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn constant_image_is_mid_gray() {
        let image = descriptor(2, 2, 8, 0, 1, "MONOCHROME2", vec![10; 4]);
        let rgba = render(&image, WindowParameters::default()).unwrap();
        assert_eq!(rgba.pixels, [128_u8, 128, 128, 255].repeat(4).as_slice());
    }

    #[test]
    fn rgb_bytes_pass_through() {
        let image = descriptor(2, 1, 8, 0, 3, "RGB", vec![255, 0, 0, 0, 255, 0]);
        let rgba = render(&image, WindowParameters::new(Some(0.0), Some(1.0))).unwrap();
        assert_eq!(rgba.pixels, &[255, 0, 0, 255, 0, 255, 0, 255]);
    }

    #[test]
    fn rgb_requires_three_samples() {
        let image = descriptor(1, 1, 8, 0, 1, "RGB", vec![1, 2, 3]);
        let err = render(&image, WindowParameters::default()).unwrap_err();
        assert!(
            matches!(err, Error::InvalidSamplesPerPixel { actual: 1, .. }),
            "{err}"
        );
    }

    #[test]
    fn unsupported_interpretation() {
        let image = descriptor(1, 1, 8, 0, 3, "YBR_FULL", vec![1, 2, 3]);
        let err = render(&image, WindowParameters::default()).unwrap_err();
        assert!(
            matches!(
                err,
                Error::UnsupportedPhotometricInterpretation { ref interpretation }
                    if interpretation == "YBR_FULL"
            ),
            "{err}"
        );
    }

    #[test]
    fn too_few_samples_for_geometry() {
        let image = descriptor(2, 2, 8, 0, 1, "MONOCHROME2", vec![0; 4]);
        let samples = SampleBuffer::U8(vec![0; 3]);
        let err = compose(&image, &samples, WindowParameters::default()).unwrap_err();
        assert!(matches!(err, Error::TruncatedPixelData { .. }), "{err}");
    }

    #[test]
    fn rendering_is_idempotent() {
        let image = descriptor(3, 1, 16, 1, 1, "MONOCHROME2", vec![0x00, 0xFC, 0, 0, 0xFF, 0x0F]);
        let window = WindowParameters::new(Some(40.0), Some(400.0));
        let first = render(&image, window).unwrap();
        let second = render(&image, window).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.pixels.len(), 3 * 4);
    }
}
