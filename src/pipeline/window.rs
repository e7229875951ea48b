//! Linear window leveling of grayscale samples.

use super::samples::SampleBuffer;

/// Window center and width as chosen by the user or the file.
///
/// `None` means "derive from the sample range". A width of zero (or any
/// width that is negative or not finite) is treated the same as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowParameters {
    pub center: Option<f64>,
    pub width: Option<f64>,
}

impl WindowParameters {
    pub fn new(center: Option<f64>, width: Option<f64>) -> Self {
        Self { center, width }
    }

    pub fn with_center(self, center: f64) -> Self {
        Self {
            center: Some(center),
            ..self
        }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    /// Fill in unset values from the sample range.
    ///
    /// A derived width is at least 1; an explicit width is used as given.
    pub fn resolve(&self, samples: &SampleBuffer) -> WindowLevel {
        let center = self.center.filter(|center| center.is_finite());
        let width = self
            .width
            .filter(|width| width.is_finite() && *width > 0.0);

        let (center, width) = match (center, width) {
            (Some(center), Some(width)) => (center, width),
            (center, width) => {
                let (min, max) = samples.min_max().unwrap_or((0.0, 0.0));
                (
                    center.unwrap_or((max + min) / 2.0),
                    width.unwrap_or((max - min).max(1.0)),
                )
            }
        };

        WindowLevel::new(center, width)
    }
}

/// Which end of the window maps to white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// MONOCHROME2: low samples are dark.
    Normal,
    /// MONOCHROME1: low samples are bright.
    Inverted,
}

/// A fully resolved window, ready to map samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLevel {
    center: f64,
    width: f64,
}

impl WindowLevel {
    /// `width` must be positive.
    pub fn new(center: f64, width: f64) -> Self {
        Self { center, width }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sample values mapped to 0 and 255 respectively (for [`Polarity::Normal`]).
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.center - self.width / 2.0,
            self.center + self.width / 2.0,
        )
    }

    pub fn intensity(&self, sample: f64, polarity: Polarity) -> u8 {
        let (min, max) = self.bounds();
        let range = max - min;
        let scaled = match polarity {
            Polarity::Normal => (sample - min) / range,
            Polarity::Inverted => (max - sample) / range,
        } * 255.0;
        scaled.clamp(0.0, 255.0).round() as u8
    }
}

/// Map every sample to an 8-bit intensity.
pub fn apply(samples: &SampleBuffer, window: WindowLevel, polarity: Polarity) -> Vec<u8> {
    match samples {
        SampleBuffer::U8(values) => map_all(values, window, polarity),
        SampleBuffer::U16(values) => map_all(values, window, polarity),
        SampleBuffer::I16(values) => map_all(values, window, polarity),
    }
}

fn map_all<T>(values: &[T], window: WindowLevel, polarity: Polarity) -> Vec<u8>
where
    T: Copy + Into<f64>,
{
    values
        .iter()
        .map(|&value| window.intensity(value.into(), polarity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn u16_samples() -> SampleBuffer {
        SampleBuffer::U16(vec![0, 100, 200, 300, 400, 4095])
    }

    #[test]
    fn explicit_window_is_kept() {
        let window = WindowParameters::new(Some(40.0), Some(400.0)).resolve(&u16_samples());
        assert_eq!(window.center(), 40.0);
        assert_eq!(window.width(), 400.0);
        assert_eq!(window.bounds(), (-160.0, 240.0));
    }

    #[test]
    fn unset_window_uses_sample_range() {
        let window = WindowParameters::default().resolve(&u16_samples());
        assert_eq!(window.center(), 2047.5);
        assert_eq!(window.width(), 4095.0);
    }

    #[rstest]
    #[case(Some(0.0))]
    #[case(Some(-5.0))]
    #[case(Some(f64::NAN))]
    #[case(None)]
    fn degenerate_width_falls_back_to_range(#[case] width: Option<f64>) {
        let window = WindowParameters::new(Some(100.0), width).resolve(&u16_samples());
        assert_eq!(window.center(), 100.0);
        assert_eq!(window.width(), 4095.0);
    }

    #[test]
    fn constant_image_forces_unit_width() {
        let samples = SampleBuffer::U16(vec![10, 10, 10, 10]);
        let window = WindowParameters::default().resolve(&samples);
        assert_eq!(window.center(), 10.0);
        assert_eq!(window.width(), 1.0);
        assert_eq!(apply(&samples, window, Polarity::Normal), vec![128; 4]);
    }

    #[test]
    fn narrow_explicit_width_is_kept() {
        let samples = SampleBuffer::U16(vec![10, 11]);
        let window = WindowParameters::new(Some(10.25), Some(0.5)).resolve(&samples);
        assert_eq!(window.width(), 0.5);
        assert_eq!(window.bounds(), (10.0, 10.5));
        assert_eq!(apply(&samples, window, Polarity::Normal), vec![0, 255]);
    }

    #[test]
    fn empty_buffer_resolves_to_unit_window() {
        let window = WindowParameters::default().resolve(&SampleBuffer::U8(Vec::new()));
        assert_eq!(window.center(), 0.0);
        assert_eq!(window.width(), 1.0);
    }

    #[test]
    fn window_ends_map_to_black_and_white() {
        let window = WindowLevel::new(1000.0, 2000.0);
        let (min, max) = window.bounds();
        assert_eq!(window.intensity(min, Polarity::Normal), 0);
        assert_eq!(window.intensity(max, Polarity::Normal), 255);
        assert_eq!(window.intensity(min, Polarity::Inverted), 255);
        assert_eq!(window.intensity(max, Polarity::Inverted), 0);
    }

    #[test]
    fn out_of_window_samples_saturate() {
        let window = WindowLevel::new(40.0, 400.0);
        assert_eq!(window.intensity(-1024.0, Polarity::Normal), 0);
        assert_eq!(window.intensity(f64::from(u16::MAX), Polarity::Normal), 255);
        assert_eq!(window.intensity(-1024.0, Polarity::Inverted), 255);
        assert_eq!(window.intensity(f64::from(u16::MAX), Polarity::Inverted), 0);
    }

    #[test]
    fn signed_samples_are_windowed() {
        let samples = SampleBuffer::I16(vec![-1000, -160, 40, 240, 3000]);
        let window = WindowParameters::new(Some(40.0), Some(400.0)).resolve(&samples);
        assert_eq!(
            apply(&samples, window, Polarity::Normal),
            vec![0, 0, 128, 255, 255]
        );
    }

    #[test]
    fn mapping_is_deterministic() {
        let samples = u16_samples();
        let window = WindowParameters::new(Some(300.0), Some(500.0)).resolve(&samples);
        assert_eq!(
            apply(&samples, window, Polarity::Inverted),
            apply(&samples, window, Polarity::Inverted)
        );
    }
}
