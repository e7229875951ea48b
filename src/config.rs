//! Viewer settings read once at startup.
//!
//! The slider bounds only limit what the user can pick in the UI.
//! The windowing code accepts any finite center and width.

use std::ops::RangeInclusive;

pub const CENTER_RANGE_VAR: &str = "DICOMVIEW_CENTER_RANGE";
pub const WIDTH_RANGE_VAR: &str = "DICOMVIEW_WIDTH_RANGE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
}

impl SliderBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Parses `"min:max"`. Both ends must be finite and `min < max`.
    pub fn parse(text: &str) -> Option<Self> {
        let (min, max) = text.split_once(':')?;
        let min: f64 = min.trim().parse().ok()?;
        let max: f64 = max.trim().parse().ok()?;
        (min.is_finite() && max.is_finite() && min < max).then_some(Self { min, max })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub center_bounds: SliderBounds,
    pub width_bounds: SliderBounds,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            center_bounds: SliderBounds::new(-1024.0, 3071.0),
            width_bounds: SliderBounds::new(1.0, 4096.0),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            center_bounds: bounds_override(&lookup, CENTER_RANGE_VAR)
                .unwrap_or(defaults.center_bounds),
            width_bounds: bounds_override(&lookup, WIDTH_RANGE_VAR)
                .unwrap_or(defaults.width_bounds),
        }
    }
}

fn bounds_override(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<SliderBounds> {
    let raw = lookup(name)?;
    let parsed = SliderBounds::parse(&raw);
    if parsed.is_none() {
        log::warn!("Ignoring {name}={raw:?}: expected `min:max` with min < max");
    }
    parsed
}
