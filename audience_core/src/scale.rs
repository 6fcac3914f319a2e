use std::fmt;

use audience_runtime::AudienceBranch;
use serde::{Deserialize, Serialize};

use crate::sizing_config::{SizeBounds, SizingConfig};

/// Slider position in `[0, 100]`.
///
/// Every constructor clamps, so a `Scale` is always in range no matter what
/// the caller passed in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Scale(u8);

impl Scale {
    pub const MIN: Scale = Scale(0);
    pub const MAX: Scale = Scale(100);
    pub const MIDPOINT: Scale = Scale(50);

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<i64> for Scale {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Scale> for i64 {
    fn from(scale: Scale) -> Self {
        i64::from(scale.0)
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a slider position onto a person count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInterpolator {
    bounds: SizeBounds,
    secondary_dampening: f64,
}

impl ScaleInterpolator {
    pub fn new(bounds: SizeBounds, secondary_dampening: f64) -> Self {
        Self {
            bounds,
            secondary_dampening,
        }
    }

    pub fn from_config(config: &SizingConfig) -> Self {
        Self::new(config.bounds, config.scale.secondary_dampening)
    }

    /// `round(min + (max - min) * scale / 100)`, further dampened and rounded
    /// again for the secondary audience.
    pub fn compute(&self, scale: Scale, branch: AudienceBranch) -> u64 {
        let primary = self.interpolate(scale);
        match branch {
            AudienceBranch::Primary => primary,
            AudienceBranch::Secondary => round_size(primary as f64 * self.secondary_dampening),
        }
    }

    pub fn primary(&self, scale: Scale) -> u64 {
        self.compute(scale, AudienceBranch::Primary)
    }

    pub fn secondary(&self, scale: Scale) -> u64 {
        self.compute(scale, AudienceBranch::Secondary)
    }

    fn interpolate(&self, scale: Scale) -> u64 {
        let min = self.bounds.min_audience as f64;
        let span = self.bounds.span() as f64;
        round_size(min + span * scale.fraction())
    }
}

/// Round half away from zero and saturate at zero.
pub(crate) fn round_size(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpolator() -> ScaleInterpolator {
        ScaleInterpolator::from_config(&SizingConfig::default())
    }

    #[test]
    fn endpoints_hit_bounds() {
        let interp = interpolator();
        assert_eq!(interp.primary(Scale::MIN), 100_000);
        assert_eq!(interp.primary(Scale::MAX), 10_000_000);
        assert_eq!(interp.primary(Scale::MIDPOINT), 5_050_000);
    }

    #[test]
    fn secondary_is_dampened_primary() {
        let interp = interpolator();
        for value in 0..=100 {
            let scale = Scale::clamped(value);
            let expected = (interp.primary(scale) as f64 * 0.6).round() as u64;
            assert_eq!(interp.secondary(scale), expected, "scale {value}");
        }
        assert_eq!(interp.secondary(Scale::MIDPOINT), 3_030_000);
    }

    #[test]
    fn monotonic_and_within_bounds() {
        let interp = interpolator();
        let mut previous = 0;
        for value in 0..=100 {
            let size = interp.primary(Scale::clamped(value));
            assert!(size >= previous);
            assert!((100_000..=10_000_000).contains(&size));
            previous = size;
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Scale::clamped(-15), Scale::MIN);
        assert_eq!(Scale::clamped(250), Scale::MAX);
        let interp = interpolator();
        assert_eq!(interp.primary(Scale::clamped(i64::MAX)), 10_000_000);
    }

    #[test]
    fn deserialization_clamps() {
        let scale: Scale = serde_json::from_str("140").expect("parses");
        assert_eq!(scale, Scale::MAX);
        assert_eq!(serde_json::to_string(&Scale::MIDPOINT).expect("serializes"), "50");
    }
}
