// Piecewise-linear color scales for overlay encoding

use crate::config::BreakpointSpec;
use crate::constants::OPACITY_FLOOR;
use crate::error::ConfigError;
use std::fmt;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidHexColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ConfigError::InvalidHexColor(hex.to_string()))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Channels normalized to 0.0-1.0, still in sRGB space
    pub fn to_f32(self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Per-channel linear interpolation with rounding back to 8 bits
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = self.0[i] as f32;
            let b = other.0[i] as f32;
            *channel = (a + t * (b - a)).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub value: f32,
    pub color: Rgb,
}

/// Sorted breakpoint table. Construction guarantees at least two
/// breakpoints with finite, strictly increasing values, so queries never
/// divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    breakpoints: Vec<Breakpoint>,
}

impl ColorScale {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self, ConfigError> {
        if breakpoints.len() < 2 {
            return Err(ConfigError::TooFewBreakpoints(breakpoints.len()));
        }
        for (index, bp) in breakpoints.iter().enumerate() {
            if !bp.value.is_finite() {
                return Err(ConfigError::NonFiniteBreakpoint { index });
            }
            if index > 0 && bp.value <= breakpoints[index - 1].value {
                return Err(ConfigError::UnsortedBreakpoints {
                    index,
                    value: bp.value,
                });
            }
        }
        Ok(Self { breakpoints })
    }

    pub fn from_specs(specs: &[BreakpointSpec]) -> Result<Self, ConfigError> {
        let breakpoints = specs
            .iter()
            .map(|spec| {
                Ok(Breakpoint {
                    value: spec.value,
                    color: Rgb::from_hex(&spec.color)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Self::new(breakpoints)
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn min_value(&self) -> f32 {
        self.first().value
    }

    pub fn max_value(&self) -> f32 {
        self.last().value
    }

    /// Map `value` to a color, clamping outside the scale's range.
    /// NaN maps to the first color.
    pub fn color_for(&self, value: f32) -> Rgb {
        let first = self.first();
        let last = self.last();
        if value.is_nan() || value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }

        // Breakpoints are sorted and distinct, so the first matching pair is the only one
        for pair in self.breakpoints.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo.value <= value && value <= hi.value {
                let t = (value - lo.value) / (hi.value - lo.value);
                return lo.color.lerp(hi.color, t);
            }
        }
        last.color
    }

    /// Opacity in `[0.3, 1.0]`: low values stay faintly visible
    pub fn opacity_for(&self, value: f32) -> f32 {
        OPACITY_FLOOR + (1.0 - OPACITY_FLOOR) * self.normalize(value)
    }

    /// Position of `value` across the full scale, clamped to 0.0-1.0
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max_value() - self.min_value();
        let normalized = (value - self.min_value()) / span;
        if normalized.is_nan() {
            return 0.0;
        }
        normalized.clamp(0.0, 1.0)
    }

    /// Evenly spaced samples across the scale, for legends
    pub fn sample_gradient(&self, steps: usize) -> Vec<Rgb> {
        if steps < 2 {
            return vec![self.first().color; steps];
        }
        let span = self.max_value() - self.min_value();
        (0..steps)
            .map(|i| {
                let t = i as f32 / (steps - 1) as f32;
                self.color_for(self.min_value() + span * t)
            })
            .collect()
    }

    fn first(&self) -> &Breakpoint {
        &self.breakpoints[0]
    }

    fn last(&self) -> &Breakpoint {
        &self.breakpoints[self.breakpoints.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bp(value: f32, hex: &str) -> Breakpoint {
        Breakpoint {
            value,
            color: Rgb::from_hex(hex).unwrap(),
        }
    }

    fn anomaly_scale() -> ColorScale {
        ColorScale::new(vec![
            bp(-2.0, "#3b82f6"),
            bp(0.0, "#fbbf24"),
            bp(4.0, "#dc2626"),
        ])
        .unwrap()
    }

    fn channel_distance(a: Rgb, b: Rgb) -> u8 {
        (0..3).map(|i| a.0[i].abs_diff(b.0[i])).max().unwrap_or(0)
    }

    #[test]
    fn test_interior_breakpoint_is_exact() {
        assert_eq!(anomaly_scale().color_for(0.0).to_hex(), "#fbbf24");
    }

    #[rstest]
    #[case(-5.0, "#3b82f6")]
    #[case(-2.0, "#3b82f6")]
    #[case(4.0, "#dc2626")]
    #[case(100.0, "#dc2626")]
    #[case(f32::NEG_INFINITY, "#3b82f6")]
    #[case(f32::INFINITY, "#dc2626")]
    fn test_clamps_to_ends(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(anomaly_scale().color_for(value).to_hex(), expected);
    }

    #[test]
    fn test_nan_maps_to_first_color() {
        assert_eq!(anomaly_scale().color_for(f32::NAN).to_hex(), "#3b82f6");
    }

    #[test]
    fn test_midpoint_interpolation() {
        let scale = ColorScale::new(vec![bp(0.0, "#000000"), bp(1.0, "#ffffff")]).unwrap();
        // 127.5 rounds half away from zero
        assert_eq!(scale.color_for(0.5), Rgb::new(128, 128, 128));
        assert_eq!(scale.color_for(0.25), Rgb::new(64, 64, 64));
    }

    #[test]
    fn test_channels_interpolate_independently() {
        let scale = ColorScale::new(vec![bp(0.0, "#ff0000"), bp(10.0, "#0000ff")]).unwrap();
        assert_eq!(scale.color_for(5.0), Rgb::new(128, 0, 128));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(0.0)]
    #[case(2.0)]
    fn test_continuous_at_interior_breakpoints(#[case] bp_value: f32) {
        let scale = ColorScale::new(vec![
            bp(-2.0, "#3b82f6"),
            bp(-1.0, "#60a5fa"),
            bp(0.0, "#fbbf24"),
            bp(2.0, "#f97316"),
            bp(4.0, "#dc2626"),
        ])
        .unwrap();
        let at = scale.color_for(bp_value);
        let below = scale.color_for(bp_value - 1e-4);
        let above = scale.color_for(bp_value + 1e-4);
        assert!(channel_distance(at, below) <= 1, "{at} vs {below}");
        assert!(channel_distance(at, above) <= 1, "{at} vs {above}");
    }

    #[rstest]
    #[case(-2.0, 0.3)]
    #[case(-10.0, 0.3)]
    #[case(1.0, 0.65)]
    #[case(4.0, 1.0)]
    #[case(9.0, 1.0)]
    fn test_opacity(#[case] value: f32, #[case] expected: f32) {
        let opacity = anomaly_scale().opacity_for(value);
        assert!((opacity - expected).abs() < 1e-5, "opacity was {opacity}");
    }

    #[test]
    fn test_too_few_breakpoints_rejected() {
        let result = ColorScale::new(vec![bp(0.0, "#000000")]);
        assert!(matches!(result, Err(ConfigError::TooFewBreakpoints(1))));
    }

    #[test]
    fn test_duplicate_breakpoints_rejected() {
        let result = ColorScale::new(vec![bp(0.0, "#000000"), bp(0.0, "#ffffff")]);
        assert!(matches!(result, Err(ConfigError::UnsortedBreakpoints { index: 1, .. })));
    }

    #[test]
    fn test_unsorted_breakpoints_rejected() {
        let result = ColorScale::new(vec![
            bp(0.0, "#000000"),
            bp(2.0, "#888888"),
            bp(1.0, "#ffffff"),
        ]);
        assert!(matches!(result, Err(ConfigError::UnsortedBreakpoints { index: 2, .. })));
    }

    #[test]
    fn test_non_finite_breakpoint_rejected() {
        let result = ColorScale::new(vec![bp(0.0, "#000000"), bp(f32::NAN, "#ffffff")]);
        assert!(matches!(result, Err(ConfigError::NonFiniteBreakpoint { index: 1 })));
    }

    #[rstest]
    #[case("#3b82f6", Some(Rgb::new(0x3b, 0x82, 0xf6)))]
    #[case("DC2626", Some(Rgb::new(0xdc, 0x26, 0x26)))]
    #[case("#fff", None)]
    #[case("#gg0000", None)]
    #[case("#3b82f6ff", None)]
    #[case("", None)]
    #[case("#+f+f+f", None)]
    #[case("#-10000", None)]
    fn test_from_hex(#[case] hex: &str, #[case] expected: Option<Rgb>) {
        assert_eq!(Rgb::from_hex(hex).ok(), expected);
    }

    #[test]
    fn test_from_specs_reports_bad_color() {
        let specs = [
            BreakpointSpec { value: 0.0, color: "#000000".to_string() },
            BreakpointSpec { value: 1.0, color: "red".to_string() },
        ];
        assert!(matches!(
            ColorScale::from_specs(&specs),
            Err(ConfigError::InvalidHexColor(color)) if color == "red"
        ));
    }

    #[test]
    fn test_sample_gradient_hits_both_ends() {
        let scale = anomaly_scale();
        let samples = scale.sample_gradient(7);
        assert_eq!(samples.len(), 7);
        assert_eq!(samples[0].to_hex(), "#3b82f6");
        assert_eq!(samples[6].to_hex(), "#dc2626");
        // -2 + 6 * 2/6 = 0
        assert_eq!(samples[2].to_hex(), "#fbbf24");
    }
}
