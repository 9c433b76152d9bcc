// Float RGBA color shared by the palette engine, the pawn stores, and rendering.
// - Components are nominally 0.0..=1.0; alpha below zero is only meaningful as
//   the "not an exact color" sentinel in raw color options.
// - Provides interpolation helpers and the HSV projection used to order palettes.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    // Component-wise blend; t is clamped so callers can pass raw ratios.
    // Weighted form keeps both endpoints exact.
    #[must_use]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Hue in degrees, saturation and value in 0.0..=1.0. Alpha is ignored.
    #[must_use]
    pub fn into_hsv(self) -> [f32; 3] {
        let c_max = self.r.max(self.g).max(self.b);
        let c_min = self.r.min(self.g).min(self.b);
        let delta = c_max - c_min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else {
            match c_max {
                _ if self.r == c_max => 60.0 * ((self.g - self.b) / delta).rem_euclid(6.0),
                _ if self.g == c_max => 60.0 * ((self.b - self.r) / delta + 2.0),
                _ => 60.0 * ((self.r - self.g) / delta + 4.0),
            }
        };

        let s = if c_max <= 0.0 { 0.0 } else { delta / c_max };

        [h, s, c_max]
    }

    // Sort key for grid palettes: dull colors first, vivid last.
    #[must_use]
    pub fn saturation_plus_value(self) -> f32 {
        let [_, s, v] = self.into_hsv();
        s + v
    }

    #[must_use]
    pub fn into_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    #[must_use]
    pub fn into_rgb8(self) -> [u8; 3] {
        let [r, g, b, _] = self.into_rgba8();
        [r, g, b]
    }

    /// Two colors are indistinguishable when they quantize to the same 8-bit RGBA.
    #[must_use]
    pub fn indistinguishable_from(self, other: Color) -> bool {
        self.into_rgba8() == other.into_rgba8()
    }

    #[must_use]
    pub fn into_hex6(self) -> String {
        let [r, g, b] = self.into_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        let [r, g, b] = color.into_rgb8();
        ratatui::style::Color::Rgb(r, g, b)
    }
}

#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to 0.0..=1.0.
/// A zero-width interval maps everything to 0.0.
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hsv_of_primary_and_grey() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).into_hsv(), [0.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0.0, 0.0, 1.0).into_hsv(), [240.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0.5, 0.5, 0.5).into_hsv(), [0.0, 0.0, 0.5]);
        assert_eq!(Color::BLACK.into_hsv(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn lerp_clamps_factor() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn inverse_lerp_handles_degenerate_interval() {
        assert_eq!(inverse_lerp(0.3, 0.3, 0.3), 0.0);
        assert_eq!(inverse_lerp(0.0, 2.0, 1.0), 0.5);
        assert_eq!(inverse_lerp(0.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn indistinguishable_uses_byte_precision() {
        let base = Color::rgb(0.5, 0.25, 0.75);
        let nudged = Color::rgb(0.5 + 0.0005, 0.25, 0.75);
        assert!(base.indistinguishable_from(nudged));
        assert!(!base.indistinguishable_from(Color::rgb(0.6, 0.25, 0.75)));
    }

    #[test]
    fn alpha_defaults_to_opaque_when_missing() {
        let color: Color = serde_json::from_str(r#"{"r":0.1,"g":0.2,"b":0.3}"#).unwrap();
        assert_eq!(color.a, 1.0);
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).into_hex6(), "#FF0000");
    }
}
