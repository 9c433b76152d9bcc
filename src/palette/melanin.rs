// Skin-tone palettes driven by an ordered melanin breakpoint table.
// - Natural mode lists each breakpoint's base color in table order.
// - Synthetic mode samples the gradient's melanin range once per breakpoint and
//   blends the two breakpoints bracketing each sample.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{Color, inverse_lerp, lerp};

use super::generator::MelaninGradient;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MelaninBreakpoint {
    pub min_melanin: f32,
    #[serde(default)]
    pub base: Option<Color>,
}

impl MelaninBreakpoint {
    pub const fn new(min_melanin: f32, base: Color) -> Self {
        Self {
            min_melanin,
            base: Some(base),
        }
    }

    // Breakpoints without a base color blend as white.
    fn base_or_white(&self) -> Color {
        self.base.unwrap_or(Color::WHITE)
    }
}

pub const DEFAULT_BREAKPOINTS: [MelaninBreakpoint; 9] = [
    MelaninBreakpoint::new(0.0, Color::rgb(0.949, 0.929, 0.878)),
    MelaninBreakpoint::new(0.1, Color::rgb(1.0, 0.937, 0.835)),
    MelaninBreakpoint::new(0.25, Color::rgb(1.0, 0.937, 0.741)),
    MelaninBreakpoint::new(0.4, Color::rgb(0.894, 0.776, 0.6)),
    MelaninBreakpoint::new(0.55, Color::rgb(0.812, 0.667, 0.475)),
    MelaninBreakpoint::new(0.7, Color::rgb(0.6, 0.471, 0.322)),
    MelaninBreakpoint::new(0.8, Color::rgb(0.435, 0.333, 0.231)),
    MelaninBreakpoint::new(0.9, Color::rgb(0.31, 0.239, 0.161)),
    MelaninBreakpoint::new(1.0, Color::rgb(0.2, 0.149, 0.098)),
];

pub fn default_breakpoints() -> Vec<MelaninBreakpoint> {
    DEFAULT_BREAKPOINTS.to_vec()
}

pub fn gradient_colors(gradient: &MelaninGradient, breakpoints: &[MelaninBreakpoint]) -> Vec<Color> {
    if gradient.natural {
        natural_colors(breakpoints)
    } else {
        synthetic_colors(gradient, breakpoints)
    }
}

pub fn natural_colors(breakpoints: &[MelaninBreakpoint]) -> Vec<Color> {
    breakpoints.iter().filter_map(|point| point.base).collect()
}

/// One blended color per breakpoint, sampled at `i / len` along the gradient's range.
pub fn synthetic_colors(
    gradient: &MelaninGradient,
    breakpoints: &[MelaninBreakpoint],
) -> Vec<Color> {
    let count = breakpoints.len();
    match count {
        0 => return Vec::new(),
        1 => return vec![breakpoints[0].base_or_white()],
        _ => {}
    }

    (0..count)
        .map(|i| {
            let target = lerp(
                gradient.min_melanin,
                gradient.max_melanin,
                i as f32 / count as f32,
            );
            let upper = bracket_index(breakpoints, target);
            let lower = &breakpoints[upper - 1];
            let upper = &breakpoints[upper];
            let t = inverse_lerp(lower.min_melanin, upper.min_melanin, target);
            lower.base_or_white().lerp(upper.base_or_white(), t)
        })
        .collect()
}

/// Index of the first breakpoint whose threshold reaches `target`, clamped so
/// that both it and its predecessor exist. Requires at least two breakpoints.
pub fn bracket_index(breakpoints: &[MelaninBreakpoint], target: f32) -> usize {
    let last = breakpoints.len() - 1;
    match breakpoints
        .iter()
        .position(|point| point.min_melanin >= target)
    {
        Some(0) => 1,
        Some(index) => index,
        None => {
            warn!(
                melanin = target,
                last_threshold = breakpoints[last].min_melanin,
                "melanin target beyond breakpoint table, clamping to last pair"
            );
            last
        }
    }
}
