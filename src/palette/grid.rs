// Discretization of min/max color ranges into a picker grid.
// - Each RGBA axis is stepped at half its span (or EPSILON for a flat axis),
//   so a non-degenerate axis contributes min, midpoint, and max.
// - The Cartesian product is ordered by saturation + value, dull to vivid.
use crate::color::Color;

/// Smallest step an axis may take; keeps a flat axis from looping forever.
pub const EPSILON: f32 = 0.0001;

// Float accumulation may land a hair above `max` on the last step.
const TOLERANCE: f32 = 1e-5;

pub fn axis_values(min: f32, max: f32) -> Vec<f32> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }

    let step = EPSILON.max((max - min) / 2.0);
    let mut values: Vec<f32> = Vec::new();
    let mut index = 0u32;
    loop {
        let value = min + step * index as f32;
        if value > max + TOLERANCE {
            break;
        }
        let value = value.min(max);
        // At large magnitudes the step can vanish below f32 precision.
        if values.last().is_some_and(|&previous| value <= previous) {
            break;
        }
        values.push(value);
        index += 1;
    }
    values
}

/// Enumerates the candidate colors between `min` and `max`, sorted ascending
/// by saturation + value. Ties keep enumeration order (r, then g, b, a).
pub fn range_candidates(min: Color, max: Color) -> Vec<Color> {
    let reds = axis_values(min.r, max.r);
    let greens = axis_values(min.g, max.g);
    let blues = axis_values(min.b, max.b);
    let alphas = axis_values(min.a, max.a);

    let mut candidates =
        Vec::with_capacity(reds.len() * greens.len() * blues.len() * alphas.len());
    for &r in &reds {
        for &g in &greens {
            for &b in &blues {
                for &a in &alphas {
                    candidates.push(Color::new(r, g, b, a));
                }
            }
        }
    }

    candidates.sort_by(|left, right| {
        left.saturation_plus_value()
            .total_cmp(&right.saturation_plus_value())
    });
    candidates
}
