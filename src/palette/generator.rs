// Declarative color generators read from race definitions.
// - `GeneratorSpec` is the closed set of generator kinds a channel slot can use.
// - Raw color options keep the data-file sentinel form (alpha < 0 means "range")
//   and are converted into `ColorOption` when deserialized.
use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorSpec {
    #[serde(alias = "single", alias = "white")]
    Fixed {
        #[serde(default)]
        color: Color,
    },
    #[serde(alias = "skin_color_melanin")]
    MelaninGradient(MelaninGradient),
    Options {
        #[serde(default)]
        options: Vec<ColorOption>,
    },
    // Colors copied from another channel at generation time; nothing to offer in a picker.
    CustomChannel {
        channel: String,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MelaninGradient {
    #[serde(default)]
    pub natural: bool,
    #[serde(default)]
    pub min_melanin: f32,
    #[serde(default = "full_melanin")]
    pub max_melanin: f32,
}

fn full_melanin() -> f32 {
    1.0
}

impl Default for MelaninGradient {
    fn default() -> Self {
        Self {
            natural: false,
            min_melanin: 0.0,
            max_melanin: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColorOption", into = "RawColorOption")]
pub enum ColorOption {
    Exact(Color),
    Range { min: Color, max: Color },
}

impl ColorOption {
    /// Builds an option from the sentinel form: `only` with alpha >= 0 wins.
    pub fn from_sentinel(only: Color, min: Color, max: Color) -> Self {
        if only.a >= 0.0 {
            Self::Exact(only)
        } else {
            Self::Range { min, max }
        }
    }
}

const UNSET: Color = Color::new(-1.0, -1.0, -1.0, -1.0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawColorOption {
    #[serde(default = "unset")]
    only: Color,
    #[serde(default = "unset")]
    min: Color,
    #[serde(default = "unset")]
    max: Color,
}

fn unset() -> Color {
    UNSET
}

impl From<RawColorOption> for ColorOption {
    fn from(raw: RawColorOption) -> Self {
        Self::from_sentinel(raw.only, raw.min, raw.max)
    }
}

impl From<ColorOption> for RawColorOption {
    fn from(option: ColorOption) -> Self {
        match option {
            ColorOption::Exact(only) => Self {
                only,
                min: UNSET,
                max: UNSET,
            },
            ColorOption::Range { min, max } => Self {
                only: UNSET,
                min,
                max,
            },
        }
    }
}

/// Source for the single color a `Fixed` generator contributes.
pub trait ColorRandomizer {
    fn randomized(&mut self, base: Color) -> Color;
}

/// Returns the configured color unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactColors;

impl ColorRandomizer for ExactColors {
    fn randomized(&mut self, base: Color) -> Color {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_generator_kind() {
        let json = r#"[
            {"type": "single", "color": {"r": 0.2, "g": 0.3, "b": 0.4}},
            {"type": "white"},
            {"type": "melanin_gradient", "natural": true},
            {"type": "options", "options": [{"only": {"r": 1, "g": 0, "b": 0}}]},
            {"type": "custom_channel", "channel": "skin"},
            {"type": "something_new", "weight": 3}
        ]"#;
        let specs: Vec<GeneratorSpec> = serde_json::from_str(json).unwrap();

        assert_eq!(
            specs,
            vec![
                GeneratorSpec::Fixed {
                    color: Color::rgb(0.2, 0.3, 0.4)
                },
                GeneratorSpec::Fixed {
                    color: Color::WHITE
                },
                GeneratorSpec::MelaninGradient(MelaninGradient {
                    natural: true,
                    ..MelaninGradient::default()
                }),
                GeneratorSpec::Options {
                    options: vec![ColorOption::Exact(Color::rgb(1.0, 0.0, 0.0))]
                },
                GeneratorSpec::CustomChannel {
                    channel: "skin".to_string()
                },
                GeneratorSpec::Unsupported,
            ]
        );
    }

    #[test]
    fn negative_alpha_only_means_range() {
        let json = r#"{
            "only": {"r": 0, "g": 0, "b": 0, "a": -1},
            "min": {"r": 0.1, "g": 0.1, "b": 0.1},
            "max": {"r": 0.9, "g": 0.9, "b": 0.9}
        }"#;
        let option: ColorOption = serde_json::from_str(json).unwrap();
        assert_eq!(
            option,
            ColorOption::Range {
                min: Color::rgb(0.1, 0.1, 0.1),
                max: Color::rgb(0.9, 0.9, 0.9),
            }
        );
    }

    #[test]
    fn zero_alpha_only_is_still_exact() {
        let only = Color::new(0.5, 0.5, 0.5, 0.0);
        assert_eq!(
            ColorOption::from_sentinel(only, Color::BLACK, Color::WHITE),
            ColorOption::Exact(only)
        );
    }
}
