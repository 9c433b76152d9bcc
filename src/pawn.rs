// The character being styled and the stores the dialog writes through.
// - `ColorChannelStore`, `HairStyle`, and `VariantStore` are the narrow contracts
//   the addon panels depend on; `Pawn` is the JSON-backed implementation.
// - Handles pawn document load/save and generation of a fresh pawn for a race.
use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    color::Color,
    error::Result,
    model::ColorSlot,
    palette::{ExactColors, PaletteSource, derive_palette},
    race::{HAIR_CHANNEL, RaceDefinition},
};

pub trait ColorChannelStore {
    fn channel(&self, name: &str) -> (Color, Color);
    fn set_channel(&mut self, name: &str, slot: ColorSlot, color: Color);
}

pub trait HairStyle {
    fn set_hair_color(&mut self, color: Color);
    fn notify_style_changed(&mut self);
    fn reset_style_cooldown(&mut self);
    fn clear_next_hair_color(&mut self);
    fn record_desired_hair_color(&mut self, color: Color);
}

pub trait VariantStore {
    fn variant(&self, addon: usize) -> usize;
    fn set_variant(&mut self, addon: usize, variant: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelColors {
    pub first: Color,
    pub second: Color,
}

impl Default for ChannelColors {
    fn default() -> Self {
        Self {
            first: Color::WHITE,
            second: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    #[serde(default)]
    pub next_style_change_tick: Option<u64>,
    #[serde(default)]
    pub style_changes: u32,
    #[serde(default)]
    pub next_hair_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pawn {
    pub name: String,
    #[serde(default = "default_body_type")]
    pub body_type: String,
    pub hair_color: Color,
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelColors>,
    #[serde(default)]
    pub addon_variants: Vec<usize>,
    #[serde(default)]
    pub style: StyleState,
    // Belongs to the open dialog, never persisted.
    #[serde(skip)]
    pub desired_hair_color: Option<Color>,
}

fn default_body_type() -> String {
    "Thin".to_string()
}

const DEFAULT_HAIR: Color = Color::rgb(0.36, 0.25, 0.18);
const STYLE_COOLDOWN_TICKS: u64 = 60_000;

impl Pawn {
    /// A fresh pawn whose channels start at the first color each rule offers.
    pub fn generate(race: &RaceDefinition, name: &str) -> Self {
        let channels = race
            .color_channels
            .iter()
            .map(|rule| {
                let pick = |slot| {
                    derive_palette(Some(rule), slot, race.melanin_breakpoints(), &mut ExactColors)
                        .first()
                        .copied()
                        .unwrap_or(Color::WHITE)
                };
                let colors = ChannelColors {
                    first: pick(ColorSlot::First),
                    second: pick(ColorSlot::Second),
                };
                (rule.name.clone(), colors)
            })
            .collect();

        Self {
            name: name.to_string(),
            body_type: default_body_type(),
            hair_color: DEFAULT_HAIR,
            channels,
            addon_variants: vec![0; race.addon_count()],
            style: StyleState {
                next_style_change_tick: Some(STYLE_COOLDOWN_TICKS),
                ..StyleState::default()
            },
            desired_hair_color: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let pawn: Pawn = serde_json::from_str(&text)?;
        info!(pawn = %pawn.name, path = %path.display(), "loaded pawn");
        Ok(pawn)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        info!(pawn = %self.name, path = %path.display(), "saved pawn");
        Ok(())
    }
}

impl ColorChannelStore for Pawn {
    fn channel(&self, name: &str) -> (Color, Color) {
        let stored = self.channels.get(name).copied().unwrap_or_default();
        if name == HAIR_CHANNEL {
            (self.hair_color, stored.second)
        } else {
            (stored.first, stored.second)
        }
    }

    fn set_channel(&mut self, name: &str, slot: ColorSlot, color: Color) {
        let entry = self.channels.entry(name.to_string()).or_default();
        match slot {
            ColorSlot::First => entry.first = color,
            ColorSlot::Second => entry.second = color,
        }
    }
}

impl HairStyle for Pawn {
    fn set_hair_color(&mut self, color: Color) {
        self.hair_color = color;
    }

    fn notify_style_changed(&mut self) {
        self.style.style_changes += 1;
    }

    fn reset_style_cooldown(&mut self) {
        self.style.next_style_change_tick = None;
    }

    fn clear_next_hair_color(&mut self) {
        self.style.next_hair_color = None;
    }

    fn record_desired_hair_color(&mut self, color: Color) {
        self.desired_hair_color = Some(color);
    }
}

impl VariantStore for Pawn {
    fn variant(&self, addon: usize) -> usize {
        self.addon_variants.get(addon).copied().unwrap_or(0)
    }

    fn set_variant(&mut self, addon: usize, variant: usize) {
        if addon >= self.addon_variants.len() {
            self.addon_variants.resize(addon + 1, 0);
        }
        self.addon_variants[addon] = variant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::tests::sample_race;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_pawn_starts_on_first_palette_colors() {
        let race = sample_race();
        let pawn = Pawn::generate(&race, "Ssira");

        assert_eq!(pawn.addon_variants, vec![0; 5]);
        let skin = pawn.channel("skin");
        assert_eq!(Some(skin.0), race.melanin_breakpoints[0].base);
        assert_eq!(skin.1, Color::rgb(0.2, 0.5, 0.2));
        assert_eq!(pawn.channel("crest").0, Color::rgb(0.5, 0.0, 0.0));
    }

    #[test]
    fn hair_channel_reads_hair_color_first() {
        let race = sample_race();
        let mut pawn = Pawn::generate(&race, "Ssira");
        pawn.set_channel(HAIR_CHANNEL, ColorSlot::Second, Color::BLACK);
        pawn.set_hair_color(Color::WHITE);

        assert_eq!(pawn.channel(HAIR_CHANNEL), (Color::WHITE, Color::BLACK));
    }

    #[test]
    fn unknown_channel_reads_white_and_writes_create_it() {
        let mut pawn = Pawn::generate(&sample_race(), "Ssira");
        assert_eq!(pawn.channel("glow"), (Color::WHITE, Color::WHITE));

        pawn.set_channel("glow", ColorSlot::Second, Color::BLACK);
        assert_eq!(pawn.channel("glow"), (Color::WHITE, Color::BLACK));
    }

    #[test]
    fn variant_store_grows_on_demand() {
        let mut pawn = Pawn::generate(&sample_race(), "Ssira");
        assert_eq!(pawn.variant(9), 0);
        pawn.set_variant(7, 3);
        assert_eq!(pawn.variant(7), 3);
        assert_eq!(pawn.addon_variants.len(), 8);
    }

    #[test]
    fn save_and_load_preserve_everything_but_dialog_state() {
        let dir = std::env::temp_dir().join(format!("styling-station-pawn-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pawn.json");

        let mut pawn = Pawn::generate(&sample_race(), "Ssira");
        pawn.record_desired_hair_color(Color::BLACK);
        pawn.save(&path).unwrap();
        let loaded = Pawn::load(&path).unwrap();

        assert_eq!(loaded.desired_hair_color, None);
        assert_eq!(loaded.channels, pawn.channels);
        assert_eq!(loaded.addon_variants, pawn.addon_variants);
        fs::remove_dir_all(&dir).unwrap();
    }
}
