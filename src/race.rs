// Race definition documents.
// - Loads and validates the JSON race file: channels, body addons, melanin table.
// - Exposes the addon list the styling dialog shows (race addons + universal addons).
// - Serves channel rules to the palette engine.
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    color::Color,
    error::{Error, Result},
    palette::{ColorChannelRule, MelaninBreakpoint, PaletteSource, default_breakpoints},
    pawn::Pawn,
};

pub const HAIR_CHANNEL: &str = "hair";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDefinition {
    pub name: String,
    #[serde(default)]
    pub color_channels: Vec<ColorChannelRule>,
    #[serde(default)]
    pub body_addons: Vec<BodyAddon>,
    #[serde(default)]
    pub universal_addons: Vec<BodyAddon>,
    #[serde(default = "default_breakpoints")]
    pub melanin_breakpoints: Vec<MelaninBreakpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyAddon {
    pub name: String,
    pub path: String,
    #[serde(default = "one")]
    pub variant_count: usize,
    #[serde(default = "skin_channel")]
    pub color_channel: String,
    #[serde(default)]
    pub link_variant_index_with_previous: bool,
    #[serde(default)]
    pub color_override_one: Option<Color>,
    #[serde(default)]
    pub color_override_two: Option<Color>,
    #[serde(default)]
    pub body_type_specific: bool,
}

fn one() -> usize {
    1
}

fn skin_channel() -> String {
    "skin".to_string()
}

impl BodyAddon {
    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    pub fn color_channel(&self) -> &str {
        &self.color_channel
    }

    pub fn linked_to_previous(&self) -> bool {
        self.link_variant_index_with_previous
    }

    pub fn color_overrides(&self) -> (Option<Color>, Option<Color>) {
        (self.color_override_one, self.color_override_two)
    }

    /// Texture path for `variant` as seen from the south, e.g. `Things/Tail2_south`.
    pub fn image_path(&self, pawn: &Pawn, variant: usize) -> String {
        let mut path = self.path.clone();
        if self.body_type_specific {
            path.push('_');
            path.push_str(&pawn.body_type);
        }
        if variant > 0 {
            path.push_str(&variant.to_string());
        }
        path.push_str("_south");
        path
    }

    /// Both slot colors as displayed: per-addon overrides win over the channel.
    pub fn displayed_colors(&self, channel: (Color, Color)) -> (Color, Color) {
        let (first, second) = self.color_overrides();
        (first.unwrap_or(channel.0), second.unwrap_or(channel.1))
    }
}

impl RaceDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let race: RaceDefinition = serde_json::from_str(&text)?;
        race.validate()?;
        info!(
            race = %race.name,
            addons = race.addon_count(),
            channels = race.color_channels.len(),
            "loaded race definition"
        );
        Ok(race)
    }

    pub fn validate(&self) -> Result<()> {
        for addon in self.addons() {
            if addon.variant_count == 0 {
                return Err(Error::InvalidRace(format!(
                    "addon '{}' has no variants",
                    addon.name
                )));
            }
            if addon.color_channel != HAIR_CHANNEL
                && self.channel_rule(&addon.color_channel).is_none()
            {
                warn!(
                    addon = %addon.name,
                    channel = %addon.color_channel,
                    "addon channel has no color rule, palette will be empty"
                );
            }
        }

        let decreasing = self
            .melanin_breakpoints
            .windows(2)
            .any(|pair| pair[1].min_melanin < pair[0].min_melanin);
        if decreasing {
            return Err(Error::InvalidRace(
                "melanin breakpoints must be ordered by min_melanin".to_string(),
            ));
        }

        Ok(())
    }

    /// Race addons followed by the universal addons, in display order.
    pub fn addons(&self) -> impl Iterator<Item = &BodyAddon> {
        self.body_addons.iter().chain(self.universal_addons.iter())
    }

    pub fn addon(&self, index: usize) -> Option<&BodyAddon> {
        self.addons().nth(index)
    }

    pub fn addon_count(&self) -> usize {
        self.body_addons.len() + self.universal_addons.len()
    }

    pub fn linked_flags(&self) -> Vec<bool> {
        self.addons().map(BodyAddon::linked_to_previous).collect()
    }
}

impl PaletteSource for RaceDefinition {
    fn channel_rule(&self, name: &str) -> Option<&ColorChannelRule> {
        self.color_channels.iter().find(|rule| rule.name == name)
    }

    fn melanin_breakpoints(&self) -> &[MelaninBreakpoint] {
        &self.melanin_breakpoints
    }
}
