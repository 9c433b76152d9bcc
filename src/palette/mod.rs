// Palette derivation engine.
// - Turns a channel's generator rules into the ordered swatch list a picker shows.
// - Caches derived palettes per (addon, slot) for the lifetime of a dialog session.
// - Has no UI dependency; rules and breakpoints come in through `PaletteSource`.
mod generator;
mod grid;
mod melanin;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{color::Color, model::ColorSlot};

pub use self::{
    generator::{ColorOption, ColorRandomizer, ExactColors, GeneratorSpec},
    grid::range_candidates,
    melanin::{MelaninBreakpoint, default_breakpoints},
};

/// A named color channel and its ordered generator categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorChannelRule {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ChannelCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCategory {
    pub first: GeneratorSpec,
    pub second: GeneratorSpec,
}

impl ChannelCategory {
    pub fn generator(&self, slot: ColorSlot) -> &GeneratorSpec {
        match slot {
            ColorSlot::First => &self.first,
            ColorSlot::Second => &self.second,
        }
    }
}

/// Where the engine looks up channel rules and the melanin table.
pub trait PaletteSource {
    fn channel_rule(&self, name: &str) -> Option<&ColorChannelRule>;
    fn melanin_breakpoints(&self) -> &[MelaninBreakpoint];
}

/// Position of an addon in the session's addon list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddonId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteKey {
    pub addon: AddonId,
    pub slot: ColorSlot,
}

/// Derives the full palette for one slot of a channel rule.
///
/// Colors accumulate in entry order, then in each generator's own order.
/// Duplicates are kept.
pub fn derive_palette(
    rule: Option<&ColorChannelRule>,
    slot: ColorSlot,
    breakpoints: &[MelaninBreakpoint],
    randomizer: &mut dyn ColorRandomizer,
) -> Vec<Color> {
    let Some(rule) = rule else {
        return Vec::new();
    };

    let mut colors = Vec::new();
    for entry in &rule.entries {
        match entry.generator(slot) {
            GeneratorSpec::Fixed { color } => colors.push(randomizer.randomized(*color)),
            GeneratorSpec::MelaninGradient(gradient) => {
                colors.extend(melanin::gradient_colors(gradient, breakpoints));
            }
            GeneratorSpec::Options { options } => {
                for option in options {
                    match *option {
                        ColorOption::Exact(color) => colors.push(color),
                        ColorOption::Range { min, max } => {
                            colors.extend(range_candidates(min, max));
                        }
                    }
                }
            }
            GeneratorSpec::CustomChannel { .. } | GeneratorSpec::Unsupported => {}
        }
    }
    colors
}

/// Lazily filled palette store. Entries live until `clear` is called.
#[derive(Debug, Default)]
pub struct PaletteCache {
    entries: HashMap<PaletteKey, Vec<Color>>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette<S: PaletteSource + ?Sized>(
        &mut self,
        addon: AddonId,
        channel: &str,
        slot: ColorSlot,
        source: &S,
        randomizer: &mut dyn ColorRandomizer,
    ) -> &[Color] {
        let key = PaletteKey { addon, slot };
        self.entries.entry(key).or_insert_with(|| {
            let colors = derive_palette(
                source.channel_rule(channel),
                slot,
                source.melanin_breakpoints(),
                randomizer,
            );
            debug!(
                addon = addon.0,
                channel,
                slot = slot.label(),
                count = colors.len(),
                "derived palette"
            );
            colors
        })
    }

    pub fn cached(&self, addon: AddonId, slot: ColorSlot) -> Option<&[Color]> {
        self.entries
            .get(&PaletteKey { addon, slot })
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
