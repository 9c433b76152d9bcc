// Shared data model used across state, input handling, and rendering.
// - Defines the dialog's closed tab sets and focus targets.
// - Defines the color slot selector shared by the palette engine and the stores.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AddonList,
    Colors,
    Variants,
}

impl Focus {
    pub fn next_window(self) -> Self {
        match self {
            Self::AddonList => Self::Colors,
            Self::Colors => Self::Variants,
            Self::Variants => Self::AddonList,
        }
    }

    pub fn previous_window(self) -> Self {
        match self {
            Self::AddonList => Self::Variants,
            Self::Colors => Self::AddonList,
            Self::Variants => Self::Colors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Character,
    Race,
}

impl MainTab {
    pub const ALL: [Self; 2] = [Self::Character, Self::Race];

    pub fn next(self) -> Self {
        match self {
            Self::Character => Self::Race,
            Self::Race => Self::Character,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Character => Self::Race,
            Self::Race => Self::Character,
        }
    }

    pub fn number(self) -> usize {
        match self {
            Self::Character => 1,
            Self::Race => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Character => "Character features",
            Self::Race => "Race features",
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(Self::Character),
            2 => Some(Self::Race),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceTab {
    #[default]
    BodyAddons,
}

impl RaceTab {
    pub const ALL: [Self; 1] = [Self::BodyAddons];

    pub fn label(self) -> &'static str {
        match self {
            Self::BodyAddons => "Body addons",
        }
    }
}

/// Which of a channel's two colors is being derived or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSlot {
    #[default]
    First,
    Second,
}

impl ColorSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}
