// Per-dialog session state.
// - Everything here is scoped to one opening of the styling dialog: tabs,
//   addon selection, the slot being edited, grid cursors, and the palette cache.
// - Reopening the dialog replaces the whole session with a fresh one.
use std::{cell::Cell, mem};

use tracing::debug;

use crate::{
    model::{ColorSlot, Focus, MainTab, RaceTab},
    palette::PaletteCache,
};

#[derive(Debug)]
pub struct StylingSession {
    pub(crate) main_tab: MainTab,
    pub(crate) race_tab: RaceTab,
    pub(crate) focus: Focus,
    pub(crate) selected: Option<usize>,
    pub(crate) editing: ColorSlot,
    pub(crate) list_cursor: usize,
    pub(crate) color_cursor: usize,
    pub(crate) variant_cursor: usize,
    pub(crate) palettes: PaletteCache,
    // Written back by the renderer so grid navigation matches what is on screen.
    palette_columns: Cell<usize>,
    variant_columns: Cell<usize>,
}

impl Default for StylingSession {
    fn default() -> Self {
        Self {
            main_tab: MainTab::default(),
            race_tab: RaceTab::default(),
            focus: Focus::AddonList,
            selected: None,
            editing: ColorSlot::First,
            list_cursor: 0,
            color_cursor: 0,
            variant_cursor: 0,
            palettes: PaletteCache::new(),
            palette_columns: Cell::new(1),
            variant_columns: Cell::new(MIN_VARIANT_COLUMNS),
        }
    }
}

pub const MIN_VARIANT_COLUMNS: usize = 4;

impl StylingSession {
    pub fn main_tab(&self) -> MainTab {
        self.main_tab
    }

    pub fn race_tab(&self) -> RaceTab {
        self.race_tab
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn editing(&self) -> ColorSlot {
        self.editing
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn color_cursor(&self) -> usize {
        self.color_cursor
    }

    pub fn variant_cursor(&self) -> usize {
        self.variant_cursor
    }

    pub fn palettes(&self) -> &PaletteCache {
        &self.palettes
    }

    /// Starts over as a fresh session. The palette cache is cleared in place.
    pub fn reset(&mut self) {
        if !self.palettes.is_empty() {
            debug!(palettes = self.palettes.len(), "clearing palette cache");
        }
        let mut palettes = mem::take(&mut self.palettes);
        palettes.clear();
        *self = Self {
            palettes,
            ..Self::default()
        };
    }

    pub fn palette_columns(&self) -> usize {
        self.palette_columns.get()
    }

    pub fn set_palette_columns(&self, columns: usize) {
        self.palette_columns.set(columns.max(1));
    }

    pub fn variant_columns(&self) -> usize {
        self.variant_columns.get()
    }

    pub fn set_variant_columns(&self, columns: usize) {
        self.variant_columns.set(columns.max(1));
    }
}

/// Moves a cursor inside a row-major grid of `len` cells, staying in bounds.
pub fn move_in_grid(cursor: usize, len: usize, columns: usize, dx: isize, dy: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let columns = columns.max(1) as isize;
    let last = len as isize - 1;
    let cursor = (cursor as isize).min(last);
    let moved = cursor + dx + dy * columns;
    if dy != 0 && !(0..=last).contains(&moved) {
        return cursor as usize;
    }
    moved.clamp(0, last) as usize
}
