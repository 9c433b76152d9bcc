// Body-addon list and detail behavior for the race tab.
// - Keeps the addon selection valid and warms the palette cache once per frame.
// - Commits swatches through the pawn's channel store (or the hair collaborator).
// - Applies variant choices and propagates them along linked addon chains.
use std::ops::Range;

use tracing::{debug, info};

use crate::{
    color::Color,
    model::{ColorSlot, Focus, MainTab},
    palette::AddonId,
    pawn::{ColorChannelStore, HairStyle, VariantStore},
    race::{BodyAddon, HAIR_CHANNEL},
};

use super::{App, session::move_in_grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCommit {
    Hair,
    Channel,
}

/// Drops a selection that no longer points at an addon.
pub fn validate_selection(selected: Option<usize>, addon_count: usize) -> Option<usize> {
    selected.filter(|&index| index < addon_count)
}

/// Slot the picker should edit given how many colors each slot offers.
/// `None` means neither slot has anything to pick.
pub fn resolve_editing_slot(
    current: ColorSlot,
    first_len: usize,
    second_len: usize,
) -> Option<ColorSlot> {
    match (first_len > 0, second_len > 0) {
        (false, false) => None,
        (true, false) => Some(ColorSlot::First),
        (false, true) => Some(ColorSlot::Second),
        (true, true) => Some(current),
    }
}

/// Writes a picked color. The first hair slot goes to the pawn's hair instead of
/// the generic channel store.
pub fn commit_color<S>(store: &mut S, channel: &str, slot: ColorSlot, color: Color) -> ColorCommit
where
    S: ColorChannelStore + HairStyle + ?Sized,
{
    if channel == HAIR_CHANNEL && slot == ColorSlot::First {
        store.set_hair_color(color);
        store.notify_style_changed();
        store.reset_style_cooldown();
        store.clear_next_hair_color();
        store.record_desired_hair_color(color);
        ColorCommit::Hair
    } else {
        store.set_channel(channel, slot, color);
        ColorCommit::Channel
    }
}

/// Sets `pivot` to `variant`, then walks outward in both directions while the
/// neighbouring addon is linked, applying the same variant. Returns every index
/// written, pivot first.
pub fn propagate_variant<V: VariantStore + ?Sized>(
    linked: &[bool],
    store: &mut V,
    pivot: usize,
    variant: usize,
) -> Vec<usize> {
    let is_linked = |index: usize| linked.get(index).copied().unwrap_or(false);

    store.set_variant(pivot, variant);
    let mut written = vec![pivot];

    for index in (0..pivot).rev() {
        if !is_linked(index) {
            break;
        }
        store.set_variant(index, variant);
        written.push(index);
    }

    for index in pivot + 1..linked.len() {
        if !is_linked(index) {
            break;
        }
        store.set_variant(index, variant);
        written.push(index);
    }

    written
}

/// Indices of the linked chain containing `index`: the chain head plus every
/// following addon linked to its predecessor.
pub fn linked_group(linked: &[bool], index: usize) -> Range<usize> {
    if index >= linked.len() {
        return index..index + 1;
    }
    let mut start = index;
    while start > 0 && linked[start] {
        start -= 1;
    }
    let mut end = index + 1;
    while end < linked.len() && linked[end] {
        end += 1;
    }
    start..end
}

impl App {
    pub fn addon_count(&self) -> usize {
        self.race.addon_count()
    }

    pub fn selected_addon(&self) -> Option<(usize, &BodyAddon)> {
        let index = self.session.selected?;
        self.race.addon(index).map(|addon| (index, addon))
    }

    /// Per-frame upkeep before rendering the race tab: validates the selection,
    /// derives both palettes of the selected addon, and settles the editing slot.
    pub fn prepare_frame(&mut self) {
        if self.session.main_tab != MainTab::Race {
            return;
        }

        let count = self.race.addon_count();
        let validated = validate_selection(self.session.selected, count);
        if validated != self.session.selected {
            debug!(stale = ?self.session.selected, count, "dropping stale addon selection");
            self.session.selected = validated;
        }
        self.session.list_cursor = self.session.list_cursor.min(count.saturating_sub(1));

        let Some(index) = self.session.selected else {
            return;
        };
        let Some(addon) = self.race.addon(index) else {
            return;
        };

        let addon_id = AddonId(index);
        let first_len = self
            .session
            .palettes
            .palette(
                addon_id,
                &addon.color_channel,
                ColorSlot::First,
                &self.race,
                &mut self.randomizer,
            )
            .len();
        let second_len = self
            .session
            .palettes
            .palette(
                addon_id,
                &addon.color_channel,
                ColorSlot::Second,
                &self.race,
                &mut self.randomizer,
            )
            .len();

        match resolve_editing_slot(self.session.editing, first_len, second_len) {
            Some(slot) => self.session.editing = slot,
            None => {
                if self.session.focus == Focus::Colors {
                    self.session.focus = Focus::Variants;
                }
            }
        }

        let palette_len = self.slot_palette(self.session.editing).len();
        self.session.color_cursor = self.session.color_cursor.min(palette_len.saturating_sub(1));
        let variants = addon.variant_count();
        self.session.variant_cursor = self.session.variant_cursor.min(variants.saturating_sub(1));
    }

    /// Cached palette of the selected addon for `slot`; empty until derived.
    pub fn slot_palette(&self, slot: ColorSlot) -> &[Color] {
        self.session
            .selected
            .and_then(|index| self.session.palettes().cached(AddonId(index), slot))
            .unwrap_or(&[])
    }

    pub fn editing_palette(&self) -> &[Color] {
        self.slot_palette(self.session.editing)
    }

    pub fn has_any_palette(&self) -> bool {
        !self.slot_palette(ColorSlot::First).is_empty()
            || !self.slot_palette(ColorSlot::Second).is_empty()
    }

    /// Colors shown for an addon row: overrides first, then the pawn's channel.
    pub fn displayed_colors(&self, addon: &BodyAddon) -> (Color, Color) {
        addon.displayed_colors(self.pawn.channel(addon.color_channel()))
    }

    /// The color shown for one slot of an addon, overrides applied.
    pub fn displayed_slot_color(&self, addon: &BodyAddon, slot: ColorSlot) -> Color {
        let (first, second) = self.displayed_colors(addon);
        match slot {
            ColorSlot::First => first,
            ColorSlot::Second => second,
        }
    }

    /// True for rows that share a linked chain with the selected row (but are not it).
    /// `linked` is the race's link flags, computed once per frame by the caller.
    pub fn in_selected_group(&self, linked: &[bool], index: usize) -> bool {
        let Some(selected) = self.session.selected else {
            return false;
        };
        selected != index && linked_group(linked, index).contains(&selected)
    }

    pub fn next_addon(&mut self) {
        let count = self.race.addon_count();
        if count == 0 {
            self.session.list_cursor = 0;
        } else {
            self.session.list_cursor = (self.session.list_cursor + 1).min(count - 1);
        }
    }

    pub fn previous_addon(&mut self) {
        self.session.list_cursor = self.session.list_cursor.saturating_sub(1);
    }

    pub fn select_addon(&mut self, index: usize) {
        let Some(addon) = self.race.addon(index) else {
            self.status_message = "No addon at that position.".to_string();
            return;
        };

        info!(index, addon = %addon.name, "addon selected");
        self.status_message = format!("Selected {}", addon.name);
        self.session.selected = Some(index);
        self.session.list_cursor = index;
        self.session.color_cursor = 0;
        self.session.variant_cursor = self.pawn.variant(index);
    }

    pub fn activate_list_row(&mut self) {
        self.select_addon(self.session.list_cursor);
    }

    pub fn switch_editing_slot(&mut self, slot: ColorSlot) {
        if self.slot_palette(slot).is_empty() {
            self.status_message = format!("No {} colors available for this addon.", slot.label());
            return;
        }
        self.session.editing = slot;
        self.session.color_cursor = 0;
    }

    pub fn move_color_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.editing_palette().len();
        let columns = self.session.palette_columns();
        self.session.color_cursor = move_in_grid(self.session.color_cursor, len, columns, dx, dy);
    }

    pub fn move_variant_cursor(&mut self, dx: isize, dy: isize) {
        let len = self
            .selected_addon()
            .map(|(_, addon)| addon.variant_count())
            .unwrap_or(0);
        let columns = self.session.variant_columns();
        self.session.variant_cursor =
            move_in_grid(self.session.variant_cursor, len, columns, dx, dy);
    }

    pub fn commit_selected_color(&mut self) {
        let Some((index, addon)) = self.selected_addon() else {
            self.status_message = "Select an addon first.".to_string();
            return;
        };
        let Some(color) = self.editing_palette().get(self.session.color_cursor).copied() else {
            self.status_message = "No color to pick.".to_string();
            return;
        };

        let channel = addon.color_channel.clone();
        let name = addon.name.clone();
        let slot = self.session.editing;
        let target = commit_color(&mut self.pawn, &channel, slot, color);
        info!(
            index,
            addon = %name,
            channel = %channel,
            slot = slot.label(),
            color = %color.into_hex6(),
            ?target,
            "color committed"
        );
        self.status_message = match target {
            ColorCommit::Hair => format!("Hair color set to {}", color.into_hex6()),
            ColorCommit::Channel => format!(
                "Channel '{channel}' {} color set to {}",
                slot.label(),
                color.into_hex6()
            ),
        };
    }

    pub fn choose_selected_variant(&mut self) {
        let Some((index, addon)) = self.selected_addon() else {
            self.status_message = "Select an addon first.".to_string();
            return;
        };
        let variant = self.session.variant_cursor;
        if variant >= addon.variant_count() {
            return;
        }

        let name = addon.name.clone();
        let linked = self.race.linked_flags();
        let written = propagate_variant(&linked, &mut self.pawn, index, variant);
        info!(index, addon = %name, variant, ?written, "variant chosen");
        self.status_message = if written.len() > 1 {
            format!("{name} variant {variant} (applied to {} linked addons)", written.len() - 1)
        } else {
            format!("{name} variant {variant}")
        };
    }

    /// Enter/Space on whatever pane has focus.
    pub fn activate_focused(&mut self) {
        match self.session.focus {
            Focus::AddonList => self.activate_list_row(),
            Focus::Colors => self.commit_selected_color(),
            Focus::Variants => self.choose_selected_variant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::tests::sample_app, model::MainTab};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Variants(Vec<usize>);

    impl VariantStore for Variants {
        fn variant(&self, addon: usize) -> usize {
            self.0[addon]
        }

        fn set_variant(&mut self, addon: usize, variant: usize) {
            self.0[addon] = variant;
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        channels: Vec<(String, ColorSlot, Color)>,
        hair: Option<Color>,
        style_changes: usize,
        cooldown_reset: bool,
        next_hair_cleared: bool,
        desired: Option<Color>,
    }

    impl ColorChannelStore for RecordingStore {
        fn channel(&self, _name: &str) -> (Color, Color) {
            (Color::WHITE, Color::WHITE)
        }

        fn set_channel(&mut self, name: &str, slot: ColorSlot, color: Color) {
            self.channels.push((name.to_string(), slot, color));
        }
    }

    impl HairStyle for RecordingStore {
        fn set_hair_color(&mut self, color: Color) {
            self.hair = Some(color);
        }

        fn notify_style_changed(&mut self) {
            self.style_changes += 1;
        }

        fn reset_style_cooldown(&mut self) {
            self.cooldown_reset = true;
        }

        fn clear_next_hair_color(&mut self) {
            self.next_hair_cleared = true;
        }

        fn record_desired_hair_color(&mut self, color: Color) {
            self.desired = Some(color);
        }
    }

    // [A0, A1(linked), A2(linked), A3]
    const CHAIN: [bool; 4] = [false, true, true, false];

    #[test]
    fn variant_from_linked_middle_reaches_following_links_only() {
        let mut store = Variants(vec![0; 4]);
        let written = propagate_variant(&CHAIN, &mut store, 1, 5);
        assert_eq!(store.0, vec![0, 5, 5, 0]);
        assert_eq!(written, vec![1, 2]);
    }

    #[test]
    fn variant_on_unlinked_head_does_not_propagate() {
        let mut store = Variants(vec![0; 4]);
        propagate_variant(&CHAIN, &mut store, 0, 3);
        assert_eq!(store.0, vec![3, 0, 0, 0]);
    }

    #[test]
    fn variant_from_chain_tail_walks_back_through_links() {
        let mut store = Variants(vec![0; 4]);
        propagate_variant(&CHAIN, &mut store, 2, 7);
        assert_eq!(store.0, vec![0, 7, 7, 0]);

        let mut store = Variants(vec![0; 4]);
        propagate_variant(&CHAIN, &mut store, 3, 1);
        assert_eq!(store.0, vec![0, 0, 0, 1]);
    }

    #[test]
    fn linked_group_spans_chain() {
        assert_eq!(linked_group(&CHAIN, 0), 0..3);
        assert_eq!(linked_group(&CHAIN, 2), 0..3);
        assert_eq!(linked_group(&CHAIN, 3), 3..4);
        assert_eq!(linked_group(&CHAIN, 9), 9..10);
    }

    #[test]
    fn editing_slot_falls_back_to_non_empty_side() {
        assert_eq!(resolve_editing_slot(ColorSlot::First, 0, 4), Some(ColorSlot::Second));
        assert_eq!(resolve_editing_slot(ColorSlot::Second, 4, 0), Some(ColorSlot::First));
        assert_eq!(resolve_editing_slot(ColorSlot::Second, 2, 2), Some(ColorSlot::Second));
        assert_eq!(resolve_editing_slot(ColorSlot::First, 0, 0), None);
    }

    #[test]
    fn stale_selection_is_dropped() {
        assert_eq!(validate_selection(Some(4), 4), None);
        assert_eq!(validate_selection(Some(3), 4), Some(3));
        assert_eq!(validate_selection(None, 4), None);
    }

    #[test]
    fn hair_first_slot_goes_to_hair_collaborator() {
        let mut store = RecordingStore::default();
        let color = Color::rgb(0.1, 0.2, 0.3);

        assert_eq!(commit_color(&mut store, HAIR_CHANNEL, ColorSlot::First, color), ColorCommit::Hair);
        assert_eq!(store.hair, Some(color));
        assert_eq!(store.desired, Some(color));
        assert_eq!(store.style_changes, 1);
        assert!(store.cooldown_reset);
        assert!(store.next_hair_cleared);
        assert!(store.channels.is_empty());
    }

    #[test]
    fn other_slots_write_generic_channel() {
        let mut store = RecordingStore::default();
        commit_color(&mut store, HAIR_CHANNEL, ColorSlot::Second, Color::BLACK);
        commit_color(&mut store, "skin", ColorSlot::First, Color::WHITE);

        assert_eq!(store.hair, None);
        assert_eq!(
            store.channels,
            vec![
                (HAIR_CHANNEL.to_string(), ColorSlot::Second, Color::BLACK),
                ("skin".to_string(), ColorSlot::First, Color::WHITE),
            ]
        );
    }

    #[test]
    fn prepare_frame_moves_editing_to_second_when_first_is_empty() {
        let mut app = sample_app();
        app.select_main_tab(MainTab::Race);
        // Scar: channel "missing" has no rule, both palettes empty
        app.select_addon(4);
        app.session.focus = Focus::Colors;
        app.prepare_frame();
        assert!(!app.has_any_palette());
        assert_eq!(app.focus(), Focus::Variants);

        // Head frill: crest second slot is a custom channel (empty), first has a range
        app.select_addon(0);
        app.session.editing = ColorSlot::Second;
        app.prepare_frame();
        assert_eq!(app.session().editing(), ColorSlot::First);
        assert_eq!(app.editing_palette().len(), 3);
    }

    #[test]
    fn prepare_frame_only_runs_on_race_tab() {
        let mut app = sample_app();
        app.session.selected = Some(99);
        app.prepare_frame();
        assert_eq!(app.session().selected(), Some(99));

        app.select_main_tab(MainTab::Race);
        app.prepare_frame();
        assert_eq!(app.session().selected(), None);
    }

    #[test]
    fn committing_swatch_updates_pawn_channel() {
        let mut app = sample_app();
        app.select_main_tab(MainTab::Race);
        app.select_addon(0);
        app.prepare_frame();
        app.session.color_cursor = 2;
        app.commit_selected_color();

        let expected = app.editing_palette()[2];
        assert_eq!(app.pawn().channel("crest").0, expected);
        assert!(app.status_message.contains("crest"));
    }

    #[test]
    fn committing_hair_swatch_sets_hair_and_desired_color() {
        let mut app = sample_app();
        app.race.color_channels.push(crate::palette::ColorChannelRule {
            name: HAIR_CHANNEL.to_string(),
            entries: vec![crate::palette::ChannelCategory {
                first: crate::palette::GeneratorSpec::Fixed { color: Color::BLACK },
                second: crate::palette::GeneratorSpec::Unsupported,
            }],
        });
        app.select_main_tab(MainTab::Race);
        app.select_addon(3);
        app.prepare_frame();
        app.commit_selected_color();

        assert_eq!(app.pawn().hair_color, Color::BLACK);
        assert_eq!(app.pawn().desired_hair_color, Some(Color::BLACK));
        assert_eq!(app.pawn().style.next_style_change_tick, None);
        assert_eq!(app.pawn().style.style_changes, 1);
    }

    #[test]
    fn choosing_variant_propagates_to_linked_tail() {
        let mut app = sample_app();
        app.select_main_tab(MainTab::Race);
        app.select_addon(1);
        app.prepare_frame();
        app.session.focus = Focus::Variants;
        app.move_variant_cursor(1, 0);
        app.move_variant_cursor(1, 0);
        app.activate_focused();

        assert_eq!(app.pawn().addon_variants, vec![0, 2, 2, 0, 0]);
        let linked = app.race().linked_flags();
        assert!(app.in_selected_group(&linked, 2));
        assert!(!app.in_selected_group(&linked, 1));
        assert!(!app.in_selected_group(&linked, 3));
    }

    #[test]
    fn current_slot_color_applies_addon_overrides() {
        let app = sample_app();
        let scar = app.race().addon(4).unwrap();

        assert_eq!(app.pawn().channel(scar.color_channel()).1, Color::WHITE);
        assert_eq!(
            app.displayed_slot_color(scar, ColorSlot::Second),
            Color::rgb(0.9, 0.1, 0.1)
        );
        assert_eq!(app.displayed_slot_color(scar, ColorSlot::First), Color::WHITE);
    }

    #[test]
    fn slot_switch_refuses_empty_palette() {
        let mut app = sample_app();
        app.select_main_tab(MainTab::Race);
        app.select_addon(0);
        app.prepare_frame();
        app.switch_editing_slot(ColorSlot::Second);
        assert_eq!(app.session().editing(), ColorSlot::First);
        assert!(app.status_message.starts_with("No second colors"));
    }

    #[test]
    fn list_cursor_stays_within_addons() {
        let mut app = sample_app();
        for _ in 0..10 {
            app.next_addon();
        }
        assert_eq!(app.session().list_cursor(), 4);
        app.previous_addon();
        app.activate_list_row();
        assert_eq!(app.selected_addon().map(|(index, _)| index), Some(3));
    }
}
