// Central application state shared by the app submodules.
// - Owns the loaded race definition, the pawn being styled, and the dialog session.
// - Implements tab navigation and dialog lifecycle (open, reopen, write pawn).
// - Addon list/detail behavior lives in `addons`.
mod addons;
mod input;
mod session;

use std::{cell::Cell, path::PathBuf};

use tracing::{info, warn};

use crate::{
    error::Result,
    model::{Focus, MainTab, RaceTab},
    palette::ExactColors,
    pawn::Pawn,
    race::RaceDefinition,
};

pub use self::session::{MIN_VARIANT_COLUMNS, StylingSession};

pub struct App {
    race_path: PathBuf,
    pawn_path: Option<PathBuf>,
    pub(crate) race: RaceDefinition,
    pub(crate) pawn: Pawn,
    pub(crate) session: StylingSession,
    randomizer: ExactColors,
    pub(crate) status_message: String,
    pub(crate) show_keybinds: bool,
    keybinds_scroll: Cell<usize>,
}

impl App {
    pub fn new(race_path: PathBuf, pawn_path: Option<PathBuf>) -> Result<Self> {
        let race = RaceDefinition::load(&race_path)?;
        let pawn = match &pawn_path {
            Some(path) if path.exists() => Pawn::load(path)?,
            _ => Pawn::generate(&race, &format!("{} pawn", race.name)),
        };
        Ok(Self::with_parts(race_path, pawn_path, race, pawn))
    }

    pub(crate) fn with_parts(
        race_path: PathBuf,
        pawn_path: Option<PathBuf>,
        race: RaceDefinition,
        pawn: Pawn,
    ) -> Self {
        info!(race = %race.name, pawn = %pawn.name, "styling dialog opened");
        Self {
            race_path,
            pawn_path,
            race,
            pawn,
            session: StylingSession::default(),
            randomizer: ExactColors,
            status_message: "Ctrl+n switches between character and race features.".to_string(),
            show_keybinds: false,
            keybinds_scroll: Cell::new(0),
        }
    }

    pub fn session(&self) -> &StylingSession {
        &self.session
    }

    pub fn race(&self) -> &RaceDefinition {
        &self.race
    }

    pub fn pawn(&self) -> &Pawn {
        &self.pawn
    }

    pub fn main_tab(&self) -> MainTab {
        self.session.main_tab()
    }

    pub fn race_tab(&self) -> RaceTab {
        self.session.race_tab()
    }

    pub fn focus(&self) -> Focus {
        self.session.focus()
    }

    pub fn select_main_tab(&mut self, tab: MainTab) {
        if self.session.main_tab != tab {
            info!(tab = tab.label(), "main tab selected");
        }
        self.session.main_tab = tab;
    }

    pub fn select_next_main_tab(&mut self) {
        self.select_main_tab(self.session.main_tab.next());
    }

    pub fn select_previous_main_tab(&mut self) {
        self.select_main_tab(self.session.main_tab.previous());
    }

    pub fn select_main_tab_by_number(&mut self, number: usize) -> bool {
        let Some(tab) = MainTab::from_number(number) else {
            return false;
        };
        self.select_main_tab(tab);
        true
    }

    pub fn next_focus(&mut self) {
        self.session.focus = self.session.focus.next_window();
    }

    pub fn previous_focus(&mut self) {
        self.session.focus = self.session.focus.previous_window();
    }

    pub fn focus_addon_list(&mut self) {
        self.session.focus = Focus::AddonList;
    }

    pub fn toggle_keybinds(&mut self) {
        self.show_keybinds = !self.show_keybinds;
        self.keybinds_scroll.set(0);
    }

    pub fn hide_keybinds(&mut self) {
        self.show_keybinds = false;
    }

    pub fn scroll_keybinds(&mut self, delta: isize) {
        let current = self.keybinds_scroll.get() as isize;
        self.keybinds_scroll.set((current + delta).max(0) as usize);
    }

    pub fn clamp_keybinds_scroll(&self, max_scroll_top: usize) -> usize {
        let clamped = self.keybinds_scroll.get().min(max_scroll_top);
        self.keybinds_scroll.set(clamped);
        clamped
    }

    /// Closes and reopens the dialog: reloads the race file and starts a new session.
    pub fn reopen(&mut self) {
        match RaceDefinition::load(&self.race_path) {
            Ok(race) => {
                let count = race.addon_count();
                if self.pawn.addon_variants.len() < count {
                    self.pawn.addon_variants.resize(count, 0);
                }
                self.race = race;
                self.status_message = "Dialog reopened; race definition reloaded.".to_string();
            }
            Err(err) => {
                warn!(error = %err, "race reload failed, keeping previous definition");
                self.status_message = format!("Reload failed, kept previous race: {err}");
            }
        }
        self.session.reset();
    }

    pub fn write_pawn(&mut self) {
        let path = self
            .pawn_path
            .clone()
            .unwrap_or_else(|| self.race_path.with_extension("pawn.json"));

        match self.pawn.save(&path) {
            Ok(()) => {
                self.status_message = format!("Saved pawn to {}", path.display());
                self.pawn_path = Some(path);
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "pawn save failed");
                self.status_message = format!("Failed to save {}: {err}", path.display());
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::race::tests::sample_race;

    pub(crate) fn sample_app() -> App {
        let race = sample_race();
        let pawn = Pawn::generate(&race, "Ssira");
        App::with_parts(PathBuf::from("lizardfolk.json"), None, race, pawn)
    }

    #[test]
    fn tabs_switch_by_number_and_cycle() {
        let mut app = sample_app();
        assert_eq!(app.main_tab(), MainTab::Character);

        assert!(app.select_main_tab_by_number(2));
        assert_eq!(app.main_tab(), MainTab::Race);
        assert!(!app.select_main_tab_by_number(7));
        assert_eq!(app.main_tab(), MainTab::Race);

        app.select_next_main_tab();
        assert_eq!(app.main_tab(), MainTab::Character);
        app.select_previous_main_tab();
        assert_eq!(app.main_tab(), MainTab::Race);
        assert_eq!(app.race_tab(), RaceTab::BodyAddons);
    }

    #[test]
    fn reopen_resets_session_even_when_reload_fails() {
        let mut app = sample_app();
        app.select_main_tab(MainTab::Race);
        app.select_addon(1);
        app.prepare_frame();
        assert!(!app.session().palettes().is_empty());

        // lizardfolk.json does not exist, so the previous race is kept
        app.reopen();
        assert_eq!(app.main_tab(), MainTab::Character);
        assert_eq!(app.session().selected(), None);
        assert!(app.session().palettes().is_empty());
        assert_eq!(app.race().name, "Lizardfolk");
        assert!(app.status_message.starts_with("Reload failed"));
    }

    #[test]
    fn keybind_scroll_is_clamped_by_renderer() {
        let mut app = sample_app();
        app.toggle_keybinds();
        app.scroll_keybinds(40);
        assert_eq!(app.clamp_keybinds_scroll(5), 5);
        app.scroll_keybinds(-100);
        assert_eq!(app.clamp_keybinds_scroll(5), 0);
    }
}
