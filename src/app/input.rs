// Keyboard dispatch.
// - Maps key presses to app actions based on the active tab, focus, and popup.
// - Returns whether the event loop should keep running.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{ColorSlot, Focus, MainTab};

use super::App;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return false,
                KeyCode::Char('n') => self.select_next_main_tab(),
                KeyCode::Char('p') => self.select_previous_main_tab(),
                KeyCode::Char('r') => self.reopen(),
                _ => {}
            }
            return true;
        }

        if self.show_keybinds {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.hide_keybinds(),
                KeyCode::Char('q') => return false,
                KeyCode::Down | KeyCode::Char('j') => self.scroll_keybinds(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_keybinds(-1),
                KeyCode::PageDown => self.scroll_keybinds(10),
                KeyCode::PageUp => self.scroll_keybinds(-10),
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('?') => self.toggle_keybinds(),
            KeyCode::Char('w') => self.write_pawn(),
            KeyCode::Char(ch @ '1'..='9') => {
                let number = ch.to_digit(10).unwrap_or(0) as usize;
                self.select_main_tab_by_number(number);
            }
            _ if self.main_tab() == MainTab::Race => self.handle_race_key(key),
            _ => {}
        }
        true
    }

    fn handle_race_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.previous_focus(),
            KeyCode::Esc => self.focus_addon_list(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            KeyCode::Char('f') => self.switch_editing_slot(ColorSlot::First),
            KeyCode::Char('s') => self.switch_editing_slot(ColorSlot::Second),
            _ => match self.focus() {
                Focus::AddonList => match key.code {
                    KeyCode::Down | KeyCode::Char('j') => self.next_addon(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous_addon(),
                    _ => {}
                },
                Focus::Colors => {
                    if let Some((dx, dy)) = grid_direction(key.code) {
                        self.move_color_cursor(dx, dy);
                    }
                }
                Focus::Variants => {
                    if let Some((dx, dy)) = grid_direction(key.code) {
                        self.move_variant_cursor(dx, dy);
                    }
                }
            },
        }
    }
}

fn grid_direction(code: KeyCode) -> Option<(isize, isize)> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some((-1, 0)),
        KeyCode::Right | KeyCode::Char('l') => Some((1, 0)),
        KeyCode::Up | KeyCode::Char('k') => Some((0, -1)),
        KeyCode::Down | KeyCode::Char('j') => Some((0, 1)),
        _ => None,
    }
}
