//! Key bindings for the roster TUI.
//!
//! Bindings are plain lists of `KeyEvent`s held in `App::key_bindings`.

use ftui::{KeyCode, KeyEvent, Modifiers};

/// Configurable key bindings for browsing mode.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub quit: Vec<KeyEvent>,
    pub help: Vec<KeyEvent>,
    pub search: Vec<KeyEvent>,
    /// Cursor down.
    pub next: Vec<KeyEvent>,
    /// Cursor up.
    pub prev: Vec<KeyEvent>,
    pub toggle: Vec<KeyEvent>,
    pub select_all: Vec<KeyEvent>,
    pub deselect_all: Vec<KeyEvent>,
    /// Enter edit mode, or save when the row is already editing.
    pub edit: Vec<KeyEvent>,
    pub delete_row: Vec<KeyEvent>,
    pub delete_selected: Vec<KeyEvent>,
    pub prev_page: Vec<KeyEvent>,
    pub next_page: Vec<KeyEvent>,
    pub first_page: Vec<KeyEvent>,
    pub last_page: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: vec![
                KeyEvent::new(KeyCode::Char('q')),
                KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
            ],
            help: vec![
                KeyEvent::new(KeyCode::Char('?')),
                KeyEvent::new(KeyCode::F(1)),
            ],
            search: vec![KeyEvent::new(KeyCode::Char('/'))],
            next: vec![
                KeyEvent::new(KeyCode::Down),
                KeyEvent::new(KeyCode::Char('j')),
            ],
            prev: vec![
                KeyEvent::new(KeyCode::Up),
                KeyEvent::new(KeyCode::Char('k')),
            ],
            toggle: vec![KeyEvent::new(KeyCode::Char(' '))],
            select_all: vec![KeyEvent::new(KeyCode::Char('A'))],
            deselect_all: vec![KeyEvent::new(KeyCode::Char('u'))],
            edit: vec![KeyEvent::new(KeyCode::Char('e'))],
            delete_row: vec![KeyEvent::new(KeyCode::Char('d'))],
            delete_selected: vec![KeyEvent::new(KeyCode::Char('D'))],
            prev_page: vec![
                KeyEvent::new(KeyCode::Left),
                KeyEvent::new(KeyCode::Char('h')),
                KeyEvent::new(KeyCode::PageUp),
            ],
            next_page: vec![
                KeyEvent::new(KeyCode::Right),
                KeyEvent::new(KeyCode::Char('l')),
                KeyEvent::new(KeyCode::PageDown),
            ],
            first_page: vec![
                KeyEvent::new(KeyCode::Home),
                KeyEvent::new(KeyCode::Char('g')),
            ],
            last_page: vec![
                KeyEvent::new(KeyCode::End),
                KeyEvent::new(KeyCode::Char('G')),
            ],
        }
    }
}

impl KeyBindings {
    fn matches_any(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
        // Kind is ignored so Press and Repeat both count. An extra SHIFT bit is
        // tolerated: terminals report it for already-shifted chars like 'A'.
        bindings
            .iter()
            .any(|b| b.code == key.code && mods_match(b.modifiers, key.modifiers))
    }

    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.quit, key)
    }

    pub fn is_help(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.help, key)
    }

    pub fn is_search(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.search, key)
    }

    pub fn is_next(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.next, key)
    }

    pub fn is_prev(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.prev, key)
    }

    pub fn is_toggle(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.toggle, key)
    }

    pub fn is_select_all(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.select_all, key)
    }

    pub fn is_deselect_all(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.deselect_all, key)
    }

    pub fn is_edit(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.edit, key)
    }

    pub fn is_delete_row(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.delete_row, key)
    }

    pub fn is_delete_selected(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.delete_selected, key)
    }

    pub fn is_prev_page(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.prev_page, key)
    }

    pub fn is_next_page(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.next_page, key)
    }

    pub fn is_first_page(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.first_page, key)
    }

    pub fn is_last_page(&self, key: &KeyEvent) -> bool {
        Self::matches_any(&self.last_page, key)
    }

    /// Page number for a digit key `1`-`9`.
    pub fn page_digit(key: &KeyEvent) -> Option<usize> {
        match key.code {
            KeyCode::Char(c @ '1'..='9') if !key.modifiers.contains(Modifiers::CTRL) => {
                c.to_digit(10).map(|d| d as usize)
            }
            _ => None,
        }
    }
}

fn mods_match(binding: Modifiers, observed: Modifiers) -> bool {
    observed == binding || observed == (binding | Modifiers::SHIFT)
}
