//! Yes/No confirmation dialog for deletions.
//!
//! Opens with "No" focused so a stray Enter never deletes anything.

use ftui::widgets::modal::{
    Dialog as FtuiDialog, DialogButton as FtuiDialogButton, DialogState as FtuiDialogState,
};
use ftui::widgets::StatefulWidget as FtuiStatefulWidget;
use ftui::PackedRgba;
use ftui::Style as FtuiStyle;

use crate::tui::theme::Theme;

/// Button choice in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmChoice {
    Yes,
    #[default]
    No,
}

impl ConfirmChoice {
    pub fn is_yes(self) -> bool {
        self == ConfirmChoice::Yes
    }
}

#[derive(Debug)]
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    details: Option<&'a str>,
    theme: Option<&'a Theme>,
}

impl<'a> Default for ConfirmDialog<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ConfirmDialog<'a> {
    pub fn new() -> Self {
        Self {
            title: "Confirm",
            message: "Are you sure?",
            details: None,
            theme: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = message;
        self
    }

    /// Extra lines under the message, e.g. the row being deleted.
    pub fn details(mut self, details: &'a str) -> Self {
        self.details = Some(details);
        self
    }

    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Render from an immutable state reference (for Elm view()).
    pub fn render_view(
        &self,
        area: ftui::layout::Rect,
        frame: &mut ftui::render::frame::Frame,
        state: &ConfirmDialogState,
    ) {
        if !state.visible {
            return;
        }

        let full_message = match self.details {
            Some(details) => format!("{}\n\n{}", self.message, details),
            None => self.message.to_string(),
        };

        let (button_style, focused_style) = match self.theme {
            Some(theme) => (theme.class("border.normal"), theme.class("table.selected")),
            None => (
                FtuiStyle::default(),
                FtuiStyle::new()
                    .fg(PackedRgba::rgb(0, 0, 0))
                    .bg(PackedRgba::rgb(0, 255, 255))
                    .bold(),
            ),
        };

        let dialog = FtuiDialog::custom(format!(" {} ", self.title), full_message)
            .button(FtuiDialogButton::new("Yes", "yes"))
            .button(FtuiDialogButton::new("No", "no"))
            .build()
            .button_style(button_style)
            .focused_button_style(focused_style);

        let mut ftui_state = FtuiDialogState::new();
        ftui_state.open = true;
        ftui_state.focused_button = match state.selected {
            ConfirmChoice::Yes => Some(0),
            ConfirmChoice::No => Some(1),
        };

        FtuiStatefulWidget::render(&dialog, area, frame, &mut ftui_state);
    }
}

/// State for the confirmation dialog.
#[derive(Debug, Default)]
pub struct ConfirmDialogState {
    pub visible: bool,
    /// Focused button.
    pub selected: ConfirmChoice,
}

impl ConfirmDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with "No" focused.
    pub fn show(&mut self) {
        self.visible = true;
        self.selected = ConfirmChoice::No;
    }

    pub fn toggle(&mut self) {
        self.selected = match self.selected {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        };
    }

    pub fn select_left(&mut self) {
        self.selected = ConfirmChoice::Yes;
    }

    pub fn select_right(&mut self) {
        self.selected = ConfirmChoice::No;
    }

    /// Close and return the focused button.
    pub fn confirm(&mut self) -> ConfirmChoice {
        self.visible = false;
        self.selected
    }

    /// Close; equivalent to answering No.
    pub fn cancel(&mut self) -> ConfirmChoice {
        self.visible = false;
        ConfirmChoice::No
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults_to_no() {
        let mut state = ConfirmDialogState::new();
        assert!(!state.visible);
        state.select_left();
        state.show();
        assert!(state.visible);
        assert_eq!(state.selected, ConfirmChoice::No);
    }

    #[test]
    fn test_toggle_and_confirm() {
        let mut state = ConfirmDialogState::new();
        state.show();
        state.toggle();
        assert_eq!(state.confirm(), ConfirmChoice::Yes);
        assert!(!state.visible);
    }

    #[test]
    fn test_enter_without_moving_is_no() {
        let mut state = ConfirmDialogState::new();
        state.show();
        assert!(!state.confirm().is_yes());
    }

    #[test]
    fn test_cancel_is_no_even_when_yes_focused() {
        let mut state = ConfirmDialogState::new();
        state.show();
        state.select_left();
        assert_eq!(state.cancel(), ConfirmChoice::No);
        assert!(!state.visible);
    }
}
