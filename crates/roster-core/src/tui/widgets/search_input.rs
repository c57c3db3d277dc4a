//! Search box with history.
//!
//! Uses ftui's built-in TextInput for rendering.

use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::input::TextInput as FtuiTextInput;
use ftui::widgets::Widget as FtuiWidget;
use ftui::Style as FtuiStyle;

use crate::tui::theme::Theme;

/// Committed searches remembered for Up/Down recall.
pub const HISTORY_LIMIT: usize = 10;

/// Search box widget.
#[derive(Debug)]
pub struct SearchInput<'a> {
    placeholder: &'a str,
    theme: Option<&'a Theme>,
}

impl<'a> Default for SearchInput<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SearchInput<'a> {
    pub fn new() -> Self {
        Self {
            placeholder: "Search id, name, email or role... (/)",
            theme: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
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
        state: &SearchInputState,
    ) {
        let focused = state.focused;
        let title = if focused {
            " Search [Enter: keep, Esc: revert] "
        } else {
            " Search "
        };

        let class = |name: &str| self.theme.map(|t| t.class(name));

        let border_style = class(if focused {
            "border.focused"
        } else {
            "border.normal"
        })
        .unwrap_or_default();

        let block = FtuiBlock::bordered()
            .title(title)
            .border_style(border_style);
        let inner = block.inner(area);
        FtuiWidget::render(&block, area, frame);

        let input_style = if focused {
            class("table.header").unwrap_or_default()
        } else {
            FtuiStyle::default()
        };
        let placeholder_style = class("status.normal").unwrap_or_default();
        let cursor_style = class("table.selected").unwrap_or_else(|| FtuiStyle::new().reverse());

        let text_input = FtuiTextInput::new()
            .with_value(state.value.clone())
            .with_placeholder(self.placeholder)
            .with_style(input_style)
            .with_placeholder_style(placeholder_style)
            .with_cursor_style(cursor_style)
            .with_focused(focused);

        FtuiWidget::render(&text_input, inner, frame);
    }
}

/// State for the search box.
#[derive(Debug, Clone, Default)]
pub struct SearchInputState {
    /// Current input value.
    pub value: String,
    pub focused: bool,
    /// Most recent first.
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl SearchInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.history_pos = None;
    }

    pub fn type_char(&mut self, ch: char) {
        self.value.push(ch);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Push the current value to the front of history.
    pub fn commit(&mut self) {
        if !self.value.is_empty() {
            let value = self.value.clone();
            self.history.retain(|h| h != &value);
            self.history.insert(0, value);
            self.history.truncate(HISTORY_LIMIT);
        }
        self.history_pos = None;
    }

    /// Step back to an older search.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let new_pos = match self.history_pos {
            None => 0,
            Some(pos) if pos + 1 < self.history.len() => pos + 1,
            Some(pos) => pos,
        };
        self.history_pos = Some(new_pos);
        self.value = self.history[new_pos].clone();
    }

    /// Step forward to a newer search; past the newest clears the box.
    pub fn history_next(&mut self) {
        match self.history_pos {
            None => {}
            Some(0) => {
                self.history_pos = None;
                self.value.clear();
            }
            Some(pos) => {
                self.history_pos = Some(pos - 1);
                self.value = self.history[pos - 1].clone();
            }
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}
