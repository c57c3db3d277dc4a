//! Status line: mode indicator, the latest message and context key hints.

use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;

use crate::tui::theme::Theme;

/// Display mode for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    #[default]
    Normal,
    Searching,
    Typing,
    Confirming,
    Help,
}

impl StatusMode {
    pub fn label(self) -> &'static str {
        match self {
            StatusMode::Normal => "Normal",
            StatusMode::Searching => "Search",
            StatusMode::Typing => "Edit",
            StatusMode::Confirming => "Confirm",
            StatusMode::Help => "Help",
        }
    }

    /// Context-sensitive key hints for this mode.
    pub fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            StatusMode::Normal => &[
                ("/", "search"),
                ("e", "edit"),
                ("d", "delete"),
                ("?", "help"),
                ("q", "quit"),
            ],
            StatusMode::Searching => &[
                ("Enter", "keep"),
                ("Esc", "revert"),
                ("\u{2191}\u{2193}", "history"),
            ],
            StatusMode::Typing => &[("Tab", "next field"), ("Enter", "save"), ("Esc", "stop")],
            StatusMode::Confirming => &[("Tab", "switch"), ("Enter", "answer"), ("Esc", "no")],
            StatusMode::Help => &[("?", "close"), ("Esc", "close")],
        }
    }
}

/// Severity of the status message, mapped to a `status.*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Normal,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    fn class(self) -> &'static str {
        match self {
            StatusLevel::Normal => "status.normal",
            StatusLevel::Success => "status.success",
            StatusLevel::Warning => "status.warning",
            StatusLevel::Error => "status.error",
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusBar<'a> {
    theme: Option<&'a Theme>,
    mode: StatusMode,
    message: Option<(&'a str, StatusLevel)>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn mode(mut self, mode: StatusMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn message(mut self, message: &'a str, level: StatusLevel) -> Self {
        self.message = Some((message, level));
        self
    }

    pub fn build_hints_text(&self) -> String {
        self.mode
            .hints()
            .iter()
            .map(|(key, action)| format!("{}: {}", key, action))
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn build_line(&self) -> FtuiLine {
        let class = |name: &str| self.theme.map(|t| t.class(name)).unwrap_or_default();
        let (message, level) = self.message.unwrap_or(("Ready", StatusLevel::Normal));
        FtuiLine::from_spans([
            FtuiSpan::styled(format!("[{}] ", self.mode.label()), class("table.header")),
            FtuiSpan::styled(message.to_string(), class(level.class())),
            FtuiSpan::styled(
                format!(" \u{2502} {}", self.build_hints_text()),
                class("status.normal"),
            ),
        ])
    }

    pub fn render_ftui(&self, area: ftui::layout::Rect, frame: &mut ftui::render::frame::Frame) {
        let text = FtuiText::from_line(self.build_line());
        FtuiWidget::render(&FtuiParagraph::new(text), area, frame);
    }
}
