//! Help overlay listing the key bindings.
//!
//! Uses ftui's Modal + Block + Paragraph for rendering.

use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::modal::{Modal, ModalPosition, ModalSizeConstraints};
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;
use ftui::Style as FtuiStyle;

use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;

#[derive(Debug, Clone)]
struct Binding {
    key: &'static str,
    desc: &'static str,
}

#[derive(Debug, Clone)]
struct Section {
    title: &'static str,
    bindings: &'static [Binding],
}

const fn bind(key: &'static str, desc: &'static str) -> Binding {
    Binding { key, desc }
}

const NAVIGATION: &[Binding] = &[
    bind("j / Down", "Move down"),
    bind("k / Up", "Move up"),
    bind("l / Right", "Next page"),
    bind("h / Left", "Previous page"),
    bind("g / Home", "First page"),
    bind("G / End", "Last page"),
    bind("1-9", "Go to page"),
    bind("/", "Search"),
];

const SELECTION: &[Binding] = &[
    bind("Space", "Toggle row"),
    bind("A", "Select all"),
    bind("u", "Deselect all"),
];

const EDITING: &[Binding] = &[
    bind("e", "Edit row / save row"),
    bind("Enter", "Resume typing / save"),
    bind("Tab", "Next field"),
    bind("Esc", "Stop typing"),
    bind("d", "Delete row"),
    bind("D", "Delete selected"),
];

const GENERAL: &[Binding] = &[bind("?", "Toggle help"), bind("q / Ctrl+c", "Quit")];

const SECTIONS: &[Section] = &[
    Section {
        title: "Navigation",
        bindings: NAVIGATION,
    },
    Section {
        title: "Selection",
        bindings: SELECTION,
    },
    Section {
        title: "Editing",
        bindings: EDITING,
    },
    Section {
        title: "General",
        bindings: GENERAL,
    },
];

const KEY_COL_WIDTH: usize = 12;

#[derive(Debug)]
pub struct HelpOverlay<'a> {
    theme: Option<&'a Theme>,
    breakpoint: Breakpoint,
}

impl<'a> Default for HelpOverlay<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> HelpOverlay<'a> {
    pub fn new() -> Self {
        Self {
            theme: None,
            breakpoint: Breakpoint::Standard,
        }
    }

    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Minimal breakpoint switches to the compact listing.
    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// One line per section, for small terminals.
    pub fn build_compact_lines() -> Vec<FtuiLine> {
        vec![
            FtuiLine::raw("Move: j/k  Pages: h/l g/G 1-9"),
            FtuiLine::raw("Search: /"),
            FtuiLine::raw("Select: Space/A/u"),
            FtuiLine::raw("Edit: e Tab Enter Esc"),
            FtuiLine::raw("Delete: d/D"),
            FtuiLine::raw("Help: ?  Quit: q"),
        ]
    }

    pub fn build_full_lines(theme: Option<&Theme>) -> Vec<FtuiLine> {
        let title_style = theme
            .map(|t| t.class("table.header"))
            .unwrap_or_else(|| FtuiStyle::new().bold());
        let key_style = theme
            .map(|t| t.class("pager.active"))
            .unwrap_or_else(|| FtuiStyle::new().bold());
        let desc_style = theme.map(|t| t.class("status.normal")).unwrap_or_default();

        let mut lines = vec![
            FtuiLine::from_spans([FtuiSpan::styled("  Roster TUI Help", title_style)]),
            FtuiLine::raw(""),
        ];

        for section in SECTIONS {
            lines.push(FtuiLine::from_spans([FtuiSpan::styled(
                format!("  {}:", section.title),
                title_style,
            )]));
            for binding in section.bindings {
                let padded_key = format!("    {:width$}", binding.key, width = KEY_COL_WIDTH);
                lines.push(FtuiLine::from_spans([
                    FtuiSpan::styled(padded_key, key_style),
                    FtuiSpan::styled(binding.desc, desc_style),
                ]));
            }
            lines.push(FtuiLine::raw(""));
        }

        lines
    }

    pub fn render_ftui(&self, area: ftui::layout::Rect, frame: &mut ftui::render::frame::Frame) {
        let lines = match self.breakpoint {
            Breakpoint::Minimal => Self::build_compact_lines(),
            _ => Self::build_full_lines(self.theme),
        };

        let border_style = self
            .theme
            .map(|t| t.class("border.focused"))
            .unwrap_or_default();

        let block = FtuiBlock::bordered()
            .title(" Help ")
            .border_style(border_style);

        let text: FtuiText = lines.into_iter().collect();
        let paragraph = FtuiParagraph::new(text).block(block);

        let size = ModalSizeConstraints::new()
            .min_width(30)
            .max_width((area.width as f32 * 0.6) as u16)
            .min_height(10)
            .max_height((area.height as f32 * 0.8) as u16);

        let modal = Modal::new(paragraph)
            .position(ModalPosition::Center)
            .size(size);

        FtuiWidget::render(&modal, area, frame);
    }
}
