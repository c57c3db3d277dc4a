//! Pagination bar: first/prev/next/last controls, a window of page buttons
//! and the "Page N of M | N of M row(s) selected" label.
//!
//! The label is pinned to the right edge and laid out first, so it survives
//! any page count. The button window shrinks until the controls fit in what
//! is left.

use ftui::layout::Rect;
use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;
use ftui::Style as FtuiStyle;

use crate::orchestrator::{PaginationView, SelectionSummary};
use crate::tui::theme::Theme;

/// Button windows tried from widest to narrowest.
const WINDOW_RADII: [usize; 3] = [2, 1, 0];

/// Pages to draw as buttons: the first, the last and `radius` either side of
/// `current`. `None` marks a gap drawn as an ellipsis.
pub fn visible_pages(current: usize, count: usize, radius: usize) -> Vec<Option<usize>> {
    let mut out = Vec::new();
    let mut last_shown = 0;
    for page in 1..=count {
        if page != 1 && page != count && page.abs_diff(current) > radius {
            continue;
        }
        match page - last_shown {
            1 => {}
            // A one-page gap is cheaper to show than to elide
            2 => out.push(Some(page - 1)),
            _ => out.push(None),
        }
        out.push(Some(page));
        last_shown = page;
    }
    out
}

fn line_width(line: &FtuiLine) -> usize {
    line.spans().iter().map(|s| s.as_str().chars().count()).sum()
}

#[derive(Debug)]
pub struct PaginationBar<'a> {
    pagination: &'a PaginationView,
    summary: &'a SelectionSummary,
    theme: Option<&'a Theme>,
}

impl<'a> PaginationBar<'a> {
    pub fn new(pagination: &'a PaginationView, summary: &'a SelectionSummary) -> Self {
        Self {
            pagination,
            summary,
            theme: None,
        }
    }

    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    fn muted(&self) -> FtuiStyle {
        self.theme
            .map(|t| t.class("status.normal"))
            .unwrap_or_default()
    }

    /// Controls with page buttons windowed by `radius`. `None` draws only
    /// the current page.
    pub fn controls_line(&self, radius: Option<usize>) -> FtuiLine {
        let p = self.pagination;
        let active = self
            .theme
            .map(|t| t.class("pager.active"))
            .unwrap_or_else(|| FtuiStyle::new().reverse());
        let muted = self.muted();
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                FtuiSpan::raw(label)
            } else {
                FtuiSpan::styled(label, muted)
            }
        };

        let pages = match radius {
            Some(radius) => visible_pages(p.current_page, p.page_count, radius),
            None => vec![Some(p.current_page)],
        };

        let mut spans = vec![
            control("\u{00ab} ", p.has_prev),
            control("\u{2039} ", p.has_prev),
        ];
        for page in pages {
            match page {
                Some(page) if page == p.current_page => {
                    spans.push(FtuiSpan::styled(format!("[{page}]"), active));
                }
                Some(page) => spans.push(FtuiSpan::raw(format!(" {page} "))),
                None => spans.push(FtuiSpan::styled("\u{2026}", muted)),
            }
        }
        spans.push(control(" \u{203a}", p.has_next));
        spans.push(control(" \u{00bb}", p.has_next));

        FtuiLine::from_spans(spans)
    }

    /// Right-hand label. The page label is dropped before the summary.
    pub fn info_text(&self, width: usize) -> String {
        let full = format!(
            "Page {} of {}  |  {}",
            self.pagination.current_page, self.pagination.page_count, self.summary.text
        );
        if full.chars().count() <= width {
            full
        } else {
            self.summary.text.clone()
        }
    }

    /// Widest controls line that fits in `width` cells.
    pub fn fitted_controls(&self, width: usize) -> FtuiLine {
        WINDOW_RADII
            .iter()
            .map(|&radius| self.controls_line(Some(radius)))
            .find(|line| line_width(line) <= width)
            .unwrap_or_else(|| self.controls_line(None))
    }

    pub fn render_ftui(&self, area: Rect, frame: &mut ftui::render::frame::Frame) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let info = self.info_text(area.width as usize);
        let info_width = (info.chars().count() as u16).min(area.width);
        let info_area = Rect::new(
            area.x + area.width - info_width,
            area.y,
            info_width,
            area.height,
        );
        let info_line = FtuiLine::from_spans(vec![FtuiSpan::styled(info, self.muted())]);
        FtuiWidget::render(
            &FtuiParagraph::new(FtuiText::from_line(info_line)),
            info_area,
            frame,
        );

        // Two cells between the controls and the label
        let controls_width = area.width.saturating_sub(info_width + 2);
        if controls_width == 0 {
            return;
        }
        let controls_area = Rect::new(area.x, area.y, controls_width, area.height);
        let controls = self.fitted_controls(controls_width as usize);
        FtuiWidget::render(
            &FtuiParagraph::new(FtuiText::from_line(controls)),
            controls_area,
            frame,
        );
    }
}
