//! Record table widget.
//!
//! Draws the rows of the current render snapshot with a selection checkbox,
//! an edit marker and the three editable columns. Rows in edit mode show
//! draft values; the field being typed into carries a cursor glyph.

use ftui::layout::Constraint as FtuiConstraint;
use ftui::text::{Line as FtuiLine, Span as FtuiSpan, Text as FtuiText};
use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::table::{Row as FtuiRow, Table as FtuiTable, TableState as FtuiTableState};
use ftui::widgets::StatefulWidget as FtuiStatefulWidget;
use ftui::Style as FtuiStyle;
use roster_common::{Field, RecordId};

use crate::orchestrator::{RenderSnapshot, RowView};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;

const COL_CHECKBOX: u16 = 3;
const COL_EDIT: u16 = 1;
const COL_ID: u16 = 6;
const COL_ROLE: u16 = 12;

/// Appended to the value under the typing cursor.
pub const TYPING_CURSOR: char = '\u{258f}';

/// Table of visible records.
#[derive(Debug)]
pub struct RecordTable<'a> {
    theme: Option<&'a Theme>,
    breakpoint: Breakpoint,
    typing: Option<(&'a RecordId, Field)>,
    empty_message: &'a str,
    focused: bool,
}

impl<'a> Default for RecordTable<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RecordTable<'a> {
    pub fn new() -> Self {
        Self {
            theme: None,
            breakpoint: Breakpoint::Standard,
            typing: None,
            empty_message: "No matching records",
            focused: true,
        }
    }

    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Narrow breakpoints drop the email column.
    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Row and field receiving keystrokes.
    pub fn typing(mut self, typing: Option<(&'a RecordId, Field)>) -> Self {
        self.typing = typing;
        self
    }

    /// Text shown when there are no rows to draw.
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn show_email(&self) -> bool {
        self.breakpoint != Breakpoint::Minimal
    }

    fn title_string(snapshot: &RenderSnapshot) -> String {
        if snapshot.search.is_empty() {
            format!(" Users ({}) ", snapshot.summary.total)
        } else {
            format!(
                " Users ({} of {} match \"{}\") ",
                snapshot.filtered_count, snapshot.summary.total, snapshot.search
            )
        }
    }

    /// Display text for one cell.
    pub fn cell_text(&self, row: &RowView, field: Field) -> String {
        let value = row.value(field);
        match self.typing {
            Some((id, typing_field)) if id == &row.id && typing_field == field => {
                format!("{value}{TYPING_CURSOR}")
            }
            _ => value.to_string(),
        }
    }

    fn style(&self, class: &str, fallback: FtuiStyle) -> FtuiStyle {
        self.theme
            .map(|t| t.class(class))
            .unwrap_or(fallback)
    }

    fn row_style(&self, row: &RowView) -> FtuiStyle {
        if row.editing {
            self.style("row.editing", FtuiStyle::new().underline())
        } else if row.selected {
            self.style("row.marked", FtuiStyle::new().bold())
        } else {
            FtuiStyle::default()
        }
    }

    fn constraints(&self) -> Vec<FtuiConstraint> {
        let mut constraints = vec![
            FtuiConstraint::Fixed(COL_CHECKBOX),
            FtuiConstraint::Fixed(COL_EDIT),
            FtuiConstraint::Fixed(COL_ID),
            FtuiConstraint::Fill,
        ];
        if self.show_email() {
            constraints.push(FtuiConstraint::Fill);
        }
        constraints.push(FtuiConstraint::Fixed(COL_ROLE));
        constraints
    }

    fn header(&self) -> FtuiRow {
        let mut cells = vec![
            FtuiText::raw("[ ]"),
            FtuiText::raw(""),
            FtuiText::raw("ID"),
            FtuiText::raw(Field::Name.label()),
        ];
        if self.show_email() {
            cells.push(FtuiText::raw(Field::Email.label()));
        }
        cells.push(FtuiText::raw(Field::Role.label()));
        FtuiRow::new(cells).style(self.style("table.header", FtuiStyle::new().bold()))
    }

    fn body_row(&self, row: &RowView) -> FtuiRow {
        let check = if row.selected { "\u{2611}" } else { "\u{2610}" };
        let marker = if row.editing { "\u{270e}" } else { "" };
        let mut cells = vec![
            FtuiText::raw(check),
            FtuiText::raw(marker),
            FtuiText::raw(row.id.to_string()),
            FtuiText::raw(self.cell_text(row, Field::Name)),
        ];
        if self.show_email() {
            cells.push(FtuiText::raw(self.cell_text(row, Field::Email)));
        }
        cells.push(FtuiText::raw(self.cell_text(row, Field::Role)));
        FtuiRow::new(cells).style(self.row_style(row))
    }

    /// Render from the snapshot with the cursor on row `cursor`.
    pub fn render_view(
        &self,
        area: ftui::layout::Rect,
        frame: &mut ftui::render::frame::Frame,
        snapshot: &RenderSnapshot,
        cursor: usize,
    ) {
        let title = Self::title_string(snapshot);
        let border_class = if self.focused {
            "border.focused"
        } else {
            "border.normal"
        };
        let block = FtuiBlock::bordered()
            .title(&title)
            .border_style(self.style(border_class, FtuiStyle::default()));

        if snapshot.rows.is_empty() {
            let muted = self.style("status.warning", FtuiStyle::default());
            let para = ftui::widgets::paragraph::Paragraph::new(FtuiText::from_line(
                FtuiLine::from_spans([FtuiSpan::styled(self.empty_message, muted)]),
            ))
            .block(block);
            ftui::widgets::Widget::render(&para, area, frame);
            return;
        }

        let rows: Vec<FtuiRow> = snapshot.rows.iter().map(|r| self.body_row(r)).collect();
        let table = FtuiTable::new(rows, self.constraints())
            .header(self.header())
            .block(block)
            .highlight_style(self.style("table.selected", FtuiStyle::new().reverse()))
            .column_spacing(1);

        let mut ftui_state = FtuiTableState::default();
        ftui_state.selected = Some(cursor.min(snapshot.rows.len() - 1));

        FtuiStatefulWidget::render(&table, area, frame, &mut ftui_state);
    }
}
