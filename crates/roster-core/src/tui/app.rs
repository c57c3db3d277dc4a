//! Main TUI application model.
//!
//! ## ftui Model Contract
//!
//! `App` implements `ftui::Model`:
//! - `init()` starts the one-shot record fetch as a background `Cmd::task`
//! - `update(msg)` applies a single `Msg`; key presses are first translated
//!   into the matching `Msg` for the current mode
//! - `view(frame)` draws the orchestrator's latest render snapshot
//! - `subscriptions()` registers the toast tick
//!
//! ## Running
//!
//! `run_tui(...)` wires terminal lifecycle via `ftui::Program`. Inline mode
//! (`--inline`) anchors the UI at the bottom of the terminal.

use std::time::Duration;

use ftui::layout::Rect;
use ftui::runtime::{Every, Subscription};
use ftui::widgets::notification_queue::{NotificationQueue, NotificationStack, QueueConfig};
use ftui::widgets::toast::{Toast, ToastIcon, ToastPosition, ToastStyle};
use ftui::widgets::Widget;
use ftui::{
    Cell as FtuiCell, Cmd as FtuiCmd, Frame as FtuiFrame, KeyCode as FtuiKeyCode,
    KeyEvent as FtuiKeyEvent, KeyEventKind as FtuiKeyEventKind, Model as FtuiModel,
    Modifiers as FtuiModifiers, Program, ProgramConfig,
};
use roster_common::{Field, RecordId};

use super::events::KeyBindings;
use super::layout::{Breakpoint, LayoutState, ResponsiveLayout};
use super::msg::Msg;
use super::theme::Theme;
use super::widgets::{
    ConfirmDialog, ConfirmDialogState, HelpOverlay, PaginationBar, RecordTable, SearchInput,
    SearchInputState, StatusBar, StatusLevel, StatusMode,
};
use super::{TuiError, TuiResult};
use crate::orchestrator::{Orchestrator, RowView};
use crate::source::RecordSource;
use crate::view::DEFAULT_PAGE_SIZE;

/// Current application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browsing the table.
    #[default]
    Normal,
    /// Keystrokes go to the search box.
    Searching,
    /// Keystrokes go to a row's draft.
    Typing,
    /// Delete confirmation dialog is open.
    Confirming,
    Help,
    Quitting,
}

/// Deletion waiting on the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Row(RecordId),
    /// Number of selected rows when the dialog opened.
    Selected(usize),
}

/// Progress of the one-shot record fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// Where a search started, restored on cancel.
#[derive(Debug, Clone, Default)]
struct SearchOrigin {
    term: String,
    page: usize,
    cursor: usize,
}

/// Main TUI application.
pub struct App {
    pub state: AppState,
    pub theme: Theme,
    pub key_bindings: KeyBindings,
    orchestrator: Orchestrator,
    /// Index into the visible rows.
    cursor: usize,
    typing: Option<(RecordId, Field)>,
    pub search: SearchInputState,
    /// Term, page and cursor to restore when a search is cancelled.
    search_before: SearchOrigin,
    pub confirm_dialog: ConfirmDialogState,
    pending_delete: Option<PendingDelete>,
    load: LoadState,
    source: Option<Box<dyn RecordSource>>,
    status: Option<(String, StatusLevel)>,
    layout_state: LayoutState,
    notifications: NotificationQueue,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Orchestrator::new(DEFAULT_PAGE_SIZE))
    }
}

impl App {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            state: AppState::Normal,
            theme: Theme::default(),
            key_bindings: KeyBindings::default(),
            orchestrator,
            cursor: 0,
            typing: None,
            search: SearchInputState::new(),
            search_before: SearchOrigin::default(),
            confirm_dialog: ConfirmDialogState::new(),
            pending_delete: None,
            load: LoadState::Pending,
            source: None,
            status: None,
            // Replaced by the first resize event
            layout_state: LayoutState::new(80, 24),
            notifications: NotificationQueue::new(QueueConfig {
                max_visible: 3,
                max_queued: 10,
                default_duration: Duration::from_secs(5),
                position: ToastPosition::TopRight,
                stagger_offset: 1,
                dedup_window_ms: 1000,
            }),
        }
    }

    /// Source fetched by `init()`.
    pub fn with_source(mut self, source: Box<dyn RecordSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Row and field receiving keystrokes in typing mode.
    pub fn typing(&self) -> Option<(&RecordId, Field)> {
        self.typing.as_ref().map(|(id, field)| (id, *field))
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.layout_state.breakpoint()
    }

    pub fn update_layout(&mut self, width: u16, height: u16) -> bool {
        self.layout_state.update(width, height)
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some((message.into(), level));
    }

    fn push_toast(&mut self, message: impl Into<String>, icon: ToastIcon, style: ToastStyle) {
        let toast = Toast::new(message)
            .icon(icon)
            .style_variant(style)
            .duration(Duration::from_secs(4));
        self.notifications.notify(toast);
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn cursor_row(&self) -> Option<&RowView> {
        self.orchestrator.snapshot().rows.get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let rows = self.orchestrator.snapshot().rows.len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    fn set_mode(&mut self, to: AppState) {
        if self.state != to {
            tracing::debug!(
                target: "tui.state_transition",
                from_state = ?self.state,
                to_state = ?to,
                "Mode change"
            );
        }
        self.state = to;
    }

    /// Filter by the search box. A term equal to the active one keeps the
    /// current page.
    fn apply_search(&mut self) {
        if self.search.value() == self.orchestrator.snapshot().search {
            return;
        }
        self.orchestrator.search(self.search.value().to_string());
        self.cursor = 0;
    }

    fn cancel_search(&mut self) {
        let origin = std::mem::take(&mut self.search_before);
        self.search.set_value(&origin.term);
        self.apply_search();
        let page = self.orchestrator.snapshot().pagination.current_page;
        if page != origin.page {
            self.orchestrator.go_to_page(origin.page);
        }
        self.cursor = origin.cursor;
        self.leave_search();
    }

    /// First line of a paste, routed by mode.
    fn paste(&mut self, text: &str) {
        let pasted = text.lines().next().unwrap_or_default();
        if pasted.is_empty() {
            return;
        }
        match self.state {
            AppState::Normal => {
                let _ = self.handle_msg(Msg::EnterSearchMode);
                self.search.set_value(pasted);
                self.apply_search();
            }
            AppState::Searching => {
                for ch in pasted.chars() {
                    self.search.type_char(ch);
                }
                self.apply_search();
            }
            AppState::Typing => {
                if let Some((id, field, mut value)) = self.typing_value() {
                    value.push_str(pasted);
                    self.orchestrator.edit_input(&id, field, value);
                }
            }
            AppState::Confirming | AppState::Help | AppState::Quitting => {
                tracing::trace!(target: "tui.user_input", app_state = ?self.state, "Paste ignored");
            }
        }
    }

    fn leave_search(&mut self) {
        self.search.focused = false;
        self.set_mode(AppState::Normal);
    }

    /// Current draft value of the typing target.
    fn typing_value(&self) -> Option<(RecordId, Field, String)> {
        let (id, field) = self.typing.clone()?;
        let value = self.orchestrator.edit().draft(&id)?.value(field).to_string();
        Some((id, field, value))
    }

    fn page_moved(&mut self, moved: bool) {
        if moved {
            self.cursor = 0;
        }
    }

    fn start_load(&mut self) -> FtuiCmd<Msg> {
        let Some(source) = self.source.take() else {
            return FtuiCmd::none();
        };
        let origin = source.describe();
        self.set_status(format!("Loading records from {origin}..."), StatusLevel::Normal);
        FtuiCmd::sequence(vec![
            FtuiCmd::log(format!("load: starting ({origin})")),
            FtuiCmd::task_named("load-records", move || {
                Msg::RecordsLoaded(source.fetch().map_err(|e| e.to_string()))
            }),
        ])
    }

    fn handle_msg(&mut self, msg: Msg) -> FtuiCmd<Msg> {
        match msg {
            Msg::KeyPressed(key) => return self.handle_ftui_key_event(key),
            Msg::Resized { width, height } => {
                self.update_layout(width, height);
            }
            Msg::Tick => {
                let _ = self.notifications.tick(Duration::from_secs(5));
            }
            Msg::FocusChanged(gained) => {
                tracing::trace!(target: "tui.user_input", gained, "Terminal focus changed");
            }
            Msg::PasteReceived { text, .. } => self.paste(&text),
            Msg::ClipboardReceived(content) => {
                if self.state == AppState::Searching {
                    self.search.set_value(&content);
                    self.apply_search();
                }
            }
            Msg::Noop => {}

            Msg::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Msg::CursorDown => {
                if self.cursor + 1 < self.orchestrator.snapshot().rows.len() {
                    self.cursor += 1;
                }
            }
            Msg::FirstPage => {
                let moved = self.orchestrator.first_page();
                self.page_moved(moved);
            }
            Msg::PrevPage => {
                let moved = self.orchestrator.prev_page();
                self.page_moved(moved);
            }
            Msg::NextPage => {
                let moved = self.orchestrator.next_page();
                self.page_moved(moved);
            }
            Msg::LastPage => {
                let moved = self.orchestrator.last_page();
                self.page_moved(moved);
            }
            Msg::GoToPage(n) => {
                let moved = self.orchestrator.go_to_page(n);
                if !moved {
                    self.set_status(format!("No page {n}"), StatusLevel::Warning);
                }
                self.page_moved(moved);
            }

            Msg::ToggleSelection => {
                if let Some(row) = self.cursor_row().cloned() {
                    self.orchestrator.toggle_selection(&row.id, !row.selected);
                }
            }
            Msg::SelectAll => {
                let selected = self.orchestrator.select_all();
                self.set_status(format!("{selected} row(s) selected"), StatusLevel::Normal);
            }
            Msg::DeselectAll => {
                self.orchestrator.deselect_all();
                self.set_status("Selection cleared", StatusLevel::Normal);
            }

            Msg::EnterSearchMode => {
                let snapshot = self.orchestrator.snapshot();
                self.search_before = SearchOrigin {
                    term: snapshot.search.clone(),
                    page: snapshot.pagination.current_page,
                    cursor: self.cursor,
                };
                self.search.set_value(&self.search_before.term);
                self.search.focused = true;
                self.set_mode(AppState::Searching);
            }
            Msg::SearchInput(ch) => {
                self.search.type_char(ch);
                self.apply_search();
            }
            Msg::SearchBackspace => {
                self.search.backspace();
                self.apply_search();
            }
            Msg::SearchCommit => {
                self.search.commit();
                self.leave_search();
            }
            Msg::SearchCancel => self.cancel_search(),
            Msg::SearchHistoryUp => {
                self.search.history_prev();
                self.apply_search();
            }
            Msg::SearchHistoryDown => {
                self.search.history_next();
                self.apply_search();
            }

            Msg::EditOrSave => self.edit_or_save(),
            Msg::EditResume => {
                if let Some(row) = self.cursor_row().filter(|r| r.editing).cloned() {
                    self.typing = Some((row.id, Field::Name));
                    self.set_mode(AppState::Typing);
                }
            }
            Msg::EditInput(ch) => {
                if let Some((id, field, mut value)) = self.typing_value() {
                    value.push(ch);
                    self.orchestrator.edit_input(&id, field, value);
                }
            }
            Msg::EditBackspace => {
                if let Some((id, field, mut value)) = self.typing_value() {
                    if value.pop().is_some() {
                        self.orchestrator.edit_input(&id, field, value);
                    }
                }
            }
            Msg::EditNextField => {
                if let Some((_, field)) = self.typing.as_mut() {
                    *field = field.next();
                }
            }
            Msg::EditStopTyping => {
                self.typing = None;
                self.set_mode(AppState::Normal);
            }

            Msg::RequestDeleteRow => {
                if let Some(row) = self.cursor_row().cloned() {
                    self.pending_delete = Some(PendingDelete::Row(row.id));
                    self.confirm_dialog.show();
                    self.set_mode(AppState::Confirming);
                }
            }
            Msg::RequestDeleteSelected => {
                let count = self.orchestrator.state().selected.count();
                if count == 0 {
                    self.set_status("No rows selected", StatusLevel::Warning);
                } else {
                    self.pending_delete = Some(PendingDelete::Selected(count));
                    self.confirm_dialog.show();
                    self.set_mode(AppState::Confirming);
                }
            }
            Msg::ConfirmAnswer(yes) => return self.finish_delete(yes),

            Msg::RecordsLoaded(Ok(records)) => {
                let fetched = records.len();
                self.orchestrator.load(records);
                self.load = LoadState::Loaded;
                self.cursor = 0;
                let count = self.orchestrator.store().len();
                tracing::info!(target: "tui.async_complete", fetched, count, "Records loaded");
                self.set_status(format!("Loaded {count} record(s)"), StatusLevel::Success);
                self.push_toast(
                    format!("Loaded {count} record(s)"),
                    ToastIcon::Success,
                    ToastStyle::Success,
                );
                return FtuiCmd::log(format!("load: complete (records={count})"));
            }
            Msg::RecordsLoaded(Err(error)) => {
                tracing::error!(target: "tui.async_complete", error = %error, "Record load failed");
                self.load = LoadState::Failed(error.clone());
                self.set_status(format!("Failed to load records: {error}"), StatusLevel::Error);
                self.push_toast(
                    format!("Load failed: {error}"),
                    ToastIcon::Error,
                    ToastStyle::Error,
                );
                return FtuiCmd::log(format!("load: failed ({error})"));
            }

            Msg::ToggleHelp => {
                let to = if self.state == AppState::Help {
                    AppState::Normal
                } else {
                    AppState::Help
                };
                self.set_mode(to);
            }
            Msg::Quit => {
                self.set_mode(AppState::Quitting);
                return FtuiCmd::quit();
            }
        }
        self.clamp_cursor();
        FtuiCmd::none()
    }

    fn edit_or_save(&mut self) {
        let target = match &self.typing {
            Some((id, _)) => Some(id.clone()),
            None => self.cursor_row().map(|r| r.id.clone()),
        };
        let Some(id) = target else {
            return;
        };

        if self.orchestrator.edit().is_editing(&id) {
            self.orchestrator.save_edit(&id);
            self.typing = None;
            self.set_mode(AppState::Normal);
            self.set_status(format!("Saved row {id}"), StatusLevel::Success);
            return;
        }

        match self.orchestrator.begin_edit(&id) {
            Ok(true) => {
                self.typing = Some((id.clone(), Field::Name));
                self.set_mode(AppState::Typing);
                self.set_status(format!("Editing row {id}"), StatusLevel::Normal);
            }
            Ok(false) => {}
            Err(refusal) => self.set_status(refusal.to_string(), StatusLevel::Warning),
        }
    }

    fn finish_delete(&mut self, yes: bool) -> FtuiCmd<Msg> {
        self.set_mode(AppState::Normal);
        let Some(pending) = self.pending_delete.take() else {
            return FtuiCmd::none();
        };
        let mut answer = yes;
        let removed = match &pending {
            PendingDelete::Row(id) => usize::from(self.orchestrator.delete_one(id, &mut answer)),
            PendingDelete::Selected(_) => self.orchestrator.delete_selected(&mut answer),
        };
        self.clamp_cursor();

        if removed == 0 {
            self.set_status("Delete cancelled", StatusLevel::Normal);
            return FtuiCmd::none();
        }
        let message = match pending {
            PendingDelete::Row(id) => format!("Deleted row {id}"),
            PendingDelete::Selected(_) => format!("Deleted {removed} row(s)"),
        };
        self.set_status(message.clone(), StatusLevel::Success);
        self.push_toast(message.clone(), ToastIcon::Success, ToastStyle::Success);
        FtuiCmd::log(format!("delete: {message}"))
    }

    fn handle_ftui_key_event(&mut self, key: FtuiKeyEvent) -> FtuiCmd<Msg> {
        if !matches!(key.kind, FtuiKeyEventKind::Press | FtuiKeyEventKind::Repeat) {
            return FtuiCmd::none();
        }

        tracing::debug!(
            target: "tui.user_input",
            key_code = ?key.code,
            modifiers = ?key.modifiers,
            app_state = ?self.state,
            "Key event received"
        );

        let msg = match self.state {
            AppState::Normal => self.normal_key(&key),
            AppState::Searching => Self::search_key(&key),
            AppState::Typing => Self::typing_key(&key),
            AppState::Confirming => self.confirm_key(&key),
            AppState::Help => Self::help_key(&key),
            AppState::Quitting => Some(Msg::Quit),
        };
        match msg {
            Some(msg) => self.handle_msg(msg),
            None => FtuiCmd::none(),
        }
    }

    fn normal_key(&mut self, key: &FtuiKeyEvent) -> Option<Msg> {
        let kb = &self.key_bindings;
        let msg = if kb.is_quit(key) {
            tracing::info!(target: "tui.user_input", action = "quit", "Quit requested");
            Msg::Quit
        } else if kb.is_help(key) {
            Msg::ToggleHelp
        } else if kb.is_search(key) {
            Msg::EnterSearchMode
        } else if kb.is_next(key) {
            Msg::CursorDown
        } else if kb.is_prev(key) {
            Msg::CursorUp
        } else if kb.is_toggle(key) {
            Msg::ToggleSelection
        } else if kb.is_select_all(key) {
            Msg::SelectAll
        } else if kb.is_deselect_all(key) {
            Msg::DeselectAll
        } else if kb.is_edit(key) {
            Msg::EditOrSave
        } else if kb.is_delete_selected(key) {
            Msg::RequestDeleteSelected
        } else if kb.is_delete_row(key) {
            Msg::RequestDeleteRow
        } else if kb.is_prev_page(key) {
            Msg::PrevPage
        } else if kb.is_next_page(key) {
            Msg::NextPage
        } else if kb.is_first_page(key) {
            Msg::FirstPage
        } else if kb.is_last_page(key) {
            Msg::LastPage
        } else if let Some(page) = KeyBindings::page_digit(key) {
            Msg::GoToPage(page)
        } else {
            match key.code {
                FtuiKeyCode::Enter => Msg::EditResume,
                FtuiKeyCode::Escape if !self.orchestrator.snapshot().search.is_empty() => {
                    self.search.clear();
                    self.orchestrator.search("");
                    self.cursor = 0;
                    return None;
                }
                _ => return None,
            }
        };
        Some(msg)
    }

    fn is_ctrl_c(key: &FtuiKeyEvent) -> bool {
        key.code == FtuiKeyCode::Char('c') && key.modifiers.contains(FtuiModifiers::CTRL)
    }

    fn search_key(key: &FtuiKeyEvent) -> Option<Msg> {
        if Self::is_ctrl_c(key) {
            return Some(Msg::Quit);
        }
        match key.code {
            FtuiKeyCode::Escape => Some(Msg::SearchCancel),
            FtuiKeyCode::Enter => Some(Msg::SearchCommit),
            FtuiKeyCode::Up => Some(Msg::SearchHistoryUp),
            FtuiKeyCode::Down => Some(Msg::SearchHistoryDown),
            FtuiKeyCode::Backspace => Some(Msg::SearchBackspace),
            FtuiKeyCode::Char(c) if !key.modifiers.contains(FtuiModifiers::CTRL) => {
                Some(Msg::SearchInput(c))
            }
            _ => None,
        }
    }

    fn typing_key(key: &FtuiKeyEvent) -> Option<Msg> {
        if Self::is_ctrl_c(key) {
            return Some(Msg::Quit);
        }
        match key.code {
            FtuiKeyCode::Escape => Some(Msg::EditStopTyping),
            FtuiKeyCode::Enter => Some(Msg::EditOrSave),
            FtuiKeyCode::Tab => Some(Msg::EditNextField),
            FtuiKeyCode::Backspace => Some(Msg::EditBackspace),
            FtuiKeyCode::Char(c) if !key.modifiers.contains(FtuiModifiers::CTRL) => {
                Some(Msg::EditInput(c))
            }
            _ => None,
        }
    }

    fn confirm_key(&mut self, key: &FtuiKeyEvent) -> Option<Msg> {
        match key.code {
            FtuiKeyCode::Left | FtuiKeyCode::Char('h') => self.confirm_dialog.select_left(),
            FtuiKeyCode::Right | FtuiKeyCode::Char('l') => self.confirm_dialog.select_right(),
            FtuiKeyCode::Tab | FtuiKeyCode::BackTab => self.confirm_dialog.toggle(),
            FtuiKeyCode::Enter => {
                let choice = self.confirm_dialog.confirm();
                return Some(Msg::ConfirmAnswer(choice.is_yes()));
            }
            FtuiKeyCode::Char('y') | FtuiKeyCode::Char('Y') => {
                self.confirm_dialog.confirm();
                return Some(Msg::ConfirmAnswer(true));
            }
            FtuiKeyCode::Escape | FtuiKeyCode::Char('n') | FtuiKeyCode::Char('N') => {
                self.confirm_dialog.cancel();
                return Some(Msg::ConfirmAnswer(false));
            }
            _ => {}
        }
        None
    }

    fn help_key(key: &FtuiKeyEvent) -> Option<Msg> {
        match key.code {
            FtuiKeyCode::Escape | FtuiKeyCode::Char('q') | FtuiKeyCode::Char('?') => {
                Some(Msg::ToggleHelp)
            }
            _ => None,
        }
    }

    fn empty_table_message(&self) -> &'static str {
        match &self.load {
            LoadState::Pending => "Loading records...",
            LoadState::Failed(_) => "No records loaded",
            LoadState::Loaded if self.orchestrator.store().is_empty() => "No records",
            LoadState::Loaded => "No matching records",
        }
    }

    fn confirm_text(&self, pending: &PendingDelete) -> (String, Option<String>) {
        match pending {
            PendingDelete::Row(id) => {
                let details = self
                    .orchestrator
                    .store()
                    .get(id)
                    .map(|r| format!("{}  {}  {}  {}", r.id, r.name, r.email, r.role));
                ("Delete this row?".to_string(), details)
            }
            PendingDelete::Selected(count) => (format!("Delete {count} selected row(s)?"), None),
        }
    }
}

impl FtuiModel for App {
    type Message = Msg;

    fn init(&mut self) -> FtuiCmd<Self::Message> {
        tracing::info!(
            target: "tui.startup",
            terminal_size = ?self.layout_state.size(),
            theme = ?self.theme.mode,
            page_size = self.orchestrator.page_size(),
            "TUI model initialized"
        );
        self.start_load()
    }

    fn update(&mut self, msg: Self::Message) -> FtuiCmd<Self::Message> {
        self.handle_msg(msg)
    }

    fn view(&self, frame: &mut FtuiFrame) {
        let full_area = Rect::new(0, 0, frame.width(), frame.height());
        let layout = ResponsiveLayout::new(full_area);

        if layout.is_too_small() {
            draw_ftui_text(frame, 0, 0, "Terminal too small (min 40x10)");
            return;
        }

        let areas = layout.main_areas();
        let snapshot = self.orchestrator.snapshot();

        SearchInput::new()
            .theme(&self.theme)
            .render_view(areas.search, frame, &self.search);

        RecordTable::new()
            .theme(&self.theme)
            .breakpoint(layout.breakpoint())
            .typing(self.typing())
            .empty_message(self.empty_table_message())
            .focused(matches!(self.state, AppState::Normal | AppState::Typing))
            .render_view(areas.table, frame, snapshot, self.cursor);

        PaginationBar::new(&snapshot.pagination, &snapshot.summary)
            .theme(&self.theme)
            .render_ftui(areas.pager, frame);

        let status_mode = match self.state {
            AppState::Normal | AppState::Quitting => StatusMode::Normal,
            AppState::Searching => StatusMode::Searching,
            AppState::Typing => StatusMode::Typing,
            AppState::Confirming => StatusMode::Confirming,
            AppState::Help => StatusMode::Help,
        };
        let mut status_bar = StatusBar::new().theme(&self.theme).mode(status_mode);
        if let Some((message, level)) = &self.status {
            status_bar = status_bar.message(message, *level);
        }
        status_bar.render_ftui(areas.status, frame);

        if self.state == AppState::Help {
            HelpOverlay::new()
                .theme(&self.theme)
                .breakpoint(layout.breakpoint())
                .render_ftui(full_area, frame);
        }

        if let (AppState::Confirming, Some(pending)) = (self.state, &self.pending_delete) {
            let (message, details) = self.confirm_text(pending);
            let mut dialog = ConfirmDialog::new()
                .theme(&self.theme)
                .title("Confirm Delete")
                .message(&message);
            if let Some(details) = details.as_deref() {
                dialog = dialog.details(details);
            }
            dialog.render_view(layout.popup_area(50, 30), frame, &self.confirm_dialog);
        }

        if !self.notifications.is_empty() {
            NotificationStack::new(&self.notifications).render(full_area, frame);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![Box::new(Every::with_id(
            0x524F_5354_4552,
            Duration::from_secs(5),
            || Msg::Tick,
        ))]
    }
}

fn draw_ftui_text(frame: &mut FtuiFrame, x: u16, y: u16, text: &str) {
    if y >= frame.height() || x >= frame.width() {
        return;
    }

    let mut col = x;
    let max_col = frame.width();
    for ch in text.chars() {
        if col >= max_col {
            break;
        }
        frame.buffer.set(col, y, FtuiCell::from_char(ch));
        col = col.saturating_add(1);
    }
}

/// Run the TUI with an explicit ftui program configuration.
pub fn run_ftui(app: App, config: ProgramConfig) -> TuiResult<()> {
    let mut program =
        Program::with_config(app, config).map_err(|e| TuiError::TerminalInit(e.to_string()))?;
    program
        .run()
        .map_err(|e| TuiError::TerminalInit(e.to_string()))
}

/// Run the TUI fullscreen, or inline with `inline` rows at the bottom.
pub fn run_tui(app: App, inline: Option<u16>) -> TuiResult<()> {
    let config = match inline {
        Some(rows) => ProgramConfig::inline(rows),
        None => ProgramConfig::fullscreen(),
    };
    run_ftui(app, config)
}
