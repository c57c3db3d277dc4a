//! Messages consumed by `App::update`.
//!
//! Terminal events arrive through `From<Event>`; everything else is produced
//! by key dispatch or by the background load task.

use ftui::{Event, KeyEvent};
use roster_common::Record;

/// Every input the application model reacts to.
#[derive(Debug, Clone)]
pub enum Msg {
    // ── terminal input ──────────────────────────────────────────────
    /// A key was pressed (or auto-repeated).
    KeyPressed(KeyEvent),
    /// Terminal was resized.
    Resized { width: u16, height: u16 },
    /// Periodic tick; ages toasts.
    Tick,
    /// Terminal focus gained (`true`) or lost.
    FocusChanged(bool),
    /// Pasted text. Starts a search from browsing mode, extends the search
    /// or the draft while typing, and is dropped otherwise.
    PasteReceived { text: String, bracketed: bool },
    /// Clipboard contents delivered by the terminal.
    ClipboardReceived(String),
    /// Nothing to do.
    Noop,

    // ── cursor and pages ────────────────────────────────────────────
    CursorUp,
    CursorDown,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    /// Jump to a 1-based page number.
    GoToPage(usize),

    // ── selection ───────────────────────────────────────────────────
    ToggleSelection,
    SelectAll,
    DeselectAll,

    // ── search ──────────────────────────────────────────────────────
    EnterSearchMode,
    SearchInput(char),
    SearchBackspace,
    SearchCommit,
    SearchCancel,
    SearchHistoryUp,
    SearchHistoryDown,

    // ── inline editing ──────────────────────────────────────────────
    /// Enter edit mode on the cursor row, or save it if already editing.
    EditOrSave,
    /// Start typing again into a row already in edit mode.
    EditResume,
    EditInput(char),
    EditBackspace,
    EditNextField,
    /// Leave typing mode; the row stays in edit mode.
    EditStopTyping,

    // ── deletion ────────────────────────────────────────────────────
    RequestDeleteRow,
    RequestDeleteSelected,
    /// Answer from the confirmation dialog.
    ConfirmAnswer(bool),

    // ── async results ───────────────────────────────────────────────
    /// The one-shot record fetch finished.
    RecordsLoaded(Result<Vec<Record>, String>),

    // ── misc ────────────────────────────────────────────────────────
    ToggleHelp,
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Msg::KeyPressed(key),
            Event::Resize { width, height } => Msg::Resized { width, height },
            Event::Tick => Msg::Tick,
            Event::Focus(gained) => Msg::FocusChanged(gained),
            Event::Paste(paste) => Msg::PasteReceived {
                text: paste.text,
                bracketed: paste.bracketed,
            },
            Event::Clipboard(clipboard) => Msg::ClipboardReceived(clipboard.content),
            Event::Mouse(_) => Msg::Noop,
        }
    }
}
