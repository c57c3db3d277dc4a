//! Widgets for the roster TUI.
//!
//! - `RecordTable`: rows of the current page
//! - `SearchInput`: search box with history
//! - `PaginationBar`: page buttons and selection summary
//! - `StatusBar`: mode, message and key hints
//! - `ConfirmDialog`: Yes/No gate before deletions
//! - `HelpOverlay`: key binding reference

mod confirm_dialog;
mod help_overlay;
mod pagination_bar;
mod record_table;
mod search_input;
mod status_bar;

pub use confirm_dialog::{ConfirmChoice, ConfirmDialog, ConfirmDialogState};
pub use help_overlay::HelpOverlay;
pub use pagination_bar::PaginationBar;
pub use record_table::{RecordTable, TYPING_CURSOR};
pub use search_input::{SearchInput, SearchInputState, HISTORY_LIMIT};
pub use status_bar::{StatusBar, StatusLevel, StatusMode};
