//! Interactive terminal UI for roster.
//!
//! Built on ftui's Elm-style runtime. The [`App`] model owns an
//! [`Orchestrator`](crate::Orchestrator) and draws its latest render snapshot;
//! every key press is translated into one engine operation.
//!
//! # Module Structure
//!
//! - `app`: application model, key dispatch and the `run_tui` entry point
//! - `msg`: message type fed to `Model::update`
//! - `events`: key bindings
//! - `layout`: responsive screen regions
//! - `theme`: color schemes and style classes
//! - `widgets`: table, search, pagination, status, help and confirm widgets

mod app;
mod events;
pub mod layout;
mod msg;
mod theme;
pub mod widgets;

pub use app::{run_ftui, run_tui, App, AppState, LoadState, PendingDelete};
pub use events::KeyBindings;
pub use layout::{Breakpoint, LayoutState, MainAreas, ResponsiveLayout};
pub use msg::Msg;
pub use theme::{Theme, ThemeMode};

use thiserror::Error;

/// Errors that can occur in the TUI module.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Failed to initialize or drive the terminal.
    #[error("terminal initialization failed: {0}")]
    TerminalInit(String),

    /// IO error during TUI operation.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TuiError> for roster_common::Error {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => roster_common::Error::Io(e),
            other => roster_common::Error::Terminal(other.to_string()),
        }
    }
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;
