//! Roster Core Library
//!
//! This library provides the record engine and its surfaces:
//! - Record store, view derivation, selection and inline editing
//! - The render orchestrator that re-derives the visible view after every change
//! - Record source loading (HTTP or local file)
//! - Exit codes and logging for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod edit;
pub mod exit_codes;
pub mod logging;
pub mod orchestrator;
pub mod selection;
pub mod source;
pub mod store;
pub mod view;

// TUI module (optional, behind "ui" feature)
#[cfg(feature = "ui")]
pub mod tui;

pub use orchestrator::{Confirm, Orchestrator, RenderSnapshot};
pub use store::RecordStore;
