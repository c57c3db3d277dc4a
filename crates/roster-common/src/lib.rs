//! Roster common types and errors.
//!
//! This crate provides foundational types shared across roster crates:
//! - The user record model and its identity type
//! - The editable field enumeration
//! - Common error types with stable codes

pub mod error;
pub mod record;

pub use error::{Error, ErrorCategory, Result};
pub use record::{Field, Record, RecordId};
