//! Domain layer containing the parsing rules and shared types.
//!
//! This module contains:
//! - Line classification, trimming and unquoting
//! - Accessor errors and load diagnostics
//! - Logger setup

mod error;
pub mod line;
pub mod logger;

pub use error::{ConfigError, Diagnostic, NumberKind, Result};
pub use line::{LineKind, RawLine};
