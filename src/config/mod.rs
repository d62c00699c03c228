//! Configuration store module.
//!
//! Handles `key=value` file loading, required-key validation, and typed lookup.

mod reporter;
mod store;
mod validation;

pub use reporter::{Reporter, TracingReporter};
pub use store::ConfigStore;
pub use validation::missing_keys;
