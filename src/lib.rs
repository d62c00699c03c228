//! kvconf: reader for flat `key=value` configuration files.
//!
//! Loads a file of `key=value` lines with `#` comments and optional quoting,
//! checks that required keys are present, and exposes typed accessors.
//!
//! ```no_run
//! use kvconf::ConfigStore;
//!
//! let store = ConfigStore::load("app.cfg", &["name", "age"]);
//! if store.is_valid() {
//!     let name = store.get_string("name")?;
//!     let port = store.get_int_or("port", 8080)?;
//!     println!("{name} listens on {port}");
//! }
//! # Ok::<(), kvconf::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod service;

pub use config::{ConfigStore, Reporter, TracingReporter};
pub use domain::{ConfigError, Diagnostic, NumberKind};
