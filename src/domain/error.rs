//! Error types for kvconf.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Numeric type requested from a typed accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
    Double,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberKind::Int => "int",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
        };
        f.write_str(name)
    }
}

/// Errors returned by the accessors of a loaded store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The key is not present in the store
    #[error("key not found: \"{key}\"")]
    KeyNotFound { key: String },

    /// The stored value cannot be parsed as the requested number type
    #[error("malformed {kind} value for key \"{key}\": \"{value}\" ({reason})")]
    MalformedNumber {
        key: String,
        value: String,
        kind: NumberKind,
        reason: String,
    },
}

impl ConfigError {
    pub fn key_not_found(key: &str) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
        }
    }
}

/// Result alias for accessor calls.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Problems noticed while loading a file.
///
/// These never abort construction. They are handed to a
/// [`Reporter`](crate::config::Reporter) and folded into the validity flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The file could not be opened
    #[error("can't open config file {}: {reason}", path.display())]
    OpenFailed { path: PathBuf, reason: String },

    /// A line has '=' but yields an empty key or value
    #[error("config file {}, line #{line_number} is bad. Line:\n{line}", path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    /// Reading failed part way through the file
    #[error("failed reading config file {} after line #{line_number}: {reason}", path.display())]
    ReadFailed {
        path: PathBuf,
        line_number: usize,
        reason: String,
    },

    /// A key the caller requires is absent after parsing
    #[error("config file {} does not have required key \"{key}\"", path.display())]
    MissingRequiredKey { path: PathBuf, key: String },
}

impl Diagnostic {
    /// Whether this diagnostic makes the store invalid on its own.
    ///
    /// Malformed lines are dropped but leave the store usable.
    pub fn invalidates(&self) -> bool {
        !matches!(self, Diagnostic::MalformedLine { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_message_contains_location() {
        let diagnostic = Diagnostic::MalformedLine {
            path: PathBuf::from("app.cfg"),
            line_number: 4,
            line: "empty_value=".to_string(),
        };
        let message = diagnostic.to_string();
        assert!(message.contains("app.cfg"));
        assert!(message.contains("#4"));
        assert!(message.contains("empty_value="));
        assert!(!diagnostic.invalidates());
    }

    #[test]
    fn test_missing_key_invalidates() {
        let diagnostic = Diagnostic::MissingRequiredKey {
            path: PathBuf::from("app.cfg"),
            key: "port".to_string(),
        };
        assert!(diagnostic.invalidates());
        assert!(diagnostic.to_string().contains("\"port\""));
    }

    #[test]
    fn test_malformed_number_display() {
        let err = ConfigError::MalformedNumber {
            key: "age".to_string(),
            value: "thirty".to_string(),
            kind: NumberKind::Int,
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed int value for key \"age\": \"thirty\" (invalid digit found in string)"
        );
    }
}
