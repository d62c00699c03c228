//! Loaded key/value store with typed accessors.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use super::reporter::{Reporter, TracingReporter};
use super::validation;
use crate::domain::{ConfigError, Diagnostic, LineKind, NumberKind, RawLine, Result};

/// Immutable mapping of keys to values read from a `key=value` file.
///
/// Construction never fails. Problems are reported as [`Diagnostic`]s and
/// folded into [`ConfigStore::is_valid`]; callers check validity themselves.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    path: PathBuf,
    valid: bool,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Load `path`, reporting diagnostics through `tracing`.
    pub fn load<P: AsRef<Path>, S: AsRef<str>>(path: P, required: &[S]) -> Self {
        Self::load_with_reporter(path, required, &mut TracingReporter)
    }

    /// Load `path`, reporting diagnostics to `reporter`.
    ///
    /// If the file cannot be opened the store is empty and invalid.
    pub fn load_with_reporter<P: AsRef<Path>, S: AsRef<str>>(
        path: P,
        required: &[S],
        reporter: &mut dyn Reporter,
    ) -> Self {
        let path = path.as_ref();
        debug!("Loading config file: {}", path.display());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                reporter.report(&Diagnostic::OpenFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                return Self::invalid(path.to_path_buf(), BTreeMap::new());
            }
        };

        // The file handle is dropped before this returns
        Self::from_reader(BufReader::new(file), path, required, reporter)
    }

    /// Parse `key=value` lines from any buffered reader.
    ///
    /// `origin` names the source in diagnostics.
    pub fn from_reader<R: BufRead, P: AsRef<Path>, S: AsRef<str>>(
        mut reader: R,
        origin: P,
        required: &[S],
        reporter: &mut dyn Reporter,
    ) -> Self {
        let path = origin.as_ref().to_path_buf();
        let mut values = BTreeMap::new();
        let mut line_number = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    reporter.report(&Diagnostic::ReadFailed {
                        path: path.clone(),
                        line_number,
                        reason: e.to_string(),
                    });
                    return Self::invalid(path, values);
                }
            }
            line_number += 1;

            let decoded = String::from_utf8_lossy(&buf);
            let lossy = matches!(decoded, Cow::Owned(_));
            let text: &str = &decoded;
            let text = text.strip_suffix('\n').unwrap_or(text);
            let text = text.strip_suffix('\r').unwrap_or(text);

            match RawLine::new(line_number, text).classify() {
                // Undecodable bytes in a key would collide with other keys
                LineKind::Entry { key, .. }
                    if lossy && key.contains(char::REPLACEMENT_CHARACTER) =>
                {
                    reporter.report(&Diagnostic::MalformedLine {
                        path: path.clone(),
                        line_number,
                        line: text.to_string(),
                    })
                }
                LineKind::Entry { key, value } => {
                    // Later duplicates overwrite earlier ones
                    values.insert(key.to_string(), value.to_string());
                }
                LineKind::Malformed => reporter.report(&Diagnostic::MalformedLine {
                    path: path.clone(),
                    line_number,
                    line: text.to_string(),
                }),
                LineKind::Comment | LineKind::NoAssignment => {}
            }
        }

        let missing = validation::missing_keys(&values, required);
        for key in &missing {
            reporter.report(&Diagnostic::MissingRequiredKey {
                path: path.clone(),
                key: key.to_string(),
            });
        }

        debug!(
            "Loaded {} entries from {} ({} missing required keys)",
            values.len(),
            path.display(),
            missing.len()
        );

        Self {
            valid: missing.is_empty(),
            path,
            values,
        }
    }

    fn invalid(path: PathBuf, values: BTreeMap<String, String>) -> Self {
        Self {
            path,
            valid: false,
            values,
        }
    }

    /// True only if the file was read and every required key is present.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Path the store was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_string(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::key_not_found(key))
    }

    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).map_or(default, String::as_str)
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        self.get_number(key, NumberKind::Int)
    }

    /// Missing key yields `default`; a present but malformed value is still an error.
    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32> {
        self.get_number_or(key, default, NumberKind::Int)
    }

    pub fn get_float(&self, key: &str) -> Result<f32> {
        self.get_number(key, NumberKind::Float)
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32> {
        self.get_number_or(key, default, NumberKind::Float)
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        self.get_number(key, NumberKind::Double)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64> {
        self.get_number_or(key, default, NumberKind::Double)
    }

    fn get_number<T>(&self, key: &str, kind: NumberKind) -> Result<T>
    where
        T: Number,
        T::Err: Display,
    {
        let raw = self.get_string(key)?;
        parse_number(key, raw, kind)
    }

    fn get_number_or<T>(&self, key: &str, default: T, kind: NumberKind) -> Result<T>
    where
        T: Number,
        T::Err: Display,
    {
        match self.values.get(key) {
            Some(raw) => parse_number(key, raw, kind),
            None => Ok(default),
        }
    }
}

/// Numbers returned by the typed getters.
trait Number: FromStr {
    /// Whether parsing `raw` ran past the finite range of the type.
    fn overflowed(&self, raw: &str) -> bool;
}

impl Number for i32 {
    fn overflowed(&self, _raw: &str) -> bool {
        // Integer overflow is already a parse error
        false
    }
}

impl Number for f32 {
    fn overflowed(&self, raw: &str) -> bool {
        self.is_infinite() && !spells_infinity(raw)
    }
}

impl Number for f64 {
    fn overflowed(&self, raw: &str) -> bool {
        self.is_infinite() && !spells_infinity(raw)
    }
}

/// `inf` or `infinity` in any case, with an optional sign.
fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_number<T>(key: &str, raw: &str, kind: NumberKind) -> Result<T>
where
    T: Number,
    T::Err: Display,
{
    let malformed = |reason: String| ConfigError::MalformedNumber {
        key: key.to_string(),
        value: raw.to_string(),
        kind,
        reason,
    };

    let value = raw.parse::<T>().map_err(|e| malformed(e.to_string()))?;
    if value.overflowed(raw) {
        return Err(malformed("number out of range".to_string()));
    }
    Ok(value)
}
