//! Query service: check, typed lookup and dump over a loaded store.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{DumpFormat, ValueType};
use crate::config::ConfigStore;

/// JSON shape of `dump --format json`.
#[derive(Serialize)]
struct DumpView<'a> {
    path: &'a Path,
    valid: bool,
    values: BTreeMap<&'a str, &'a str>,
}

/// Service answering queries against one configuration file.
pub struct QueryService {
    store: ConfigStore,
}

impl QueryService {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Load `path` with diagnostics going to `tracing`.
    pub fn open<P: AsRef<Path>, S: AsRef<str>>(path: P, required: &[S]) -> Self {
        Self::new(ConfigStore::load(path, required))
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Fail unless the store loaded cleanly with all required keys.
    pub fn check(&self) -> Result<()> {
        if !self.store.is_valid() {
            bail!(
                "Configuration file {} is invalid",
                self.store.path().display()
            );
        }
        info!(
            "Configuration file {} is valid ({} entries)",
            self.store.path().display(),
            self.store.len()
        );
        Ok(())
    }

    /// Look up `key` as `value_type` and render it for printing.
    ///
    /// `default` is used only when the key is absent, and must itself parse as
    /// `value_type`.
    pub fn lookup(&self, key: &str, value_type: ValueType, default: Option<&str>) -> Result<String> {
        debug!("Lookup: key={}, type={:?}", key, value_type);

        let store = &self.store;
        let rendered = match (value_type, default) {
            (ValueType::String, Some(default)) => store.get_string_or(key, default).to_string(),
            (ValueType::String, None) => store.get_string(key)?.to_string(),
            (ValueType::Int, Some(default)) => {
                let default = parse_default::<i32>(default, value_type)?;
                store.get_int_or(key, default)?.to_string()
            }
            (ValueType::Int, None) => store.get_int(key)?.to_string(),
            (ValueType::Float, Some(default)) => {
                let default = parse_default::<f32>(default, value_type)?;
                store.get_float_or(key, default)?.to_string()
            }
            (ValueType::Float, None) => store.get_float(key)?.to_string(),
            (ValueType::Double, Some(default)) => {
                let default = parse_default::<f64>(default, value_type)?;
                store.get_double_or(key, default)?.to_string()
            }
            (ValueType::Double, None) => store.get_double(key)?.to_string(),
        };

        Ok(rendered)
    }

    /// Render all entries, optionally only those whose key matches `pattern`.
    pub fn dump(&self, format: DumpFormat, pattern: Option<&str>) -> Result<String> {
        let filter = pattern
            .map(|p| Regex::new(p).with_context(|| format!("Invalid --match pattern: {}", p)))
            .transpose()?;

        let values: BTreeMap<&str, &str> = self
            .store
            .iter()
            .filter(|(key, _)| filter.as_ref().map_or(true, |re| re.is_match(key)))
            .collect();

        match format {
            DumpFormat::Text => Ok(values
                .iter()
                .map(|(key, value)| format!("{}={}\n", key, value))
                .collect()),
            DumpFormat::Json => {
                let view = DumpView {
                    path: self.store.path(),
                    valid: self.store.is_valid(),
                    values,
                };
                serde_json::to_string_pretty(&view).context("Failed to serialize entries")
            }
        }
    }
}

fn parse_default<T>(raw: &str, value_type: ValueType) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("Invalid default {:?} for type {:?}: {}", raw, value_type, e))
}
