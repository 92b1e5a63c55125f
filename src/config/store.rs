//! Explicit key/value configuration sources.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Errors surfaced while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML.
    #[error("failed to parse configuration file: {0}")]
    File(#[from] toml::de::Error),

    /// A stored value does not match the expected primitive shape.
    #[error("option '{key}' has malformed value '{value}', expected {expected}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Immutable string key/value source for client options.
///
/// Replaces the process-wide context store of older test harnesses: a store
/// is constructed explicitly and handed to [`resolve`](crate::config::resolve),
/// so no component performs hidden global reads. Values are held as strings
/// and parsed by the resolver, which reports [`ConfigError::Parse`] for
/// values that do not match the expected shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Create an empty store. Resolution over it yields all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a store from a flat TOML file of scalar values.
    ///
    /// Non-scalar entries (tables, arrays) are rejected as malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content)?;

        let mut values = BTreeMap::new();
        for (key, value) in table {
            let rendered = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(ConfigError::Parse {
                        key,
                        value: other.to_string(),
                        expected: "a scalar value",
                    })
                }
            };
            values.insert(key, rendered);
        }
        Ok(Self { values })
    }

    /// Look up a raw value by option name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of stored options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no options.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
