//! Environment variable parsing with type safety.
//!
//! Values are read through an [`EnvSource`] rather than straight from the
//! process, so callers and tests can supply their own environment. Parsed
//! values carry their [`ConfigSource`](super::ConfigSource).

use super::decode::{DecodeError, decode_component};
use super::source::Sourced;
use std::collections::HashMap;
use std::env::{self, VarError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Value is not valid percent-encoded text.
    #[error("Invalid percent-encoding in {var}: {source}")]
    Decoding {
        var: String,
        value: String,
        source: DecodeError,
    },

    /// Variable is set but is not valid Unicode.
    #[error("Value of {var} is not valid Unicode")]
    NotUnicode { var: String },

    /// Invalid value for a variable.
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    /// Invalid log level.
    #[error("Invalid log level for {var}: {value}")]
    InvalidLogLevel { var: String, value: String },
}

impl EnvError {
    /// Name of the offending variable.
    pub fn var(&self) -> &str {
        match self {
            Self::Decoding { var, .. }
            | Self::NotUnicode { var }
            | Self::InvalidValue { var, .. }
            | Self::InvalidLogLevel { var, .. } => var,
        }
    }
}

/// A readable environment. Same contract as [`std::env::var`].
pub trait EnvSource {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        env::var(key)
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.vars.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

/// Type-safe environment variable parser.
///
/// `get_decoded_string` fails fast. The other getters fall back to their
/// default and collect errors so all issues can be reported at once.
/// An empty value is treated the same as an unset one everywhere.
pub struct EnvParser<'a, E: EnvSource + ?Sized> {
    env: &'a E,
    prefix: &'static str,
    errors: Vec<EnvError>,
}

impl<'a, E: EnvSource + ?Sized> EnvParser<'a, E> {
    /// Create a new parser with the BLOG_ prefix.
    pub fn new(env: &'a E) -> Self {
        Self {
            env,
            prefix: "BLOG_",
            errors: Vec::new(),
        }
    }

    /// Get all accumulated errors.
    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take ownership of errors.
    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// Get the full variable name with prefix.
    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// `None` when unset or empty.
    fn lookup(&self, var_name: &str) -> Result<Option<String>, EnvError> {
        match self.env.var(var_name) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
                var: var_name.to_string(),
            }),
        }
    }

    /// Like `lookup`, but records the error and reports the variable as unset.
    fn lookup_collecting(&mut self, var_name: &str) -> Option<String> {
        match self.lookup(var_name) {
            Ok(value) => value,
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Get a percent-decoded string with default.
    ///
    /// Only an unset or empty variable yields the default. A value that
    /// fails to decode is an error, never silently replaced.
    pub fn get_decoded_string(
        &self,
        name: &str,
        default: &str,
    ) -> Result<Sourced<String>, EnvError> {
        let var_name = self.var_name(name);
        match self.lookup(&var_name)? {
            Some(value) => match decode_component(&value) {
                Ok(decoded) => Ok(Sourced::from_env(decoded, var_name)),
                Err(source) => Err(EnvError::Decoding {
                    var: var_name,
                    value,
                    source,
                }),
            },
            None => Ok(Sourced::default_value(default.to_string())),
        }
    }

    /// Get a boolean value with default.
    ///
    /// Accepts: 1, true, yes, on (for true)
    ///          0, false, no, off (for false)
    pub fn get_bool(&mut self, name: &str, default: bool) -> Sourced<bool> {
        let var_name = self.var_name(name);
        let Some(value) = self.lookup_collecting(&var_name) else {
            return Sourced::default_value(default);
        };
        let parsed = match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name.clone(),
                    expected: "boolean (true/false/1/0/yes/no)".to_string(),
                    value,
                });
                default
            }
        };
        Sourced::from_env(parsed, var_name)
    }

    /// Get a log level value with validation.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> Sourced<String> {
        let var_name = self.var_name(name);
        let Some(value) = self.lookup_collecting(&var_name) else {
            return Sourced::default_value(default.to_string());
        };
        let lower = value.to_lowercase();
        match lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {
                Sourced::from_env(lower, var_name)
            }
            _ => {
                self.errors.push(EnvError::InvalidLogLevel {
                    var: var_name.clone(),
                    value,
                });
                Sourced::from_env(default.to_string(), var_name)
            }
        }
    }

    /// Get an optional path with ~ expansion.
    pub fn get_optional_path(&mut self, name: &str) -> Sourced<Option<PathBuf>> {
        let var_name = self.var_name(name);
        match self.lookup_collecting(&var_name) {
            Some(value) => Sourced::from_env(Some(expand_home(&value)), var_name),
            None => Sourced::default_value(None),
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    if let Some(stripped) = value.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(value)
}
