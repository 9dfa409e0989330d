//! Environment variable access helpers
//!
//! Every tool in this workspace is configured through its environment. Reads go
//! through [`EnvSource`] so the same parsing code runs against the real process
//! environment and against in-memory maps in tests.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// A source of environment variables.
///
/// Implementors only provide [`EnvSource::var`]; the helpers for defaults,
/// required values and typed parsing come for free.
pub trait EnvSource {
    /// Look up a variable. `None` means unset; an empty string is a value.
    fn var(&self, name: &str) -> Option<String>;

    /// Get a variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let php = ProcessEnv.var_or("SUITECRM_PHP_BINARY", "php");
    /// ```
    fn var_or(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a required variable, returning an error if it is unset or empty.
    fn var_required(&self, name: &str) -> Result<String> {
        match self.var(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(anyhow!("{} must be set", name)),
        }
    }

    /// Get a variable that is set to something other than the empty string.
    fn var_non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.is_empty())
    }

    /// Get a variable parsed as a specific type.
    ///
    /// Returns `default` if the variable is not set or fails to parse.
    fn var_parse<T: FromStr>(&self, name: &str, default: T) -> T {
        self.var(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Non UTF-8 values are passed through lossily rather than dropped.
        env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

/// SuiteCRM installation helpers.
pub struct SuiteCrmEnv;

impl SuiteCrmEnv {
    /// Variable naming the application root.
    pub const INSTALL_DIR_VAR: &'static str = "SUITECRM_INSTALL_DIR";

    /// Normalize an install directory so that it ends with exactly one `/`.
    pub fn normalize_install_dir(dir: &str) -> String {
        format!("{}/", dir.trim_end_matches('/'))
    }
}
