//! Settings for the `repair` binary from environment variables

use anyhow::{Context, Result};
use common::{EnvSource, SuiteCrmEnv};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the repair run
#[derive(Debug, Clone)]
pub struct Settings {
    pub install_dir: PathBuf,
    pub php_binary: String,
    /// Extra interpreter options, e.g. `-d memory_limit=-1`.
    pub php_options: Vec<String>,
    /// How long cleanup waits for the repair session before disconnecting it.
    pub repair_timeout: Duration,
    pub current_language: Option<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_source(env: &impl EnvSource) -> Result<Self> {
        let install_dir = env
            .var_required(SuiteCrmEnv::INSTALL_DIR_VAR)
            .context("SuiteCRM install directory is unknown")?;

        Ok(Self {
            install_dir: PathBuf::from(SuiteCrmEnv::normalize_install_dir(&install_dir)),
            php_binary: env.var_or("SUITECRM_PHP_BINARY", "php"),
            php_options: env
                .var("SUITECRM_PHP_OPTIONS")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            repair_timeout: Duration::from_secs(env.var_parse("SUITECRM_REPAIR_TIMEOUT", 900)),
            current_language: env.var_non_empty("SUITECRM_CURRENT_LANGUAGE"),
        })
    }
}
