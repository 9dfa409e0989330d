//! Output settings for the `config-si` binary

use crate::render::Format;
use anyhow::Result;
use common::EnvSource;
use std::path::PathBuf;

pub const FORMAT_VAR: &str = "SUITECRM_CONFIG_SI_FORMAT";
pub const PATH_VAR: &str = "SUITECRM_CONFIG_SI_PATH";

/// Where and how to write the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: Format,
    /// `None` writes to stdout.
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_source(env: &impl EnvSource) -> Result<Self> {
        let format = match env.var_non_empty(FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => Format::default(),
        };

        Ok(Self {
            format,
            path: env.var_non_empty(PATH_VAR).map(PathBuf::from),
        })
    }
}
