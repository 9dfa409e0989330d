//! Rendering the record for the host application

use crate::record::ConfigurationRecord;
use anyhow::{anyhow, Context, Result};
use common::php;
use std::fmt;
use std::str::FromStr;

/// Output format of the rendered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `config_si.php`, as read by the silent installer.
    #[default]
    Php,
    Json,
    Yaml,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "php" => Ok(Self::Php),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(anyhow!(
                "Unknown config format: {}. Expected one of: php, json, yaml",
                other
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Php => "php",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Render `record` in `format`.
pub fn render(record: &ConfigurationRecord, format: Format) -> Result<String> {
    match format {
        Format::Php => Ok(render_php(record)),
        Format::Json => {
            let mut out =
                serde_json::to_string_pretty(record).context("Failed to serialize record as JSON")?;
            out.push('\n');
            Ok(out)
        }
        Format::Yaml => serde_yaml::to_string(record).context("Failed to serialize record as YAML"),
    }
}

/// Absent values become `false`, which is what `getenv()` yields for an unset variable.
fn render_php(record: &ConfigurationRecord) -> String {
    let entries = record
        .iter()
        .map(|(key, value)| {
            let value = value.map(php::quote).unwrap_or_else(|| "false".to_string());
            format!("    {} => {}", php::quote(key), value)
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!("<?php\n$sugar_config_si = array(\n{}\n);\n", entries)
}
