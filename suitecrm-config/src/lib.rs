//! Environment-driven configuration for the SuiteCRM silent installer
//!
//! Maps a fixed whitelist of `SUITECRM_*` environment variables onto the keys of
//! `$sugar_config_si` and renders the result where the installer can read it.
//! Unset variables stay unset: no defaults are filled in, because deployments
//! leave optional settings out on purpose.

pub mod keys;
pub mod record;
pub mod render;
pub mod settings;

pub use keys::{KeySpec, Source, KEYS};
pub use record::{materialize, materialize_into, ConfigurationRecord};
pub use render::{render, Format};
pub use settings::Settings;

use anyhow::{Context, Result};
use std::fs::{OpenOptions, Permissions};
use std::io::Write;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use tracing::info;

/// Materialize the record from `env`, render it and write it out.
pub fn write_record(env: &impl common::EnvSource, settings: &Settings) -> Result<ConfigurationRecord> {
    let record = materialize(env);
    let rendered = render(&record, settings.format)?;

    match &settings.path {
        Some(path) => {
            write_private(path, &rendered)
                .context(format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), format = %settings.format, "Config written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write config to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(record)
}

/// Owner read/write only: the record carries database and admin passwords.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
