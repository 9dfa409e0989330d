//! Silent-install config generator
//!
//! Writes `$sugar_config_si` from the container environment before the
//! SuiteCRM installer runs.

use anyhow::Result;
use common::{init_logging, ProcessEnv};
use suitecrm_config::{write_record, Settings};
use tracing::info;

fn main() -> Result<()> {
    let _guard = init_logging("config-si");

    let settings = Settings::from_source(&ProcessEnv)?;
    let record = write_record(&ProcessEnv, &settings)?;

    // Values are never logged: the record carries database and admin passwords.
    info!(
        keys = record.len(),
        absent = record.absent_count(),
        "Silent-install config materialized"
    );

    Ok(())
}
