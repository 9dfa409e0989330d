//! Host backed by the installed PHP application
//!
//! Configuration is read with a short PHP script at bootstrap. The remaining
//! steps fill in a session script, which is handed to one PHP process when the
//! repair is dispatched. That process owns the application's database
//! connection, so cleanup means waiting for it and disconnect means stopping it.

mod script;
mod session;

pub use script::{SessionScript, CONFIG_DUMP, CONFIG_FILE, ENTRY_POINT, REPAIR_MODULE};
pub use session::Session;

use crate::host::{Host, HostConfig, RepairScope, SystemUser};
use crate::settings::Settings;
use anyhow::{bail, Context, Result};
use common::command::{run_checked, run_script_checked, spawn_script};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct PhpHost {
    install_dir: PathBuf,
    php_binary: String,
    php_options: Vec<String>,
    repair_timeout: Duration,
    script: SessionScript,
    session: Option<Session>,
}

impl PhpHost {
    pub fn new(settings: &Settings) -> Self {
        Self {
            install_dir: settings.install_dir.clone(),
            php_binary: settings.php_binary.clone(),
            php_options: settings.php_options.clone(),
            repair_timeout: settings.repair_timeout,
            script: SessionScript::default(),
            session: None,
        }
    }

    fn php_args(&self) -> Vec<&str> {
        self.php_options.iter().map(String::as_str).collect()
    }

    fn require_file(&self, relative: &str) -> Result<()> {
        let path = self.install_dir.join(relative);
        if !path.is_file() {
            bail!("{} not found", path.display());
        }
        Ok(())
    }

    fn language_file(&self, language: &str) -> PathBuf {
        self.install_dir
            .join("include/language")
            .join(format!("{}.lang.php", language))
    }
}

impl Host for PhpHost {
    fn bootstrap(&mut self) -> Result<HostConfig> {
        if !self.install_dir.is_dir() {
            bail!("Install directory {} does not exist", self.install_dir.display());
        }
        for file in [ENTRY_POINT, REPAIR_MODULE, CONFIG_FILE] {
            self.require_file(file)?;
        }

        let mut args = self.php_args();
        args.extend(["-r", "echo PHP_VERSION;"]);
        let version = run_checked(&self.php_binary, &args)
            .context(format!("PHP interpreter {} is not usable", self.php_binary))?;
        info!(php = %self.php_binary, version = %version, dir = %self.install_dir.display(), "Using PHP");

        let dump = run_script_checked(&self.php_binary, &self.php_args(), &self.install_dir, CONFIG_DUMP)
            .context("Failed to read application config")?;
        let config: HostConfig = serde_json::from_str(&dump)
            .context(format!("Unexpected config dump: {}", dump))?;

        debug!(
            site_url = ?config.site_url,
            default_language = ?config.default_language,
            "Application config loaded"
        );
        Ok(config)
    }

    fn load_app_strings(&mut self, language: &str) -> Result<()> {
        let path = self.language_file(language);
        if !path.is_file() {
            bail!("No application strings for language {}: {} not found", language, path.display());
        }
        self.script.app_strings_language = Some(language.to_string());
        Ok(())
    }

    fn load_app_list_strings(&mut self, language: &str) -> Result<()> {
        // List strings live in the same language file as the general strings.
        let path = self.language_file(language);
        if !path.is_file() {
            bail!("No list strings for language {}: {} not found", language, path.display());
        }
        self.script.app_list_strings_language = Some(language.to_string());
        Ok(())
    }

    fn system_user(&mut self) -> Result<SystemUser> {
        // Resolved inside the session by the application itself.
        self.script.system_user = true;
        Ok(SystemUser {
            user_name: "system".to_string(),
        })
    }

    fn repair_and_clear_all(&mut self, scope: RepairScope) -> Result<()> {
        if self.session.is_some() {
            bail!("Repair session already dispatched");
        }

        let script = self.script.render(scope);
        let child = spawn_script(&self.php_binary, &self.php_args(), &self.install_dir, &script)
            .context("Failed to start repair session")?;

        let session = Session::new(child);
        info!(pid = session.pid(), scope = ?scope, "Repair session started");
        self.session = Some(session);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            debug!("No repair session to clean up");
            return Ok(());
        };

        match session.wait_timeout(self.repair_timeout)? {
            Some(status) if status.success() => {
                info!("Repair session finished");
                self.session = None;
            }
            Some(status) => {
                // The repair result is the application's business; only report it.
                warn!(status = %status, "Repair session exited unsuccessfully");
                self.session = None;
            }
            None => {
                // Left in place: the disconnect guard stops it.
                bail!(
                    "Repair session still running after {}s",
                    self.repair_timeout.as_secs()
                );
            }
        }
        Ok(())
    }

    fn database_active(&mut self) -> bool {
        self.session
            .as_mut()
            .map(|s| s.is_running())
            .unwrap_or(false)
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            let status = session.terminate()?;
            info!(status = %status, "Repair session stopped");
        }
        Ok(())
    }
}
