//! The host application as seen by the maintenance run
//!
//! The repair itself, string tables, users and database handling all belong to
//! the CRM application. The invoker only talks to it through [`Host`].

use anyhow::Result;
use serde::Deserialize;

/// The parts of the application configuration the run needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub default_language: Option<String>,
}

impl HostConfig {
    /// Site URL, if set to something non-empty.
    pub fn site_url(&self) -> Option<&str> {
        self.site_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref().filter(|l| !l.is_empty())
    }
}

/// Non-interactive identity the repair runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUser {
    pub user_name: String,
}

/// Modules covered by a repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairScope {
    AllModules,
}

/// Collaborator interface to the CRM application.
///
/// Calls arrive in run order: `bootstrap` once, then the string tables, the
/// system user, at most one repair, and finally cleanup. `cleanup` may only be
/// invoked once per process; after it, `database_active` reports whether a
/// connection survived and `disconnect` releases it.
pub trait Host {
    /// Establish the application context and read its configuration.
    fn bootstrap(&mut self) -> Result<HostConfig>;

    /// Load the general application strings for `language`.
    fn load_app_strings(&mut self, language: &str) -> Result<()>;

    /// Load the list-valued application strings for `language`.
    fn load_app_list_strings(&mut self, language: &str) -> Result<()>;

    /// Resolve the system user and make it current.
    fn system_user(&mut self) -> Result<SystemUser>;

    /// Start the repair-and-rebuild. Only a failure to dispatch is reported.
    fn repair_and_clear_all(&mut self, scope: RepairScope) -> Result<()>;

    /// Application-level cleanup.
    fn cleanup(&mut self) -> Result<()>;

    /// Whether the database manager still holds a connection.
    fn database_active(&mut self) -> bool;

    /// Release the database connection.
    fn disconnect(&mut self) -> Result<()>;
}
