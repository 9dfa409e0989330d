//! One-shot repair-and-rebuild run
//!
//! Init -> OriginCheck -> LanguageResolve -> Authenticate -> Execute -> Cleanup.
//! The binary terminates the process after [`MaintenanceInvoker::run`] returns.

use crate::context::{InvocationContext, RunContext};
use crate::error::{RepairError, Step};
use crate::host::{Host, RepairScope};
use crate::run::MaintenanceRun;
use anyhow::anyhow;
use tracing::{debug, error, info, warn};

/// Logged right before the repair is dispatched.
pub const REPAIR_MARKER: &str =
    "--------------------------------------------> at repair <--------------------------------------------";

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Reached from the web: send the client here instead.
    Redirect { location: String },
    /// Repair dispatched and cleaned up after.
    Repaired(MaintenanceRun),
}

pub struct MaintenanceInvoker<H: Host> {
    host: H,
    invocation: InvocationContext,
    current_language: Option<String>,
    cleaned_up: bool,
    disconnected: bool,
}

impl<H: Host> MaintenanceInvoker<H> {
    pub fn new(host: H, invocation: InvocationContext, current_language: Option<String>) -> Self {
        Self {
            host,
            invocation,
            current_language,
            cleaned_up: false,
            disconnected: false,
        }
    }

    /// Run every step once.
    ///
    /// Consumes the invoker: a process gets exactly one run. Once bootstrap has
    /// succeeded, cleanup happens on every path out of here.
    pub fn run(mut self) -> Result<Outcome, RepairError> {
        let config = self.host.bootstrap().map_err(RepairError::bootstrap)?;
        info!(invocation = ?self.invocation, "Host application bootstrapped");

        let mut ctx = RunContext::new(config, self.invocation, self.current_language.take());
        let result = self.run_steps(&mut ctx);
        let cleanup = self.cleanup();

        match (result, cleanup) {
            (Ok(Outcome::Repaired(mut run)), Ok(())) => {
                run.complete();
                info!(
                    started_at = %run.started_at.to_rfc3339(),
                    completed_at = ?run.completed_at.map(|t| t.to_rfc3339()),
                    "Repair and rebuild completed"
                );
                Ok(Outcome::Repaired(run))
            }
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(Outcome::Repaired(mut run)), Err(e)) => {
                run.fail(e.to_string());
                error!(
                    started_at = %run.started_at.to_rfc3339(),
                    outcome = ?run.outcome,
                    "Repair and rebuild did not finish"
                );
                Err(e)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                warn!(error = %cleanup_err, "Cleanup failed after an earlier error");
                Err(e)
            }
        }
    }

    fn run_steps(&mut self, ctx: &mut RunContext) -> Result<Outcome, RepairError> {
        if let Some(location) = check_origin(ctx)? {
            info!(location = %location, "Not a command-line invocation, redirecting");
            return Ok(Outcome::Redirect { location });
        }

        self.resolve_language(ctx)?;
        self.authenticate(ctx)?;
        self.execute(ctx)
    }

    fn resolve_language(&mut self, ctx: &mut RunContext) -> Result<(), RepairError> {
        if ctx.current_language.is_none() {
            ctx.current_language = ctx.config.default_language().map(str::to_string);
        }

        let language = ctx.current_language.clone().ok_or_else(|| {
            RepairError::collaborator(
                Step::Language,
                anyhow!("no current language and no default_language in config"),
            )
        })?;

        self.host
            .load_app_list_strings(&language)
            .map_err(|e| RepairError::collaborator(Step::Language, e))?;
        self.host
            .load_app_strings(&language)
            .map_err(|e| RepairError::collaborator(Step::Language, e))?;

        debug!(language = %language, "Application strings loaded");
        Ok(())
    }

    fn authenticate(&mut self, ctx: &mut RunContext) -> Result<(), RepairError> {
        let user = self
            .host
            .system_user()
            .map_err(|e| RepairError::collaborator(Step::Authenticate, e))?;

        debug!(user = %user.user_name, "Running as system user");
        ctx.current_user = Some(user);
        Ok(())
    }

    fn execute(&mut self, ctx: &RunContext) -> Result<Outcome, RepairError> {
        let run = MaintenanceRun::start(RepairScope::AllModules);
        let user = ctx.current_user.as_ref().map(|u| u.user_name.as_str());

        info!(user = ?user, "{}", REPAIR_MARKER);
        if let Err(e) = self.host.repair_and_clear_all(run.scope) {
            error!(error = %format!("{:#}", e), "Failed to dispatch repair");
            return Err(RepairError::collaborator(Step::Execute, e));
        }

        Ok(Outcome::Repaired(run))
    }

    /// Host cleanup at most once, then disconnect at most once if the database
    /// manager is still active.
    ///
    /// Scheduled jobs sharing the process may already have run the host's
    /// cleanup, which must not run twice. Calling this again is harmless.
    /// A failed host cleanup still gets the disconnect; the first error wins.
    pub fn cleanup(&mut self) -> Result<(), RepairError> {
        let mut first_error = None;

        if !self.cleaned_up {
            self.cleaned_up = true;
            if let Err(e) = self.host.cleanup() {
                first_error = Some(RepairError::collaborator(Step::Cleanup, e));
            }
        }

        if !self.disconnected && self.host.database_active() {
            self.disconnected = true;
            info!("Database manager still active after cleanup, disconnecting");
            if let Err(e) = self.host.disconnect() {
                let e = RepairError::collaborator(Step::Cleanup, e);
                if first_error.is_some() {
                    warn!(error = %e, "Disconnect failed after a cleanup failure");
                } else {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// `Some(location)` when the run must redirect instead of repairing.
fn check_origin(ctx: &RunContext) -> Result<Option<String>, RepairError> {
    if ctx.invocation.is_cli() {
        return Ok(None);
    }

    match ctx.config.site_url() {
        Some(site_url) => Ok(Some(format!(
            "{}/index.php",
            site_url.trim_end_matches('/')
        ))),
        None => Err(RepairError::MissingSiteUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostConfig;

    fn run_ctx(invocation: InvocationContext, site_url: Option<&str>) -> RunContext {
        let config = HostConfig {
            site_url: site_url.map(str::to_string),
            default_language: Some("en_us".to_string()),
        };
        RunContext::new(config, invocation, None)
    }

    #[test]
    fn test_cli_skips_origin_check() {
        let ctx = run_ctx(InvocationContext::Cli, None);
        assert_eq!(check_origin(&ctx).unwrap(), None);
    }

    #[test]
    fn test_web_redirects_to_index() {
        let ctx = run_ctx(InvocationContext::Web, Some("https://crm.example.com"));
        assert_eq!(
            check_origin(&ctx).unwrap().as_deref(),
            Some("https://crm.example.com/index.php")
        );

        let ctx = run_ctx(InvocationContext::Web, Some("https://crm.example.com/"));
        assert_eq!(
            check_origin(&ctx).unwrap().as_deref(),
            Some("https://crm.example.com/index.php")
        );
    }

    #[test]
    fn test_web_without_site_url_is_misrouted() {
        for site_url in [None, Some("")] {
            let ctx = run_ctx(InvocationContext::Web, site_url);
            assert!(matches!(check_origin(&ctx), Err(RepairError::MissingSiteUrl)));
        }
    }
}
