//! SuiteCRM repair entrypoint
//!
//! Runs Quick Repair and Rebuild once and exits. Meant for container exec and
//! cron. When a web server runs it as CGI, it redirects to the site instead.
//!
//! Exit codes: 0 done or redirected, 1 bootstrap failure, 2 web request without
//! a site URL, 3 application failure during the run.

use common::{init_logging, ProcessEnv};
use suitecrm_repair::{
    cgi, InvocationContext, MaintenanceInvoker, Outcome, PhpHost, RepairError, Settings,
};
use tracing::{error, info, warn};

fn run(invocation: InvocationContext) -> Result<Outcome, RepairError> {
    let settings = Settings::from_source(&ProcessEnv).map_err(RepairError::bootstrap)?;
    let host = PhpHost::new(&settings);
    MaintenanceInvoker::new(host, invocation, settings.current_language.clone()).run()
}

fn respond(response: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cgi::write_response(&mut stdout, response) {
        warn!(error = %e, "Failed to write CGI response");
    }
}

fn main() {
    let _guard = init_logging("repair");

    let invocation = InvocationContext::detect(&ProcessEnv);

    let code = match run(invocation) {
        Ok(Outcome::Redirect { location }) => {
            respond(&cgi::redirect(&location));
            0
        }
        Ok(Outcome::Repaired(run)) => {
            info!(scope = ?run.scope, outcome = ?run.outcome, "Done");
            0
        }
        Err(e) => {
            error!(error = %e, code = e.exit_code(), "Repair failed");
            if invocation == InvocationContext::Web {
                // Internal details stay in the log.
                let message = match e {
                    RepairError::MissingSiteUrl => e.to_string(),
                    _ => "Repair failed".to_string(),
                };
                respond(&cgi::error(&message));
            }
            e.exit_code()
        }
    };

    // Nothing of the application may run after cleanup.
    std::process::exit(code);
}
