//! SuiteCRM quick repair and rebuild, as a one-shot command
//!
//! Runs the application's repair-and-rebuild over all modules from a command
//! line context and then lets the process exit:
//! - Host bootstrap and configuration
//! - Web invocations are redirected to the site instead
//! - String tables and system user set up for the repair
//! - Cleanup that tolerates an earlier cleanup by scheduled jobs

pub mod cgi;
pub mod context;
pub mod error;
pub mod host;
pub mod invoker;
pub mod php;
pub mod run;
pub mod settings;

pub use context::{InvocationContext, RunContext};
pub use error::{RepairError, Step};
pub use host::{Host, HostConfig, RepairScope, SystemUser};
pub use invoker::{MaintenanceInvoker, Outcome, REPAIR_MARKER};
pub use php::PhpHost;
pub use run::{MaintenanceRun, RunOutcome};
pub use settings::Settings;
