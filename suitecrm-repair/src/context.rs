//! Run context
//!
//! Everything the steps share travels in [`RunContext`], built once after
//! bootstrap and passed along explicitly.

use crate::host::{HostConfig, SystemUser};
use common::EnvSource;

/// CGI meta-variables (RFC 3875) that mark a web request.
const CGI_VARS: &[&str] = &["GATEWAY_INTERFACE", "REQUEST_METHOD"];

/// How the process was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationContext {
    /// Command line, cron, container exec.
    Cli,
    /// A web server ran us as a CGI handler.
    Web,
}

impl InvocationContext {
    pub fn detect(env: &impl EnvSource) -> Self {
        if CGI_VARS.iter().any(|var| env.var_non_empty(var).is_some()) {
            Self::Web
        } else {
            Self::Cli
        }
    }

    pub fn is_cli(self) -> bool {
        self == Self::Cli
    }
}

/// State shared by the steps of one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: HostConfig,
    pub invocation: InvocationContext,
    pub current_language: Option<String>,
    pub current_user: Option<SystemUser>,
}

impl RunContext {
    pub fn new(
        config: HostConfig,
        invocation: InvocationContext,
        current_language: Option<String>,
    ) -> Self {
        Self {
            config,
            invocation,
            current_language: current_language.filter(|l| !l.is_empty()),
            current_user: None,
        }
    }
}
