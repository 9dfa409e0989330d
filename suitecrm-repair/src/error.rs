//! Error taxonomy of a maintenance run
//!
//! Nothing is retried or recovered locally. Every variant ends the run, and the
//! binary maps it to an exit code in one place.

use std::fmt;

/// Step of the run that a collaborator failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Language,
    Authenticate,
    Execute,
    Cleanup,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Language => "language resolution",
            Self::Authenticate => "system user resolution",
            Self::Execute => "repair dispatch",
            Self::Cleanup => "cleanup",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// The host application context could not be established.
    #[error("Bootstrap failed: {error:#}")]
    Bootstrap { error: anyhow::Error },

    /// Reached from a web request and there is nowhere to redirect to.
    #[error("Didn't find site url in your sugarcrm config file")]
    MissingSiteUrl,

    /// A host collaborator failed after bootstrap.
    #[error("{step} failed: {error:#}")]
    Collaborator { step: Step, error: anyhow::Error },
}

impl RepairError {
    pub fn bootstrap(error: impl Into<anyhow::Error>) -> Self {
        Self::Bootstrap {
            error: error.into(),
        }
    }

    pub fn collaborator(step: Step, error: impl Into<anyhow::Error>) -> Self {
        Self::Collaborator {
            step,
            error: error.into(),
        }
    }

    /// Process exit code for this failure.
    ///
    /// 0 is reserved for a completed run or a redirect.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bootstrap { .. } => 1,
            Self::MissingSiteUrl => 2,
            Self::Collaborator { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RepairError::bootstrap(anyhow!("no entry point")).exit_code(), 1);
        assert_eq!(RepairError::MissingSiteUrl.exit_code(), 2);
        assert_eq!(
            RepairError::collaborator(Step::Execute, anyhow!("spawn failed")).exit_code(),
            3
        );
    }

    #[test]
    fn test_messages_include_context_chain() {
        let error = anyhow!("permission denied").context("Failed to spawn php");
        let err = RepairError::collaborator(Step::Execute, error);
        assert_eq!(
            err.to_string(),
            "repair dispatch failed: Failed to spawn php: permission denied"
        );
    }
}
