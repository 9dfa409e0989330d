//! Record of one maintenance run

use crate::host::RepairScope;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Dispatched, cleanup not finished yet.
    Pending,
    Completed,
    Failed(String),
}

/// One invocation of the repair. Lives for the rest of the process; never persisted.
#[derive(Debug, Clone)]
pub struct MaintenanceRun {
    pub scope: RepairScope,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub outcome: RunOutcome,
}

impl MaintenanceRun {
    pub fn start(scope: RepairScope) -> Self {
        Self {
            scope,
            started_at: Utc::now(),
            completed_at: None,
            outcome: RunOutcome::Pending,
        }
    }

    pub fn complete(&mut self) {
        self.finish(RunOutcome::Completed);
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.finish(RunOutcome::Failed(reason.into()));
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = outcome;
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut run = MaintenanceRun::start(RepairScope::AllModules);
        assert_eq!(run.outcome, RunOutcome::Pending);
        assert!(run.completed_at.is_none());

        run.complete();
        assert!(run.is_completed());
        let completed_at = run.completed_at.unwrap();
        assert!(completed_at >= run.started_at);
    }

    #[test]
    fn test_failure_keeps_reason() {
        let mut run = MaintenanceRun::start(RepairScope::AllModules);
        run.fail("php not found");
        assert_eq!(run.outcome, RunOutcome::Failed("php not found".to_string()));
        assert!(run.completed_at.is_some());
    }
}
