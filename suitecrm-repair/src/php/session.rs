//! The running repair session

use anyhow::{Context, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::process::{Child, ExitStatus};
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TERMINATE_GRACE: Duration = Duration::from_secs(10);

/// A spawned PHP process holding the application's database connection.
pub struct Session {
    child: Child,
}

impl Session {
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Wait up to `timeout` for the session to exit on its own.
    ///
    /// `Ok(None)` means it is still running. A timeout too large to add to
    /// the clock waits without a deadline.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<Option<ExitStatus>> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(status) = self
                .child
                .try_wait()
                .context("Failed to poll repair session")?
            {
                return Ok(Some(status));
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
            sleep(POLL_INTERVAL);
        }
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// SIGTERM, then SIGKILL if the session ignores it. Always reaps.
    pub fn terminate(mut self) -> Result<ExitStatus> {
        let pid = self.pid();
        info!(pid, "Terminating repair session");

        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            // ESRCH: exited between the liveness check and now.
            debug!(pid, error = %e, "SIGTERM not delivered");
        }

        if let Some(status) = self.wait_timeout(TERMINATE_GRACE)? {
            return Ok(status);
        }

        warn!(pid, "Repair session ignored SIGTERM, killing");
        self.child.kill().context("Failed to kill repair session")?;
        self.child.wait().context("Failed to reap repair session")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn spawn(script: &str) -> Session {
        Session::new(Command::new("sh").args(["-c", script]).spawn().unwrap())
    }

    #[test]
    fn test_unbounded_timeout_waits_for_exit() {
        let mut session = spawn("sleep 0.2");
        let status = session.wait_timeout(Duration::from_secs(u64::MAX)).unwrap();
        assert!(status.is_some_and(|s| s.success()));

        let mut session = spawn("exit 0");
        assert!(session.wait_timeout(Duration::MAX).unwrap().is_some());
    }

    #[test]
    fn test_zero_timeout_reports_running() {
        let mut session = spawn("sleep 30");
        assert!(session.wait_timeout(Duration::ZERO).unwrap().is_none());
        assert!(session.is_running());

        session.terminate().unwrap();
    }
}
