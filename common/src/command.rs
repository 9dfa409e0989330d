//! Command execution utilities
//!
//! Provides consistent subprocess execution with proper error handling and logging.
//! Scripts are handed to interpreters on stdin so that nothing (credentials
//! included) ends up in the process list.

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, instrument};

/// Result of a command execution.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Exit code as text, `signal` when the process was killed.
    pub fn code_text(&self) -> String {
        self.code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string())
    }
}

/// Run a command and return its output.
///
/// This is a low-level function that returns both stdout and stderr.
/// Use `run_checked` if you want to treat non-zero exit as an error.
#[instrument(skip_all, fields(cmd = %cmd))]
pub fn run(cmd: &str, args: &[&str]) -> Result<CommandOutput> {
    debug!(args = ?args, "Running command");

    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .context(format!("Failed to execute {}", cmd))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Run a command and return stdout if successful, error otherwise.
///
/// # Example
/// ```ignore
/// let version = run_checked("php", &["--version"])?;
/// ```
pub fn run_checked(cmd: &str, args: &[&str]) -> Result<String> {
    let output = run(cmd, args)?;
    checked(cmd, output)
}

/// Run an interpreter with `script` piped to stdin and wait for it.
#[instrument(skip_all, fields(cmd = %cmd))]
pub fn run_script(cmd: &str, args: &[&str], dir: &Path, script: &str) -> Result<CommandOutput> {
    debug!(args = ?args, dir = %dir.display(), bytes = script.len(), "Running script");

    let mut child = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context(format!("Failed to spawn {}", cmd))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(script.as_bytes())?;
    }

    let output = child
        .wait_with_output()
        .context(format!("Failed to wait for {}", cmd))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Like `run_script`, but a non-zero exit is an error.
pub fn run_script_checked(cmd: &str, args: &[&str], dir: &Path, script: &str) -> Result<String> {
    let output = run_script(cmd, args, dir, script)?;
    checked(cmd, output)
}

/// Spawn an interpreter with `script` on stdin without waiting for it.
///
/// stdout and stderr are inherited so the child's own logging lands in the
/// container log. The caller owns the returned child and must reap it.
#[instrument(skip_all, fields(cmd = %cmd))]
pub fn spawn_script(cmd: &str, args: &[&str], dir: &Path, script: &str) -> Result<Child> {
    debug!(args = ?args, dir = %dir.display(), bytes = script.len(), "Spawning script");

    let mut child = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .context(format!("Failed to spawn {}", cmd))?;

    // Dropping stdin closes it so the interpreter sees EOF and starts executing.
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(script.as_bytes())
            .context(format!("Failed to write script to {}", cmd))?;
    }

    Ok(child)
}

fn checked(cmd: &str, output: CommandOutput) -> Result<String> {
    if output.success {
        Ok(output.stdout)
    } else {
        Err(anyhow!(
            "{} failed (exit {}): {}",
            cmd,
            output.code_text(),
            output.stderr
        ))
    }
}
