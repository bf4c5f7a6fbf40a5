//! One-shot shell command execution.
//!
//! [`execute`] runs a command to completion and returns the captured output
//! of both channels. A non-zero exit code is not an error here: check
//! commands routinely exit non-zero, and what that means is a judgment that
//! belongs to the status classifier, not to the runner.

use crate::error::{CorralError, Result};
use crate::shell::platform::{detect_shell, shell_flag};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Captured output of a completed command.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Exit code (always present here; signal deaths surface as errors).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,
}

impl ExecOutput {
    /// Build an output value from raw channel text (used by tests and fakes).
    pub fn from_text(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(0),
            duration: Duration::ZERO,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,
}

/// Execute a shell command to completion, capturing both output channels.
///
/// Errors only on launch failure, signal termination, or I/O failure.
/// Command-level failures surface through `stderr` content and the exit
/// code, which callers interpret.
pub fn execute(command: &str, options: &CommandOptions) -> Result<ExecOutput> {
    let start = Instant::now();

    let mut cmd = Command::new(detect_shell());
    cmd.arg(shell_flag());
    cmd.arg(command);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    let output = cmd.output().map_err(|e| CorralError::Spawn {
        command: command.to_string(),
        message: e.to_string(),
    })?;

    if output.status.code().is_none() {
        return Err(CorralError::Interrupted {
            command: command.to_string(),
        });
    }

    tracing::debug!(
        command,
        code = ?output.status.code(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "command completed"
    );

    Ok(ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
        duration: start.elapsed(),
    })
}
