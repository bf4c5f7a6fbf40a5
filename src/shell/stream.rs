//! Streaming execution of long-lived processes.
//!
//! [`stream`] launches a command and exposes its output incrementally as
//! [`StreamEvent`]s on a channel, one reader thread per pipe. Ordering is
//! preserved within each channel; no ordering is guaranteed between the two.
//!
//! The child is placed in its own process group so that an entire helper
//! tree (shell plus whatever it spawned) can be torn down with a single
//! [`Terminator::terminate`] call. Indefinite processes like dashboard
//! tunnels rely on this: nothing may be left running after cancellation.

use crate::error::{CorralError, Result};
use crate::shell::command::CommandOptions;
use crate::shell::platform::{detect_shell, shell_flag};
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// A chunk of output attributed to one channel of a running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Stdout(String),
    Stderr(String),
}

impl StreamEvent {
    /// The chunk text, regardless of channel.
    pub fn text(&self) -> &str {
        match self {
            StreamEvent::Stdout(s) | StreamEvent::Stderr(s) => s,
        }
    }
}

/// How a streamed process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSummary {
    /// Exit code; `None` when the process was killed by a signal, which is
    /// the expected end for deliberately terminated sessions.
    pub code: Option<i32>,
}

impl ExitSummary {
    /// Whether the process exited cleanly with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Handle that can tear down a streamed process from any thread.
///
/// Cheap to clone; safe to call after the process has already exited.
#[derive(Debug, Clone)]
pub struct Terminator {
    pid: u32,
}

impl Terminator {
    /// Terminate the process group rooted at the streamed child.
    pub fn terminate(&self) {
        tracing::debug!(pid = self.pid, "terminating process group");
        #[cfg(unix)]
        {
            // The group id equals the child's pid (set at spawn). Failure
            // means the group is already gone.
            unsafe {
                libc::killpg(self.pid as i32, libc::SIGTERM);
            }
        }
        #[cfg(not(unix))]
        {
            let _ = Command::new("taskkill")
                .args(["/PID", &self.pid.to_string(), "/T", "/F"])
                .output();
        }
    }
}

/// A live streamed process: its event channel and its lifecycle.
#[derive(Debug)]
pub struct StreamSession {
    child: Child,
    command: String,
    events: Receiver<StreamEvent>,
    readers: Vec<JoinHandle<()>>,
}

impl StreamSession {
    /// The channel of output events. Iteration ends when both pipes reach
    /// EOF, i.e. when the process has exited (or been terminated).
    pub fn events(&self) -> &Receiver<StreamEvent> {
        &self.events
    }

    /// A handle for terminating this session from another thread.
    pub fn terminator(&self) -> Terminator {
        Terminator {
            pid: self.child.id(),
        }
    }

    /// Join the reader threads and reap the child.
    ///
    /// Blocks until the process exits; callers that want to end an
    /// indefinite process first use [`StreamSession::terminator`]. Non-zero
    /// and signal exits are reported in the summary, not raised: some
    /// sessions are killed deliberately and their exit status is expected
    /// to be non-clean.
    pub fn wait(mut self) -> Result<ExitSummary> {
        for reader in self.readers.drain(..) {
            let _ = reader.join();
        }
        let status = self.child.wait().map_err(|e| CorralError::Stream {
            message: format!("failed to reap '{}': {}", self.command, e),
        })?;
        tracing::debug!(command = %self.command, code = ?status.code(), "stream ended");
        Ok(ExitSummary {
            code: status.code(),
        })
    }
}

/// Launch a command as a streamed process.
///
/// Fails only if the process cannot be spawned.
pub fn stream(command: &str, options: &CommandOptions) -> Result<StreamSession> {
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

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|e| CorralError::Spawn {
        command: command.to_string(),
        message: e.to_string(),
    })?;

    // The pipes were requested above; take() cannot miss.
    let stdout = child.stdout.take().ok_or_else(|| CorralError::Stream {
        message: "child stdout pipe unavailable".to_string(),
    })?;
    let stderr = child.stderr.take().ok_or_else(|| CorralError::Stream {
        message: "child stderr pipe unavailable".to_string(),
    })?;

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_reader = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx_stdout.send(StreamEvent::Stdout(line)).is_err() {
                break;
            }
        }
    });

    let stderr_reader = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx_stderr.send(StreamEvent::Stderr(line)).is_err() {
                break;
            }
        }
    });

    Ok(StreamSession {
        child,
        command: command.to_string(),
        events: rx,
        readers: vec![stdout_reader, stderr_reader],
    })
}
