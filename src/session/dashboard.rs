//! Dashboard tunnel session.
//!
//! Runs the tunnel command as an indefinite streamed process. Every chunk is
//! trimmed and forwarded as a log event; the first stdout chunk that looks
//! like a URL additionally produces a ready event so the consumer can open
//! it. Stderr chunks become error events unless they start with `*`, which
//! the underlying tool uses for decorative progress lines.

use crate::error::Result;
use crate::events::{Event, EventSink};
use crate::shell::{stream, CommandOptions, ExitSummary, StreamEvent, Terminator};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::thread::{self, JoinHandle};

/// Log category for dashboard output.
pub const DASHBOARD_CATEGORY: &str = "dashboard";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("url pattern is valid"));

/// Whether a trimmed output chunk is a well-formed http(s) URL.
pub fn looks_like_url(text: &str) -> bool {
    URL_PATTERN.is_match(text.trim())
}

/// A live dashboard tunnel.
///
/// Owns the forwarding thread; the underlying process belongs to that
/// thread and is torn down through the [`Terminator`] on [`stop`].
///
/// [`stop`]: DashboardSession::stop
pub struct DashboardSession {
    forwarder: JoinHandle<Option<ExitSummary>>,
    terminator: Terminator,
}

impl DashboardSession {
    /// Launch the tunnel command and start forwarding its output.
    pub fn start(command: &str, sink: Arc<dyn EventSink>) -> Result<Self> {
        let session = stream(command, &CommandOptions::default())?;
        let terminator = session.terminator();
        tracing::info!(command, "dashboard session started");

        let forwarder = thread::spawn(move || {
            let mut announced = false;
            for event in session.events() {
                match event {
                    StreamEvent::Stdout(chunk) => {
                        let trimmed = chunk.trim().to_string();
                        sink.emit(Event::log(DASHBOARD_CATEGORY, trimmed.clone()));
                        if !announced && looks_like_url(&trimmed) {
                            announced = true;
                            sink.emit(Event::DashboardReady { url: trimmed });
                        }
                    }
                    StreamEvent::Stderr(chunk) => {
                        let trimmed = chunk.trim().to_string();
                        sink.emit(Event::log(DASHBOARD_CATEGORY, trimmed.clone()));
                        if !trimmed.starts_with('*') {
                            sink.emit(Event::DashboardError { message: trimmed });
                        }
                    }
                }
            }
            match session.wait() {
                Ok(summary) => Some(summary),
                Err(fault) => {
                    sink.emit(Event::log(DASHBOARD_CATEGORY, fault.to_string()));
                    None
                }
            }
        });

        Ok(Self {
            forwarder,
            terminator,
        })
    }

    /// Whether the tunnel has exited and all output has been forwarded.
    pub fn is_finished(&self) -> bool {
        self.forwarder.is_finished()
    }

    /// Terminate the tunnel and wait for the forwarder to drain.
    ///
    /// Never panics or propagates: a session the consumer closes is an
    /// expected end, whatever state the process was in.
    pub fn stop(self) -> Option<ExitSummary> {
        self.terminator.terminate();
        self.join()
    }

    /// Block until the tunnel exits on its own.
    pub fn wait(self) -> Option<ExitSummary> {
        self.join()
    }

    fn join(self) -> Option<ExitSummary> {
        self.forwarder.join().ok().flatten()
    }
}
