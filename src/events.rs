//! Outbound events and the sink they flow through.
//!
//! The engine never talks to a terminal or a window directly: everything it
//! has to say is an [`Event`] written to an injected [`EventSink`]. Tests
//! capture events with [`CollectingSink`]; the CLI renders them as they
//! arrive; [`ChannelSink`] bridges to a consumer on another thread.

use crate::check::CheckResult;
use std::sync::mpsc::Sender;
use std::sync::Mutex;

/// An event produced by the engine for its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A raw line of diagnostic context, attributed to a named category.
    LogLine { category: String, message: String },
    /// A resolved system-phase check.
    SystemCheck(CheckResult),
    /// A resolved application-phase check.
    AppCheck(CheckResult),
    /// A resolved cluster-phase check.
    ClusterCheck(CheckResult),
    /// The dashboard tunnel has produced its URL.
    DashboardReady { url: String },
    /// The dashboard tunnel reported a real error.
    DashboardError { message: String },
}

impl Event {
    /// Build a log line event.
    pub fn log(category: impl Into<String>, message: impl Into<String>) -> Self {
        Event::LogLine {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Where engine events go. Injected, never a global.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Sink that forwards events over an mpsc channel.
///
/// A disconnected receiver is not an error: a consumer that goes away
/// simply stops listening.
pub struct ChannelSink {
    sender: Sender<Event>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}

/// Sink that stores every event in order. Intended for tests.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Event>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: Event) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}
