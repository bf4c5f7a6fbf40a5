//! Provisioning script execution.
//!
//! Runs a configuration script once, forwarding every output chunk as a log
//! event. The outcome is a plain boolean: the consumer only needs to know
//! whether the workflow ran to completion, and faults must never escape the
//! workflow boundary.

use crate::events::{Event, EventSink};
use crate::shell::{stream, CommandOptions, StreamEvent};

/// Log category for provisioning output.
pub const PROVISION_CATEGORY: &str = "provision";

/// Run a provisioning command to completion, streaming its output.
///
/// Returns `true` when the process ran to natural completion (its exit code
/// is logged, not judged), `false` when it could not be launched or the
/// stream broke. Every failure path emits at least one log event.
pub fn run_provision(command: &str, sink: &dyn EventSink) -> bool {
    run_provision_with_options(command, &CommandOptions::default(), sink)
}

/// [`run_provision`] with explicit execution options.
pub fn run_provision_with_options(
    command: &str,
    options: &CommandOptions,
    sink: &dyn EventSink,
) -> bool {
    tracing::info!(command, "executing provisioning command");

    let session = match stream(command, options) {
        Ok(session) => session,
        Err(fault) => {
            sink.emit(Event::log(PROVISION_CATEGORY, fault.to_string()));
            return false;
        }
    };

    for event in session.events() {
        let line = match event {
            StreamEvent::Stdout(line) | StreamEvent::Stderr(line) => line,
        };
        sink.emit(Event::log(PROVISION_CATEGORY, line.trim_end()));
    }

    match session.wait() {
        Ok(summary) => {
            let code = summary
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            sink.emit(Event::log(
                PROVISION_CATEGORY,
                format!("provisioning finished (exit: {})", code),
            ));
            true
        }
        Err(fault) => {
            sink.emit(Event::log(PROVISION_CATEGORY, fault.to_string()));
            false
        }
    }
}
