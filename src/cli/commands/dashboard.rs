//! The `dashboard` command: keep a tunnel open and print its URL.

use crate::cli::args::DashboardArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::Result;
use crate::events::{ChannelSink, Event, EventSink};
use crate::session::DashboardSession;
use crate::ui::{CorralTheme, EventRenderer, OutputMode};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

pub struct DashboardCommand {
    args: DashboardArgs,
}

impl DashboardCommand {
    pub fn new(args: DashboardArgs) -> Self {
        Self { args }
    }
}

impl Command for DashboardCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let theme = CorralTheme::new();
        let mode = match ctx.output_mode {
            OutputMode::Quiet => OutputMode::Quiet,
            _ => OutputMode::Verbose,
        };
        let renderer = EventRenderer::new(mode);

        let (tx, rx) = mpsc::channel();
        let sink = Arc::new(ChannelSink::new(tx));
        let session = DashboardSession::start(&ctx.config.dashboard_command, sink)?;

        #[cfg(unix)]
        let interrupted = {
            let flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
            for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
                signal_hook::flag::register(signal, Arc::clone(&flag))
                    .map_err(crate::error::CorralError::Io)?;
            }
            flag
        };

        let mut url_seen = false;
        loop {
            #[cfg(unix)]
            if interrupted.load(std::sync::atomic::Ordering::Relaxed) {
                println!("{}", theme.format_warning("Stopping dashboard session"));
                session.stop();
                break;
            }

            match rx.recv_timeout(Duration::from_millis(150)) {
                Ok(event) => {
                    if matches!(event, Event::DashboardReady { .. }) {
                        url_seen = true;
                        renderer.emit(event);
                        if self.args.exit_on_ready {
                            session.stop();
                            break;
                        }
                    } else {
                        renderer.emit(event);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if session.is_finished() {
                        session.wait();
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    session.wait();
                    break;
                }
            }
        }

        // Show whatever was still in flight when the session ended.
        for event in rx.try_iter() {
            if matches!(event, Event::DashboardReady { .. }) {
                url_seen = true;
            }
            renderer.emit(event);
        }

        if url_seen {
            Ok(CommandResult::success())
        } else {
            println!(
                "{}",
                theme.format_error("Dashboard session ended without producing a URL")
            );
            Ok(CommandResult::failure(1))
        }
    }
}
