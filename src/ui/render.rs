//! Terminal event rendering.
//!
//! [`EventRenderer`] is the CLI's [`EventSink`]: it turns engine events into
//! styled terminal lines as they arrive. When a spinner is active, lines go
//! through its progress bar so they print above it.

use crate::check::{CheckResult, ReadinessStatus};
use crate::events::{Event, EventSink};
use crate::ui::theme::CorralTheme;
use crate::ui::OutputMode;
use indicatif::ProgressBar;

/// Renders engine events to the terminal.
pub struct EventRenderer {
    theme: CorralTheme,
    mode: OutputMode,
    bar: Option<ProgressBar>,
}

impl EventRenderer {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            theme: CorralTheme::new(),
            mode,
            bar: None,
        }
    }

    /// Route printed lines through a live progress bar.
    pub fn with_progress(mode: OutputMode, bar: ProgressBar) -> Self {
        Self {
            theme: CorralTheme::new(),
            mode,
            bar: Some(bar),
        }
    }

    fn println(&self, line: String) {
        match &self.bar {
            // Suspend keeps the spinner from clobbering the line; unlike
            // ProgressBar::println it still prints when no terminal is attached.
            Some(bar) => bar.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }

    fn render_result(&self, result: &CheckResult) {
        let glyph = match result.status {
            ReadinessStatus::Configured => self
                .theme
                .success
                .apply_to(result.status.display_char())
                .to_string(),
            ReadinessStatus::NotConfigured => self
                .theme
                .error
                .apply_to(result.status.display_char())
                .to_string(),
            ReadinessStatus::Unknown => self
                .theme
                .dim
                .apply_to(result.status.display_char())
                .to_string(),
        };
        let name = self.theme.key.apply_to(&result.descriptor.name);
        let detail = self.theme.dim.apply_to(&result.detail);
        self.println(format!("{} {}  {}", glyph, name, detail));
    }
}

impl EventSink for EventRenderer {
    fn emit(&self, event: Event) {
        if self.mode == OutputMode::Quiet {
            // Quiet mode still surfaces hard errors.
            if let Event::DashboardError { message } = &event {
                eprintln!("{}", self.theme.format_error(message));
            }
            return;
        }

        match event {
            Event::LogLine { category, message } => {
                if self.mode == OutputMode::Verbose && !message.is_empty() {
                    let prefix = self.theme.dim.apply_to(format!("{} │", category));
                    self.println(format!("  {} {}", prefix, self.theme.dim.apply_to(message)));
                }
            }
            Event::SystemCheck(result)
            | Event::AppCheck(result)
            | Event::ClusterCheck(result) => self.render_result(&result),
            Event::DashboardReady { url } => {
                self.println(
                    self.theme
                        .format_success(&format!("Dashboard ready: {}", url)),
                );
            }
            Event::DashboardError { message } => {
                self.println(self.theme.format_error(&message));
            }
        }
    }
}
