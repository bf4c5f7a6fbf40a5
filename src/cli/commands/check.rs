//! The `check` command: one full diagnostic pass.

use crate::check::ReadinessStatus;
use crate::cli::args::CheckArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::Result;
use crate::events::CollectingSink;
use crate::pipeline::{DiagnosticPipeline, DiagnosticReport, ShellRunner};
use crate::probe::SystemSnapshot;
use crate::ui::{CorralTheme, EventRenderer, OutputMode, ProgressSpinner};

pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    fn print_summary(&self, report: &DiagnosticReport) {
        let theme = CorralTheme::new();
        let configured = report.count(ReadinessStatus::Configured);
        let missing = report.count(ReadinessStatus::NotConfigured);
        let unknown = report.count(ReadinessStatus::Unknown);

        let mut summary = format!("{} configured, {} not configured", configured, missing);
        if unknown > 0 {
            summary.push_str(&format!(", {} unchecked", unknown));
        }

        println!();
        if report.ready() {
            println!("{}", theme.format_success(&format!("Ready: {}", summary)));
        } else {
            println!("{}", theme.format_error(&format!("Not ready: {}", summary)));
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let catalog = ctx.config.resolve_catalog(&ctx.project_root)?;
        let snapshot = SystemSnapshot::capture();
        let runner = ShellRunner::new();

        let report = if self.args.json {
            // Events are beside the point here; only the report is printed.
            let sink = CollectingSink::new();
            let mut pipeline = DiagnosticPipeline::new(
                &catalog,
                snapshot,
                ctx.config.requirements.clone(),
                &runner,
                &sink,
            );
            let report = pipeline.run()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .map_err(|e| crate::error::CorralError::Other(e.into()))?
            );
            report
        } else {
            let spinner = if ctx.output_mode == OutputMode::Quiet {
                ProgressSpinner::hidden()
            } else {
                ProgressSpinner::new("Running diagnostics...")
            };
            let sink = EventRenderer::with_progress(ctx.output_mode, spinner.bar_clone());
            let mut pipeline = DiagnosticPipeline::new(
                &catalog,
                snapshot,
                ctx.config.requirements.clone(),
                &runner,
                &sink,
            );
            let report = match pipeline.run() {
                Ok(report) => report,
                Err(fault) => {
                    spinner.finish_error("Diagnostic pass aborted");
                    return Err(fault);
                }
            };
            spinner.finish_and_clear();
            if ctx.output_mode != OutputMode::Quiet {
                self.print_summary(&report);
            }
            report
        };

        if report.ready() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
