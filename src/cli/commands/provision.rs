//! The `provision` command: run the cluster configuration script.

use crate::cli::args::ProvisionArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::Result;
use crate::session::run_provision;
use crate::shell::is_ci;
use crate::ui::{CorralTheme, EventRenderer, OutputMode};
use dialoguer::Confirm;

pub struct ProvisionCommand {
    args: ProvisionArgs,
}

impl ProvisionCommand {
    pub fn new(args: ProvisionArgs) -> Self {
        Self { args }
    }

    fn confirmed(&self) -> Result<bool> {
        if self.args.yes || is_ci() || !console::Term::stdout().is_term() {
            return Ok(true);
        }
        let confirmed = Confirm::new()
            .with_prompt("Run the cluster provisioning script?")
            .default(false)
            .interact()
            .map_err(|e| crate::error::CorralError::Other(e.into()))?;
        Ok(confirmed)
    }
}

impl Command for ProvisionCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let theme = CorralTheme::new();
        let command = ctx.config.provision_command(self.args.script.as_deref())?;

        if !self.confirmed()? {
            println!("{}", theme.format_warning("Provisioning cancelled"));
            return Ok(CommandResult::failure(1));
        }

        // Script progress is the whole point here; show it unless silenced.
        let mode = match ctx.output_mode {
            OutputMode::Quiet => OutputMode::Quiet,
            _ => OutputMode::Verbose,
        };
        let renderer = EventRenderer::new(mode);

        if run_provision(&command, &renderer) {
            println!("{}", theme.format_success("Provisioning complete"));
            Ok(CommandResult::success())
        } else {
            println!("{}", theme.format_error("Provisioning failed"));
            Ok(CommandResult::failure(1))
        }
    }
}
