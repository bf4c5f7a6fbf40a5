//! The `catalog` command: show what a diagnostic pass would evaluate.

use crate::catalog::{CheckDescriptor, Evaluation};
use crate::cli::args::CatalogArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::Result;
use crate::ui::CorralTheme;

pub struct CatalogCommand {
    args: CatalogArgs,
}

impl CatalogCommand {
    pub fn new(args: CatalogArgs) -> Self {
        Self { args }
    }

    fn print_section(&self, theme: &CorralTheme, title: &str, items: &[CheckDescriptor]) {
        println!("{}", theme.format_header(title));
        for item in items {
            let how = match &item.evaluation {
                Some(Evaluation::Probe(_)) => "local introspection".to_string(),
                Some(Evaluation::Command(command)) => command.clone(),
                None => "not evaluated".to_string(),
            };
            println!(
                "  {} {}",
                theme.key.apply_to(&item.name),
                theme.dim.apply_to(how)
            );
        }
        println!();
    }
}

impl Command for CatalogCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult> {
        let catalog = ctx.config.resolve_catalog(&ctx.project_root)?;

        if self.args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&catalog)
                    .map_err(|e| crate::error::CorralError::Other(e.into()))?
            );
        } else {
            let theme = CorralTheme::new();
            self.print_section(&theme, "System", &catalog.system);
            self.print_section(&theme, "Applications", &catalog.apps);
            self.print_section(&theme, "Cluster", &catalog.cluster);
        }

        Ok(CommandResult::success())
    }
}
