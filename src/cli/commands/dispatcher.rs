//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::ui::OutputMode;

/// Everything a command needs to run.
pub struct CommandContext {
    /// Project root directory.
    pub project_root: PathBuf,
    /// Loaded configuration.
    pub config: Config,
    /// Requested verbosity.
    pub output_mode: OutputMode,
}

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, output_mode: OutputMode) -> Result<CommandResult> {
        let config = Config::load(cli.config.as_deref(), &self.project_root)?;
        let ctx = CommandContext {
            project_root: self.project_root.clone(),
            config,
            output_mode,
        };

        match &cli.command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(args.clone()).execute(&ctx)
            }
            Some(Commands::Provision(args)) => {
                super::provision::ProvisionCommand::new(args.clone()).execute(&ctx)
            }
            Some(Commands::Dashboard(args)) => {
                super::dashboard::DashboardCommand::new(args.clone()).execute(&ctx)
            }
            Some(Commands::Catalog(args)) => {
                super::catalog::CatalogCommand::new(args.clone()).execute(&ctx)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(&ctx)
            }
            None => {
                // Default to a diagnostic pass.
                super::check::CheckCommand::new(CheckArgs::default()).execute(&ctx)
            }
        }
    }
}
