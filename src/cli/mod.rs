//! Command-line interface for Corral.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations and the dispatcher

pub mod args;
pub mod commands;

pub use args::{
    CatalogArgs, CheckArgs, Cli, Commands, CompletionsArgs, DashboardArgs, ProvisionArgs,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
