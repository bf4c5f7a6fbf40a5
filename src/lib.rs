//! Corral - Local dev-cluster readiness diagnostics and provisioning automation.
//!
//! Corral diagnoses whether a workstation is correctly provisioned for a
//! local containerized development cluster, and drives the configuration
//! workflows that make it so. The engine runs external commands either to
//! completion or as continuously streamed processes, classifies their output
//! into a uniform readiness model, and emits structured events to an
//! injected sink; the CLI is just one consumer of that stream.
//!
//! # Modules
//!
//! - [`assets`] - Provisioning assets embedded at compile time
//! - [`catalog`] - Check catalog: descriptors, phases, loading
//! - [`check`] - Check outcome types
//! - [`classify`] - Pure status classification per check category
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading
//! - [`error`] - Error types and result aliases
//! - [`events`] - Outbound events and the injected sink
//! - [`pipeline`] - The three-phase diagnostic pipeline
//! - [`probe`] - Local machine introspection
//! - [`session`] - Interactive streaming workflows
//! - [`shell`] - Shell command execution, blocking and streamed
//! - [`ui`] - Terminal output components
//!
//! # Example
//!
//! ```
//! use corral::catalog::CheckCatalog;
//! use corral::classify::SystemRequirements;
//! use corral::events::CollectingSink;
//! use corral::pipeline::{DiagnosticPipeline, ShellRunner};
//! use corral::probe::SystemSnapshot;
//!
//! let catalog = CheckCatalog::builtin();
//! let runner = ShellRunner::new();
//! let sink = CollectingSink::new();
//! let pipeline = DiagnosticPipeline::new(
//!     &catalog,
//!     SystemSnapshot::capture(),
//!     SystemRequirements::default(),
//!     &runner,
//!     &sink,
//! );
//! // `run` walks system, applications, and cluster checks in order.
//! assert!(sink.events().is_empty());
//! drop(pipeline);
//! ```

pub mod assets;
pub mod catalog;
pub mod check;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod probe;
pub mod session;
pub mod shell;
pub mod ui;

pub use error::{CorralError, Result};
