//! Terminal output components.
//!
//! This module provides:
//! - [`OutputMode`] for verbosity control
//! - [`CorralTheme`] for styled output
//! - [`EventRenderer`], the terminal-facing event sink
//! - [`ProgressSpinner`] for long-running operations

pub mod render;
pub mod spinner;
pub mod theme;

pub use render::EventRenderer;
pub use spinner::ProgressSpinner;
pub use theme::{should_use_colors, CorralTheme};

/// How much output the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Minimal output.
    Quiet,
    /// Check results and summaries.
    Normal,
    /// Also raw log lines from check commands and sessions.
    Verbose,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_modes_are_distinct() {
        assert_ne!(OutputMode::Quiet, OutputMode::Normal);
        assert_ne!(OutputMode::Normal, OutputMode::Verbose);
    }
}
