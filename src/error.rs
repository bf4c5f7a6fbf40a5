//! Error types for Corral operations.
//!
//! This module defines [`CorralError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CorralError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CorralError::Other`) for unexpected errors
//! - Per-check faults never surface as errors: the diagnostic pipeline
//!   converts them into `NotConfigured` results so one broken check cannot
//!   abort a pass

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Corral operations.
#[derive(Debug, Error)]
pub enum CorralError {
    /// A command could not be launched (missing shell, bad working directory).
    #[error("Failed to spawn '{command}': {message}")]
    Spawn { command: String, message: String },

    /// A command was terminated by a signal before producing an exit code.
    #[error("Command terminated by signal: {command}")]
    Interrupted { command: String },

    /// I/O failure while reading from or reaping a streamed process.
    #[error("Stream failure: {message}")]
    Stream { message: String },

    /// The check catalog is malformed. Not recoverable within a pass.
    #[error("Invalid check catalog: {message}")]
    Catalog { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Corral operations.
pub type Result<T> = std::result::Result<T, CorralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_displays_command_and_message() {
        let err = CorralError::Spawn {
            command: "kubectl get nodes".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("kubectl get nodes"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn interrupted_displays_command() {
        let err = CorralError::Interrupted {
            command: "minikube dashboard --url".into(),
        };
        assert!(err.to_string().contains("minikube dashboard --url"));
    }

    #[test]
    fn stream_displays_message() {
        let err = CorralError::Stream {
            message: "broken pipe".into(),
        };
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn catalog_displays_message() {
        let err = CorralError::Catalog {
            message: "duplicate check id 'cpu'".into(),
        };
        assert!(err.to_string().contains("duplicate check id 'cpu'"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = CorralError::ConfigNotFound {
            path: PathBuf::from("/foo/corral.yml"),
        };
        assert!(err.to_string().contains("/foo/corral.yml"));
    }

    #[test]
    fn config_parse_displays_path_and_message() {
        let err = CorralError::ConfigParse {
            path: PathBuf::from("/corral.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/corral.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CorralError = io_err.into();
        assert!(matches!(err, CorralError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CorralError::Catalog {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
