//! Check outcome types.

use crate::catalog::CheckDescriptor;
use serde::Serialize;

/// Tri-state readiness classification of a check.
///
/// `Unknown` is the state of an item before (or without) evaluation; each
/// item resolves to a terminal value in a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Unknown,
    Configured,
    NotConfigured,
}

impl ReadinessStatus {
    /// Whether the item passed its check.
    pub fn is_configured(&self) -> bool {
        matches!(self, ReadinessStatus::Configured)
    }

    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            ReadinessStatus::Unknown => '○',
            ReadinessStatus::Configured => '✓',
            ReadinessStatus::NotConfigured => '✗',
        }
    }
}

impl std::fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReadinessStatus::Unknown => "unknown",
            ReadinessStatus::Configured => "configured",
            ReadinessStatus::NotConfigured => "not configured",
        };
        write!(f, "{}", s)
    }
}

/// The outcome of evaluating one check: the descriptor, a human-readable
/// detail string, and the resolved status. Immutable once produced; a fresh
/// result is built on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub descriptor: CheckDescriptor,
    pub detail: String,
    pub status: ReadinessStatus,
}

impl CheckResult {
    /// Build a resolved result.
    pub fn new(
        descriptor: CheckDescriptor,
        status: ReadinessStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            descriptor,
            detail: detail.into(),
            status,
        }
    }

    /// A pass-through result for an item with nothing to evaluate.
    pub fn unevaluated(descriptor: CheckDescriptor) -> Self {
        Self {
            descriptor,
            detail: String::new(),
            status: ReadinessStatus::Unknown,
        }
    }
}
