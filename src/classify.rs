//! Status classification.
//!
//! Pure functions mapping raw check output to a [`ReadinessStatus`] and a
//! detail string, one per check category. Keeping these free of I/O lets the
//! pipeline stay agnostic to what any individual check means.

use crate::check::ReadinessStatus;
use crate::probe::{SystemProbe, SystemSnapshot};
use crate::shell::ExecOutput;
use serde::{Deserialize, Serialize};

/// Minimum machine requirements for the system phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemRequirements {
    /// OS families the cluster tooling supports.
    pub supported_oses: Vec<String>,
    /// Minimum logical CPU core count.
    pub min_cpu_cores: usize,
    /// Minimum total memory in MiB.
    pub min_memory_mib: u64,
}

impl Default for SystemRequirements {
    fn default() -> Self {
        Self {
            supported_oses: vec!["Linux".to_string()],
            min_cpu_cores: 4,
            min_memory_mib: 8192,
        }
    }
}

/// Classify a system probe against the captured snapshot.
pub fn classify_probe(
    probe: SystemProbe,
    snapshot: &SystemSnapshot,
    requirements: &SystemRequirements,
) -> (ReadinessStatus, String) {
    match probe {
        SystemProbe::OsType => {
            let supported = requirements
                .supported_oses
                .iter()
                .any(|os| os == &snapshot.os_type);
            (readiness(supported), snapshot.os_type.clone())
        }
        SystemProbe::CpuCores => {
            let detail = format!("{} core(s)", snapshot.cpu_cores);
            (
                readiness(snapshot.cpu_cores >= requirements.min_cpu_cores),
                detail,
            )
        }
        SystemProbe::TotalMemory => {
            // Value is MiB; the MB label is what cluster tooling users expect.
            let detail = format!("{} MB", snapshot.total_memory_mib);
            (
                readiness(snapshot.total_memory_mib >= requirements.min_memory_mib),
                detail,
            )
        }
    }
}

/// Classify a companion-application check.
///
/// Any stderr output means the tool is not usable, and the stderr text is
/// the detail. Exit codes are deliberately not consulted.
pub fn classify_app(output: &ExecOutput) -> (ReadinessStatus, String) {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        (ReadinessStatus::NotConfigured, stderr.to_string())
    } else {
        (
            ReadinessStatus::Configured,
            output.stdout.trim().to_string(),
        )
    }
}

/// Classify a cluster check whose stdout should carry a ready-instance count.
///
/// Non-numeric stdout degrades to `NotConfigured` with the raw text kept in
/// the detail; it must never abort the pass.
pub fn classify_cluster(output: &ExecOutput) -> (ReadinessStatus, String) {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return (ReadinessStatus::NotConfigured, stderr.to_string());
    }

    let stdout = output.stdout.trim();
    let shown = if stdout.is_empty() { "0" } else { stdout };
    let detail = format!("Ready Instances: {}", shown);
    let ready = stdout
        .parse::<i64>()
        .map(|count| count >= 1)
        .unwrap_or(false);
    (readiness(ready), detail)
}

fn readiness(configured: bool) -> ReadinessStatus {
    if configured {
        ReadinessStatus::Configured
    } else {
        ReadinessStatus::NotConfigured
    }
}
