//! Local machine introspection.
//!
//! System-phase checks are answered from a [`SystemSnapshot`] captured once
//! per diagnostic pass. Classification over the snapshot is pure, and no
//! process is ever spawned for these checks.

use sysinfo::System;

/// What a system-phase check measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemProbe {
    /// Operating system family (`Linux`, `Darwin`, `Windows_NT`).
    #[serde(rename = "os")]
    OsType,
    /// Number of logical CPU cores.
    #[serde(rename = "cpu")]
    CpuCores,
    /// Total physical memory in MiB.
    #[serde(rename = "memory")]
    TotalMemory,
}

/// Point-in-time view of the host machine.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    /// OS family name, in kernel-style spelling.
    pub os_type: String,
    /// Logical CPU core count.
    pub cpu_cores: usize,
    /// Total physical memory in MiB.
    pub total_memory_mib: u64,
}

impl SystemSnapshot {
    /// Capture a snapshot of the current machine.
    pub fn capture() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let cpu_cores = if sys.cpus().is_empty() {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            sys.cpus().len()
        };

        Self {
            os_type: os_type(),
            cpu_cores,
            total_memory_mib: sys.total_memory() / (1024 * 1024),
        }
    }
}

/// The host OS family, spelled the way `uname -s` style consumers expect.
pub fn os_type() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows_NT".to_string(),
        other => other.to_string(),
    }
}
