//! Configuration loading.
//!
//! Corral works with zero configuration: the built-in catalog, default
//! thresholds, and the embedded provisioning script. A `corral.yml` at the
//! project root (or a `--config` path) overrides any of it.

use crate::assets;
use crate::catalog::CheckCatalog;
use crate::classify::SystemRequirements;
use crate::error::{CorralError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the project root.
pub const CONFIG_FILE: &str = "corral.yml";

/// Resolved tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum machine requirements for the system phase.
    pub requirements: SystemRequirements,

    /// Path to a provisioning script; the embedded default when absent.
    pub provision_script: Option<PathBuf>,

    /// Command that opens the dashboard tunnel and prints its URL.
    pub dashboard_command: String,

    /// Path to a YAML check catalog; the built-in catalog when absent.
    pub catalog_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            requirements: SystemRequirements::default(),
            provision_script: None,
            dashboard_command: "minikube dashboard --url".to_string(),
            catalog_file: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist; otherwise `corral.yml` in the project
    /// root is used when present, and defaults apply when it is not.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CorralError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let candidate = project_root.join(CONFIG_FILE);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| CorralError::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    /// Resolve the check catalog: file override or built-in.
    pub fn resolve_catalog(&self, project_root: &Path) -> Result<CheckCatalog> {
        match &self.catalog_file {
            Some(file) => {
                let path = if file.is_absolute() {
                    file.clone()
                } else {
                    project_root.join(file)
                };
                CheckCatalog::load_file(&path)
            }
            None => Ok(CheckCatalog::builtin()),
        }
    }

    /// Resolve the provisioning command line.
    ///
    /// Precedence: CLI override, configured script, embedded default. The
    /// script runs through `sh` so it does not need an executable bit.
    pub fn provision_command(&self, override_script: Option<&Path>) -> Result<String> {
        let script = match override_script {
            Some(path) => path.to_path_buf(),
            None => match &self.provision_script {
                Some(path) => path.clone(),
                None => assets::materialize_provision_script()?,
            },
        };
        Ok(format!("sh {}", script.display()))
    }
}
