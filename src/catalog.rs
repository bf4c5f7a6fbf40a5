//! The check catalog: what a diagnostic pass evaluates.
//!
//! A catalog is three ordered lists of [`CheckDescriptor`]s, one per phase.
//! It is static configuration: read-only for the engine's lifetime, either
//! the built-in minikube-style default or loaded from a YAML file.
//!
//! How an item is evaluated is a tagged [`Evaluation`] variant resolved at
//! load time, so the pipeline never dispatches on id strings.

use crate::error::{CorralError, Result};
use crate::probe::SystemProbe;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// One of the three ordered diagnostic phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    System,
    Apps,
    Cluster,
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckCategory::System => "system",
            CheckCategory::Apps => "apps",
            CheckCategory::Cluster => "cluster",
        };
        write!(f, "{}", s)
    }
}

/// How a check is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// Answered by local introspection; never spawns a process.
    Probe(SystemProbe),
    /// Answered by running a shell command and classifying its output.
    Command(String),
}

/// One named diagnostic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDescriptor {
    /// Stable identifier, unique within the catalog.
    pub id: String,
    /// Human-readable name, used as the log category for the item's output.
    pub name: String,
    /// How to evaluate the item; `None` means the item is reported as-is.
    pub evaluation: Option<Evaluation>,
}

impl CheckDescriptor {
    /// A probe-backed descriptor.
    pub fn probe(id: &str, name: &str, probe: SystemProbe) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            evaluation: Some(Evaluation::Probe(probe)),
        }
    }

    /// A command-backed descriptor.
    pub fn command(id: &str, name: &str, command: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            evaluation: Some(Evaluation::Command(command.to_string())),
        }
    }
}

/// The full set of checks for one diagnostic pass.
#[derive(Debug, Clone, Serialize)]
pub struct CheckCatalog {
    pub system: Vec<CheckDescriptor>,
    pub apps: Vec<CheckDescriptor>,
    pub cluster: Vec<CheckDescriptor>,
}

impl CheckCatalog {
    /// The built-in catalog for a minikube-based development cluster.
    pub fn builtin() -> Self {
        Self {
            system: vec![
                CheckDescriptor::probe("os", "Operating System", SystemProbe::OsType),
                CheckDescriptor::probe("cpu", "CPU Cores", SystemProbe::CpuCores),
                CheckDescriptor::probe("memory", "Memory", SystemProbe::TotalMemory),
            ],
            apps: vec![
                CheckDescriptor::command("docker", "Docker", "docker --version"),
                CheckDescriptor::command("kubectl", "kubectl", "kubectl version --client"),
                CheckDescriptor::command("helm", "Helm", "helm version --short"),
                CheckDescriptor::command("minikube", "Minikube", "minikube version --short"),
            ],
            cluster: vec![
                CheckDescriptor::command(
                    "nodes",
                    "Cluster Nodes",
                    "kubectl get nodes --no-headers 2>/dev/null | grep -cw Ready",
                ),
                CheckDescriptor::command(
                    "ingress",
                    "Ingress Controller",
                    "kubectl get pods -n ingress-nginx --field-selector=status.phase=Running \
                     --no-headers 2>/dev/null | wc -l",
                ),
            ],
        }
    }

    /// Load a catalog from a YAML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| CorralError::ConfigNotFound {
            path: path.to_path_buf(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            CorralError::Catalog { message } => CorralError::ConfigParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_yaml::from_str(content).map_err(|e| CorralError::Catalog {
            message: e.to_string(),
        })?;
        let catalog = Self {
            system: convert(raw.system, CheckCategory::System)?,
            apps: convert(raw.apps, CheckCategory::Apps)?,
            cluster: convert(raw.cluster, CheckCategory::Cluster)?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate catalog-wide invariants.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (category, items) in [
            (CheckCategory::System, &self.system),
            (CheckCategory::Apps, &self.apps),
            (CheckCategory::Cluster, &self.cluster),
        ] {
            self.validate_phase(category)?;
            for item in items {
                if !seen.insert(item.id.clone()) {
                    return Err(CorralError::Catalog {
                        message: format!("duplicate check id '{}'", item.id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate the invariants of a single phase's list.
    pub fn validate_phase(&self, category: CheckCategory) -> Result<()> {
        let items = match category {
            CheckCategory::System => &self.system,
            CheckCategory::Apps => &self.apps,
            CheckCategory::Cluster => &self.cluster,
        };
        for item in items {
            if item.id.trim().is_empty() || item.name.trim().is_empty() {
                return Err(CorralError::Catalog {
                    message: format!("{} check with empty id or name", category),
                });
            }
            if category != CheckCategory::System {
                if let Some(Evaluation::Probe(_)) = item.evaluation {
                    return Err(CorralError::Catalog {
                        message: format!(
                            "check '{}': probes are only valid in the system phase",
                            item.id
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// YAML-facing descriptor shape: `probe` and `command` are separate keys.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    id: String,
    name: String,
    #[serde(default)]
    probe: Option<SystemProbe>,
    #[serde(default)]
    command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    system: Vec<RawDescriptor>,
    #[serde(default)]
    apps: Vec<RawDescriptor>,
    #[serde(default)]
    cluster: Vec<RawDescriptor>,
}

fn convert(raw: Vec<RawDescriptor>, category: CheckCategory) -> Result<Vec<CheckDescriptor>> {
    raw.into_iter()
        .map(|item| {
            let evaluation = match (item.probe, item.command) {
                (Some(_), Some(_)) => {
                    return Err(CorralError::Catalog {
                        message: format!(
                            "{} check '{}' declares both a probe and a command",
                            category, item.id
                        ),
                    })
                }
                (Some(probe), None) => Some(Evaluation::Probe(probe)),
                (None, Some(command)) => Some(Evaluation::Command(command)),
                (None, None) => None,
            };
            Ok(CheckDescriptor {
                id: item.id,
                name: item.name,
                evaluation,
            })
        })
        .collect()
}
