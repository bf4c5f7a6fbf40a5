//! The diagnostic pipeline.
//!
//! One pass walks the catalog's three phases in a fixed order (system,
//! applications, cluster) and evaluates each item sequentially so the
//! consumer sees a deterministic event stream. The central contract is
//! fault isolation: a single item's failure becomes a `NotConfigured`
//! result and the pass keeps going. Only an orchestration-level fault (a
//! malformed catalog) aborts a pass, and even then the engine stays usable
//! for the next one.

use crate::catalog::{CheckCatalog, CheckCategory, CheckDescriptor, Evaluation};
use crate::check::{CheckResult, ReadinessStatus};
use crate::classify::{classify_app, classify_cluster, classify_probe, SystemRequirements};
use crate::error::Result;
use crate::events::{Event, EventSink};
use crate::probe::SystemSnapshot;
use crate::shell::{execute, CommandOptions, ExecOutput};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Executes one check command. The seam that lets tests drive the pipeline
/// without spawning processes.
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<ExecOutput>;
}

/// Production runner: one shell invocation per check.
#[derive(Debug, Default)]
pub struct ShellRunner {
    options: CommandOptions,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<ExecOutput> {
        execute(command, &self.options)
    }
}

/// Where a pass currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    NotStarted,
    Running(CheckCategory),
    Completed,
    Failed(CheckCategory),
}

/// Everything one diagnostic pass produced.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub generated_at: DateTime<Utc>,
    pub system: Vec<CheckResult>,
    pub apps: Vec<CheckResult>,
    pub cluster: Vec<CheckResult>,
}

impl DiagnosticReport {
    /// All results in emission order.
    pub fn all(&self) -> impl Iterator<Item = &CheckResult> {
        self.system
            .iter()
            .chain(self.apps.iter())
            .chain(self.cluster.iter())
    }

    /// Whether the machine is ready: nothing resolved to `NotConfigured`.
    pub fn ready(&self) -> bool {
        self.all()
            .all(|r| r.status != ReadinessStatus::NotConfigured)
    }

    /// Count of results with the given status.
    pub fn count(&self, status: ReadinessStatus) -> usize {
        self.all().filter(|r| r.status == status).count()
    }
}

/// Drives one diagnostic pass over a catalog.
pub struct DiagnosticPipeline<'a> {
    catalog: &'a CheckCatalog,
    snapshot: SystemSnapshot,
    requirements: SystemRequirements,
    runner: &'a dyn CommandRunner,
    sink: &'a dyn EventSink,
    phase: PipelinePhase,
}

impl<'a> DiagnosticPipeline<'a> {
    pub fn new(
        catalog: &'a CheckCatalog,
        snapshot: SystemSnapshot,
        requirements: SystemRequirements,
        runner: &'a dyn CommandRunner,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            catalog,
            snapshot,
            requirements,
            runner,
            sink,
            phase: PipelinePhase::NotStarted,
        }
    }

    /// The current phase of this pass.
    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    /// Run the full pass: system, then applications, then cluster.
    pub fn run(&mut self) -> Result<DiagnosticReport> {
        let system = self.run_phase(CheckCategory::System)?;
        let apps = self.run_phase(CheckCategory::Apps)?;
        let cluster = self.run_phase(CheckCategory::Cluster)?;
        self.phase = PipelinePhase::Completed;

        Ok(DiagnosticReport {
            generated_at: Utc::now(),
            system,
            apps,
            cluster,
        })
    }

    fn run_phase(&mut self, category: CheckCategory) -> Result<Vec<CheckResult>> {
        self.phase = PipelinePhase::Running(category);
        tracing::debug!(%category, "entering diagnostic phase");

        if let Err(fault) = self.catalog.validate_phase(category) {
            self.phase = PipelinePhase::Failed(category);
            self.sink
                .emit(Event::log(category.to_string(), fault.to_string()));
            return Err(fault);
        }

        let items = match category {
            CheckCategory::System => &self.catalog.system,
            CheckCategory::Apps => &self.catalog.apps,
            CheckCategory::Cluster => &self.catalog.cluster,
        };

        let mut results = Vec::with_capacity(items.len());
        for descriptor in items {
            let result = self.evaluate(category, descriptor);
            self.sink.emit(match category {
                CheckCategory::System => Event::SystemCheck(result.clone()),
                CheckCategory::Apps => Event::AppCheck(result.clone()),
                CheckCategory::Cluster => Event::ClusterCheck(result.clone()),
            });
            results.push(result);
        }
        Ok(results)
    }

    /// Evaluate one item. Infallible by design: runner faults become
    /// `NotConfigured` results so later items still run.
    fn evaluate(&self, category: CheckCategory, descriptor: &CheckDescriptor) -> CheckResult {
        match &descriptor.evaluation {
            None => CheckResult::unevaluated(descriptor.clone()),
            Some(Evaluation::Probe(probe)) => {
                let (status, detail) =
                    classify_probe(*probe, &self.snapshot, &self.requirements);
                self.sink.emit(Event::log(&descriptor.name, detail.clone()));
                CheckResult::new(descriptor.clone(), status, detail)
            }
            Some(Evaluation::Command(command)) => match self.runner.run(command) {
                Ok(output) => {
                    let stdout = output.stdout.trim();
                    if !stdout.is_empty() {
                        self.sink.emit(Event::log(&descriptor.name, stdout));
                    }
                    let stderr = output.stderr.trim();
                    if !stderr.is_empty() {
                        self.sink.emit(Event::log(&descriptor.name, stderr));
                    }
                    let (status, detail) = match category {
                        CheckCategory::Cluster => classify_cluster(&output),
                        _ => classify_app(&output),
                    };
                    CheckResult::new(descriptor.clone(), status, detail)
                }
                Err(fault) => {
                    let detail = fault.to_string();
                    tracing::warn!(check = %descriptor.id, %detail, "check execution fault");
                    self.sink.emit(Event::log(&descriptor.name, detail.clone()));
                    CheckResult::new(descriptor.clone(), ReadinessStatus::NotConfigured, detail)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CheckDescriptor;
    use crate::error::CorralError;
    use crate::events::CollectingSink;
    use crate::probe::SystemProbe;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted runner: maps commands to canned outcomes and counts calls.
    #[derive(Default)]
    struct FakeRunner {
        responses: HashMap<String, std::result::Result<ExecOutput, String>>,
        calls: AtomicUsize,
    }

    impl FakeRunner {
        fn respond(mut self, command: &str, stdout: &str, stderr: &str) -> Self {
            self.responses.insert(
                command.to_string(),
                Ok(ExecOutput::from_text(stdout, stderr)),
            );
            self
        }

        fn fail(mut self, command: &str, message: &str) -> Self {
            self.responses
                .insert(command.to_string(), Err(message.to_string()));
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command: &str) -> Result<ExecOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(command) {
                Some(Ok(output)) => Ok(output.clone()),
                Some(Err(message)) => Err(CorralError::Spawn {
                    command: command.to_string(),
                    message: message.clone(),
                }),
                None => Ok(ExecOutput::from_text("", "")),
            }
        }
    }

    fn snapshot() -> SystemSnapshot {
        SystemSnapshot {
            os_type: "Linux".to_string(),
            cpu_cores: 8,
            total_memory_mib: 16384,
        }
    }

    fn probe_only_catalog() -> CheckCatalog {
        CheckCatalog {
            system: vec![
                CheckDescriptor::probe("os", "Operating System", SystemProbe::OsType),
                CheckDescriptor::probe("cpu", "CPU Cores", SystemProbe::CpuCores),
                CheckDescriptor::probe("memory", "Memory", SystemProbe::TotalMemory),
            ],
            apps: vec![],
            cluster: vec![],
        }
    }

    #[test]
    fn probes_never_touch_the_runner() {
        let runner = FakeRunner::default();
        let sink = CollectingSink::new();
        let catalog = probe_only_catalog();
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );

        let report = pipeline.run().unwrap();

        assert_eq!(runner.call_count(), 0);
        assert_eq!(report.system.len(), 3);
        assert!(report.ready());
    }

    #[test]
    fn phases_run_in_order_and_events_match() {
        let runner = FakeRunner::default()
            .respond("docker --version", "Docker version 27.0", "")
            .respond("count nodes", "3", "");
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![CheckDescriptor::probe(
                "os",
                "Operating System",
                SystemProbe::OsType,
            )],
            apps: vec![CheckDescriptor::command(
                "docker",
                "Docker",
                "docker --version",
            )],
            cluster: vec![CheckDescriptor::command("nodes", "Nodes", "count nodes")],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );

        let report = pipeline.run().unwrap();
        assert_eq!(pipeline.phase(), PipelinePhase::Completed);
        assert!(report.ready());

        let kinds: Vec<&'static str> = sink
            .events()
            .iter()
            .map(|e| match e {
                Event::LogLine { .. } => "log",
                Event::SystemCheck(_) => "system",
                Event::AppCheck(_) => "app",
                Event::ClusterCheck(_) => "cluster",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["log", "system", "log", "app", "log", "cluster"]
        );
    }

    #[test]
    fn one_spawn_failure_does_not_halt_the_phase() {
        let runner = FakeRunner::default()
            .fail("broken-check", "No such file or directory")
            .respond("healthy-check", "ok", "");
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![
                CheckDescriptor::command("broken", "Broken Tool", "broken-check"),
                CheckDescriptor::command("healthy", "Healthy Tool", "healthy-check"),
            ],
            cluster: vec![],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );

        let report = pipeline.run().unwrap();

        assert_eq!(report.apps.len(), 2);
        assert_eq!(report.apps[0].status, ReadinessStatus::NotConfigured);
        assert!(report.apps[0].detail.contains("No such file or directory"));
        assert_eq!(report.apps[1].status, ReadinessStatus::Configured);
        assert_eq!(report.apps[1].detail, "ok");

        // The fault also left textual evidence.
        assert!(sink.events().iter().any(|e| matches!(
            e,
            Event::LogLine { category, message }
                if category == "Broken Tool" && message.contains("No such file")
        )));
    }

    #[test]
    fn command_output_is_logged_per_channel() {
        let runner = FakeRunner::default().respond("noisy", "from stdout\n", "from stderr\n");
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![CheckDescriptor::command("noisy", "Noisy Tool", "noisy")],
            cluster: vec![],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );
        pipeline.run().unwrap();

        let logs: Vec<String> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::LogLine { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(logs, vec!["from stdout", "from stderr"]);
    }

    #[test]
    fn item_without_evaluation_passes_through_unknown() {
        let runner = FakeRunner::default();
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![CheckDescriptor {
                id: "placeholder".to_string(),
                name: "Placeholder".to_string(),
                evaluation: None,
            }],
            cluster: vec![],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );
        let report = pipeline.run().unwrap();

        assert_eq!(runner.call_count(), 0);
        assert_eq!(report.apps[0].status, ReadinessStatus::Unknown);
        assert!(report.ready());
    }

    #[test]
    fn malformed_phase_is_an_orchestration_fault() {
        let runner = FakeRunner::default();
        let sink = CollectingSink::new();
        // Hand-built catalog that bypassed loader validation.
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![CheckDescriptor::probe(
                "cpu",
                "CPU",
                SystemProbe::CpuCores,
            )],
            cluster: vec![],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );

        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, CorralError::Catalog { .. }));
        assert_eq!(
            pipeline.phase(),
            PipelinePhase::Failed(CheckCategory::Apps)
        );
        // The fault was logged before propagating.
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, Event::LogLine { category, .. } if category == "apps")));
    }

    #[test]
    fn cluster_results_use_cluster_classification() {
        let runner = FakeRunner::default().respond("count", "0", "");
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![],
            cluster: vec![CheckDescriptor::command("nodes", "Nodes", "count")],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );
        let report = pipeline.run().unwrap();

        assert_eq!(report.cluster[0].detail, "Ready Instances: 0");
        assert_eq!(report.cluster[0].status, ReadinessStatus::NotConfigured);
        assert!(!report.ready());
    }

    #[test]
    fn report_counts_by_status() {
        let runner = FakeRunner::default()
            .respond("good", "fine", "")
            .respond("bad", "", "broken");
        let sink = CollectingSink::new();
        let catalog = CheckCatalog {
            system: vec![],
            apps: vec![
                CheckDescriptor::command("good", "Good", "good"),
                CheckDescriptor::command("bad", "Bad", "bad"),
            ],
            cluster: vec![],
        };
        let mut pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );
        let report = pipeline.run().unwrap();

        assert_eq!(report.count(ReadinessStatus::Configured), 1);
        assert_eq!(report.count(ReadinessStatus::NotConfigured), 1);
        assert_eq!(report.count(ReadinessStatus::Unknown), 0);
    }

    #[test]
    fn pipeline_starts_not_started() {
        let runner = FakeRunner::default();
        let sink = CollectingSink::new();
        let catalog = probe_only_catalog();
        let pipeline = DiagnosticPipeline::new(
            &catalog,
            snapshot(),
            SystemRequirements::default(),
            &runner,
            &sink,
        );
        assert_eq!(pipeline.phase(), PipelinePhase::NotStarted);
    }
}
