use anyhow::{Context, Result, bail};
use scorm_application::SyncEngine;
use scorm_core::codec::{CompletionStatus, format_real};
use scorm_core::{BridgeCall, LifecycleEvent, Objective, SessionRecord};
use scorm_interaction::RecordingBridge;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct SimulateOptions {
    pub fixture: Option<PathBuf>,
    pub complete: bool,
    pub objective_progress: Option<f64>,
    pub print_record: bool,
}

/// Initial LMS state.
///
/// ```toml
/// legacy = false
///
/// [values]
/// "cmi.learner_name" = "Ada"
/// "cmi.objectives._count" = 0
/// ```
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    legacy: bool,
    #[serde(default)]
    values: BTreeMap<String, toml::Value>,
}

impl Fixture {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the LMS, rendering scalar TOML values the way an LMS would
    /// return them.
    fn into_bridge(self) -> Result<RecordingBridge> {
        let mut values = Vec::with_capacity(self.values.len());
        for (key, value) in self.values {
            let raw = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => format_real(f),
                toml::Value::Boolean(b) => b.to_string(),
                other => bail!("{} must be a scalar, got {}", key, other.type_str()),
            };
            values.push((key, raw));
        }

        let bridge = RecordingBridge::new().with_values(values);
        Ok(if self.legacy { bridge.legacy() } else { bridge })
    }
}

struct Simulation {
    calls: Vec<BridgeCall>,
    events: Vec<LifecycleEvent>,
    record: SessionRecord,
}

async fn simulate(
    fixture: Fixture,
    complete: bool,
    objective_progress: Option<f64>,
) -> Result<Simulation> {
    if let Some(progress) = objective_progress.filter(|p| !(0.0..=1.0).contains(p)) {
        bail!("objective progress must be within 0..1, got {}", progress);
    }

    let bridge = Arc::new(fixture.into_bridge()?);
    let mut engine = SyncEngine::new(bridge.clone());

    let events = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = events.clone();
    engine.subscribe(move |event| {
        tracing::info!("[Simulate] {:?}", event);
        sink.lock()
            .map_err(|_| anyhow::anyhow!("event log poisoned"))?
            .push(*event);
        Ok(())
    });

    engine.initialize().await?;
    tracing::info!(
        "[Simulate] Session open for {:?} ({} interactions, {} objectives)",
        engine.learner_name(),
        engine.interactions().len(),
        engine.objectives().len()
    );

    if complete {
        engine
            .set_completion_status(CompletionStatus::Completed)
            .await?;
    }

    if let Some(progress) = objective_progress {
        let mut objective = Objective::new("simulated objective");
        objective.progress_measure = progress;
        objective.completion_status = if progress >= 1.0 {
            CompletionStatus::Completed
        } else {
            CompletionStatus::Incomplete
        };
        let appended = engine.append_objective(objective).await?;
        tracing::info!("[Simulate] Appended objective {} at {}", appended.id, appended.index);
    }

    engine.commit().await?;
    engine.terminate().await?;

    let events = events
        .lock()
        .map(|events| events.clone())
        .map_err(|_| anyhow::anyhow!("event log poisoned"))?;

    Ok(Simulation {
        calls: bridge.calls(),
        events,
        record: engine.record().clone(),
    })
}

pub async fn run(options: SimulateOptions) -> Result<()> {
    let fixture = match &options.fixture {
        Some(path) => Fixture::load(path)?,
        None => Fixture::default(),
    };

    let outcome = simulate(fixture, options.complete, options.objective_progress).await?;

    for (n, call) in outcome.calls.iter().enumerate() {
        println!("{:>4}  {}", n + 1, call);
    }
    tracing::info!(
        "[Simulate] {} calls, {} lifecycle events",
        outcome.calls.len(),
        outcome.events.len()
    );

    if options.print_record {
        println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    }

    Ok(())
}
