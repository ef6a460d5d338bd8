//! The synchronization engine.
//!
//! `SyncEngine` owns the session record for one attempt. It loads the record
//! from the LMS on [`initialize`](SyncEngine::initialize), serves reads from
//! memory, and mirrors every write to the LMS through the runtime bridge.

mod collections;
mod loader;
mod scalars;
mod writer;

use loader::BulkLoader;
use scorm_core::codec::{
    CompletionStatus, Credit, Entry, Exit, Mode, SuccessStatus, TimeLimitAction,
};
use scorm_core::{
    BridgeError, Clock, Comment, EngineConfig, EngineState, Interaction, LearnerPreference,
    LifecycleEvent, Objective, Result, RuntimeBridge, Score, ScormError, SessionRecord, SystemClock,
};
use std::sync::Arc;

use crate::events::{EventBus, SubscriptionId};

/// Index and id assigned to an appended element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    pub index: usize,
    pub id: String,
}

/// Keeps a [`SessionRecord`] synchronized with the LMS.
///
/// Every operation that talks to the bridge takes `&mut self` and awaits
/// each request before issuing the next.
pub struct SyncEngine {
    bridge: Arc<dyn RuntimeBridge>,
    record: SessionRecord,
    state: EngineState,
    events: EventBus,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl SyncEngine {
    /// Creates an engine with the default configuration.
    pub fn new(bridge: Arc<dyn RuntimeBridge>) -> Self {
        Self::with_config(bridge, EngineConfig::default())
    }

    /// Creates an engine.
    ///
    /// # Arguments
    ///
    /// * `bridge` - Channel to the LMS run-time API
    /// * `config` - Timeouts, id prefixes and length-limit policy
    pub fn with_config(bridge: Arc<dyn RuntimeBridge>, config: EngineConfig) -> Self {
        Self {
            bridge,
            record: SessionRecord::default(),
            state: EngineState::Uninitialized,
            events: EventBus::new(),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for comment and interaction timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The whole in-memory record.
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Opens the LMS session and loads the record.
    ///
    /// Only allowed from `Uninitialized`. On failure the engine returns to
    /// `Uninitialized` with a default record and nothing is broadcast.
    ///
    /// # Errors
    ///
    /// - `InvalidState`: The engine was already initialized
    /// - `BridgeCommunication(Rejected)`: The LMS refused to initialize
    /// - `UnsupportedProtocolVersion`: The LMS only speaks SCORM 1.2
    /// - `BridgeCommunication(_)`: A request failed or the initialize timeout elapsed
    pub async fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(ScormError::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }

        tracing::info!("[SyncEngine] Initializing session");
        self.state = EngineState::Initializing;

        let outcome = match self.config.initialize_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.open_session()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(BridgeError::Timeout {
                    request: "initialize".to_string(),
                    after: limit,
                }
                .into()),
            },
            None => self.open_session().await,
        };

        match outcome {
            Ok(record) => {
                self.record = record;
                self.state = EngineState::Ready;
                tracing::info!(
                    "[SyncEngine] Session ready for learner {:?} ({}), entry {:?}",
                    self.record.learner_name,
                    self.record.learner_id,
                    self.record.entry
                );
                self.events.publish(&LifecycleEvent::Initialized);
                Ok(())
            }
            Err(e) => {
                tracing::error!("[SyncEngine] Initialize failed: {}", e);
                self.record = SessionRecord::default();
                self.state = EngineState::Uninitialized;
                Err(e)
            }
        }
    }

    async fn open_session(&self) -> Result<SessionRecord> {
        if !self.bridge.initialize().await? {
            return Err(BridgeError::rejected("Initialize").into());
        }
        if !self.bridge.is_v2004().await? {
            return Err(ScormError::UnsupportedProtocolVersion {
                reported: "1.2".to_string(),
            });
        }
        BulkLoader::new(self.bridge.as_ref(), &self.config.ids)
            .load()
            .await
    }

    /// Asks the LMS to persist the data written so far, then broadcasts
    /// `Commit`.
    pub async fn commit(&mut self) -> Result<()> {
        self.ensure_ready("commit")?;
        if let Err(e) = self.bridge.commit().await {
            tracing::error!("[SyncEngine] Commit failed: {}", e);
            return Err(e.into());
        }
        tracing::debug!("[SyncEngine] Committed");
        self.events.publish(&LifecycleEvent::Commit);
        Ok(())
    }

    /// Ends the LMS session. Does not commit.
    ///
    /// On failure the engine stays `Ready`.
    pub async fn terminate(&mut self) -> Result<()> {
        self.ensure_ready("terminate")?;
        if let Err(e) = self.bridge.terminate().await {
            tracing::error!("[SyncEngine] Terminate failed: {}", e);
            return Err(e.into());
        }
        self.state = EngineState::Terminated;
        tracing::info!("[SyncEngine] Session terminated");
        Ok(())
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ============================================================================
    // Reads (in-memory, always available)
    // ============================================================================

    pub fn version(&self) -> &str {
        &self.record.version
    }

    pub fn learner_id(&self) -> &str {
        &self.record.learner_id
    }

    pub fn learner_name(&self) -> &str {
        &self.record.learner_name
    }

    pub fn launch_data(&self) -> &str {
        &self.record.launch_data
    }

    pub fn completion_status(&self) -> CompletionStatus {
        self.record.completion_status
    }

    pub fn success_status(&self) -> SuccessStatus {
        self.record.success_status
    }

    pub fn credit(&self) -> Credit {
        self.record.credit
    }

    pub fn entry(&self) -> Entry {
        self.record.entry
    }

    pub fn mode(&self) -> Mode {
        self.record.mode
    }

    /// Last exit value written this session.
    pub fn exit(&self) -> Exit {
        self.record.exit
    }

    pub fn score(&self) -> Score {
        self.record.score
    }

    pub fn completion_threshold(&self) -> f64 {
        self.record.completion_threshold
    }

    pub fn scaled_passing_score(&self) -> f64 {
        self.record.scaled_passing_score
    }

    pub fn progress_measure(&self) -> f64 {
        self.record.progress_measure
    }

    /// Seconds.
    pub fn max_time_allowed(&self) -> f64 {
        self.record.max_time_allowed
    }

    /// Seconds accumulated over previous sessions.
    pub fn total_time(&self) -> f64 {
        self.record.total_time
    }

    /// Last session time written this session, in seconds.
    pub fn session_time(&self) -> f64 {
        self.record.session_time
    }

    pub fn time_limit_action(&self) -> TimeLimitAction {
        self.record.time_limit_action
    }

    pub fn location(&self) -> &str {
        &self.record.location
    }

    pub fn suspend_data(&self) -> &str {
        &self.record.suspend_data
    }

    pub fn learner_preference(&self) -> &LearnerPreference {
        &self.record.learner_preference
    }

    pub fn comments_from_learner(&self) -> &[Comment] {
        self.record.comments_from_learner.as_slice()
    }

    pub fn comments_from_lms(&self) -> &[Comment] {
        self.record.comments_from_lms.as_slice()
    }

    pub fn interactions(&self) -> &[Interaction] {
        self.record.interactions.as_slice()
    }

    pub fn objectives(&self) -> &[Objective] {
        self.record.objectives.as_slice()
    }

    // ============================================================================
    // Write-through plumbing
    // ============================================================================

    fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            tracing::warn!(
                "[SyncEngine] {} ignored: engine is {}",
                operation,
                self.state
            );
            Err(ScormError::not_ready(operation, self.state))
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!("[SyncEngine] SetValue {} = {:?}", key, value);
        match self.bridge.set_value(key, value).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!("[SyncEngine] LMS rejected {} = {:?}", key, value);
                Err(BridgeError::rejected(format!("SetValue({key})")).into())
            }
            Err(e) => {
                tracing::error!("[SyncEngine] SetValue {} failed: {}", key, e);
                Err(e.into())
            }
        }
    }

    /// Sends writes in order, stopping at the first failure.
    async fn write_all(&self, writes: writer::FieldWrites) -> Result<()> {
        for (key, value) in &writes {
            self.write(key, value).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &self.state)
            .field("learner_id", &self.record.learner_id)
            .field("events", &self.events)
            .finish()
    }
}
