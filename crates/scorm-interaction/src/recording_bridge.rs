//! In-memory LMS used by tests and the simulator.

use async_trait::async_trait;
use scorm_core::{BridgeCall, BridgeError, BridgeResult, RuntimeBridge};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct LmsState {
    values: HashMap<String, String>,
    calls: Vec<BridgeCall>,
    v2004: bool,
    initialize_result: bool,
    failing_keys: HashSet<String>,
    rejected_keys: HashSet<String>,
    fail_commit: bool,
    fail_terminate: bool,
}

impl Default for LmsState {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            calls: Vec::new(),
            v2004: true,
            initialize_result: true,
            failing_keys: HashSet::new(),
            rejected_keys: HashSet::new(),
            fail_commit: false,
            fail_terminate: false,
        }
    }
}

/// A [`RuntimeBridge`] backed by a key/value map.
///
/// Missing keys read as `""` and writes are stored, so values written during a
/// session can be read back. Every call is appended to a log in issue order.
///
/// ```
/// use scorm_interaction::RecordingBridge;
///
/// let lms = RecordingBridge::new()
///     .with_value("cmi.learner_name", "Ada")
///     .fail_on("cmi.suspend_data");
/// assert_eq!(lms.value("cmi.learner_name").as_deref(), Some("Ada"));
/// ```
#[derive(Debug, Default)]
pub struct RecordingBridge {
    state: Mutex<LmsState>,
}

impl RecordingBridge {
    /// Creates a 2004 LMS with no data that accepts initialize.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.state_mut().values.insert(key.into(), value.into());
        self
    }

    pub fn with_values<K, V, I>(mut self, values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let state = self.state_mut();
        for (key, value) in values {
            state.values.insert(key.into(), value.into());
        }
        self
    }

    /// Reports the legacy 1.2 data model.
    pub fn legacy(mut self) -> Self {
        self.state_mut().v2004 = false;
        self
    }

    pub fn with_initialize_result(mut self, accepted: bool) -> Self {
        self.state_mut().initialize_result = accepted;
        self
    }

    /// Makes every read and write of `key` fail with a host error.
    pub fn fail_on(mut self, key: impl Into<String>) -> Self {
        self.state_mut().failing_keys.insert(key.into());
        self
    }

    /// Makes the LMS answer `false` to writes of `key`.
    pub fn reject_writes_to(mut self, key: impl Into<String>) -> Self {
        self.state_mut().rejected_keys.insert(key.into());
        self
    }

    pub fn fail_commit(mut self) -> Self {
        self.state_mut().fail_commit = true;
        self
    }

    pub fn fail_terminate(mut self) -> Self {
        self.state_mut().fail_terminate = true;
        self
    }

    /// All calls issued so far, oldest first.
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.lock().calls.clone()
    }

    /// Only the `SetValue` calls, as `(key, value)` pairs.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::SetValue { key, value } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Current stored value of `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, LmsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut LmsState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: BridgeCall) -> MutexGuard<'_, LmsState> {
        tracing::trace!("[RecordingBridge] {}", call);
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl RuntimeBridge for RecordingBridge {
    async fn initialize(&self) -> BridgeResult<bool> {
        Ok(self.record(BridgeCall::Initialize).initialize_result)
    }

    async fn is_v2004(&self) -> BridgeResult<bool> {
        Ok(self.record(BridgeCall::IsV2004).v2004)
    }

    async fn get_value(&self, key: &str) -> BridgeResult<String> {
        let state = self.record(BridgeCall::get(key));
        if state.failing_keys.contains(key) {
            return Err(BridgeError::host(format!("injected read failure for {key}")));
        }
        Ok(state.values.get(key).cloned().unwrap_or_default())
    }

    async fn set_value(&self, key: &str, value: &str) -> BridgeResult<bool> {
        let mut state = self.record(BridgeCall::set(key, value));
        if state.failing_keys.contains(key) {
            return Err(BridgeError::host(format!("injected write failure for {key}")));
        }
        if state.rejected_keys.contains(key) {
            return Ok(false);
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn commit(&self) -> BridgeResult<()> {
        if self.record(BridgeCall::Commit).fail_commit {
            return Err(BridgeError::rejected(BridgeCall::Commit.to_string()));
        }
        Ok(())
    }

    async fn terminate(&self) -> BridgeResult<()> {
        if self.record(BridgeCall::Terminate).fail_terminate {
            return Err(BridgeError::rejected(BridgeCall::Terminate.to_string()));
        }
        Ok(())
    }
}
