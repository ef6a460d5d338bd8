//! Engine lifecycle states and the events broadcast at lifecycle transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a synchronization engine.
///
/// `Uninitialized → Initializing → Ready → Terminated`. A failed initialize
/// falls back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Terminated,
}

impl EngineState {
    pub fn is_ready(self) -> bool {
        self == EngineState::Ready
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initializing => "initializing",
            EngineState::Ready => "ready",
            EngineState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Events broadcast to subscribers after the matching operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The session record finished loading and the engine is ready.
    Initialized,
    /// A commit was forwarded to the LMS.
    Commit,
}
