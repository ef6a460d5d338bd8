//! Error types for the SCORM synchronization workspace.

use crate::lifecycle::EngineState;
use std::time::Duration;
use thiserror::Error;

/// A failure surfaced while talking to the runtime bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The host never answered within the configured request timeout.
    #[error("request {request} timed out after {after:?}")]
    Timeout { request: String, after: Duration },

    /// The outstanding request was cancelled before a reply arrived.
    #[error("request {request} was cancelled")]
    Cancelled { request: String },

    /// A second request was issued while another one was still outstanding.
    #[error("request {pending} is still outstanding")]
    RequestInFlight { pending: u64 },

    /// The host API reported failure (`false`) for a call.
    #[error("host rejected {call}")]
    Rejected { call: String },

    /// A callback payload did not follow the `<value>|<request>` format.
    #[error("malformed callback payload: {payload:?}")]
    MalformedCallback { payload: String },

    /// A callback answered a request that is not outstanding.
    #[error("unexpected response for request {request} (outstanding: {outstanding:?})")]
    UnexpectedResponse {
        request: u64,
        outstanding: Option<u64>,
    },

    /// The host failed to accept or process a request.
    #[error("host error: {0}")]
    Host(String),

    /// The reply channel closed before an answer arrived.
    #[error("bridge disconnected while awaiting {request}")]
    Disconnected { request: String },
}

impl BridgeError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }

    pub fn rejected(call: impl Into<String>) -> Self {
        Self::Rejected { call: call.into() }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A shared error type for the entire workspace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScormError {
    /// The LMS only speaks the legacy 1.2 data model.
    #[error("unsupported SCORM protocol version: {reported}")]
    UnsupportedProtocolVersion { reported: String },

    /// A write was attempted outside the `Ready` state.
    #[error("{operation} rejected: engine is {state}, not ready")]
    NotReady {
        operation: &'static str,
        state: EngineState,
    },

    /// A lifecycle operation was called in a state it cannot start from.
    #[error("{operation} is not allowed while the engine is {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },

    /// Communication with the runtime bridge failed.
    #[error("bridge communication error: {0}")]
    BridgeCommunication(#[from] BridgeError),

    /// An update addressed an element the collection does not contain.
    #[error("index {index} out of range for {collection} (count {count})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        count: usize,
    },

    /// An update would shrink an append-only nested collection.
    #[error("{collection} cannot shrink from {existing} to {requested} entries")]
    CollectionTruncated {
        collection: &'static str,
        existing: usize,
        requested: usize,
    },

    /// A free-form value exceeds the protocol's smallest permitted maximum.
    #[error("value for {key} is {actual} characters, limit is {limit}")]
    ValueTooLong {
        key: &'static str,
        limit: usize,
        actual: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl ScormError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn not_ready(operation: &'static str, state: EngineState) -> Self {
        Self::NotReady { operation, state }
    }

    pub fn index_out_of_range(collection: &'static str, index: usize, count: usize) -> Self {
        Self::IndexOutOfRange {
            collection,
            index,
            count,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }

    pub fn is_bridge(&self) -> bool {
        matches!(self, Self::BridgeCommunication(_))
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Self::UnsupportedProtocolVersion { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScormError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for ScormError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ScormError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ScormError>`.
pub type Result<T> = std::result::Result<T, ScormError>;
