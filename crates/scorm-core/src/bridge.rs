//! Runtime bridge trait.
//!
//! Defines the request/response channel between the engine and the host LMS
//! API.

use crate::error::BridgeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias for bridge calls.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Correlation id of a single bridge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six requests a bridge can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BridgeCall {
    Initialize,
    IsV2004,
    GetValue { key: String },
    SetValue { key: String, value: String },
    Commit,
    Terminate,
}

impl BridgeCall {
    pub fn get(key: impl Into<String>) -> Self {
        Self::GetValue { key: key.into() }
    }

    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Data model key this call addresses, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::GetValue { key } | Self::SetValue { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for BridgeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize => write!(f, "Initialize"),
            Self::IsV2004 => write!(f, "IsV2004"),
            Self::GetValue { key } => write!(f, "GetValue({key})"),
            Self::SetValue { key, value } => write!(f, "SetValue({key}, {value:?})"),
            Self::Commit => write!(f, "Commit"),
            Self::Terminate => write!(f, "Terminate"),
        }
    }
}

/// A request handed to the host API, tagged with its correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRequest {
    pub id: RequestId,
    pub call: BridgeCall,
}

/// An abstract channel to the LMS run-time API.
///
/// Every method issues exactly one request and resolves once the host has
/// answered it. Callers must not issue a second request before the first one
/// resolves.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Correlating asynchronous replies with the outstanding request
/// - Bounding the wait for a reply
#[async_trait]
pub trait RuntimeBridge: Send + Sync {
    /// Opens the communication session with the LMS.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The LMS accepted the session
    /// - `Ok(false)`: The LMS refused it
    /// - `Err(_)`: The request could not be completed
    async fn initialize(&self) -> BridgeResult<bool>;

    /// Reports whether the LMS speaks the 2004 data model.
    async fn is_v2004(&self) -> BridgeResult<bool>;

    /// Reads a data model element.
    ///
    /// # Arguments
    ///
    /// * `key` - Dot-notation element name, e.g. `cmi.location`
    ///
    /// # Returns
    ///
    /// - `Ok(value)`: The raw string value (`""` when unset)
    /// - `Err(_)`: The request could not be completed
    async fn get_value(&self, key: &str) -> BridgeResult<String>;

    /// Writes a data model element.
    ///
    /// # Arguments
    ///
    /// * `key` - Dot-notation element name
    /// * `value` - Encoded value
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The LMS accepted the value
    /// - `Ok(false)`: The LMS rejected the value
    /// - `Err(_)`: The request could not be completed
    async fn set_value(&self, key: &str, value: &str) -> BridgeResult<bool>;

    /// Asks the LMS to persist everything written so far.
    async fn commit(&self) -> BridgeResult<()>;

    /// Ends the communication session.
    async fn terminate(&self) -> BridgeResult<()>;
}
