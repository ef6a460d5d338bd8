//! Engine configuration (`[engine]` and `[package]` sections of `scorm.toml`).

use crate::export::PackageMetadata;
use crate::keys::Collection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageMetadata>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-request wait for a host reply. `0` waits forever.
    pub request_timeout_ms: u64,
    /// Upper bound on the whole initialize sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialize_timeout_ms: Option<u64>,
    /// Reject location/suspend data beyond the protocol's smallest maximum.
    pub enforce_length_limits: bool,
    pub ids: IdScheme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            initialize_timeout_ms: None,
            enforce_length_limits: true,
            ids: IdScheme::default(),
        }
    }
}

impl EngineConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }

    pub fn initialize_timeout(&self) -> Option<Duration> {
        self.initialize_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

/// Prefixes of engine-assigned element ids (`<prefix>-<index>`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IdScheme {
    pub interaction_prefix: String,
    pub objective_prefix: String,
    pub comment_prefix: String,
    pub lms_comment_prefix: String,
}

impl Default for IdScheme {
    fn default() -> Self {
        Self {
            interaction_prefix: "urn:scorm:interaction-id".to_string(),
            objective_prefix: "urn:scorm:objective-id".to_string(),
            comment_prefix: "urn:scorm:comment-id".to_string(),
            lms_comment_prefix: "urn:scorm:lms-comment-id".to_string(),
        }
    }
}

impl IdScheme {
    pub fn prefix(&self, collection: Collection) -> &str {
        match collection {
            Collection::CommentsFromLearner => &self.comment_prefix,
            Collection::CommentsFromLms => &self.lms_comment_prefix,
            Collection::Interactions => &self.interaction_prefix,
            Collection::Objectives => &self.objective_prefix,
        }
    }

    /// Id of the element at `index` of `collection`.
    pub fn id_for(&self, collection: Collection, index: usize) -> String {
        format!("{}-{}", self.prefix(collection), index)
    }
}
