//! Package metadata: the manifest-facing settings of a content package.
//!
//! Only the typed interface lives here. Archive and manifest generation are
//! handled by external tooling that consumes [`LimitConditions`].

use crate::codec::{CmiVocabulary, TimeLimitAction, seconds_to_interval};
use crate::error::{Result, ScormError};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PackageMetadata {
    pub manifest_identifier: String,
    pub course_title: String,
    pub course_description: String,
    /// Title of the single SCO item.
    pub sco_title: String,
    /// Delivered to the SCO as `cmi.launch_data`.
    pub launch_data: String,
    pub completed_by_measure: bool,
    /// 0..1, used when `completed_by_measure` is set.
    pub min_progress_measure: f64,
    pub time_limit_action: TimeLimitAction,
    /// Absolute attempt duration limit; `0` means unlimited.
    pub time_limit_secs: f64,
}

/// Sequencing values ready to be placed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitConditions {
    /// `adlcp:timeLimitAction`
    pub time_limit_action: String,
    /// `imsss:limitConditions@attemptAbsoluteDurationLimit`
    pub attempt_absolute_duration_limit: String,
}

impl PackageMetadata {
    /// Checks the fields a manifest cannot be produced without.
    pub fn validate(&self) -> Result<()> {
        if self.manifest_identifier.trim().is_empty() {
            return Err(ScormError::config("package manifest_identifier is empty"));
        }
        if !(0.0..=1.0).contains(&self.min_progress_measure) {
            return Err(ScormError::config(format!(
                "package min_progress_measure {} is outside 0..1",
                self.min_progress_measure
            )));
        }
        if !self.time_limit_secs.is_finite() || self.time_limit_secs < 0.0 {
            return Err(ScormError::config(format!(
                "package time_limit_secs {} must be a non-negative number",
                self.time_limit_secs
            )));
        }
        Ok(())
    }

    /// Encodes the time limit through the shared duration codec.
    pub fn limit_conditions(&self) -> LimitConditions {
        LimitConditions {
            time_limit_action: self.time_limit_action.encode().to_string(),
            attempt_absolute_duration_limit: seconds_to_interval(self.time_limit_secs),
        }
    }
}
