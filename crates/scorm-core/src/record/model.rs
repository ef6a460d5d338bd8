//! The Session Record: all learner and session state of one attempt.

use super::{Comment, ElementList, Interaction, Objective};
use crate::codec::{
    AudioCaptioning, CompletionStatus, Credit, Entry, Exit, Mode, SuccessStatus, TimeLimitAction,
};
use serde::{Deserialize, Serialize};

/// `cmi.score` and `cmi.objectives.n.score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// -1..1
    pub scaled: f64,
    pub raw: f64,
    pub min: f64,
    pub max: f64,
}

impl Score {
    pub fn new(scaled: f64, raw: f64, min: f64, max: f64) -> Self {
        Self {
            scaled,
            raw,
            min,
            max,
        }
    }
}

/// `cmi.learner_preference`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerPreference {
    pub audio_level: f64,
    pub language: String,
    pub delivery_speed: f64,
    pub audio_captioning: AudioCaptioning,
}

/// In-memory mirror of the CMI data model for the active session.
///
/// Owned by the engine and rebuilt from the LMS on every initialize. Durations
/// are held in seconds; enum fields start at `NotSet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    // Identity (read-only on the protocol side)
    pub version: String,
    pub learner_id: String,
    pub learner_name: String,
    pub launch_data: String,

    // Status
    pub completion_status: CompletionStatus,
    pub success_status: SuccessStatus,
    pub credit: Credit,
    pub entry: Entry,
    pub mode: Mode,
    /// Last value written this session; the LMS never reports it back.
    pub exit: Exit,

    // Scoring and thresholds
    pub score: Score,
    pub completion_threshold: f64,
    pub scaled_passing_score: f64,
    pub progress_measure: f64,

    // Timing
    pub max_time_allowed: f64,
    pub total_time: f64,
    pub time_limit_action: TimeLimitAction,
    /// Last value written this session.
    pub session_time: f64,

    // Free-form
    pub location: String,
    pub suspend_data: String,

    pub learner_preference: LearnerPreference,

    pub comments_from_learner: ElementList<Comment>,
    pub comments_from_lms: ElementList<Comment>,
    pub interactions: ElementList<Interaction>,
    pub objectives: ElementList<Objective>,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an objective by its id.
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Looks up an interaction by its id.
    pub fn interaction(&self, id: &str) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_unset() {
        let record = SessionRecord::new();
        assert_eq!(record.completion_status, CompletionStatus::NotSet);
        assert_eq!(record.exit, Exit::NotSet);
        assert_eq!(
            record.learner_preference.audio_captioning,
            AudioCaptioning::NoChange
        );
        assert!(record.interactions.is_empty());
        assert!(record.objectives.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let mut record = SessionRecord::new();
        record.objectives.push(Objective {
            id: "obj-a".into(),
            progress_measure: 0.5,
            ..Default::default()
        });
        assert_eq!(record.objective("obj-a").map(|o| o.progress_measure), Some(0.5));
        assert!(record.objective("obj-b").is_none());
        assert!(record.interaction("obj-a").is_none());
    }

    #[test]
    fn serializes_collections_as_arrays() {
        let mut record = SessionRecord::new();
        record
            .comments_from_learner
            .push(Comment::new("hello", "p1"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["comments_from_learner"][0]["comment"], "hello");
        assert_eq!(json["completion_status"], "not_set");
    }
}
