//! Dot-notation element names of the SCORM 2004 CMI data model.

pub const VERSION: &str = "cmi._version";
pub const COMPLETION_STATUS: &str = "cmi.completion_status";
pub const COMPLETION_THRESHOLD: &str = "cmi.completion_threshold";
pub const CREDIT: &str = "cmi.credit";
pub const ENTRY: &str = "cmi.entry";
pub const EXIT: &str = "cmi.exit";
pub const LAUNCH_DATA: &str = "cmi.launch_data";
pub const LEARNER_ID: &str = "cmi.learner_id";
pub const LEARNER_NAME: &str = "cmi.learner_name";
pub const LOCATION: &str = "cmi.location";
pub const MAX_TIME_ALLOWED: &str = "cmi.max_time_allowed";
pub const MODE: &str = "cmi.mode";
pub const PROGRESS_MEASURE: &str = "cmi.progress_measure";
pub const SCALED_PASSING_SCORE: &str = "cmi.scaled_passing_score";
pub const SESSION_TIME: &str = "cmi.session_time";
pub const SUCCESS_STATUS: &str = "cmi.success_status";
pub const SUSPEND_DATA: &str = "cmi.suspend_data";
pub const TIME_LIMIT_ACTION: &str = "cmi.time_limit_action";
pub const TOTAL_TIME: &str = "cmi.total_time";

pub const SCORE_SCALED: &str = "cmi.score.scaled";
pub const SCORE_RAW: &str = "cmi.score.raw";
pub const SCORE_MIN: &str = "cmi.score.min";
pub const SCORE_MAX: &str = "cmi.score.max";

pub const PREFERENCE_AUDIO_LEVEL: &str = "cmi.learner_preference.audio_level";
pub const PREFERENCE_LANGUAGE: &str = "cmi.learner_preference.language";
pub const PREFERENCE_DELIVERY_SPEED: &str = "cmi.learner_preference.delivery_speed";
pub const PREFERENCE_AUDIO_CAPTIONING: &str = "cmi.learner_preference.audio_captioning";

/// Smallest permitted maximum of `cmi.location`.
pub const LOCATION_MAX_CHARS: usize = 1000;
/// Smallest permitted maximum of `cmi.suspend_data`.
pub const SUSPEND_DATA_MAX_CHARS: usize = 64000;

/// Field names inside a comment element.
pub mod comment {
    pub const COMMENT: &str = "comment";
    pub const LOCATION: &str = "location";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Field names inside an interaction element.
pub mod interaction {
    pub const ID: &str = "id";
    pub const TYPE: &str = "type";
    pub const TIMESTAMP: &str = "timestamp";
    pub const WEIGHTING: &str = "weighting";
    pub const LEARNER_RESPONSE: &str = "learner_response";
    pub const RESULT: &str = "result";
    pub const LATENCY: &str = "latency";
    pub const DESCRIPTION: &str = "description";
}

/// Field names inside an objective element.
pub mod objective {
    pub const ID: &str = "id";
    pub const SCORE_SCALED: &str = "score.scaled";
    pub const SCORE_RAW: &str = "score.raw";
    pub const SCORE_MAX: &str = "score.max";
    pub const SCORE_MIN: &str = "score.min";
    pub const SUCCESS_STATUS: &str = "success_status";
    pub const COMPLETION_STATUS: &str = "completion_status";
    pub const PROGRESS_MEASURE: &str = "progress_measure";
    pub const DESCRIPTION: &str = "description";
}

/// Top-level repeating collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    CommentsFromLearner,
    CommentsFromLms,
    Interactions,
    Objectives,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::CommentsFromLearner => "comments_from_learner",
            Collection::CommentsFromLms => "comments_from_lms",
            Collection::Interactions => "interactions",
            Collection::Objectives => "objectives",
        }
    }

    /// `cmi.<collection>._count`
    pub fn count_key(self) -> String {
        format!("cmi.{}._count", self.name())
    }

    /// `cmi.<collection>.<index>.<field>`
    pub fn field_key(self, index: usize, field: &str) -> String {
        format!("cmi.{}.{}.{}", self.name(), index, field)
    }
}

/// `cmi.interactions.<i>.objectives._count`
pub fn interaction_objectives_count(index: usize) -> String {
    Collection::Interactions.field_key(index, "objectives._count")
}

/// `cmi.interactions.<i>.objectives.<x>.id`
pub fn interaction_objective_id(index: usize, objective: usize) -> String {
    Collection::Interactions.field_key(index, &format!("objectives.{objective}.id"))
}

/// `cmi.interactions.<i>.correct_responses._count`
pub fn interaction_correct_responses_count(index: usize) -> String {
    Collection::Interactions.field_key(index, "correct_responses._count")
}

/// `cmi.interactions.<i>.correct_responses.<x>.pattern`
pub fn interaction_correct_response_pattern(index: usize, response: usize) -> String {
    Collection::Interactions.field_key(index, &format!("correct_responses.{response}.pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keys() {
        assert_eq!(Collection::Interactions.count_key(), "cmi.interactions._count");
        assert_eq!(
            Collection::CommentsFromLearner.field_key(2, comment::TIMESTAMP),
            "cmi.comments_from_learner.2.timestamp"
        );
        assert_eq!(
            Collection::Objectives.field_key(0, objective::SCORE_SCALED),
            "cmi.objectives.0.score.scaled"
        );
    }

    #[test]
    fn nested_interaction_keys() {
        assert_eq!(interaction_objective_id(1, 3), "cmi.interactions.1.objectives.3.id");
        assert_eq!(
            interaction_correct_response_pattern(0, 0),
            "cmi.interactions.0.correct_responses.0.pattern"
        );
        assert_eq!(
            interaction_correct_responses_count(4),
            "cmi.interactions.4.correct_responses._count"
        );
    }
}
