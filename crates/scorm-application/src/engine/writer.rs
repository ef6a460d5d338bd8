//! Write sequences: the ordered `(key, value)` pairs each write-through sends.

use scorm_core::codec::{CmiVocabulary, format_real, format_timestamp, seconds_to_interval};
use scorm_core::keys::{self, Collection, comment, interaction, objective};
use scorm_core::{Comment, Interaction, LearnerPreference, Objective, Score};

pub(crate) type FieldWrites = Vec<(String, String)>;

pub(crate) fn session_score(score: &Score) -> FieldWrites {
    vec![
        (keys::SCORE_SCALED.to_string(), format_real(score.scaled)),
        (keys::SCORE_RAW.to_string(), format_real(score.raw)),
        (keys::SCORE_MAX.to_string(), format_real(score.max)),
        (keys::SCORE_MIN.to_string(), format_real(score.min)),
    ]
}

pub(crate) fn learner_preference(preference: &LearnerPreference) -> FieldWrites {
    vec![
        (
            keys::PREFERENCE_AUDIO_LEVEL.to_string(),
            format_real(preference.audio_level),
        ),
        (
            keys::PREFERENCE_LANGUAGE.to_string(),
            preference.language.clone(),
        ),
        (
            keys::PREFERENCE_DELIVERY_SPEED.to_string(),
            format_real(preference.delivery_speed),
        ),
        (
            keys::PREFERENCE_AUDIO_CAPTIONING.to_string(),
            preference.audio_captioning.encode(),
        ),
    ]
}

/// `comment`, `location`, `timestamp`. The id is never sent.
pub(crate) fn comment(collection: Collection, index: usize, entry: &Comment) -> FieldWrites {
    vec![
        (
            collection.field_key(index, comment::COMMENT),
            entry.comment.clone(),
        ),
        (
            collection.field_key(index, comment::LOCATION),
            entry.location.clone(),
        ),
        (
            collection.field_key(index, comment::TIMESTAMP),
            format_timestamp(entry.timestamp),
        ),
    ]
}

/// Every interaction field, nested lists last. Updates leave out the id.
pub(crate) fn interaction(index: usize, entry: &Interaction, include_id: bool) -> FieldWrites {
    let key = |field: &str| Collection::Interactions.field_key(index, field);

    let mut writes = Vec::with_capacity(
        8 + entry.objective_ids.len() + entry.correct_response_patterns.len(),
    );
    if include_id {
        writes.push((key(interaction::ID), entry.id.clone()));
    }
    writes.push((
        key(interaction::TYPE),
        entry.interaction_type.encode().to_string(),
    ));
    writes.push((key(interaction::TIMESTAMP), format_timestamp(entry.timestamp)));
    writes.push((key(interaction::WEIGHTING), format_real(entry.weighting)));
    writes.push((
        key(interaction::LEARNER_RESPONSE),
        entry.learner_response.clone(),
    ));
    writes.push((key(interaction::RESULT), entry.result.encode()));
    writes.push((key(interaction::LATENCY), seconds_to_interval(entry.latency)));
    writes.push((key(interaction::DESCRIPTION), entry.description.clone()));

    for (x, objective_id) in entry.objective_ids.iter().enumerate() {
        writes.push((keys::interaction_objective_id(index, x), objective_id.clone()));
    }
    for (x, pattern) in entry.correct_response_patterns.iter().enumerate() {
        writes.push((
            keys::interaction_correct_response_pattern(index, x),
            pattern.clone(),
        ));
    }
    writes
}

/// The nine objective fields, id first.
pub(crate) fn objective(index: usize, entry: &Objective) -> FieldWrites {
    let key = |field: &str| Collection::Objectives.field_key(index, field);
    vec![
        (key(objective::ID), entry.id.clone()),
        (key(objective::SCORE_SCALED), format_real(entry.score.scaled)),
        (key(objective::SCORE_RAW), format_real(entry.score.raw)),
        (key(objective::SCORE_MAX), format_real(entry.score.max)),
        (key(objective::SCORE_MIN), format_real(entry.score.min)),
        (
            key(objective::SUCCESS_STATUS),
            entry.success_status.encode().to_string(),
        ),
        (
            key(objective::COMPLETION_STATUS),
            entry.completion_status.encode().to_string(),
        ),
        (
            key(objective::PROGRESS_MEASURE),
            format_real(entry.progress_measure),
        ),
        (key(objective::DESCRIPTION), entry.description.clone()),
    ]
}
