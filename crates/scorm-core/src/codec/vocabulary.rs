//! Controlled vocabularies of the CMI data model.
//!
//! Every vocabulary is a closed enum whose wire strings are declared once on
//! the variants; decoding and encoding are derived from that single table.
//! `NotSet` stands for "no value received" and encodes as `""`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Bidirectional mapping between a vocabulary enum and its wire strings.
pub trait CmiVocabulary:
    Copy + Default + PartialEq + FromStr + Into<&'static str> + IntoEnumIterator
{
    /// Decodes a wire value. Unknown and empty values decode to the default
    /// (`NotSet`) variant.
    fn decode(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    /// Encodes the variant as its wire string.
    fn encode(self) -> &'static str {
        self.into()
    }

    fn is_set(self) -> bool {
        self != Self::default()
    }
}

/// `cmi.completion_status`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "completed")]
    Completed,
    #[strum(serialize = "incomplete")]
    Incomplete,
    #[strum(serialize = "not attempted")]
    NotAttempted,
    #[strum(serialize = "unknown")]
    Unknown,
}

/// `cmi.success_status`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum SuccessStatus {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "passed")]
    Passed,
    #[strum(serialize = "failed")]
    Failed,
    #[strum(serialize = "unknown")]
    Unknown,
}

/// `cmi.credit`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Credit {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "credit")]
    Credit,
    #[strum(serialize = "no-credit")]
    NoCredit,
}

/// `cmi.entry`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "ab-initio")]
    AbInitio,
    #[strum(serialize = "resume")]
    Resume,
}

/// `cmi.mode`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "browse")]
    Browse,
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "review")]
    Review,
}

/// `cmi.exit` (write-only)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Exit {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "time-out")]
    Timeout,
    #[strum(serialize = "suspend")]
    Suspend,
    #[strum(serialize = "logout")]
    Logout,
    #[strum(serialize = "normal")]
    Normal,
}

/// `cmi.time_limit_action`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeLimitAction {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "exit,message")]
    ExitMessage,
    #[strum(serialize = "exit,no message")]
    ExitNoMessage,
    #[strum(serialize = "continue,message")]
    ContinueMessage,
    #[strum(serialize = "continue,no message")]
    ContinueNoMessage,
}

/// `cmi.interactions.n.type`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    #[default]
    #[strum(serialize = "")]
    NotSet,
    #[strum(serialize = "true-false")]
    TrueFalse,
    #[strum(serialize = "choice")]
    Choice,
    #[strum(serialize = "fill-in")]
    FillIn,
    #[strum(serialize = "long-fill-in")]
    LongFillIn,
    #[strum(serialize = "matching")]
    Matching,
    #[strum(serialize = "performance")]
    Performance,
    #[strum(serialize = "sequencing")]
    Sequencing,
    #[strum(serialize = "likert")]
    Likert,
    #[strum(serialize = "numeric")]
    Numeric,
    #[strum(serialize = "other")]
    Other,
}

impl CmiVocabulary for CompletionStatus {}
impl CmiVocabulary for SuccessStatus {}
impl CmiVocabulary for Credit {}
impl CmiVocabulary for Entry {}
impl CmiVocabulary for Mode {}
impl CmiVocabulary for Exit {}
impl CmiVocabulary for TimeLimitAction {}
impl CmiVocabulary for InteractionType {}

/// `cmi.interactions.n.result`: one of the symbolic outcomes or a numeric
/// estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InteractionResult {
    #[default]
    NotSet,
    Correct,
    Incorrect,
    Neutral,
    Unanticipated,
    Estimate(f64),
}

impl InteractionResult {
    /// Every variant that has a symbolic wire form.
    pub const SYMBOLIC: [InteractionResult; 5] = [
        InteractionResult::NotSet,
        InteractionResult::Correct,
        InteractionResult::Incorrect,
        InteractionResult::Neutral,
        InteractionResult::Unanticipated,
    ];

    /// A value that parses as a finite number is an estimate; otherwise the
    /// symbolic table applies and anything unknown is `NotSet`.
    pub fn decode(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(estimate) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
            return InteractionResult::Estimate(estimate);
        }
        match raw {
            "correct" => InteractionResult::Correct,
            "incorrect" => InteractionResult::Incorrect,
            "neutral" => InteractionResult::Neutral,
            "unanticipated" => InteractionResult::Unanticipated,
            _ => InteractionResult::NotSet,
        }
    }

    pub fn encode(self) -> String {
        match self {
            InteractionResult::NotSet => String::new(),
            InteractionResult::Correct => "correct".to_string(),
            InteractionResult::Incorrect => "incorrect".to_string(),
            InteractionResult::Neutral => "neutral".to_string(),
            InteractionResult::Unanticipated => "unanticipated".to_string(),
            InteractionResult::Estimate(value) => super::numeric::format_real(value),
        }
    }
}

/// `cmi.learner_preference.audio_captioning`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCaptioning {
    Off,
    #[default]
    NoChange,
    On,
}

impl AudioCaptioning {
    pub fn from_level(level: i64) -> Self {
        match level {
            -1 => AudioCaptioning::Off,
            1 => AudioCaptioning::On,
            _ => AudioCaptioning::NoChange,
        }
    }

    pub fn level(self) -> i64 {
        match self {
            AudioCaptioning::Off => -1,
            AudioCaptioning::NoChange => 0,
            AudioCaptioning::On => 1,
        }
    }

    pub fn decode(raw: &str) -> Self {
        Self::from_level(super::numeric::parse_integer(raw))
    }

    pub fn encode(self) -> String {
        self.level().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trips<V: CmiVocabulary + std::fmt::Debug>() {
        for variant in V::iter() {
            assert_eq!(V::decode(variant.encode()), variant, "{variant:?}");
        }
        assert_eq!(V::decode(""), V::default());
        assert_eq!(V::default().encode(), "");
        assert_eq!(V::decode("definitely-not-a-token"), V::default());
    }

    #[test]
    fn every_vocabulary_round_trips() {
        assert_round_trips::<CompletionStatus>();
        assert_round_trips::<SuccessStatus>();
        assert_round_trips::<Credit>();
        assert_round_trips::<Entry>();
        assert_round_trips::<Mode>();
        assert_round_trips::<Exit>();
        assert_round_trips::<TimeLimitAction>();
        assert_round_trips::<InteractionType>();
    }

    #[test]
    fn not_attempted_has_a_space() {
        assert_eq!(CompletionStatus::NotAttempted.encode(), "not attempted");
        assert_eq!(
            CompletionStatus::decode("not attempted"),
            CompletionStatus::NotAttempted
        );
        assert_eq!(
            CompletionStatus::decode("not_attempted"),
            CompletionStatus::NotSet
        );
    }

    #[test]
    fn hyphenated_tokens() {
        assert_eq!(Credit::NoCredit.encode(), "no-credit");
        assert_eq!(Entry::decode("ab-initio"), Entry::AbInitio);
        assert_eq!(InteractionType::decode("long-fill-in"), InteractionType::LongFillIn);
        assert_eq!(
            TimeLimitAction::decode("continue,no message"),
            TimeLimitAction::ContinueNoMessage
        );
    }

    #[test]
    fn result_prefers_numeric_estimate() {
        assert_eq!(InteractionResult::decode("0.75"), InteractionResult::Estimate(0.75));
        assert_eq!(InteractionResult::decode("correct"), InteractionResult::Correct);
        assert_eq!(InteractionResult::decode("bogus"), InteractionResult::NotSet);
        assert_eq!(InteractionResult::decode(""), InteractionResult::NotSet);
        assert_eq!(InteractionResult::decode("inf"), InteractionResult::NotSet);
    }

    #[test]
    fn result_symbolic_round_trip() {
        for variant in InteractionResult::SYMBOLIC {
            assert_eq!(InteractionResult::decode(&variant.encode()), variant);
        }
        assert_eq!(InteractionResult::Estimate(0.5).encode(), "0.5");
    }

    #[test]
    fn audio_captioning_is_tri_state() {
        assert_eq!(AudioCaptioning::decode("-1"), AudioCaptioning::Off);
        assert_eq!(AudioCaptioning::decode("1"), AudioCaptioning::On);
        assert_eq!(AudioCaptioning::decode("0"), AudioCaptioning::NoChange);
        assert_eq!(AudioCaptioning::decode("7"), AudioCaptioning::NoChange);
        assert_eq!(AudioCaptioning::decode(""), AudioCaptioning::NoChange);
        assert_eq!(AudioCaptioning::Off.encode(), "-1");
    }
}
