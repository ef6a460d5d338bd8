//! Value codecs between typed session fields and data model strings.
//!
//! - `duration`: `timeinterval` ↔ seconds
//! - `vocabulary`: enum ↔ string tables for every controlled vocabulary
//! - `numeric`: lenient integer/real parsing and formatting
//! - `timestamp`: sortable date-time strings

pub mod duration;
pub mod numeric;
pub mod timestamp;
pub mod vocabulary;

pub use duration::{interval_to_seconds, seconds_to_interval};
pub use numeric::{format_real, parse_count, parse_integer, parse_real};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use vocabulary::{
    AudioCaptioning, CmiVocabulary, CompletionStatus, Credit, Entry, Exit, InteractionResult,
    InteractionType, Mode, SuccessStatus, TimeLimitAction,
};
