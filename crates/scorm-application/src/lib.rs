//! Application layer for scorm-sync.
//!
//! Provides the [`SyncEngine`], which owns the session record and keeps it in
//! step with the LMS through a [`scorm_core::RuntimeBridge`].

pub mod engine;
pub mod events;
pub mod report;

pub use engine::{Appended, SyncEngine};
pub use events::{EventBus, SubscriptionId};
pub use report::LogAndContinue;
