//! Concrete runtime bridges.
//!
//! - [`CallbackBridge`]: talks to an asynchronous host API whose replies come
//!   back as `"<value>|<request>"` callbacks.
//! - [`RecordingBridge`]: an in-memory LMS that logs every call.

pub mod callback_bridge;
pub mod recording_bridge;

pub use callback_bridge::{CallbackBridge, HostApi};
pub use recording_bridge::RecordingBridge;
