pub mod bridge;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod keys;
pub mod lifecycle;
pub mod record;

// Re-export common types
pub use bridge::{BridgeCall, BridgeResult, HostRequest, RequestId, RuntimeBridge};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigRoot, EngineConfig, IdScheme};
pub use error::{BridgeError, Result, ScormError};
pub use export::{LimitConditions, PackageMetadata};
pub use lifecycle::{EngineState, LifecycleEvent};
pub use record::{
    Comment, ElementList, Identified, Interaction, LearnerPreference, Objective, Score,
    SessionRecord,
};
