pub mod paths;
pub mod storage;

pub use crate::paths::ScormPaths;
pub use crate::storage::ConfigStorage;
