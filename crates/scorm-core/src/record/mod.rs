//! Session Record types.

mod comment;
mod interaction;
mod list;
mod model;
mod objective;

pub use comment::Comment;
pub use interaction::Interaction;
pub use list::{ElementList, Identified};
pub use model::{LearnerPreference, Score, SessionRecord};
pub use objective::Objective;
