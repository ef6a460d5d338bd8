use super::list::Identified;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of `cmi.comments_from_learner` or `cmi.comments_from_lms`.
///
/// The id never reaches the LMS; the data model has no comment id element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub comment: String,
    pub location: String,
    pub timestamp: Option<NaiveDateTime>,
}

impl Comment {
    pub fn new(comment: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            location: location.into(),
            ..Default::default()
        }
    }
}

impl Identified for Comment {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
