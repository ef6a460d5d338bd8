use super::list::Identified;
use super::model::Score;
use crate::codec::{CompletionStatus, SuccessStatus};
use serde::{Deserialize, Serialize};

/// One entry of `cmi.objectives`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub score: Score,
    pub success_status: SuccessStatus,
    pub completion_status: CompletionStatus,
    /// 0..1
    pub progress_measure: f64,
    pub description: String,
}

impl Objective {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

impl Identified for Objective {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
