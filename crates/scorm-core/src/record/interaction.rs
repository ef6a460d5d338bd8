use super::list::Identified;
use crate::codec::{InteractionResult, InteractionType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of `cmi.interactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub interaction_type: InteractionType,
    pub timestamp: Option<NaiveDateTime>,
    pub weighting: f64,
    pub learner_response: String,
    pub result: InteractionResult,
    /// Seconds between presentation and the learner's response.
    pub latency: f64,
    pub description: String,
    /// Ids of the objectives this interaction contributes to.
    pub objective_ids: Vec<String>,
    pub correct_response_patterns: Vec<String>,
}

impl Interaction {
    pub fn new(interaction_type: InteractionType) -> Self {
        Self {
            interaction_type,
            ..Default::default()
        }
    }

    pub fn with_response(mut self, response: impl Into<String>, result: InteractionResult) -> Self {
        self.learner_response = response.into();
        self.result = result;
        self
    }

    pub fn with_objective(mut self, objective_id: impl Into<String>) -> Self {
        self.objective_ids.push(objective_id.into());
        self
    }

    pub fn with_correct_response(mut self, pattern: impl Into<String>) -> Self {
        self.correct_response_patterns.push(pattern.into());
        self
    }
}

impl Identified for Interaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
