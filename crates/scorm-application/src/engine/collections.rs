//! Append and update of the repeating collections.
//!
//! Appends take the next index, assign the id, write every field in a fixed
//! order and push the element. Updates keep the stored id and rewrite the
//! element in place.

use super::{Appended, SyncEngine, writer};
use scorm_core::keys::Collection;
use scorm_core::{Comment, Interaction, Objective, Result, ScormError};

impl SyncEngine {
    /// Id the next appended interaction will receive.
    pub fn next_interaction_id(&self) -> String {
        self.config.ids.id_for(
            Collection::Interactions,
            self.record.interactions.next_index(),
        )
    }

    /// Id the next appended objective will receive.
    pub fn next_objective_id(&self) -> String {
        self.config
            .ids
            .id_for(Collection::Objectives, self.record.objectives.next_index())
    }

    /// Appends a learner comment stamped with the current time.
    ///
    /// Writes `comment`, `location` and `timestamp`. The comment id is kept in
    /// memory only.
    pub async fn append_comment_from_learner(&mut self, mut comment: Comment) -> Result<Appended> {
        self.ensure_ready("append_comment_from_learner")?;
        let collection = Collection::CommentsFromLearner;
        let index = self.record.comments_from_learner.next_index();

        comment.id = self.config.ids.id_for(collection, index);
        comment.timestamp = Some(self.clock.now());
        let appended = Appended {
            index,
            id: comment.id.clone(),
        };
        let writes = writer::comment(collection, index, &comment);
        self.record.comments_from_learner.push(comment);

        self.write_all(writes).await?;
        Ok(appended)
    }

    pub async fn add_comment_from_learner_by_fields(
        &mut self,
        text: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Appended> {
        self.append_comment_from_learner(Comment::new(text, location))
            .await
    }

    /// Rewrites a learner comment, re-stamping its timestamp.
    pub async fn update_comment_from_learner(
        &mut self,
        index: usize,
        mut comment: Comment,
    ) -> Result<()> {
        self.ensure_ready("update_comment_from_learner")?;
        let collection = Collection::CommentsFromLearner;
        self.record
            .comments_from_learner
            .preserve_id(collection.name(), index, &mut comment)?;

        comment.timestamp = Some(self.clock.now());
        let writes = writer::comment(collection, index, &comment);
        self.record
            .comments_from_learner
            .replace(collection.name(), index, comment)?;

        self.write_all(writes).await
    }

    /// Appends an interaction.
    ///
    /// The id is always assigned by the engine. A missing timestamp is
    /// stamped with the current time.
    pub async fn append_interaction(&mut self, mut interaction: Interaction) -> Result<Appended> {
        self.ensure_ready("append_interaction")?;
        let index = self.record.interactions.next_index();

        interaction.id = self.config.ids.id_for(Collection::Interactions, index);
        if interaction.timestamp.is_none() {
            interaction.timestamp = Some(self.clock.now());
        }
        let appended = Appended {
            index,
            id: interaction.id.clone(),
        };
        let writes = writer::interaction(index, &interaction, true);
        self.record.interactions.push(interaction);

        tracing::debug!("[SyncEngine] Appending interaction {}", appended.id);
        self.write_all(writes).await?;
        Ok(appended)
    }

    /// Rewrites an interaction, re-stamping its timestamp.
    ///
    /// The nested objective and correct-response lists may grow but never
    /// shrink.
    pub async fn update_interaction(
        &mut self,
        index: usize,
        mut interaction: Interaction,
    ) -> Result<()> {
        self.ensure_ready("update_interaction")?;
        let collection = Collection::Interactions.name();
        self.record
            .interactions
            .preserve_id(collection, index, &mut interaction)?;

        let stored = &self.record.interactions[index];
        ensure_not_truncated(
            "interactions.objectives",
            stored.objective_ids.len(),
            interaction.objective_ids.len(),
        )?;
        ensure_not_truncated(
            "interactions.correct_responses",
            stored.correct_response_patterns.len(),
            interaction.correct_response_patterns.len(),
        )?;

        interaction.timestamp = Some(self.clock.now());
        let writes = writer::interaction(index, &interaction, false);
        self.record
            .interactions
            .replace(collection, index, interaction)?;

        self.write_all(writes).await
    }

    /// Appends an objective, writing its nine fields.
    pub async fn append_objective(&mut self, mut objective: Objective) -> Result<Appended> {
        self.ensure_ready("append_objective")?;
        let index = self.record.objectives.next_index();

        objective.id = self.config.ids.id_for(Collection::Objectives, index);
        let appended = Appended {
            index,
            id: objective.id.clone(),
        };
        let writes = writer::objective(index, &objective);
        self.record.objectives.push(objective);

        tracing::debug!("[SyncEngine] Appending objective {}", appended.id);
        self.write_all(writes).await?;
        Ok(appended)
    }

    /// Rewrites all nine fields of an objective under its stored id.
    pub async fn update_objective(&mut self, index: usize, mut objective: Objective) -> Result<()> {
        self.ensure_ready("update_objective")?;
        let collection = Collection::Objectives.name();
        self.record
            .objectives
            .preserve_id(collection, index, &mut objective)?;

        let writes = writer::objective(index, &objective);
        self.record
            .objectives
            .replace(collection, index, objective)?;

        self.write_all(writes).await
    }
}

fn ensure_not_truncated(collection: &'static str, existing: usize, requested: usize) -> Result<()> {
    if requested < existing {
        return Err(ScormError::CollectionTruncated {
            collection,
            existing,
            requested,
        });
    }
    Ok(())
}
