//! Bulk load: rebuilds the session record from the LMS during initialize.
//!
//! Reads are strictly sequential and follow a fixed order. Any read failure
//! aborts the load.

use scorm_core::codec::{
    AudioCaptioning, CmiVocabulary, InteractionResult, interval_to_seconds, parse_count, parse_real,
    parse_timestamp,
};
use scorm_core::keys::{self, Collection, comment, interaction, objective};
use scorm_core::{
    Comment, ElementList, IdScheme, Interaction, LearnerPreference, Objective, Result,
    RuntimeBridge, Score, SessionRecord,
};

pub(crate) struct BulkLoader<'a> {
    bridge: &'a dyn RuntimeBridge,
    ids: &'a IdScheme,
}

impl<'a> BulkLoader<'a> {
    pub(crate) fn new(bridge: &'a dyn RuntimeBridge, ids: &'a IdScheme) -> Self {
        Self { bridge, ids }
    }

    pub(crate) async fn load(&self) -> Result<SessionRecord> {
        let mut record = SessionRecord::new();

        record.version = self.read(keys::VERSION).await?;

        record.comments_from_learner = self.comments(Collection::CommentsFromLearner).await?;
        record.comments_from_lms = self.comments(Collection::CommentsFromLms).await?;

        record.completion_status = self.vocabulary(keys::COMPLETION_STATUS).await?;
        record.completion_threshold = self.real(keys::COMPLETION_THRESHOLD).await?;
        record.credit = self.vocabulary(keys::CREDIT).await?;
        record.entry = self.vocabulary(keys::ENTRY).await?;

        record.interactions = self.interactions().await?;

        record.launch_data = self.read(keys::LAUNCH_DATA).await?;
        record.learner_id = self.read(keys::LEARNER_ID).await?;
        record.learner_name = self.read(keys::LEARNER_NAME).await?;

        record.learner_preference = LearnerPreference {
            audio_level: self.real(keys::PREFERENCE_AUDIO_LEVEL).await?,
            language: self.read(keys::PREFERENCE_LANGUAGE).await?,
            delivery_speed: self.real(keys::PREFERENCE_DELIVERY_SPEED).await?,
            audio_captioning: AudioCaptioning::decode(
                &self.read(keys::PREFERENCE_AUDIO_CAPTIONING).await?,
            ),
        };

        record.location = self.read(keys::LOCATION).await?;

        record.objectives = self.objectives().await?;

        record.max_time_allowed = self.interval(keys::MAX_TIME_ALLOWED).await?;
        record.mode = self.vocabulary(keys::MODE).await?;
        record.progress_measure = self.real(keys::PROGRESS_MEASURE).await?;
        record.scaled_passing_score = self.real(keys::SCALED_PASSING_SCORE).await?;

        record.score = Score {
            scaled: self.real(keys::SCORE_SCALED).await?,
            raw: self.real(keys::SCORE_RAW).await?,
            max: self.real(keys::SCORE_MAX).await?,
            min: self.real(keys::SCORE_MIN).await?,
        };

        record.success_status = self.vocabulary(keys::SUCCESS_STATUS).await?;
        record.suspend_data = self.read(keys::SUSPEND_DATA).await?;
        record.time_limit_action = self.vocabulary(keys::TIME_LIMIT_ACTION).await?;
        record.total_time = self.interval(keys::TOTAL_TIME).await?;

        tracing::debug!(
            "[BulkLoad] Loaded {} interactions, {} objectives, {} learner comments, {} LMS comments",
            record.interactions.len(),
            record.objectives.len(),
            record.comments_from_learner.len(),
            record.comments_from_lms.len()
        );
        Ok(record)
    }

    async fn comments(&self, collection: Collection) -> Result<ElementList<Comment>> {
        let count = self.count(&collection.count_key()).await?;
        let mut list = ElementList::new();
        for i in 0..count {
            let key = |field: &str| collection.field_key(i, field);
            let entry = Comment {
                id: self.ids.id_for(collection, i),
                comment: self.read(&key(comment::COMMENT)).await?,
                location: self.read(&key(comment::LOCATION)).await?,
                timestamp: self.timestamp(&key(comment::TIMESTAMP)).await?,
            };
            list.push(entry);
        }
        Ok(list)
    }

    async fn interactions(&self) -> Result<ElementList<Interaction>> {
        let collection = Collection::Interactions;
        let count = self.count(&collection.count_key()).await?;
        let mut list = ElementList::new();
        for i in 0..count {
            let key = |field: &str| collection.field_key(i, field);

            let mut entry = Interaction {
                id: self.read(&key(interaction::ID)).await?,
                interaction_type: self.vocabulary(&key(interaction::TYPE)).await?,
                timestamp: self.timestamp(&key(interaction::TIMESTAMP)).await?,
                weighting: self.real(&key(interaction::WEIGHTING)).await?,
                learner_response: self.read(&key(interaction::LEARNER_RESPONSE)).await?,
                latency: self.interval(&key(interaction::LATENCY)).await?,
                description: self.read(&key(interaction::DESCRIPTION)).await?,
                ..Default::default()
            };
            entry.result = InteractionResult::decode(&self.read(&key(interaction::RESULT)).await?);

            let objectives = self.count(&keys::interaction_objectives_count(i)).await?;
            for x in 0..objectives {
                let id = self.read(&keys::interaction_objective_id(i, x)).await?;
                entry.objective_ids.push(id);
            }

            let responses = self
                .count(&keys::interaction_correct_responses_count(i))
                .await?;
            for x in 0..responses {
                let pattern = self
                    .read(&keys::interaction_correct_response_pattern(i, x))
                    .await?;
                entry.correct_response_patterns.push(pattern);
            }

            list.push(entry);
        }
        Ok(list)
    }

    async fn objectives(&self) -> Result<ElementList<Objective>> {
        let collection = Collection::Objectives;
        let count = self.count(&collection.count_key()).await?;
        let mut list = ElementList::new();
        for i in 0..count {
            let key = |field: &str| collection.field_key(i, field);
            let entry = Objective {
                id: self.read(&key(objective::ID)).await?,
                score: Score {
                    scaled: self.real(&key(objective::SCORE_SCALED)).await?,
                    raw: self.real(&key(objective::SCORE_RAW)).await?,
                    max: self.real(&key(objective::SCORE_MAX)).await?,
                    min: self.real(&key(objective::SCORE_MIN)).await?,
                },
                success_status: self.vocabulary(&key(objective::SUCCESS_STATUS)).await?,
                completion_status: self.vocabulary(&key(objective::COMPLETION_STATUS)).await?,
                progress_measure: self.real(&key(objective::PROGRESS_MEASURE)).await?,
                description: self.read(&key(objective::DESCRIPTION)).await?,
            };
            list.push(entry);
        }
        Ok(list)
    }

    async fn read(&self, key: &str) -> Result<String> {
        match self.bridge.get_value(key).await {
            Ok(value) => {
                tracing::trace!("[BulkLoad] {} = {:?}", key, value);
                Ok(value)
            }
            Err(e) => {
                tracing::error!("[BulkLoad] Reading {} failed: {}", key, e);
                Err(e.into())
            }
        }
    }

    async fn count(&self, key: &str) -> Result<usize> {
        Ok(parse_count(&self.read(key).await?))
    }

    async fn real(&self, key: &str) -> Result<f64> {
        Ok(parse_real(&self.read(key).await?))
    }

    async fn interval(&self, key: &str) -> Result<f64> {
        Ok(interval_to_seconds(&self.read(key).await?))
    }

    async fn timestamp(&self, key: &str) -> Result<Option<chrono::NaiveDateTime>> {
        Ok(parse_timestamp(&self.read(key).await?))
    }

    async fn vocabulary<V: CmiVocabulary>(&self, key: &str) -> Result<V> {
        Ok(V::decode(&self.read(key).await?))
    }
}
