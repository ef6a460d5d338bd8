//! Typed setters for the scalar and composite elements.

use super::{SyncEngine, writer};
use scorm_core::codec::{
    AudioCaptioning, CmiVocabulary, CompletionStatus, Exit, SuccessStatus, format_real,
    seconds_to_interval,
};
use scorm_core::keys;
use scorm_core::{LearnerPreference, Result, Score, ScormError, SessionRecord};

impl SyncEngine {
    /// Applies `apply` to the record, then writes `value` to `key`.
    async fn set_field<F>(
        &mut self,
        operation: &'static str,
        key: &str,
        value: String,
        apply: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut SessionRecord),
    {
        self.ensure_ready(operation)?;
        apply(&mut self.record);
        self.write(key, &value).await
    }

    fn check_length(&self, key: &'static str, limit: usize, value: &str) -> Result<()> {
        if !self.config.enforce_length_limits {
            return Ok(());
        }
        let actual = value.chars().count();
        if actual > limit {
            tracing::warn!(
                "[SyncEngine] {} rejected: {} characters exceeds {}",
                key,
                actual,
                limit
            );
            return Err(ScormError::ValueTooLong { key, limit, actual });
        }
        Ok(())
    }

    pub async fn set_completion_status(&mut self, status: CompletionStatus) -> Result<()> {
        self.set_field(
            "set_completion_status",
            keys::COMPLETION_STATUS,
            status.encode().to_string(),
            |r| r.completion_status = status,
        )
        .await
    }

    pub async fn set_success_status(&mut self, status: SuccessStatus) -> Result<()> {
        self.set_field(
            "set_success_status",
            keys::SUCCESS_STATUS,
            status.encode().to_string(),
            |r| r.success_status = status,
        )
        .await
    }

    /// Writes `cmi.exit`. Takes effect when the session terminates.
    pub async fn set_exit(&mut self, exit: Exit) -> Result<()> {
        self.set_field("set_exit", keys::EXIT, exit.encode().to_string(), |r| {
            r.exit = exit
        })
        .await
    }

    /// Writes the bookmark (at most 1000 characters).
    pub async fn set_location(&mut self, location: impl Into<String>) -> Result<()> {
        let location = location.into();
        self.ensure_ready("set_location")?;
        self.check_length(keys::LOCATION, keys::LOCATION_MAX_CHARS, &location)?;
        self.record.location = location.clone();
        self.write(keys::LOCATION, &location).await
    }

    /// Writes the suspend data (at most 64000 characters).
    pub async fn set_suspend_data(&mut self, data: impl Into<String>) -> Result<()> {
        let data = data.into();
        self.ensure_ready("set_suspend_data")?;
        self.check_length(keys::SUSPEND_DATA, keys::SUSPEND_DATA_MAX_CHARS, &data)?;
        self.record.suspend_data = data.clone();
        self.write(keys::SUSPEND_DATA, &data).await
    }

    pub async fn set_progress_measure(&mut self, measure: f64) -> Result<()> {
        self.set_field(
            "set_progress_measure",
            keys::PROGRESS_MEASURE,
            format_real(measure),
            |r| r.progress_measure = measure,
        )
        .await
    }

    /// Writes the time spent in this session, in seconds.
    pub async fn set_session_time(&mut self, seconds: f64) -> Result<()> {
        self.set_field(
            "set_session_time",
            keys::SESSION_TIME,
            seconds_to_interval(seconds),
            |r| r.session_time = seconds,
        )
        .await
    }

    /// Writes all four score fields: scaled, raw, max, min.
    pub async fn set_score(&mut self, score: Score) -> Result<()> {
        self.ensure_ready("set_score")?;
        self.record.score = score;
        self.write_all(writer::session_score(&score)).await
    }

    pub async fn set_score_scaled(&mut self, scaled: f64) -> Result<()> {
        self.set_field(
            "set_score_scaled",
            keys::SCORE_SCALED,
            format_real(scaled),
            |r| r.score.scaled = scaled,
        )
        .await
    }

    pub async fn set_score_raw(&mut self, raw: f64) -> Result<()> {
        self.set_field("set_score_raw", keys::SCORE_RAW, format_real(raw), |r| {
            r.score.raw = raw
        })
        .await
    }

    pub async fn set_score_min(&mut self, min: f64) -> Result<()> {
        self.set_field("set_score_min", keys::SCORE_MIN, format_real(min), |r| {
            r.score.min = min
        })
        .await
    }

    pub async fn set_score_max(&mut self, max: f64) -> Result<()> {
        self.set_field("set_score_max", keys::SCORE_MAX, format_real(max), |r| {
            r.score.max = max
        })
        .await
    }

    /// Writes audio level, language, delivery speed and audio captioning.
    pub async fn set_learner_preference(&mut self, preference: LearnerPreference) -> Result<()> {
        self.ensure_ready("set_learner_preference")?;
        let writes = writer::learner_preference(&preference);
        self.record.learner_preference = preference;
        self.write_all(writes).await
    }

    pub async fn set_audio_level(&mut self, level: f64) -> Result<()> {
        self.set_field(
            "set_audio_level",
            keys::PREFERENCE_AUDIO_LEVEL,
            format_real(level),
            |r| r.learner_preference.audio_level = level,
        )
        .await
    }

    pub async fn set_language(&mut self, language: impl Into<String>) -> Result<()> {
        let language = language.into();
        self.set_field(
            "set_language",
            keys::PREFERENCE_LANGUAGE,
            language.clone(),
            |r| r.learner_preference.language = language,
        )
        .await
    }

    pub async fn set_delivery_speed(&mut self, speed: f64) -> Result<()> {
        self.set_field(
            "set_delivery_speed",
            keys::PREFERENCE_DELIVERY_SPEED,
            format_real(speed),
            |r| r.learner_preference.delivery_speed = speed,
        )
        .await
    }

    pub async fn set_audio_captioning(&mut self, captioning: AudioCaptioning) -> Result<()> {
        self.set_field(
            "set_audio_captioning",
            keys::PREFERENCE_AUDIO_CAPTIONING,
            captioning.encode(),
            |r| r.learner_preference.audio_captioning = captioning,
        )
        .await
    }
}
