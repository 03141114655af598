//! Model Trainer - historical records in, committed artifact out

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::report::TrainingReport;
use crate::config::EngineConfig;
use crate::error::TrainingError;
use crate::logic::context::ContextSignalExtractor;
use crate::logic::dataset::{resolve_label, HistoricalRecord, HistoricalSource, LabelSource};
use crate::logic::features::{FeatureBuilder, FeatureVector};
use crate::logic::model::{ArtifactStore, ForestConfig, ModelArtifact, RandomForest, TrainingSet};

/// Examples ready for fitting
#[derive(Debug, Clone, Default)]
pub struct PreparedDataset {
    pub set: TrainingSet,
    pub skipped: usize,
    pub expert_labels: usize,
}

pub struct ModelTrainer {
    store: Arc<ArtifactStore>,
    forest: ForestConfig,
    builder: FeatureBuilder,
    extractor: ContextSignalExtractor,
    /// Held for the whole retrain; a second caller fails fast
    running: Mutex<()>,
}

impl ModelTrainer {
    pub fn new(store: Arc<ArtifactStore>, forest: ForestConfig) -> Self {
        Self {
            store,
            forest,
            builder: FeatureBuilder::new(),
            extractor: ContextSignalExtractor::default(),
            running: Mutex::new(()),
        }
    }

    pub fn from_config(config: &EngineConfig, store: Arc<ArtifactStore>) -> Self {
        Self::new(store, config.forest.clone())
            .with_extractor(ContextSignalExtractor::new(config.observation_window))
    }

    pub fn with_extractor(mut self, extractor: ContextSignalExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn store(&self) -> &Arc<ArtifactStore> {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.running.is_locked()
    }

    /// Turn historical records into labelled feature rows
    ///
    /// The atmosphere feature of every record uses the supervising adult's
    /// *current* latest notes, not the notes at the time of the survey.
    pub fn build_dataset<S>(&self, source: &S) -> Result<PreparedDataset, TrainingError>
    where
        S: HistoricalSource + ?Sized,
    {
        let records = source.survey_records()?;
        let mut prepared = PreparedDataset {
            set: TrainingSet::for_layout(),
            ..Default::default()
        };
        let mut atmosphere_by_teacher: HashMap<String, f64> = HashMap::new();

        for record in &records {
            let atmosphere = match record.teacher_id.as_deref() {
                Some(teacher) => match atmosphere_by_teacher.get(teacher) {
                    Some(&score) => score,
                    None => {
                        let notes = source.recent_observations(teacher, self.extractor.window())?;
                        let score = self.extractor.score(&notes);
                        atmosphere_by_teacher.insert(teacher.to_string(), score);
                        score
                    }
                },
                None => 0.0,
            };

            let Some(vector) = self.vectorize(record, atmosphere) else {
                prepared.skipped += 1;
                continue;
            };

            let decision = resolve_label(record.expert(), record.risk_level);
            if decision.source == LabelSource::Expert {
                prepared.expert_labels += 1;
            }
            prepared.set.push_vector(&vector, decision.label);
        }

        Ok(prepared)
    }

    fn vectorize(&self, record: &HistoricalRecord, atmosphere: f64) -> Option<FeatureVector> {
        let id = record.id.as_deref().unwrap_or("?");
        let Some(raw) = record.raw_answers.as_deref() else {
            log::debug!("Record {} skipped: no raw answers", id);
            return None;
        };

        match self.builder.build_from_json(raw, atmosphere) {
            Ok(vector) => Some(vector),
            Err(e) => {
                log::debug!("Record {} skipped: {}", id, e);
                None
            }
        }
    }

    /// Fit a new forest, persist it and make it current
    ///
    /// On any failure the previous artifact stays authoritative.
    pub fn train<S>(&self, source: &S) -> Result<TrainingReport, TrainingError>
    where
        S: HistoricalSource + ?Sized,
    {
        let _guard = self.running.try_lock().ok_or(TrainingError::AlreadyRunning)?;

        let prepared = self.build_dataset(source)?;
        if prepared.set.is_empty() {
            log::warn!("Retrain aborted: no usable records ({} skipped)", prepared.skipped);
            return Err(TrainingError::EmptyDataset { skipped: prepared.skipped });
        }

        let mut forest = RandomForest::new(self.forest.clone());
        forest.fit(&prepared.set);
        let training_accuracy = forest.accuracy(&prepared.set);

        let artifact = ModelArtifact::new(forest, prepared.set.len())?;
        let artifact = self.store.commit(artifact)?;

        let report = TrainingReport {
            artifact_id: artifact.id,
            trained_at: artifact.trained_at,
            samples: prepared.set.len(),
            skipped: prepared.skipped,
            positives: prepared.set.positives(),
            negatives: prepared.set.negatives(),
            expert_labels: prepared.expert_labels,
            classes: artifact.classes().to_vec(),
            training_accuracy,
            path: self.store.path().map(|p| p.to_path_buf()),
        };

        log::info!(
            "Model {} trained on {} samples ({} positive, {} skipped), accuracy {:.3}",
            report.artifact_id,
            report.samples,
            report.positives,
            report.skipped,
            report.training_accuracy
        );
        if report.is_degenerate() {
            log::warn!("Training data has a single class {:?}; predictions will be constant", report.classes);
        }

        Ok(report)
    }
}
