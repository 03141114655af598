//! Assessment Service - one entry point over the scorer and the predictor
//!
//! The heuristic baseline is always produced; the model prediction is added
//! when item answers are supplied.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineResult, FeatureError};
use crate::logic::context::{select_recent, ContextSignalExtractor};
use crate::logic::features::{FeatureBuilder, FeatureVector, ItemAnswers};
use crate::logic::heuristic::HeuristicScorer;
use crate::logic::model::ArtifactStore;
use crate::logic::predictor::{RiskPrediction, RiskPredictor};
use crate::logic::survey::{ClassObservation, RiskAnalysisResult, SurveyInput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub analysis: RiskAnalysisResult,
    /// Classroom atmosphere in [0, 1]
    pub atmosphere: f64,
    pub prediction: Option<RiskPrediction>,
}

#[derive(Debug, Clone)]
pub struct AssessmentService {
    scorer: HeuristicScorer,
    extractor: ContextSignalExtractor,
    builder: FeatureBuilder,
    predictor: RiskPredictor,
}

impl AssessmentService {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            scorer: HeuristicScorer::new(),
            extractor: ContextSignalExtractor::default(),
            builder: FeatureBuilder::new(),
            predictor: RiskPredictor::new(store),
        }
    }

    /// Opens the configured artifact (missing file = untrained)
    pub fn from_config(config: &EngineConfig) -> Self {
        let store = Arc::new(ArtifactStore::open(&config.model_path));
        Self::new(store).with_extractor(ContextSignalExtractor::new(config.observation_window))
    }

    pub fn with_scorer(mut self, scorer: HeuristicScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_extractor(mut self, extractor: ContextSignalExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn store(&self) -> &Arc<ArtifactStore> {
        self.predictor.store()
    }

    pub fn analyze(&self, survey: &SurveyInput) -> RiskAnalysisResult {
        self.scorer.analyze(survey)
    }

    /// Atmosphere of the latest notes; order of `observations` doesn't matter
    pub fn atmosphere(&self, observations: &[ClassObservation]) -> f64 {
        let recent = select_recent(observations, self.extractor.window());
        self.extractor.score(&recent)
    }

    pub fn features(
        &self,
        answers: &ItemAnswers,
        observations: &[ClassObservation],
    ) -> Result<FeatureVector, FeatureError> {
        self.builder.build(answers, self.atmosphere(observations))
    }

    pub fn predict(
        &self,
        answers: &ItemAnswers,
        observations: &[ClassObservation],
    ) -> Result<RiskPrediction, FeatureError> {
        let vector = self.features(answers, observations)?;
        Ok(self.predictor.predict(&vector))
    }

    /// Same as `predict`, from the raw JSON answers object
    pub fn predict_raw(
        &self,
        raw_answers: &str,
        observations: &[ClassObservation],
    ) -> Result<RiskPrediction, FeatureError> {
        let answers = ItemAnswers::from_json(raw_answers)?;
        self.predict(&answers, observations)
    }

    pub fn assess(
        &self,
        survey: &SurveyInput,
        answers: Option<&ItemAnswers>,
        observations: &[ClassObservation],
    ) -> EngineResult<Assessment> {
        let analysis = self.analyze(survey);
        let atmosphere = self.atmosphere(observations);

        let prediction = match answers {
            Some(answers) => {
                let vector = self.builder.build(answers, atmosphere)?;
                Some(self.predictor.predict(&vector))
            }
            None => None,
        };

        log::debug!(
            "Assessment: score {} tier {} atmosphere {:.2} model {}",
            analysis.total_score,
            analysis.risk_level,
            atmosphere,
            prediction.as_ref().map_or("skipped", |p| if p.model_available { "used" } else { "unavailable" })
        );

        Ok(Assessment { analysis, atmosphere, prediction })
    }
}
