use super::*;
use crate::error::TrainingError;
use crate::logic::dataset::{HistoricalRecord, HistoricalSource, MemorySource};
use crate::logic::features::ATMOSPHERE_INDEX;
use crate::logic::model::{ArtifactStore, ForestConfig, ModelArtifact};
use crate::logic::survey::{ClassObservation, RiskTier};
use std::sync::{mpsc, Arc, Mutex};
use tempfile::tempdir;

fn record(id: &str, answers: &str, tier: RiskTier, expert: Option<&str>) -> HistoricalRecord {
    HistoricalRecord {
        id: Some(id.to_string()),
        raw_answers: Some(answers.to_string()),
        expert_label: expert.map(str::to_string),
        risk_level: Some(tier),
        teacher_id: Some("t-1".to_string()),
        ..Default::default()
    }
}

fn history() -> MemorySource {
    let mut source = MemorySource::default();
    for i in 0..30 {
        let code = i % 5;
        let tier = if code >= 3 { RiskTier::High } else { RiskTier::Low };
        let answers = format!(r#"{{"p_item_2": {}, "p_item_9": "{}"}}"#, code, (i * 2) % 5);
        source.push_record(record(&format!("s-{}", i), &answers, tier, None));
    }
    source.push_observation(ClassObservation::new("t-1", "there was a fight at recess"));
    source
}

fn trainer(store: Arc<ArtifactStore>) -> ModelTrainer {
    ModelTrainer::new(store, ForestConfig { n_trees: 12, ..Default::default() })
}

#[test]
fn test_build_dataset_skips_unparseable_records() {
    let mut source = history();
    source.push_record(record("bad-json", "{ nope", RiskTier::High, None));
    source.push_record(record("bad-item", r#"{"p_item_1": "often"}"#, RiskTier::High, None));
    source.push_record(HistoricalRecord::default());

    let prepared = trainer(Arc::new(ArtifactStore::ephemeral())).build_dataset(&source).unwrap();

    assert_eq!(prepared.set.len(), 30);
    assert_eq!(prepared.skipped, 3);
}

#[test]
fn test_atmosphere_uses_current_notes() {
    let prepared = trainer(Arc::new(ArtifactStore::ephemeral())).build_dataset(&history()).unwrap();

    // one negative keyword -> 0.3 for every record of that adult
    assert!(prepared
        .set
        .features
        .iter()
        .all(|row| (row[ATMOSPHERE_INDEX] - 0.3).abs() < 1e-12));
}

#[test]
fn test_expert_labels_counted_and_applied() {
    let mut source = MemorySource::default();
    source.push_record(record("a", r#"{"p_item_1": 0}"#, RiskTier::Low, Some("real_case")));
    source.push_record(record("b", r#"{"p_item_1": 4}"#, RiskTier::Critical, Some("false_positive")));
    source.push_record(record("c", r#"{"p_item_1": 1}"#, RiskTier::Medium, Some("unknown_tag")));

    let prepared = trainer(Arc::new(ArtifactStore::ephemeral())).build_dataset(&source).unwrap();

    assert_eq!(prepared.set.labels, vec![1, 0, 0]);
    assert_eq!(prepared.expert_labels, 2);
}

#[test]
fn test_train_commits_and_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_v1.json");
    let store = Arc::new(ArtifactStore::new(&path));

    let report = trainer(Arc::clone(&store)).train(&history()).unwrap();

    assert_eq!(report.samples, 30);
    assert_eq!(report.positives, 12);
    assert_eq!(report.negatives, 18);
    assert_eq!(report.classes, vec![0, 1]);
    assert!(report.training_accuracy > 0.9);
    assert_eq!(report.path.as_deref(), Some(path.as_path()));
    assert_eq!(store.current().unwrap().id, report.artifact_id);
    assert!(path.exists());
}

#[test]
fn test_predictions_survive_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_v1.json");
    let store = Arc::new(ArtifactStore::new(&path));
    trainer(Arc::clone(&store)).train(&history()).unwrap();

    let in_memory = store.current().unwrap();
    let reloaded = ModelArtifact::load(&path).unwrap();

    for row in &trainer(Arc::new(ArtifactStore::ephemeral()))
        .build_dataset(&history())
        .unwrap()
        .set
        .features
    {
        assert_eq!(in_memory.probability(row), reloaded.probability(row));
    }
}

#[test]
fn test_empty_dataset_keeps_previous_artifact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_v1.json");
    let store = Arc::new(ArtifactStore::new(&path));
    let trainer = trainer(Arc::clone(&store));

    let first = trainer.train(&history()).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut junk = MemorySource::default();
    junk.push_record(record("x", "not json", RiskTier::High, None));
    let err = trainer.train(&junk).unwrap_err();

    assert!(matches!(err, TrainingError::EmptyDataset { skipped: 1 }));
    assert_eq!(store.current().unwrap().id, first.artifact_id);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_empty_dataset_without_prior_model_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_v1.json");
    let store = Arc::new(ArtifactStore::new(&path));

    let err = trainer(Arc::clone(&store)).train(&MemorySource::default()).unwrap_err();

    assert!(matches!(err, TrainingError::EmptyDataset { skipped: 0 }));
    assert!(!path.exists());
    assert!(!store.is_loaded());
}

/// Blocks inside `survey_records` until released
struct GatedSource {
    inner: MemorySource,
    entered: mpsc::SyncSender<()>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl HistoricalSource for GatedSource {
    fn survey_records(&self) -> Result<Vec<HistoricalRecord>, TrainingError> {
        self.entered.send(()).ok();
        self.release.lock().unwrap().recv().ok();
        self.inner.survey_records()
    }

    fn recent_observations(&self, teacher_id: &str, limit: usize) -> Result<Vec<ClassObservation>, TrainingError> {
        self.inner.recent_observations(teacher_id, limit)
    }
}

#[test]
fn test_concurrent_retrain_fails_fast() {
    let trainer = trainer(Arc::new(ArtifactStore::ephemeral()));
    let (entered_tx, entered_rx) = mpsc::sync_channel(1);
    let (release_tx, release_rx) = mpsc::channel();
    let gated = GatedSource {
        inner: history(),
        entered: entered_tx,
        release: Mutex::new(release_rx),
    };

    std::thread::scope(|s| {
        let first = s.spawn(|| trainer.train(&gated));

        entered_rx.recv().unwrap();
        assert!(trainer.is_running());
        assert!(matches!(trainer.train(&history()), Err(TrainingError::AlreadyRunning)));

        release_tx.send(()).unwrap();
        assert!(first.join().unwrap().is_ok());
    });

    assert!(!trainer.is_running());
    assert!(trainer.store().is_loaded());
}
