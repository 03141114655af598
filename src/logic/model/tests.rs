use super::*;
use crate::error::ArtifactError;
use crate::logic::features::{FeatureVectorBuilder, FEATURE_COUNT};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn fitted(n_trees: usize) -> RandomForest {
    let mut data = TrainingSet::for_layout();
    for i in 0..40usize {
        let code = (i % 5) as i64;
        let v = FeatureVectorBuilder::new()
            .item(2, code)
            .item(7, ((i * 3) % 5) as i64)
            .teacher_sentiment((i % 4) as f64 / 4.0)
            .build();
        data.push_vector(&v, u8::from(code >= 3));
    }

    let mut forest = RandomForest::new(ForestConfig { n_trees, ..Default::default() });
    forest.fit(&data);
    forest
}

fn single_class(label: u8) -> RandomForest {
    let mut data = TrainingSet::for_layout();
    for i in 0..5 {
        data.push(vec![i as f64; FEATURE_COUNT], label);
    }
    let mut forest = RandomForest::new(ForestConfig { n_trees: 3, ..Default::default() });
    forest.fit(&data);
    forest
}

#[test]
fn test_save_load_preserves_predictions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("model_v1.json");

    let artifact = ModelArtifact::new(fitted(10), 40).unwrap();
    artifact.save(&path).unwrap();
    let loaded = ModelArtifact::load(&path).unwrap();

    assert_eq!(loaded, artifact);
    for code in 0..5 {
        let x = FeatureVectorBuilder::new().item(2, code).teacher_sentiment(0.25).build();
        assert_eq!(loaded.probability(x.as_slice()), artifact.probability(x.as_slice()));
    }
}

#[test]
fn test_tampered_artifact_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");

    let mut artifact = ModelArtifact::new(fitted(3), 40).unwrap();
    artifact.checksum = "00".repeat(32);
    fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

    assert!(matches!(
        ModelArtifact::load(&path),
        Err(ArtifactError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_layout_mismatch_is_rejected() {
    let mut artifact = ModelArtifact::new(fitted(3), 40).unwrap();
    artifact.layout_hash ^= 0xFFFF;
    assert!(matches!(artifact.validate(), Err(ArtifactError::Layout(_))));

    let mut artifact = ModelArtifact::new(fitted(3), 40).unwrap();
    artifact.format = 9;
    assert!(matches!(artifact.validate(), Err(ArtifactError::UnsupportedFormat(9))));
}

#[test]
fn test_single_class_probability() {
    let x = vec![0.0; FEATURE_COUNT];
    assert_eq!(ModelArtifact::new(single_class(1), 5).unwrap().probability(&x), 1.0);
    assert_eq!(ModelArtifact::new(single_class(0), 5).unwrap().probability(&x), 0.0);
}

#[test]
fn test_store_open_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::open(dir.path().join("absent.json"));
    assert!(!store.is_loaded());
    assert!(store.current().is_none());
}

#[test]
fn test_store_open_corrupt_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, b"{ not an artifact").unwrap();

    let store = ArtifactStore::open(&path);
    assert!(!store.is_loaded());
    assert!(store.reload().is_err());
}

#[test]
fn test_commit_persists_then_swaps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    let store = ArtifactStore::new(&path);

    let first = store.commit(ModelArtifact::new(fitted(3), 40).unwrap()).unwrap();
    let held = store.current().unwrap();
    let second = store.commit(ModelArtifact::new(fitted(4), 40).unwrap()).unwrap();

    // readers holding the old Arc keep it
    assert_eq!(held.id, first.id);
    assert_eq!(store.current().unwrap().id, second.id);

    let reopened = ArtifactStore::open(&path);
    assert_eq!(reopened.current().unwrap().id, second.id);
}

#[test]
fn test_ephemeral_store_only_swaps() {
    let store = ArtifactStore::ephemeral();
    let artifact = store.commit(ModelArtifact::new(fitted(2), 40).unwrap()).unwrap();

    assert!(store.path().is_none());
    assert!(Arc::ptr_eq(&artifact, &store.current().unwrap()));
    assert!(!store.reload().unwrap());
}
