use super::record::{ExpertLabel, HistoricalRecord};
use super::source::{HistoricalSource, MemorySource};
use crate::logic::survey::{ClassObservation, RiskTier};
use chrono::{Duration, TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_record_deserialization() {
    let record: HistoricalRecord = serde_json::from_str(
        r#"{
            "id": "s-1",
            "raw_answers": "{\"p_item_2\": 3}",
            "expert_label": "false_positive",
            "risk_level": "high",
            "teacher_id": "t-9"
        }"#,
    )
    .unwrap();

    assert_eq!(record.expert(), Some(ExpertLabel::FalsePositive));
    assert_eq!(record.risk_level, Some(RiskTier::High));
    assert_eq!(record.teacher_id.as_deref(), Some("t-9"));
    assert!(record.submitted_at.is_none());
}

#[test]
fn test_recent_observations_filters_by_author() {
    let base = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let mut source = MemorySource::default();

    for i in 0..8 {
        source.push_observation(ClassObservation::at("t-1", &format!("note {}", i), base + Duration::hours(i)));
    }
    source.push_observation(ClassObservation::at("t-2", "other class", base + Duration::days(3)));

    let recent = source.recent_observations("t-1", 5).unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|o| o.author_id == "t-1"));
    assert_eq!(recent[0].content, "note 7");

    assert!(source.recent_observations("nobody", 5).unwrap().is_empty());
}

#[test]
fn test_jsonl_loading_skips_malformed_lines() {
    let dir = tempdir().unwrap();
    let surveys = dir.path().join("surveys.jsonl");
    let observations = dir.path().join("observations.jsonl");

    let good = HistoricalRecord {
        id: Some("a".to_string()),
        raw_answers: Some("{}".to_string()),
        risk_level: Some(RiskTier::Low),
        ..Default::default()
    };
    let note = ClassObservation::new("t-1", "calm day");

    fs::write(
        &surveys,
        format!("{}\n\n{{ not json\n{}\n", serde_json::to_string(&good).unwrap(), serde_json::to_string(&good).unwrap()),
    )
    .unwrap();
    fs::write(&observations, format!("{}\n", serde_json::to_string(&note).unwrap())).unwrap();

    let source = MemorySource::from_jsonl(&surveys, Some(&observations)).unwrap();
    assert_eq!(source.len(), 2);
    assert_eq!(source.recent_observations("t-1", 5).unwrap(), vec![note]);
}

#[test]
fn test_missing_file_is_a_source_error() {
    let dir = tempdir().unwrap();
    let result = MemorySource::from_jsonl(&dir.path().join("absent.jsonl"), None);
    assert!(result.is_err());
}
