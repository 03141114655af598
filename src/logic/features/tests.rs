//! Feature builder tests

use super::builder::{FeatureBuilder, ItemAnswers};
use super::layout::{ATMOSPHERE_INDEX, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::error::FeatureError;

#[test]
fn test_missing_items_default_to_zero() {
    let answers = ItemAnswers::from_json(r#"{"p_item_3": 2}"#).unwrap();
    let vector = FeatureBuilder::new().build(&answers, 0.0).unwrap();

    assert_eq!(vector.item(3), 2.0);
    for item in [1, 2, 4, 5, 13] {
        assert_eq!(vector.item(item), 0.0);
    }
    assert_eq!(vector.values.len(), FEATURE_COUNT);
}

#[test]
fn test_codes_are_coerced_to_integers() {
    let answers = ItemAnswers::from_json(
        r#"{"p_item_1": "3", "p_item_2": 2.9, "p_item_4": true, "other": "ignored"}"#,
    )
    .unwrap();

    assert_eq!(answers.get(1), 3);
    assert_eq!(answers.get(2), 2);
    assert_eq!(answers.get(4), 1);
    assert_eq!(answers.answered(), 3);
}

#[test]
fn test_non_numeric_code_is_rejected() {
    let result = ItemAnswers::from_json(r#"{"p_item_6": "often"}"#);
    assert!(matches!(result, Err(FeatureError::NonNumeric { ref item, .. }) if item == "p_item_6"));

    let result = ItemAnswers::from_json(r#"{"p_item_6": null}"#);
    assert!(matches!(result, Err(FeatureError::NonNumeric { .. })));
}

#[test]
fn test_invalid_payloads() {
    assert!(matches!(ItemAnswers::from_json("not json"), Err(FeatureError::InvalidJson(_))));
    assert_eq!(ItemAnswers::from_json("[1, 2]"), Err(FeatureError::NotAnObject));
}

#[test]
fn test_atmosphere_placed_last() {
    let answers = ItemAnswers::new().with(2, 4);
    let vector = FeatureBuilder::new().build(&answers, 0.6).unwrap();

    assert_eq!(FEATURE_LAYOUT[ATMOSPHERE_INDEX], "teacher_sentiment");
    assert_eq!(vector.values[ATMOSPHERE_INDEX], 0.6);
    assert_eq!(vector.item(2), 4.0);
}

#[test]
fn test_atmosphere_out_of_range() {
    let builder = FeatureBuilder::new();
    let answers = ItemAnswers::new();
    assert!(matches!(builder.build(&answers, 1.5), Err(FeatureError::AtmosphereOutOfRange(_))));
    assert!(builder.build(&answers, f64::NAN).is_err());
}

#[test]
fn test_training_and_inference_vectors_match() {
    let raw = r#"{"p_item_1": 1, "p_item_7": 3, "p_item_13": 4}"#;
    let builder = FeatureBuilder::new();

    let from_json = builder.build_from_json(raw, 0.25).unwrap();
    let from_answers = builder
        .build(&ItemAnswers::new().with(1, 1).with(7, 3).with(13, 4), 0.25)
        .unwrap();

    assert_eq!(from_json, from_answers);
    assert_eq!(from_json.version, from_answers.version);
    assert_eq!(from_json.layout_hash, from_answers.layout_hash);
}
