use super::types::{ExplainResult, FeatureAttribution, FeatureContribution};
use crate::logic::features::{feature_name, FeatureVector};

/// Strongest contributions considered for the text
pub const TOP_FACTORS: usize = 3;

pub const RISK_FACTORS_PREFIX: &str = "Risk factors: ";
pub const LOW_RISK_TEXT: &str = "Low risk factors detected.";

/// All features ordered by |contribution|, strongest first (ties keep layout order)
pub fn rank(attribution: &FeatureAttribution, vector: &FeatureVector) -> Vec<FeatureContribution> {
    let mut contributions: Vec<FeatureContribution> = attribution
        .values
        .iter()
        .enumerate()
        .map(|(i, &contribution)| {
            let name = feature_name(i).unwrap_or("unknown").to_string();
            FeatureContribution {
                description: get_description(&name),
                value: vector.get(i).unwrap_or(0.0),
                contribution,
                name,
            }
        })
        .collect();

    contributions.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    contributions
}

/// Top factors that increased risk, plus the rendered text
pub fn explain(attribution: &FeatureAttribution, vector: &FeatureVector) -> ExplainResult {
    let contributions: Vec<FeatureContribution> = rank(attribution, vector)
        .into_iter()
        .take(TOP_FACTORS)
        .filter(|c| c.contribution > 0.0)
        .collect();

    let text = render(&contributions);
    ExplainResult { contributions, text }
}

pub fn render(contributions: &[FeatureContribution]) -> String {
    if contributions.is_empty() {
        return LOW_RISK_TEXT.to_string();
    }

    let parts: Vec<String> = contributions
        .iter()
        .map(|c| format!("{} ({:.2})", c.name, c.contribution))
        .collect();
    format!("{}{}", RISK_FACTORS_PREFIX, parts.join(", "))
}

fn get_description(name: &str) -> Option<String> {
    match name {
        "p_item_2" => Some("Injuries or bruises reported".to_string()),
        "p_item_5" => Some("Coercion or threats reported".to_string()),
        "teacher_sentiment" => Some("Tense classroom atmosphere in recent notes".to_string()),
        _ => None,
    }
}
