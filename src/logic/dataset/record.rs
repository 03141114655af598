use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::survey::RiskTier;

/// Expert annotation resolved after the fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertLabel {
    /// Confirmed bullying case
    RealCase,
    /// Flagged, but not a case
    FalsePositive,
    /// Missed, but turned out to be a case
    FalseNegative,
}

impl ExpertLabel {
    /// Unknown annotations read as "no annotation"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "real_case" | "confirmed_case" => Some(ExpertLabel::RealCase),
            "false_positive" => Some(ExpertLabel::FalsePositive),
            "false_negative" => Some(ExpertLabel::FalseNegative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertLabel::RealCase => "real_case",
            ExpertLabel::FalsePositive => "false_positive",
            ExpertLabel::FalseNegative => "false_negative",
        }
    }
}

/// One historical survey as supplied by the persistence collaborator
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HistoricalRecord {
    #[serde(default)]
    pub id: Option<String>,

    /// Raw questionnaire answers (JSON object of `p_item_N` codes)
    #[serde(default)]
    pub raw_answers: Option<String>,

    /// Free-form annotation; see `ExpertLabel::parse`
    #[serde(default)]
    pub expert_label: Option<String>,

    /// Tier assigned by the heuristic at submission time
    #[serde(default)]
    pub risk_level: Option<RiskTier>,

    /// Supervising adult currently assigned to the student
    #[serde(default)]
    pub teacher_id: Option<String>,

    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl HistoricalRecord {
    pub fn expert(&self) -> Option<ExpertLabel> {
        self.expert_label.as_deref().and_then(ExpertLabel::parse)
    }
}
