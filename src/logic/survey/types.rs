//! Survey Types
//!
//! Core input/output types of the assessment engine.
//! No scoring logic here - only data structures and domain parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SurveyError;

// ============================================================================
// ANSWER DOMAINS
// ============================================================================

/// Ordinal frequency answer (never < sometimes < often < always)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[serde(alias = "nunca")]
    Never,
    #[serde(alias = "a_veces")]
    Sometimes,
    #[serde(alias = "a_menudo")]
    Often,
    #[serde(alias = "siempre")]
    Always,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Never,
        Frequency::Sometimes,
        Frequency::Often,
        Frequency::Always,
    ];

    /// Ordinal code 0..=3
    pub fn code(&self) -> u32 {
        match self {
            Frequency::Never => 0,
            Frequency::Sometimes => 1,
            Frequency::Often => 2,
            Frequency::Always => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Never => "never",
            Frequency::Sometimes => "sometimes",
            Frequency::Often => "often",
            Frequency::Always => "always",
        }
    }

    /// Parse a wire value, rejecting anything outside the four levels
    ///
    /// Matches the serde names exactly; no trimming or case folding.
    pub fn parse(field: &str, value: &str) -> Result<Self, SurveyError> {
        match value {
            "never" | "nunca" => Ok(Frequency::Never),
            "sometimes" | "a_veces" => Ok(Frequency::Sometimes),
            "often" | "a_menudo" => Ok(Frequency::Often),
            "always" | "siempre" => Ok(Frequency::Always),
            _ => Err(SurveyError::InvalidFrequency {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Binary answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    #[serde(alias = "si")]
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn parse(field: &str, value: &str) -> Result<Self, SurveyError> {
        match value {
            "yes" | "si" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            _ => Err(SurveyError::InvalidYesNo {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

// ============================================================================
// SURVEY INPUT
// ============================================================================

/// Structured survey submitted for one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyInput {
    /// Headaches or stomach aches before school (psychosomatic)
    pub headache_stomach: Frequency,
    /// Sudden mood changes or irritability
    pub mood_changes: Frequency,
    /// Trouble sleeping or nightmares
    pub sleep_problems: Frequency,
    /// Resistance or anxiety about going to school
    pub school_resistance: Frequency,
    /// School materials damaged or lost
    pub damaged_items: YesNo,
    /// The student has verbally reported a conflict
    pub conflict_verbalized: YesNo,
    /// Free-text conflict details
    #[serde(default)]
    pub conflict_details: Option<String>,
}

impl SurveyInput {
    pub const FREQUENCY_FIELDS: [&'static str; 4] = [
        "headache_stomach",
        "mood_changes",
        "sleep_problems",
        "school_resistance",
    ];

    pub const YES_NO_FIELDS: [&'static str; 2] = ["damaged_items", "conflict_verbalized"];

    /// All-never / all-no survey
    pub fn baseline() -> Self {
        Self {
            headache_stomach: Frequency::Never,
            mood_changes: Frequency::Never,
            sleep_problems: Frequency::Never,
            school_resistance: Frequency::Never,
            damaged_items: YesNo::No,
            conflict_verbalized: YesNo::No,
            conflict_details: None,
        }
    }

    /// Ordinal answers in scoring order
    pub fn frequencies(&self) -> [Frequency; 4] {
        [
            self.headache_stomach,
            self.mood_changes,
            self.sleep_problems,
            self.school_resistance,
        ]
    }

    /// Parse and validate a JSON survey payload
    ///
    /// Unlike plain deserialization, this reports which field is out of domain.
    pub fn from_json(raw: &str) -> Result<Self, SurveyError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SurveyError::Malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, SurveyError> {
        let object = value
            .as_object()
            .ok_or_else(|| SurveyError::Malformed("survey is not a JSON object".to_string()))?;

        let text = |field: &str| -> Result<String, SurveyError> {
            match object.get(field) {
                None | Some(serde_json::Value::Null) => {
                    Err(SurveyError::MissingField(field.to_string()))
                }
                Some(serde_json::Value::String(s)) => Ok(s.clone()),
                Some(other) => Ok(other.to_string()),
            }
        };

        let frequency = |field: &str| -> Result<Frequency, SurveyError> {
            Frequency::parse(field, &text(field)?)
        };
        let yes_no = |field: &str| -> Result<YesNo, SurveyError> {
            YesNo::parse(field, &text(field)?)
        };

        let conflict_details = match object.get("conflict_details") {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        };

        Ok(Self {
            headache_stomach: frequency("headache_stomach")?,
            mood_changes: frequency("mood_changes")?,
            sleep_problems: frequency("sleep_problems")?,
            school_resistance: frequency("school_resistance")?,
            damaged_items: yes_no("damaged_items")?,
            conflict_verbalized: yes_no("conflict_verbalized")?,
            conflict_details,
        })
    }
}

impl Default for SurveyInput {
    fn default() -> Self {
        Self::baseline()
    }
}

// ============================================================================
// RISK TIER
// ============================================================================

/// Risk tier, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    /// Triggers immediate escalation downstream
    #[serde(alias = "critical")]
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    /// HIGH or CRITICAL
    pub fn is_elevated(&self) -> bool {
        *self >= RiskTier::High
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// Result of one heuristic assessment. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysisResult {
    pub total_score: u32,
    pub risk_level: RiskTier,
    pub flags: Vec<String>,
    pub recommendation: String,
}

// ============================================================================
// CLASSROOM OBSERVATION
// ============================================================================

/// Free-text note written by a supervising adult about a classroom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassObservation {
    pub id: Uuid,
    /// Supervising adult who wrote the note
    pub author_id: String,
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}

impl ClassObservation {
    pub fn new(author_id: &str, content: &str) -> Self {
        Self::at(author_id, content, Utc::now())
    }

    pub fn at(author_id: &str, content: &str, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            recorded_at,
        }
    }
}
