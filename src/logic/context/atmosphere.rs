//! Atmosphere Extractor
//!
//! Turns recent classroom notes into a "negative atmosphere" score:
//! 0.0 = good climate, 1.0 = bad climate.

use serde::{Deserialize, Serialize};

use super::keywords::{
    KeywordGroup, MAX_ATMOSPHERE, NEGATIVE_BASE_RISK, NEGATIVE_KEYWORDS, NEGATIVE_STEP,
    NEUTRAL_RISK, POSITIVE_KEYWORDS, POSITIVE_RISK,
};
use crate::constants::OBSERVATION_WINDOW;
use crate::logic::survey::ClassObservation;

/// Keyword hits for a single note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordHits {
    pub negative: usize,
    pub positive: usize,
}

impl KeywordHits {
    pub fn count(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            negative: count_groups(NEGATIVE_KEYWORDS, &lowered),
            positive: count_groups(POSITIVE_KEYWORDS, &lowered),
        }
    }

    /// Per-note risk; unbounded above, capped on aggregation
    pub fn risk(&self) -> f64 {
        if self.negative > 0 {
            NEGATIVE_BASE_RISK + NEGATIVE_STEP * self.negative as f64
        } else if self.positive > 0 {
            POSITIVE_RISK
        } else {
            NEUTRAL_RISK
        }
    }
}

fn count_groups(groups: &[KeywordGroup], lowered: &str) -> usize {
    groups.iter().filter(|g| g.matches(lowered)).count()
}

/// Context signal extractor
///
/// Pure function of its input window; holds only the window cap.
#[derive(Debug, Clone, Copy)]
pub struct ContextSignalExtractor {
    window: usize,
}

impl Default for ContextSignalExtractor {
    fn default() -> Self {
        Self { window: OBSERVATION_WINDOW }
    }
}

impl ContextSignalExtractor {
    /// Window is capped at `OBSERVATION_WINDOW`
    pub fn new(window: usize) -> Self {
        Self { window: window.min(OBSERVATION_WINDOW) }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Score a window of observations, most recent first
    ///
    /// Only the first `window` entries are read. Empty input returns 0.0.
    pub fn score(&self, observations: &[ClassObservation]) -> f64 {
        self.score_texts(observations.iter().map(|o| o.content.as_str()))
    }

    /// Score raw note texts, most recent first
    pub fn score_texts<'a, I>(&self, texts: I) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total = 0.0;
        let mut count = 0usize;

        for text in texts.into_iter().take(self.window) {
            total += KeywordHits::count(text).risk();
            count += 1;
        }

        if count == 0 {
            return 0.0;
        }

        (total / count as f64).min(MAX_ATMOSPHERE)
    }
}

/// Pick the most recent notes, newest first, capped at `limit`
pub fn select_recent(observations: &[ClassObservation], limit: usize) -> Vec<ClassObservation> {
    let mut recent = observations.to_vec();
    recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    recent.truncate(limit.min(OBSERVATION_WINDOW));
    recent
}

// ============================================================================
// TESTS
// ============================================================================
