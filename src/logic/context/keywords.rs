//! Atmosphere Keyword Sets & Weights
//!
//! Constants only - no scoring logic.
//!
//! Each group is one concept with its spelling variants (English and the
//! legacy Spanish terms). A group counts once per note no matter how many
//! of its variants appear, so bilingual variants never double count.

/// A keyword concept and the substrings that signal it
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub concept: &'static str,
    pub variants: &'static [&'static str],
}

impl KeywordGroup {
    /// `text` must already be lower-cased
    pub fn matches(&self, text: &str) -> bool {
        self.variants.iter().any(|v| text.contains(v))
    }
}

/// Negative climate signals
pub const NEGATIVE_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup { concept: "conflict", variants: &["conflict", "conflicto"] },
    KeywordGroup { concept: "aggression", variants: &["aggressi", "agresión", "agresion"] },
    KeywordGroup { concept: "fight", variants: &["fight", "pelea"] },
    KeywordGroup { concept: "insult", variants: &["insult"] },
    KeywordGroup { concept: "rumor", variants: &["rumor", "rumour"] },
    KeywordGroup { concept: "threat", variants: &["threat", "amenaza"] },
    KeywordGroup { concept: "bullying", variants: &["bullying", "bullied"] },
    KeywordGroup { concept: "harassment", variants: &["harass", "acoso"] },
    KeywordGroup { concept: "hitting", variants: &["hitting", "golpe"] },
    KeywordGroup { concept: "crying", variants: &["crying", "cried", "llanto"] },
    KeywordGroup { concept: "fear", variants: &["fear", "afraid", "miedo"] },
    KeywordGroup { concept: "isolation", variants: &["isolat", "aislad"] },
];

/// Positive climate signals
pub const POSITIVE_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup { concept: "normal", variants: &["normal"] },
    KeywordGroup { concept: "fine", variants: &["fine", "bien"] },
    KeywordGroup { concept: "calm", variants: &["calm", "tranquil"] },
    KeywordGroup { concept: "positive", variants: &["positive", "positivo"] },
    KeywordGroup { concept: "improved", variants: &["improv", "mejora"] },
    KeywordGroup { concept: "adequate", variants: &["adequate", "adecuad"] },
    KeywordGroup { concept: "collaborative", variants: &["collaborat", "colaborativ"] },
];

/// Base risk of a note with at least one negative signal
pub const NEGATIVE_BASE_RISK: f64 = 0.2;

/// Added per matched negative concept
pub const NEGATIVE_STEP: f64 = 0.1;

/// Risk of a note with no keyword at all (uncertainty)
pub const NEUTRAL_RISK: f64 = 0.05;

/// Risk of a note with only positive signals
pub const POSITIVE_RISK: f64 = 0.0;

/// Upper bound of the aggregate score
pub const MAX_ATMOSPHERE: f64 = 1.0;
