//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Training rows, prediction vectors and model artifacts all carry the
//! version and layout hash; a mismatch is always detected, never coerced.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Questionnaire items (0-12), ordinal codes ===
    "p_item_1",
    "p_item_2",          // 1: Injuries or bruises (physical violence)
    "p_item_3",
    "p_item_4",
    "p_item_5",          // 4: Coercion or threats
    "p_item_6",
    "p_item_7",
    "p_item_8",
    "p_item_9",
    "p_item_10",
    "p_item_11",
    "p_item_12",
    "p_item_13",

    // === Classroom context (13) ===
    "teacher_sentiment", // 13: Atmosphere score in [0, 1]
];

/// Number of ordinal questionnaire items
pub const ITEM_COUNT: usize = 13;

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = ITEM_COUNT + 1;

/// Index of the atmosphere feature
pub const ATMOSPHERE_INDEX: usize = ITEM_COUNT;

/// Physical-violence item (1-based)
pub const PHYSICAL_VIOLENCE_ITEM: usize = 2;

/// Coercion/threats item (1-based)
pub const THREATS_ITEM: usize = 5;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the version byte and the ordered feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Feature layout doesn't match the running engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Vector index of a 1-based questionnaire item
pub fn item_index(item: usize) -> Option<usize> {
    (1..=ITEM_COUNT).contains(&item).then(|| item - 1)
}

/// Wire key of a 1-based questionnaire item
pub fn item_key(item: usize) -> String {
    format!("p_item_{}", item)
}

// ============================================================================
// TESTS
// ============================================================================
