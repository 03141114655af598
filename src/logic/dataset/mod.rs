//! Dataset Module - Historical Training Data
//!
//! Historical survey records, the label precedence rules, and the
//! collaborator trait the trainer reads from.

pub mod record;
pub mod labels;
pub mod source;

#[cfg(test)]
mod tests;

pub use record::{ExpertLabel, HistoricalRecord};
pub use labels::{resolve_label, LabelDecision, LabelRule, LabelSource, LABEL_RULES};
pub use source::{read_jsonl, HistoricalSource, MemorySource};
