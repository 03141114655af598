//! Context Module
//!
//! Converts free-text classroom observations into a bounded
//! "classroom atmosphere" indicator in [0, 1].

pub mod keywords;
pub mod atmosphere;

pub use atmosphere::{select_recent, ContextSignalExtractor, KeywordHits};
