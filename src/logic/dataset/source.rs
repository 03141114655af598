use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::record::HistoricalRecord;
use crate::error::TrainingError;
use crate::logic::context::select_recent;
use crate::logic::survey::ClassObservation;

/// Historical data collaborator consumed by the trainer
pub trait HistoricalSource {
    /// All surveys with resolved labels, in one bulk read
    fn survey_records(&self) -> Result<Vec<HistoricalRecord>, TrainingError>;

    /// Latest notes by a supervising adult, newest first, at most `limit`
    fn recent_observations(
        &self,
        teacher_id: &str,
        limit: usize,
    ) -> Result<Vec<ClassObservation>, TrainingError>;
}

/// In-memory source (tests, callers that already hold the rows)
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<HistoricalRecord>,
    observations: Vec<ClassObservation>,
}

impl MemorySource {
    pub fn new(records: Vec<HistoricalRecord>, observations: Vec<ClassObservation>) -> Self {
        Self { records, observations }
    }

    pub fn push_record(&mut self, record: HistoricalRecord) {
        self.records.push(record);
    }

    pub fn push_observation(&mut self, observation: ClassObservation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load surveys and (optionally) observations from JSON-lines files
    ///
    /// Lines that fail to deserialize are skipped.
    pub fn from_jsonl(surveys: &Path, observations: Option<&Path>) -> Result<Self, TrainingError> {
        let records = read_jsonl(surveys).map_err(|e| {
            TrainingError::Source(format!("{}: {}", surveys.display(), e))
        })?;

        let observations = match observations {
            Some(path) => read_jsonl(path)
                .map_err(|e| TrainingError::Source(format!("{}: {}", path.display(), e)))?,
            None => Vec::new(),
        };

        log::info!(
            "Loaded {} survey record(s) and {} observation(s)",
            records.len(),
            observations.len()
        );

        Ok(Self::new(records, observations))
    }
}

impl HistoricalSource for MemorySource {
    fn survey_records(&self) -> Result<Vec<HistoricalRecord>, TrainingError> {
        Ok(self.records.clone())
    }

    fn recent_observations(
        &self,
        teacher_id: &str,
        limit: usize,
    ) -> Result<Vec<ClassObservation>, TrainingError> {
        let authored: Vec<ClassObservation> = self
            .observations
            .iter()
            .filter(|o| o.author_id == teacher_id)
            .cloned()
            .collect();

        Ok(select_recent(&authored, limit))
    }
}

/// Read a JSON-lines file, skipping blank and malformed lines
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> io::Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(row) => rows.push(row),
            Err(e) => log::debug!("{}:{} skipped: {}", path.display(), line_no + 1, e),
        }
    }

    Ok(rows)
}
