//! Model Artifact - versioned, checksummed envelope around a trained forest
//!
//! Written atomically (temp file in the target directory, then rename) so a
//! reader never sees a half-written artifact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use uuid::Uuid;

use super::forest::RandomForest;
use crate::error::ArtifactError;
use crate::logic::features::layout::{layout_hash, validate_layout, FEATURE_VERSION};

/// Envelope format written by this build
pub const ARTIFACT_FORMAT: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: u8,
    pub id: Uuid,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub trained_at: DateTime<Utc>,
    pub sample_count: usize,
    /// SHA-256 (hex) of the serialized forest
    pub checksum: String,
    pub forest: RandomForest,
}

impl ModelArtifact {
    /// Wrap a freshly fitted forest for the current feature layout
    pub fn new(forest: RandomForest, sample_count: usize) -> Result<Self, ArtifactError> {
        let checksum = forest_checksum(&forest)?;
        Ok(Self {
            format: ARTIFACT_FORMAT,
            id: Uuid::new_v4(),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            trained_at: Utc::now(),
            sample_count,
            checksum,
            forest,
        })
    }

    pub fn classes(&self) -> &[u8] {
        self.forest.classes()
    }

    /// Format, layout and checksum checks
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(ArtifactError::UnsupportedFormat(self.format));
        }

        validate_layout(self.feature_version, self.layout_hash)?;

        let actual = forest_checksum(&self.forest)?;
        if actual != self.checksum {
            return Err(ArtifactError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        Ok(())
    }

    /// Class-1 probability for a raw feature row
    ///
    /// A forest that saw a single class answers 1.0 or 0.0 by that class.
    pub fn probability(&self, x: &[f64]) -> f64 {
        match self.classes() {
            [only] => {
                if *only == 1 { 1.0 } else { 0.0 }
            }
            _ => self.forest.predict_proba(x),
        }
    }

    /// Atomic save: temp file next to `path`, then rename over it
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let dir = parent_dir(path);
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_vec_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ArtifactError::Io(e.error))?;

        log::info!("Model artifact {} saved to {}", self.id, path.display());
        Ok(())
    }

    /// Load and verify an artifact
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let data = fs::read(path)?;
        let artifact: ModelArtifact = serde_json::from_slice(&data)?;
        artifact.validate()?;

        log::info!(
            "Model artifact {} loaded ({} samples, trained {})",
            artifact.id,
            artifact.sample_count,
            artifact.trained_at.to_rfc3339()
        );
        Ok(artifact)
    }
}

fn forest_checksum(forest: &RandomForest) -> Result<String, ArtifactError> {
    let bytes = serde_json::to_vec(forest)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
