//! Artifact Store - the shared, swappable model slot
//!
//! Readers clone the `Arc` under a short read lock and predict lock-free;
//! a retrain persists first and then swaps under the write lock.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::artifact::ModelArtifact;
use crate::error::ArtifactError;

#[derive(Debug)]
pub struct ArtifactStore {
    path: Option<PathBuf>,
    current: RwLock<Option<Arc<ModelArtifact>>>,
}

impl ArtifactStore {
    /// Empty store backed by `path`; nothing is read yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            current: RwLock::new(None),
        }
    }

    /// Store without a backing file (commits only swap)
    pub fn ephemeral() -> Self {
        Self { path: None, current: RwLock::new(None) }
    }

    /// Store backed by `path`, loading whatever valid artifact is there
    ///
    /// A missing or invalid file leaves the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        match store.reload() {
            Ok(true) => {}
            Ok(false) => log::info!("No model artifact yet, predictions report untrained"),
            Err(e) => log::warn!("Ignoring unusable model artifact: {}", e),
        }
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn current(&self) -> Option<Arc<ModelArtifact>> {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Replace the in-memory artifact without touching disk
    pub fn swap(&self, artifact: Arc<ModelArtifact>) -> Option<Arc<ModelArtifact>> {
        self.current.write().replace(artifact)
    }

    /// Persist (when backed by a file), then make it current
    pub fn commit(&self, artifact: ModelArtifact) -> Result<Arc<ModelArtifact>, ArtifactError> {
        if let Some(path) = &self.path {
            artifact.save(path)?;
        }

        let artifact = Arc::new(artifact);
        self.swap(Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Re-read the backing file; `Ok(false)` if there is none
    ///
    /// On error the current artifact is kept.
    pub fn reload(&self) -> Result<bool, ArtifactError> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        if !path.exists() {
            return Ok(false);
        }

        let artifact = ModelArtifact::load(path)?;
        self.swap(Arc::new(artifact));
        Ok(true)
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::ephemeral()
    }
}
