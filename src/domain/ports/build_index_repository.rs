//! BuildIndexRepository port
//!
//! Persists the build index (pack lock, per-context layers and fingerprints).

use std::path::PathBuf;

use crate::domain::entities::BuildIndex;

pub trait BuildIndexRepository: Send + Sync {
    /// `Ok(None)` when no index has been written yet.
    fn load(&self) -> Result<Option<BuildIndex>, IndexError>;
    fn save(&self, index: &BuildIndex) -> Result<(), IndexError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("failed to access build index: {message}")]
    AccessError { message: String },

    #[error("failed to serialize build index: {message}")]
    SerializationError { message: String },

    #[error("build index corrupted: {path}\n  → Fix: delete it and run again without --frozen-packs\n  → Details: {message}")]
    Corrupted { path: PathBuf, message: String },
}
