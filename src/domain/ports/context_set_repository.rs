//! ContextSetRepository port

use std::path::PathBuf;

use crate::domain::entities::ContextSet;

pub trait ContextSetRepository: Send + Sync {
    /// `Ok(None)` when no context set has been saved.
    fn load(&self) -> Result<Option<ContextSet>, ContextSetError>;
    fn save(&self, set: &ContextSet) -> Result<(), ContextSetError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextSetError {
    #[error("failed to access context set: {message}")]
    AccessError { message: String },

    #[error("invalid context set {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}
