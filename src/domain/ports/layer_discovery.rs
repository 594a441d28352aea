//! LayerDiscovery port
//!
//! Lists the layers reachable on a search path.

use std::path::PathBuf;

use crate::domain::entities::Layer;

pub trait LayerDiscovery: Send + Sync {
    /// Layers found under `search_paths`, in path order then file order.
    fn list_layers(&self, search_paths: &[PathBuf]) -> Result<Vec<Layer>, LayerDiscoveryError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayerDiscoveryError {
    #[error("layer search path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("invalid layer file {path}: {message}")]
    InvalidLayer { path: PathBuf, message: String },

    #[error("failed to walk layer search path: {message}")]
    WalkFailed { message: String },
}
