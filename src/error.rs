//! Error types for ctxplan
//!
//! Each concern owns a `thiserror` enum; `PlanError` gathers them for callers
//! that cross layers.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::entities::SolutionError;
use crate::domain::ports::{ContextSetError, IndexError, LayerDiscoveryError};
use crate::domain::services::RunError;
use crate::infrastructure::{DocumentError, InventoryError};

/// Result type alias for ctxplan operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Main error type for ctxplan operations
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Solution(#[from] SolutionError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    ContextSet(#[from] ContextSetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    LayerDiscovery(#[from] LayerDiscoveryError),
}
