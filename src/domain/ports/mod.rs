//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_index_repository;
pub mod context_set_repository;
pub mod inventory;
pub mod layer_discovery;

pub use build_index_repository::{BuildIndexRepository, IndexError};
pub use context_set_repository::{ContextSetError, ContextSetRepository};
pub use inventory::{DeviceInventory, PackInventory, ToolchainInventory};
pub use layer_discovery::{LayerDiscovery, LayerDiscoveryError};
