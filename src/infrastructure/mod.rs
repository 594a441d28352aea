//! Infrastructure Layer
//!
//! Concrete implementations of domain ports:
//! - `inventory`: installed packs, toolchains, boards and devices
//! - `layer`: layer discovery on the search path
//! - `documents`: YAML solution and layer documents
//! - `repositories`: build index and context set persistence

pub mod documents;
pub mod inventory;
pub mod layer;
pub mod repositories;

pub use documents::{load_solution, DocumentError};
pub use inventory::{InventoryError, StaticInventory};
pub use layer::{FsLayerDiscovery, InMemoryLayerDiscovery};
pub use repositories::{TomlBuildIndexRepository, YamlContextSetRepository};
