//! Layer discovery adapters

mod fs_discovery;

use std::path::PathBuf;

pub use fs_discovery::{FsLayerDiscovery, IGNORE_FILE};

use crate::domain::entities::Layer;
use crate::domain::ports::{LayerDiscovery, LayerDiscoveryError};

/// Fixed set of layers, independent of the search path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayerDiscovery {
    layers: Vec<Layer>,
}

impl InMemoryLayerDiscovery {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

impl LayerDiscovery for InMemoryLayerDiscovery {
    fn list_layers(&self, _search_paths: &[PathBuf]) -> Result<Vec<Layer>, LayerDiscoveryError> {
        Ok(self.layers.clone())
    }
}
