//! File system LayerDiscovery implementation
//!
//! Walks each search path for `*.clayer.yml` documents. Hidden directories
//! and paths listed in `.gitignore` or `.ctxplanignore` are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::domain::entities::Layer;
use crate::domain::ports::{LayerDiscovery, LayerDiscoveryError};
use crate::infrastructure::documents::{parse_layer, LAYER_SUFFIX};

pub const IGNORE_FILE: &str = ".ctxplanignore";

#[derive(Debug, Clone, Copy, Default)]
pub struct FsLayerDiscovery;

impl FsLayerDiscovery {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, root: &Path, layers: &mut Vec<Layer>) -> Result<(), LayerDiscoveryError> {
        if !root.exists() {
            return Err(LayerDiscoveryError::PathNotFound {
                path: root.to_path_buf(),
            });
        }

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| LayerDiscoveryError::WalkFailed {
                message: e.to_string(),
            })?;
            let path = entry.path();
            let is_layer = entry.file_type().is_some_and(|t| t.is_file())
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(LAYER_SUFFIX));
            if !is_layer {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|e| LayerDiscoveryError::InvalidLayer {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let layer = parse_layer(&content, path).map_err(|e| LayerDiscoveryError::InvalidLayer {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            debug!(layer = %layer.id, path = %path.display(), "layer discovered");
            layers.push(layer);
        }
        Ok(())
    }
}

impl LayerDiscovery for FsLayerDiscovery {
    fn list_layers(&self, search_paths: &[PathBuf]) -> Result<Vec<Layer>, LayerDiscoveryError> {
        let mut layers = Vec::new();
        for root in search_paths {
            self.walk(root, &mut layers)?;
        }
        Ok(layers)
    }
}
