//! YAML Context Set Repository
//!
//! Persists the context set next to the solution, as
//! `<solution>.cbuild-set.yml`:
//!
//! ```yaml
//! contexts:
//!   - context: App.Debug+BoardA
//! compiler: GCC@12.2.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::ContextSet;
use crate::domain::ports::{ContextSetError, ContextSetRepository};
use crate::domain::value_objects::ContextId;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlContextEntry {
    context: ContextId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct YamlContextSet {
    #[serde(default)]
    contexts: Vec<YamlContextEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compiler: Option<String>,
}

pub struct YamlContextSetRepository {
    path: PathBuf,
}

impl YamlContextSetRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<dir>/<name>.cbuild-set.yml`
    pub fn for_solution(directory: &Path, name: &str) -> Self {
        Self::with_path(directory.join(format!("{}.cbuild-set.yml", name)))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ContextSetRepository for YamlContextSetRepository {
    fn load(&self) -> Result<Option<ContextSet>, ContextSetError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ContextSetError::AccessError {
            message: e.to_string(),
        })?;
        let doc: YamlContextSet =
            serde_yaml_ng::from_str(&content).map_err(|e| ContextSetError::Invalid {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let mut set = ContextSet::new(doc.contexts.into_iter().map(|e| e.context).collect());
        set.compiler = doc.compiler;
        Ok(Some(set))
    }

    fn save(&self, set: &ContextSet) -> Result<(), ContextSetError> {
        let doc = YamlContextSet {
            contexts: set
                .contexts
                .iter()
                .cloned()
                .map(|context| YamlContextEntry { context })
                .collect(),
            compiler: set.compiler.clone(),
        };
        let content = serde_yaml_ng::to_string(&doc).map_err(|e| ContextSetError::AccessError {
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ContextSetError::AccessError {
                message: e.to_string(),
            })?;
        }
        fs::write(&self.path, content).map_err(|e| ContextSetError::AccessError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let repo = YamlContextSetRepository::for_solution(dir.path(), "demo");
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn save_and_load_keeps_order_and_compiler() {
        let dir = tempdir().unwrap();
        let repo = YamlContextSetRepository::for_solution(dir.path(), "demo");
        let set = ContextSet::new(vec![
            ContextId::parse("Boot.Release+BoardA").unwrap(),
            ContextId::parse("App.Debug+BoardA").unwrap(),
        ])
        .with_compiler("GCC@12.2.0");

        repo.save(&set).unwrap();
        assert_eq!(repo.load().unwrap(), Some(set));
    }

    #[test]
    fn malformed_identifier_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demo.cbuild-set.yml");
        fs::write(&path, "contexts:\n  - context: \"App..Debug\"\n").unwrap();

        let err = YamlContextSetRepository::with_path(path).load().unwrap_err();
        assert!(matches!(err, ContextSetError::Invalid { .. }));
    }
}
