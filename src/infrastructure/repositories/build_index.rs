//! TOML Build Index Repository
//!
//! Persists the build index next to the solution, as
//! `<solution>.cbuild-idx.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use semver::Version;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::entities::{BuildIndex, IndexedContext, LockedPack, PackId};
use crate::domain::ports::{BuildIndexRepository, IndexError};

const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLockedPack {
    pack: String,
    version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TomlIndexedContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    layers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlBuildIndex {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    packs: Vec<TomlLockedPack>,
    #[serde(default)]
    contexts: BTreeMap<String, TomlIndexedContext>,
}

pub struct TomlBuildIndexRepository {
    path: PathBuf,
}

impl TomlBuildIndexRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<dir>/<name>.cbuild-idx.toml`
    pub fn for_solution(directory: &Path, name: &str) -> Self {
        Self::with_path(directory.join(format!("{}.cbuild-idx.toml", name)))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn save_to_disk(&self, index: &BuildIndex) -> Result<(), IndexError> {
        let content = toml::to_string_pretty(&to_toml(index)).map_err(|e| {
            IndexError::SerializationError {
                message: e.to_string(),
            }
        })?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(access)?;
        tmp.write_all(content.as_bytes()).map_err(access)?;
        tmp.persist(&self.path).map_err(|e| access(e.error))?;
        Ok(())
    }
}

fn access(e: std::io::Error) -> IndexError {
    IndexError::AccessError {
        message: e.to_string(),
    }
}

impl BuildIndexRepository for TomlBuildIndexRepository {
    fn load(&self) -> Result<Option<BuildIndex>, IndexError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(access)?;
        let corrupted = |message: String| IndexError::Corrupted {
            path: self.path.clone(),
            message,
        };

        let toml_index: TomlBuildIndex =
            toml::from_str(&content).map_err(|e| corrupted(e.to_string()))?;
        if toml_index.version != INDEX_VERSION {
            return Err(corrupted(format!(
                "unsupported index version {} (expected {})",
                toml_index.version, INDEX_VERSION
            )));
        }

        from_toml(toml_index).map(Some).map_err(corrupted)
    }

    fn save(&self, index: &BuildIndex) -> Result<(), IndexError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(access)?;
        }

        let lock_file = fs::File::create(self.lock_path()).map_err(access)?;
        lock_file.lock_exclusive().map_err(access)?;

        let result = self.save_to_disk(index);

        let _ = lock_file.unlock();
        result
    }
}

fn from_toml(toml_index: TomlBuildIndex) -> Result<BuildIndex, String> {
    let mut index = BuildIndex::new();
    index.updated_at = toml_index.updated_at;

    for entry in toml_index.packs {
        let (vendor, name) = entry
            .pack
            .split_once("::")
            .ok_or_else(|| format!("pack '{}' is not 'Vendor::Name'", entry.pack))?;
        let version = Version::parse(&entry.version)
            .map_err(|e| format!("pack '{}': {}", entry.pack, e))?;
        index.packs.push(LockedPack {
            pack: PackId::new(vendor, name),
            version,
        });
    }

    index.contexts = toml_index
        .contexts
        .into_iter()
        .map(|(id, c)| {
            (
                id,
                IndexedContext {
                    compatible_layers: c.layers,
                    fingerprint: c.fingerprint,
                },
            )
        })
        .collect();

    Ok(index)
}

fn to_toml(index: &BuildIndex) -> TomlBuildIndex {
    TomlBuildIndex {
        version: INDEX_VERSION,
        updated_at: index.updated_at,
        packs: index
            .packs
            .iter()
            .map(|p| TomlLockedPack {
                pack: p.pack.to_string(),
                version: p.version.to_string(),
            })
            .collect(),
        contexts: index
            .contexts
            .iter()
            .map(|(id, c)| {
                (
                    id.clone(),
                    TomlIndexedContext {
                        layers: c.compatible_layers.clone(),
                        fingerprint: c.fingerprint.clone(),
                    },
                )
            })
            .collect(),
    }
}
