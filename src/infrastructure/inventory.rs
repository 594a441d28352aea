//! Static inventory
//!
//! An in-memory snapshot of installed packs, toolchains, boards and devices,
//! loaded from a YAML document:
//!
//! ```yaml
//! packs:
//!   - vendor: ARM
//!     name: CMSIS
//!     version: 5.9.0
//!     components:
//!       - id: ARM::CMSIS:CORE
//! toolchains:
//!   - name: GCC
//!     version: 12.2.0
//!     root: /opt/gcc/bin
//! boards:
//!   - name: Kit-A
//!     vendor: Acme
//!     mounted_device: STM32F4
//! devices:
//!   - name: STM32F4
//!     vendor: ST
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::Deserialize;

use crate::domain::entities::{
    BoardRecord, ComponentRecord, DeviceRecord, PackId, ResolvedToolchain,
};
use crate::domain::ports::{DeviceInventory, PackInventory, ToolchainInventory};
use crate::domain::value_objects::VersionRange;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid inventory {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPack {
    pub vendor: String,
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl InstalledPack {
    fn id(&self) -> PackId {
        PackId::new(&self.vendor, &self.name)
    }

    fn is(&self, pack: &PackId) -> bool {
        self.vendor == pack.vendor && self.name == pack.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StaticInventory {
    #[serde(default)]
    packs: Vec<InstalledPack>,
    #[serde(default)]
    toolchains: Vec<ResolvedToolchain>,
    #[serde(default)]
    boards: Vec<BoardRecord>,
    #[serde(default)]
    devices: Vec<DeviceRecord>,
}

impl StaticInventory {
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, InventoryError> {
        serde_yaml_ng::from_str(content).map_err(|e| InventoryError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = fs::read_to_string(path).map_err(|source| InventoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    pub fn with_pack(mut self, pack: PackId, version: Version) -> Self {
        if !self.packs.iter().any(|p| p.is(&pack) && p.version == version) {
            self.packs.push(InstalledPack {
                vendor: pack.vendor,
                name: pack.name,
                version,
                components: Vec::new(),
            });
        }
        self
    }

    /// Add a component to an installed pack version, installing it if needed.
    pub fn with_component(mut self, pack: PackId, version: Version, component: ComponentRecord) -> Self {
        self = self.with_pack(pack.clone(), version.clone());
        if let Some(installed) = self
            .packs
            .iter_mut()
            .find(|p| p.is(&pack) && p.version == version)
        {
            installed.components.push(component);
        }
        self
    }

    pub fn with_toolchain(mut self, toolchain: ResolvedToolchain) -> Self {
        self.toolchains.push(toolchain);
        self
    }

    pub fn with_board(mut self, board: BoardRecord) -> Self {
        self.boards.push(board);
        self
    }

    pub fn with_device(mut self, device: DeviceRecord) -> Self {
        self.devices.push(device);
        self
    }
}

impl PackInventory for StaticInventory {
    fn lookup(&self, pack: &PackId, range: &VersionRange) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .packs
            .iter()
            .filter(|p| p.is(pack) && range.contains(&p.version))
            .map(|p| p.version.clone())
            .collect();
        versions.sort();
        versions.dedup();
        versions
    }

    fn components(&self, pack: &PackId, version: &Version) -> Vec<ComponentRecord> {
        self.packs
            .iter()
            .filter(|p| p.is(pack) && &p.version == version)
            .flat_map(|p| p.components.iter().cloned())
            .collect()
    }

    fn installed(&self) -> Vec<(PackId, Version)> {
        let mut installed: Vec<(PackId, Version)> =
            self.packs.iter().map(|p| (p.id(), p.version.clone())).collect();
        installed.sort();
        installed.dedup();
        installed
    }
}

impl ToolchainInventory for StaticInventory {
    fn lookup(&self, name: &str, range: &VersionRange) -> Vec<ResolvedToolchain> {
        self.toolchains
            .iter()
            .filter(|t| t.name == name && range.contains(&t.version))
            .cloned()
            .collect()
    }

    fn list(&self) -> Vec<ResolvedToolchain> {
        self.toolchains.clone()
    }
}

impl DeviceInventory for StaticInventory {
    fn boards(&self, name: &str) -> Vec<BoardRecord> {
        self.boards.iter().filter(|b| b.name == name).cloned().collect()
    }

    fn devices(&self, name: &str) -> Vec<DeviceRecord> {
        self.devices.iter().filter(|d| d.name == name).cloned().collect()
    }

    fn all_boards(&self) -> Vec<BoardRecord> {
        self.boards.clone()
    }

    fn all_devices(&self) -> Vec<DeviceRecord> {
        self.devices.clone()
    }
}
