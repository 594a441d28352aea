//! Inventory ports
//!
//! Read-only views of what is installed: packs with their component
//! catalogs, toolchains, and the device/board database. Implementations must
//! be safe for concurrent reads.

use semver::Version;

use crate::domain::entities::{
    BoardRecord, ComponentRecord, DeviceRecord, PackId, ResolvedToolchain,
};
use crate::domain::value_objects::VersionRange;

pub trait PackInventory: Send + Sync {
    /// Installed versions of `pack` inside `range`, ascending.
    fn lookup(&self, pack: &PackId, range: &VersionRange) -> Vec<Version>;

    /// Components shipped by one installed pack version.
    fn components(&self, pack: &PackId, version: &Version) -> Vec<ComponentRecord>;

    /// Every installed pack version, sorted by pack then version.
    fn installed(&self) -> Vec<(PackId, Version)>;
}

pub trait ToolchainInventory: Send + Sync {
    /// Installed toolchains named `name` inside `range`, in inventory order.
    fn lookup(&self, name: &str, range: &VersionRange) -> Vec<ResolvedToolchain>;

    fn list(&self) -> Vec<ResolvedToolchain>;
}

pub trait DeviceInventory: Send + Sync {
    /// Boards whose name equals `name` exactly.
    fn boards(&self, name: &str) -> Vec<BoardRecord>;

    /// Devices whose name equals `name` exactly.
    fn devices(&self, name: &str) -> Vec<DeviceRecord>;

    fn all_boards(&self) -> Vec<BoardRecord>;

    fn all_devices(&self) -> Vec<DeviceRecord>;
}
