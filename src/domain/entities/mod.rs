//! Domain Entities
//!
//! - `Solution` - projects, build-types and target-types; expands into contexts
//! - `Layer` - a reusable bundle wired into a context through connection slots
//! - `PackRequirement` / `ResolvedPack` - pack demands and their outcome
//! - `ContextItem` - the resolved build plan of one context
//! - `BuildIndex` / `ContextSet` - state persisted between runs

mod build_index;
mod component;
mod context_item;
mod context_set;
mod device;
mod layer;
mod pack;
mod solution;
mod toolchain;

pub use build_index::{BuildIndex, IndexedContext, LockedPack};
pub use component::{component_matches, ComponentRecord, ComponentRequirement};
pub use context_item::{ContextItem, ContextStatus, ResolveError};
pub use context_set::ContextSet;
pub use device::{BoardRecord, DeviceRecord};
pub use layer::{Connection, Layer, LayerRef, SlotRole};
pub use pack::{PackId, PackRequirement, PackRequirementError, ResolvedPack};
pub use solution::{
    BuildType, ContextDescriptor, ContextDirectories, Project, Solution, SolutionBuilder,
    SolutionError, TargetType,
};
pub use toolchain::{ResolvedToolchain, ToolchainRequirement};
