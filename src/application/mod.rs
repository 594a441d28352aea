//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ResolveUseCase` - Resolve selected contexts and persist the build index
//!   and context set
//! - `LayerQueryUseCase` - Layer compatibility per context, optionally
//!   recorded in the build index
//! - `list_*` - Read-only listings for `ctxplan list`

pub mod layers;
pub mod list;
pub mod resolve;

pub use layers::{ContextLayers, LayerQueryResult, LayerQueryUseCase, LayerSummary};
pub use list::{
    list_boards, list_components, list_configs, list_contexts, list_dependencies, list_devices,
    list_packs, list_toolchains, ToolchainListing,
};
pub use resolve::{ResolveOptions, ResolveResult, ResolveUseCase};
