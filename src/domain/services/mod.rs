//! Domain Services
//!
//! Pure resolution logic over domain entities. Collaborators are reached
//! only through the ports, so every service runs against in-memory fakes.

pub mod context_builder;
pub mod layer_resolver;
pub mod pack_resolver;
pub mod resolution_run;
pub mod selection;

pub use context_builder::{select_toolchain, BuildOptions, ContextBuilder};
pub use layer_resolver::{ConflictKind, LayerCompatibilityResolver, LayerConflict, LayerReport};
pub use pack_resolver::{PackResolution, PackResolver};
pub use resolution_run::{
    Inventories, ResolutionRun, RunError, RunOptions, RunOutcome, RunReport,
};
pub use selection::{
    ordered, select, ContextSetRequest, Selection, SelectionError, SelectionRequest,
};
