//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod context_filter;
mod context_id;
mod load_policy;
mod version_range;

pub use context_filter::ContextFilter;
pub use context_id::{matches, ContextId, ContextIdError};
pub use load_policy::{ContextOrder, LoadPacksPolicy, UnknownLoadPolicy};
pub use version_range::{VersionRange, VersionRangeError};
