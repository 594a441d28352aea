//! Resolve Module
//!
//! Runs the resolution engine for a solution and persists what the next run
//! needs: the build index and, when requested, the context set.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`ResolveOptions`)
//! - `result` - Outcome of a run (`ResolveResult`)
//! - `use_case` - Orchestration (`ResolveUseCase`)

mod options;
mod result;
mod use_case;

pub use options::ResolveOptions;
pub use result::ResolveResult;
pub use use_case::ResolveUseCase;
