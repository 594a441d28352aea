//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod build_index;
mod context_set;

pub use build_index::TomlBuildIndexRepository;
pub use context_set::YamlContextSetRepository;
