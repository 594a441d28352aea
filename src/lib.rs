//! ctxplan - context resolution and build planning for embedded solutions
//!
//! A solution declares projects, build-types, target-types, layers and pack
//! requirements. ctxplan expands it into contexts, resolves each one against
//! the installed packs, toolchains, boards and devices, and produces one
//! build plan (`ContextItem`) per context.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod telemetry;

// Re-exports for convenience
pub use config::{Config, ConfigError, ConfigWarning};
pub use domain::entities::{ContextItem, Solution};
pub use domain::services::{ResolutionRun, RunOutcome, RunReport};
pub use domain::value_objects::{ContextId, LoadPacksPolicy};
pub use error::{PlanError, PlanResult};
pub use telemetry::init_tracing;
