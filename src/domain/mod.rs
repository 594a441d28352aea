//! Domain Layer
//!
//! The resolution engine: pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ContextId, VersionRange, LoadPacksPolicy)
//! - `entities/` - Solution, layers, packs, toolchains and the resolved ContextItem
//! - `services/` - Selection, pack and layer resolution, context building, the run
//! - `ports/` - Interface definitions for inventories and persisted state
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Explicit value flow** - Solution → contexts → one ContextItem per context
//! 3. **Ports & Adapters** - Inventories and persistence go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
