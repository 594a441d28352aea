//! Common test utilities for ctxplan integration tests.
//!
//! - `TestEnv`: a solution directory in a tempdir, plus helpers to run the CLI
//! - Fixtures: solution, layer and inventory documents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
