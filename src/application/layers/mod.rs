//! Application-layer queries over layer compatibility.

mod query;

pub use query::{ContextLayers, LayerQueryResult, LayerQueryUseCase, LayerSummary};
