//! Layer entity
//!
//! A layer is a reusable bundle of components that plugs into a context. It
//! declares which target-types it is built for and the connection slots it
//! provides to, or consumes from, other layers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ComponentRequirement, PackRequirement};
use crate::domain::value_objects::{ContextFilter, ContextId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Provides,
    Consumes,
}

/// One interface slot of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub slot: String,
    pub role: SlotRole,
}

impl Connection {
    pub fn provides(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            role: SlotRole::Provides,
        }
    }

    pub fn consumes(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            role: SlotRole::Consumes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    /// Interchangeability class, e.g. `Board`; layers sharing a category can
    /// stand in for each other.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Context patterns the layer is built for; empty means any target.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_types: Vec<ContextId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packs: Vec<PackRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentRequirement>,
    /// Where the layer was found, for discovered layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Layer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: None,
            target_types: Vec::new(),
            connections: Vec::new(),
            packs: Vec::new(),
            components: Vec::new(),
            path: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict the layer to a target-type by name.
    pub fn for_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_types.push(ContextId::for_target_type(target_type));
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn with_pack(mut self, pack: PackRequirement) -> Self {
        self.packs.push(pack);
        self
    }

    pub fn with_component(mut self, component: ComponentRequirement) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn provides(&self) -> impl Iterator<Item = &str> {
        self.slots(SlotRole::Provides)
    }

    pub fn consumes(&self) -> impl Iterator<Item = &str> {
        self.slots(SlotRole::Consumes)
    }

    fn slots(&self, role: SlotRole) -> impl Iterator<Item = &str> {
        self.connections
            .iter()
            .filter(move |c| c.role == role)
            .map(|c| c.slot.as_str())
    }

    /// Whether the layer's target-type patterns admit `context`.
    pub fn supports(&self, context: &ContextId) -> bool {
        self.target_types.is_empty() || self.target_types.iter().any(|p| p.matches(context))
    }
}

/// A project's reference to a layer by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRef {
    pub layer: String,
    #[serde(flatten)]
    pub filter: ContextFilter,
}

impl LayerRef {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            filter: ContextFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: ContextFilter) -> Self {
        self.filter = filter;
        self
    }
}
