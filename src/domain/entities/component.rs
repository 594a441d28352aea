//! Component requirements and catalog records
//!
//! Component ids follow `Vendor::Class:Group[:Sub]`. A requirement that omits
//! the `Vendor::` prefix matches any vendor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContextFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRequirement {
    pub component: String,
    #[serde(flatten)]
    pub filter: ContextFilter,
}

impl ComponentRequirement {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            filter: ContextFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: ContextFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// A component shipped by an installed pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
    /// Configuration files, relative to the context's RTE directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_files: Vec<PathBuf>,
}

impl ComponentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            depends: Vec::new(),
            config_files: Vec::new(),
        }
    }

    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.depends.push(dependency.into());
        self
    }

    pub fn with_config_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config_files.push(file.into());
        self
    }
}

/// Whether the requested component id names the catalog component `id`.
pub fn component_matches(requested: &str, id: &str) -> bool {
    if requested == id {
        return true;
    }
    if requested.contains("::") {
        return false;
    }
    id.split_once("::")
        .map(|(_, rest)| rest == requested)
        .unwrap_or(false)
}
