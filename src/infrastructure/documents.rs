//! YAML solution and layer documents
//!
//! Turns `*.csolution.yml` and `*.clayer.yml` files into domain records.
//! Only the shape is checked here; names, duplicates and references are
//! validated by the domain.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::{
    BuildType, ComponentRequirement, Connection, Layer, LayerRef, PackRequirement, Project,
    Solution, SolutionError, TargetType, ToolchainRequirement,
};
use crate::domain::value_objects::{ContextFilter, ContextId};

pub const LAYER_SUFFIX: &str = ".clayer.yml";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("invalid solution {path}: {source}")]
    Solution {
        path: PathBuf,
        #[source]
        source: SolutionError,
    },
}

// ============================================================================
// Document DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SolutionFile {
    solution: SolutionDoc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SolutionDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    compiler: Option<String>,
    #[serde(default)]
    build_types: Vec<BuildTypeDoc>,
    #[serde(default)]
    target_types: Vec<TargetTypeDoc>,
    #[serde(default)]
    packs: Vec<PackEntry>,
    #[serde(default)]
    layers: Vec<LayerDoc>,
    #[serde(default)]
    projects: Vec<ProjectDoc>,
}

#[derive(Debug, Deserialize)]
struct BuildTypeDoc {
    #[serde(rename = "type")]
    name: String,
    #[serde(default)]
    compiler: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetTypeDoc {
    #[serde(rename = "type")]
    name: String,
    #[serde(default)]
    board: Option<String>,
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    compiler: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectDoc {
    name: String,
    #[serde(default)]
    directory: Option<PathBuf>,
    #[serde(default)]
    board: Option<String>,
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    compiler: Option<String>,
    #[serde(default)]
    packs: Vec<PackEntry>,
    #[serde(default)]
    layers: Vec<LayerRefEntry>,
    #[serde(default)]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
struct PackEntry {
    pack: String,
    #[serde(default)]
    optional: bool,
    #[serde(flatten)]
    filter: ContextFilter,
}

#[derive(Debug, Deserialize)]
struct LayerRefEntry {
    layer: String,
    #[serde(flatten)]
    filter: ContextFilter,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    component: String,
    #[serde(flatten)]
    filter: ContextFilter,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerFile {
    layer: LayerDoc,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct LayerDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Context patterns the layer is built for, e.g. `+BoardA`.
    #[serde(default)]
    for_context: Vec<ContextId>,
    #[serde(default)]
    connections: Vec<ConnectionEntry>,
    #[serde(default)]
    packs: Vec<PackEntry>,
    #[serde(default)]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
struct ConnectionEntry {
    #[serde(default)]
    provides: Option<String>,
    #[serde(default)]
    consumes: Option<String>,
}

// ============================================================================
// Conversion
// ============================================================================

/// Load a solution document; its directory becomes the solution directory.
pub fn load_solution(path: &Path) -> Result<Solution, DocumentError> {
    let content = read(path)?;
    parse_solution(&content, path)
}

pub fn parse_solution(content: &str, path: &Path) -> Result<Solution, DocumentError> {
    let file: SolutionFile = serde_yaml_ng::from_str(content).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let doc = file.solution;
    let invalid = |message: String| DocumentError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let name = doc.name.clone().unwrap_or_else(|| stem(path));
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut builder = Solution::builder(name, directory);

    if let Some(compiler) = &doc.compiler {
        builder = builder.compiler(toolchain(compiler).map_err(invalid)?);
    }
    for build_type in doc.build_types {
        let mut entry = BuildType::new(build_type.name);
        if let Some(compiler) = &build_type.compiler {
            entry = entry.with_compiler(toolchain(compiler).map_err(invalid)?);
        }
        builder = builder.build_type(entry);
    }
    for target_type in doc.target_types {
        let mut entry = TargetType::new(target_type.name);
        if let Some(board) = target_type.board {
            entry = entry.with_board(board);
        }
        if let Some(device) = target_type.device {
            entry = entry.with_device(device);
        }
        if let Some(compiler) = &target_type.compiler {
            entry = entry.with_compiler(toolchain(compiler).map_err(invalid)?);
        }
        builder = builder.target_type(entry);
    }
    for pack in doc.packs {
        builder = builder.pack(pack_requirement(pack).map_err(invalid)?);
    }
    for layer in doc.layers {
        let id = layer
            .id
            .clone()
            .ok_or_else(|| invalid("inline layer without 'id'".to_string()))?;
        builder = builder.layer(into_layer(id, layer).map_err(invalid)?);
    }
    for project in doc.projects {
        builder = builder.project(into_project(project).map_err(invalid)?);
    }

    builder.build().map_err(|source| DocumentError::Solution {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a `*.clayer.yml` document. Without an explicit `id` the file name
/// (minus the suffix) names the layer.
pub fn parse_layer(content: &str, path: &Path) -> Result<Layer, DocumentError> {
    let file: LayerFile = serde_yaml_ng::from_str(content).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let id = file.layer.id.clone().unwrap_or_else(|| stem(path));
    into_layer(id, file.layer)
        .map(|layer| layer.with_path(path))
        .map_err(|message| DocumentError::Invalid {
            path: path.to_path_buf(),
            message,
        })
}

fn read(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// `app.csolution.yml` -> `app`
fn stem(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
        .to_string()
}

fn toolchain(text: &str) -> Result<ToolchainRequirement, String> {
    ToolchainRequirement::parse(text).map_err(|e| format!("compiler '{}': {}", text, e))
}

fn pack_requirement(entry: PackEntry) -> Result<PackRequirement, String> {
    let mut requirement = PackRequirement::parse(&entry.pack).map_err(|e| e.to_string())?;
    if entry.optional {
        requirement = requirement.optional();
    }
    Ok(requirement.with_filter(entry.filter))
}

fn component(entry: ComponentEntry) -> ComponentRequirement {
    ComponentRequirement::new(entry.component).with_filter(entry.filter)
}

fn into_layer(id: String, doc: LayerDoc) -> Result<Layer, String> {
    let mut layer = Layer::new(id);
    if let Some(category) = doc.category {
        layer = layer.with_category(category);
    }
    layer.target_types = doc.for_context;
    for connection in doc.connections {
        match (connection.provides, connection.consumes) {
            (None, None) => {
                return Err(format!(
                    "layer '{}': connection needs 'provides' or 'consumes'",
                    layer.id
                ))
            }
            (provides, consumes) => {
                if let Some(slot) = provides {
                    layer = layer.with_connection(Connection::provides(slot));
                }
                if let Some(slot) = consumes {
                    layer = layer.with_connection(Connection::consumes(slot));
                }
            }
        }
    }
    for pack in doc.packs {
        layer = layer.with_pack(pack_requirement(pack)?);
    }
    for entry in doc.components {
        layer = layer.with_component(component(entry));
    }
    Ok(layer)
}

fn into_project(doc: ProjectDoc) -> Result<Project, String> {
    let mut project = Project::new(doc.name);
    if let Some(directory) = doc.directory {
        project = project.in_directory(directory);
    }
    if let Some(board) = doc.board {
        project = project.with_board(board);
    }
    if let Some(device) = doc.device {
        project = project.with_device(device);
    }
    if let Some(compiler) = &doc.compiler {
        project = project.with_compiler(toolchain(compiler)?);
    }
    for pack in doc.packs {
        project = project.with_pack(pack_requirement(pack)?);
    }
    for layer in doc.layers {
        project = project.with_layer(LayerRef::new(layer.layer).with_filter(layer.filter));
    }
    for entry in doc.components {
        project = project.with_component(component(entry));
    }
    Ok(project)
}
