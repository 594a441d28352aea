//! Solution entity and its expansion into contexts
//!
//! A solution owns the ordered project declarations plus the declared
//! build-types and target-types. Expanding it yields one `ContextDescriptor`
//! per project × build-type × target-type combination. The solution is built
//! once from parsed input and never mutated afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::{ComponentRequirement, Layer, LayerRef, PackRequirement, ToolchainRequirement};
use crate::domain::value_objects::ContextId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolutionError {
    #[error("solution '{0}' declares no projects")]
    NoProjects(String),

    #[error("project name '{0}' is declared more than once")]
    DuplicateProject(String),

    #[error("build-type '{0}' is declared more than once")]
    DuplicateBuildType(String),

    #[error("target-type '{0}' is declared more than once")]
    DuplicateTargetType(String),

    #[error("layer '{0}' is declared more than once")]
    DuplicateLayer(String),

    #[error("'{name}' is not a valid {what} name")]
    InvalidName { what: &'static str, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildType {
    pub name: String,
    pub compiler: Option<ToolchainRequirement>,
}

impl BuildType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compiler: None,
        }
    }

    pub fn with_compiler(mut self, compiler: ToolchainRequirement) -> Self {
        self.compiler = Some(compiler);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetType {
    pub name: String,
    pub board: Option<String>,
    pub device: Option<String>,
    pub compiler: Option<ToolchainRequirement>,
}

impl TargetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            board: None,
            device: None,
            compiler: None,
        }
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_compiler(mut self, compiler: ToolchainRequirement) -> Self {
        self.compiler = Some(compiler);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    /// Project directory, relative to the solution directory unless absolute.
    pub directory: PathBuf,
    pub board: Option<String>,
    pub device: Option<String>,
    pub compiler: Option<ToolchainRequirement>,
    pub packs: Vec<PackRequirement>,
    pub layers: Vec<LayerRef>,
    pub components: Vec<ComponentRequirement>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            directory: PathBuf::from(&name),
            name,
            board: None,
            device: None,
            compiler: None,
            packs: Vec::new(),
            layers: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_compiler(mut self, compiler: ToolchainRequirement) -> Self {
        self.compiler = Some(compiler);
        self
    }

    pub fn with_pack(mut self, pack: PackRequirement) -> Self {
        self.packs.push(pack);
        self
    }

    pub fn with_layer(mut self, layer: LayerRef) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_component(mut self, component: ComponentRequirement) -> Self {
        self.components.push(component);
        self
    }
}

/// Output layout of one context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextDirectories {
    pub project: PathBuf,
    pub out: PathBuf,
    pub tmp: PathBuf,
    pub rte: PathBuf,
}

/// One concrete point of the project × build-type × target-type space.
#[derive(Debug, Clone)]
pub struct ContextDescriptor {
    pub id: ContextId,
    pub project: Arc<Project>,
    pub build_type: Option<BuildType>,
    pub target_type: Option<TargetType>,
    /// Effective compiler: build-type, then target-type, then project, then solution.
    pub compiler: Option<ToolchainRequirement>,
    /// Effective board: target-type, then project.
    pub board: Option<String>,
    /// Effective device: target-type, then project.
    pub device: Option<String>,
    pub directories: ContextDirectories,
}

#[derive(Debug, Clone)]
pub struct Solution {
    name: String,
    directory: PathBuf,
    build_types: Vec<BuildType>,
    target_types: Vec<TargetType>,
    projects: Vec<Arc<Project>>,
    packs: Vec<PackRequirement>,
    layers: Vec<Layer>,
    compiler: Option<ToolchainRequirement>,
}

impl Solution {
    pub fn builder(name: impl Into<String>, directory: impl Into<PathBuf>) -> SolutionBuilder {
        SolutionBuilder {
            solution: Solution {
                name: name.into(),
                directory: directory.into(),
                build_types: Vec::new(),
                target_types: Vec::new(),
                projects: Vec::new(),
                packs: Vec::new(),
                layers: Vec::new(),
                compiler: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn build_types(&self) -> &[BuildType] {
        &self.build_types
    }

    pub fn target_types(&self) -> &[TargetType] {
        &self.target_types
    }

    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    /// Pack requirements that apply to every project.
    pub fn packs(&self) -> &[PackRequirement] {
        &self.packs
    }

    /// Layer records delivered with the solution's own documents.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Expand into contexts in input order: projects as declared, then
    /// build-types, then target-types.
    pub fn expand(&self, output_dir: Option<&Path>) -> Vec<ContextDescriptor> {
        let build_types: Vec<Option<&BuildType>> = if self.build_types.is_empty() {
            vec![None]
        } else {
            self.build_types.iter().map(Some).collect()
        };
        let target_types: Vec<Option<&TargetType>> = if self.target_types.is_empty() {
            vec![None]
        } else {
            self.target_types.iter().map(Some).collect()
        };
        let output_root = output_dir
            .map(|dir| self.directory.join(dir))
            .unwrap_or_else(|| self.directory.clone());

        let mut descriptors = Vec::new();
        for project in &self.projects {
            for build_type in &build_types {
                for target_type in &target_types {
                    descriptors.push(self.describe(project, *build_type, *target_type, &output_root));
                }
            }
        }
        descriptors
    }

    fn describe(
        &self,
        project: &Arc<Project>,
        build_type: Option<&BuildType>,
        target_type: Option<&TargetType>,
        output_root: &Path,
    ) -> ContextDescriptor {
        let mut id = ContextId::new(&project.name);
        if let Some(build) = build_type {
            id = id.with_build_type(&build.name);
        }
        if let Some(target) = target_type {
            id = id.with_target_type(&target.name);
        }

        let compiler = build_type
            .and_then(|b| b.compiler.clone())
            .or_else(|| target_type.and_then(|t| t.compiler.clone()))
            .or_else(|| project.compiler.clone())
            .or_else(|| self.compiler.clone());
        let board = target_type
            .and_then(|t| t.board.clone())
            .or_else(|| project.board.clone());
        let device = target_type
            .and_then(|t| t.device.clone())
            .or_else(|| project.device.clone());

        let project_dir = self.directory.join(&project.directory);
        let mut out = output_root.join("out").join(&project.name);
        let mut tmp = output_root.join("tmp").join(&project.name);
        for axis in [target_type.map(|t| &t.name), build_type.map(|b| &b.name)]
            .into_iter()
            .flatten()
        {
            out.push(axis);
            tmp.push(axis);
        }

        ContextDescriptor {
            id,
            project: Arc::clone(project),
            build_type: build_type.cloned(),
            target_type: target_type.cloned(),
            compiler,
            board,
            device,
            directories: ContextDirectories {
                rte: project_dir.join("RTE"),
                project: project_dir,
                out,
                tmp,
            },
        }
    }
}

pub struct SolutionBuilder {
    solution: Solution,
}

impl SolutionBuilder {
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.solution.build_types.push(build_type);
        self
    }

    pub fn target_type(mut self, target_type: TargetType) -> Self {
        self.solution.target_types.push(target_type);
        self
    }

    pub fn project(mut self, project: Project) -> Self {
        self.solution.projects.push(Arc::new(project));
        self
    }

    pub fn pack(mut self, pack: PackRequirement) -> Self {
        self.solution.packs.push(pack);
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.solution.layers.push(layer);
        self
    }

    pub fn compiler(mut self, compiler: ToolchainRequirement) -> Self {
        self.solution.compiler = Some(compiler);
        self
    }

    /// Validate names and uniqueness and freeze the solution.
    pub fn build(self) -> Result<Solution, SolutionError> {
        let solution = self.solution;
        if solution.projects.is_empty() {
            return Err(SolutionError::NoProjects(solution.name));
        }

        let mut seen = HashSet::new();
        for project in &solution.projects {
            check_axis_name("project", &project.name)?;
            if !seen.insert(project.name.as_str()) {
                return Err(SolutionError::DuplicateProject(project.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for build in &solution.build_types {
            check_axis_name("build-type", &build.name)?;
            if !seen.insert(build.name.as_str()) {
                return Err(SolutionError::DuplicateBuildType(build.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for target in &solution.target_types {
            check_axis_name("target-type", &target.name)?;
            if !seen.insert(target.name.as_str()) {
                return Err(SolutionError::DuplicateTargetType(target.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for layer in &solution.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(SolutionError::DuplicateLayer(layer.id.clone()));
            }
        }

        Ok(solution)
    }
}

fn check_axis_name(what: &'static str, name: &str) -> Result<(), SolutionError> {
    let valid = !name.is_empty()
        && !name.contains('.')
        && !name.contains('+')
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(SolutionError::InvalidName {
            what,
            name: name.to_string(),
        })
    }
}
