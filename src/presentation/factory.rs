//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use tracing::warn;

use crate::application::{LayerQueryUseCase, ResolveUseCase};
use crate::domain::entities::Solution;
use crate::error::PlanResult;
use crate::infrastructure::{
    load_solution, InventoryError, StaticInventory, TomlBuildIndexRepository,
    YamlContextSetRepository,
};

/// Type alias for the concrete ResolveUseCase with all dependencies
pub type ConcreteResolveUseCase = ResolveUseCase<TomlBuildIndexRepository, YamlContextSetRepository>;

/// Default inventory file, next to the solution.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.yml";

/// Create a resolve use case persisting next to the solution document
pub fn create_resolve_use_case(solution: &Solution) -> ConcreteResolveUseCase {
    ResolveUseCase::new(
        TomlBuildIndexRepository::for_solution(solution.directory(), solution.name()),
        YamlContextSetRepository::for_solution(solution.directory(), solution.name()),
    )
}

pub fn create_layer_query_use_case(solution: &Solution) -> LayerQueryUseCase<TomlBuildIndexRepository> {
    LayerQueryUseCase::new(TomlBuildIndexRepository::for_solution(
        solution.directory(),
        solution.name(),
    ))
}

/// Load a solution document and the inventory it is resolved against.
pub fn open_solution(
    path: &Path,
    inventory: Option<&Path>,
) -> PlanResult<(Solution, StaticInventory)> {
    let solution = load_solution(path)?;
    let inventory = load_inventory(solution.directory(), inventory)?;
    Ok((solution, inventory))
}

/// Load the inventory named on the command line or in the config, else the
/// default file next to the solution. A missing default file means nothing
/// is installed.
pub fn load_inventory(
    solution_dir: &Path,
    explicit: Option<&Path>,
) -> Result<StaticInventory, InventoryError> {
    if let Some(path) = explicit {
        return StaticInventory::load(&solution_dir.join(path));
    }
    let default = solution_dir.join(DEFAULT_INVENTORY_FILE);
    if default.exists() {
        StaticInventory::load(&default)
    } else {
        warn!(path = %default.display(), "no inventory found, assuming nothing is installed");
        Ok(StaticInventory::default())
    }
}
