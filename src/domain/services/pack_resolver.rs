//! Pack resolver
//!
//! Applies the run's load policy to pack requirements:
//!
//! - `Default`: newest installed version in range, unless the build index
//!   locks an installed version that is still in range
//! - `Latest`: newest installed version in range, ignoring the lock
//! - `All`: every installed version in range
//! - `Required`: like `Default`, but a missing mandatory pack fails the context
//!
//! Frozen mode checks the outcome against the lock on top of any policy.

use std::collections::HashSet;

use semver::Version;
use tracing::{debug, warn};

use crate::domain::entities::{BuildIndex, PackId, PackRequirement, ResolveError, ResolvedPack};
use crate::domain::ports::PackInventory;
use crate::domain::value_objects::LoadPacksPolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackResolution {
    /// Deduplicated by pack and version; first-seen order.
    pub packs: Vec<ResolvedPack>,
    /// Failures of the context: drift, and missing packs under `Required`.
    pub errors: Vec<ResolveError>,
    pub warnings: Vec<ResolveError>,
}

pub struct PackResolver<'a> {
    inventory: &'a dyn PackInventory,
    policy: LoadPacksPolicy,
    snapshot: Option<&'a BuildIndex>,
    frozen: bool,
}

impl<'a> PackResolver<'a> {
    pub fn new(inventory: &'a dyn PackInventory, policy: LoadPacksPolicy) -> Self {
        Self {
            inventory,
            policy,
            snapshot: None,
            frozen: false,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Option<&'a BuildIndex>) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Cross-check every outcome against the snapshot.
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Versions chosen for one requirement; empty when nothing in range is
    /// installed.
    pub fn candidates(&self, requirement: &PackRequirement) -> Vec<Version> {
        let mut installed = self
            .inventory
            .lookup(&requirement.pack, &requirement.range);
        installed.sort();
        let Some(newest) = installed.last().cloned() else {
            return Vec::new();
        };

        match self.policy {
            LoadPacksPolicy::All => installed,
            policy if policy.honours_lock() => {
                let locked = self.snapshot.and_then(|index| {
                    index
                        .locked_versions(&requirement.pack)
                        .filter(|v| installed.contains(v))
                        .max()
                        .cloned()
                });
                vec![locked.unwrap_or(newest)]
            }
            LoadPacksPolicy::Default | LoadPacksPolicy::Latest | LoadPacksPolicy::Required => {
                vec![newest]
            }
        }
    }

    pub fn resolve<'r>(
        &self,
        requirements: impl IntoIterator<Item = &'r PackRequirement>,
    ) -> PackResolution {
        let mut resolution = PackResolution::default();
        let mut seen: HashSet<(PackId, Option<Version>)> = HashSet::new();

        for requirement in requirements {
            let versions = self.candidates(requirement);

            if self.frozen {
                self.check_drift(requirement, &versions, &mut resolution);
            }

            if versions.is_empty() {
                if requirement.optional {
                    debug!(pack = %requirement.pack, "optional pack not installed, dropped");
                    continue;
                }
                let missing = ResolvedPack::missing(requirement.pack.clone(), requirement.range.clone());
                warn!(pack = %missing, policy = %self.policy, "pack missing");
                let problem = ResolveError::PackUnsatisfied {
                    pack: requirement.pack.clone(),
                    range: requirement.range.clone(),
                };
                if self.policy.missing_is_fatal() {
                    resolution.errors.push(problem);
                } else {
                    resolution.warnings.push(problem);
                }
                if seen.insert((missing.pack.clone(), None)) {
                    resolution.packs.push(missing);
                }
                continue;
            }

            for version in versions {
                if seen.insert((requirement.pack.clone(), Some(version.clone()))) {
                    debug!(pack = %requirement.pack, %version, "pack resolved");
                    resolution.packs.push(ResolvedPack::installed(
                        requirement.pack.clone(),
                        version,
                        requirement.range.clone(),
                    ));
                }
            }
        }

        resolution
    }

    fn check_drift(
        &self,
        requirement: &PackRequirement,
        versions: &[Version],
        resolution: &mut PackResolution,
    ) {
        let locked: Vec<&Version> = self
            .snapshot
            .map(|index| index.locked_versions(&requirement.pack).collect())
            .unwrap_or_default();

        let drift = match (locked.first(), versions.first()) {
            // Optional and absent on both sides: nothing to compare.
            (None, None) => None,
            (None, Some(resolved)) => Some((None, Some(resolved.clone()))),
            // An uninstalled optional pack is dropped, not drifted.
            (Some(_), None) if requirement.optional => None,
            (Some(locked), None) => Some((Some((*locked).clone()), None)),
            (Some(first_locked), Some(_)) => versions
                .iter()
                .find(|v| !locked.contains(v))
                .map(|v| (Some((*first_locked).clone()), Some(v.clone()))),
        };

        if let Some((locked, resolved)) = drift {
            warn!(pack = %requirement.pack, "pack drifted from frozen snapshot");
            let error = ResolveError::PackVersionDrift {
                pack: requirement.pack.clone(),
                locked,
                resolved,
            };
            if !resolution.errors.contains(&error) {
                resolution.errors.push(error);
            }
        }
    }
}
