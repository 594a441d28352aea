//! Build index entity
//!
//! The persisted snapshot shared between runs: the pack versions last
//! resolved (the pack lock) and, per context, the compatible layers and the
//! plan fingerprint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use semver::Version;

use super::{PackId, ResolvedPack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedPack {
    pub pack: PackId,
    pub version: Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedContext {
    pub compatible_layers: Vec<String>,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildIndex {
    pub packs: Vec<LockedPack>,
    pub contexts: BTreeMap<String, IndexedContext>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BuildIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locked_pack(mut self, pack: PackId, version: Version) -> Self {
        self.packs.push(LockedPack { pack, version });
        self
    }

    /// Versions recorded for `pack`, in recorded order.
    pub fn locked_versions<'a>(&'a self, pack: &'a PackId) -> impl Iterator<Item = &'a Version> {
        self.packs
            .iter()
            .filter(move |p| &p.pack == pack)
            .map(|p| &p.version)
    }

    pub fn is_locked(&self, pack: &PackId) -> bool {
        self.packs.iter().any(|p| &p.pack == pack)
    }

    /// Update the pack lock with the installed packs of a run. Packs the run
    /// resolved replace their previous entries; other entries are kept. The
    /// result is sorted and deduplicated.
    pub fn lock_packs<'a>(&mut self, resolved: impl IntoIterator<Item = &'a ResolvedPack>) {
        let fresh: Vec<LockedPack> = resolved
            .into_iter()
            .filter_map(|r| {
                r.version.as_ref().map(|v| LockedPack {
                    pack: r.pack.clone(),
                    version: v.clone(),
                })
            })
            .collect();
        let mut packs: Vec<LockedPack> = self
            .packs
            .drain(..)
            .filter(|old| !fresh.iter().any(|f| f.pack == old.pack))
            .collect();
        packs.extend(fresh);
        packs.sort_by(|a, b| a.pack.cmp(&b.pack).then_with(|| a.version.cmp(&b.version)));
        packs.dedup();
        self.packs = packs;
    }

    /// `None` clears a fingerprint left by an earlier run.
    pub fn record_fingerprint(&mut self, context: &str, fingerprint: Option<String>) {
        self.contexts
            .entry(context.to_string())
            .or_default()
            .fingerprint = fingerprint;
    }

    pub fn record_layers(&mut self, context: &str, layers: Vec<String>) {
        self.contexts
            .entry(context.to_string())
            .or_default()
            .compatible_layers = layers;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
