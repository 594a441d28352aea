//! Run-wide policy switches
//!
//! - `LoadPacksPolicy`: which installed pack versions are eligible and how
//!   missing packs are reported
//! - `ContextOrder`: how the context universe is ordered for selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pack loading policy, set once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LoadPacksPolicy {
    /// Newest installed version in range, keeping a previously locked version
    /// when it is still installed. Missing mandatory packs are reported only.
    #[default]
    Default,
    /// Newest installed version in range, ignoring any previous lock.
    Latest,
    /// Every installed version in range.
    All,
    /// As `Default`, but a missing mandatory pack fails the context.
    Required,
}

impl LoadPacksPolicy {
    /// Whether a previously locked version is preferred over the newest one.
    pub fn honours_lock(&self) -> bool {
        match self {
            LoadPacksPolicy::Default | LoadPacksPolicy::Required => true,
            LoadPacksPolicy::Latest | LoadPacksPolicy::All => false,
        }
    }

    /// Whether a missing mandatory pack is a hard failure.
    pub fn missing_is_fatal(&self) -> bool {
        match self {
            LoadPacksPolicy::Required => true,
            LoadPacksPolicy::Default | LoadPacksPolicy::Latest | LoadPacksPolicy::All => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown load option: '{0}', it must be 'latest', 'all' or 'required'")]
pub struct UnknownLoadPolicy(pub String);

impl FromStr for LoadPacksPolicy {
    type Err = UnknownLoadPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(LoadPacksPolicy::Default),
            "latest" => Ok(LoadPacksPolicy::Latest),
            "all" => Ok(LoadPacksPolicy::All),
            "required" => Ok(LoadPacksPolicy::Required),
            _ => Err(UnknownLoadPolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoadPacksPolicy {
    type Error = UnknownLoadPolicy;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LoadPacksPolicy> for String {
    fn from(policy: LoadPacksPolicy) -> Self {
        policy.to_string()
    }
}

impl fmt::Display for LoadPacksPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadPacksPolicy::Default => "default",
            LoadPacksPolicy::Latest => "latest",
            LoadPacksPolicy::All => "all",
            LoadPacksPolicy::Required => "required",
        };
        f.write_str(name)
    }
}

/// Ordering of the context universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContextOrder {
    /// The order contexts first appear when expanding the input documents.
    #[default]
    Yml,
    /// Identifier order: project, then build-type, then target-type.
    Sorted,
}
