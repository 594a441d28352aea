//! Pack entities
//!
//! A `PackRequirement` is declared by the solution, a project or a layer; the
//! pack resolver turns it into zero or more `ResolvedPack`s.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContextFilter, VersionRange, VersionRangeError};

/// `Vendor::Name` pair identifying a pack independent of its version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackId {
    pub vendor: String,
    pub name: String,
}

impl PackId {
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.vendor, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackRequirementError {
    #[error("pack '{0}' must be written as 'Vendor::Name[@range]'")]
    MissingVendor(String),

    #[error(transparent)]
    Range(#[from] VersionRangeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRequirement {
    pub pack: PackId,
    #[serde(default)]
    pub range: VersionRange,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub filter: ContextFilter,
}

impl PackRequirement {
    pub fn new(pack: PackId, range: VersionRange) -> Self {
        Self {
            pack,
            range,
            optional: false,
            filter: ContextFilter::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_filter(mut self, filter: ContextFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Parse `Vendor::Name`, `Vendor::Name@1.2.3` or `Vendor::Name@>=1.0.0 <2.0.0`.
    pub fn parse(text: &str) -> Result<Self, PackRequirementError> {
        let (id, range) = match text.split_once('@') {
            Some((id, range)) if range.starts_with(|c: char| c.is_ascii_digit()) => {
                (id, VersionRange::parse(&format!("@{}", range))?)
            }
            Some((id, range)) => (id, VersionRange::parse(range)?),
            None => (text, VersionRange::any()),
        };
        let (vendor, name) = id
            .trim()
            .split_once("::")
            .filter(|(v, n)| !v.is_empty() && !n.is_empty())
            .ok_or_else(|| PackRequirementError::MissingVendor(text.to_string()))?;
        Ok(Self::new(PackId::new(vendor, name), range))
    }
}

impl FromStr for PackRequirement {
    type Err = PackRequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range.is_any() {
            write!(f, "{}", self.pack)
        } else if self.range.as_str().starts_with('@') {
            write!(f, "{}{}", self.pack, self.range)
        } else {
            write!(f, "{}@{}", self.pack, self.range)
        }
    }
}

/// Outcome of resolving a requirement against the installed packs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPack {
    pub pack: PackId,
    /// `None` when no installed version satisfies the range.
    pub version: Option<Version>,
    pub range: VersionRange,
}

impl ResolvedPack {
    pub fn installed(pack: PackId, version: Version, range: VersionRange) -> Self {
        Self {
            pack,
            version: Some(version),
            range,
        }
    }

    pub fn missing(pack: PackId, range: VersionRange) -> Self {
        Self {
            pack,
            version: None,
            range,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.version.is_none()
    }
}

impl fmt::Display for ResolvedPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.pack, version),
            None if self.range.is_any() => write!(f, "{} (missing)", self.pack),
            None => write!(
                f,
                "{}@{} (missing)",
                self.pack,
                self.range.as_str().trim_start_matches('@')
            ),
        }
    }
}
