//! Toolchain entities

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{VersionRange, VersionRangeError};

/// `NAME[@range]`, e.g. `GCC`, `AC6@6.18.0` (exact), `GCC@>=12.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolchainRequirement {
    pub name: String,
    pub range: VersionRange,
}

impl ToolchainRequirement {
    pub fn new(name: impl Into<String>, range: VersionRange) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    pub fn parse(text: &str) -> Result<Self, VersionRangeError> {
        let text = text.trim();
        match text.split_once('@') {
            Some((name, range)) if range.starts_with(|c: char| c.is_ascii_digit()) => {
                Ok(Self::new(name, VersionRange::parse(&format!("@{}", range))?))
            }
            Some((name, range)) => Ok(Self::new(name, VersionRange::parse(range)?)),
            None => Ok(Self::new(text, VersionRange::any())),
        }
    }
}

impl fmt::Display for ToolchainRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range.is_any() {
            f.write_str(&self.name)
        } else if self.range.as_str().starts_with('@') {
            write!(f, "{}{}", self.name, self.range)
        } else {
            write!(f, "{}@{}", self.name, self.range)
        }
    }
}

impl FromStr for ToolchainRequirement {
    type Err = VersionRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ToolchainRequirement {
    type Error = VersionRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ToolchainRequirement> for String {
    fn from(req: ToolchainRequirement) -> Self {
        req.to_string()
    }
}

/// An installed toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedToolchain {
    pub name: String,
    pub version: Version,
    pub root: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
}

impl ResolvedToolchain {
    pub fn new(name: impl Into<String>, version: Version, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version,
            root: root.into(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Name of the environment variable that points at this installation,
    /// e.g. `GCC_TOOLCHAIN_12_2_0`.
    pub fn environment_variable(&self) -> String {
        format!(
            "{}_TOOLCHAIN_{}",
            self.name,
            self.version.to_string().replace('.', "_")
        )
    }
}

impl fmt::Display for ResolvedToolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
