//! Version range value object
//!
//! Accepted forms:
//! - empty: any version
//! - `@1.2.3` or `=1.2.3`: exact pin
//! - `1.2.3`: minimum version
//! - `1.0.0:2.0.0`: inclusive bounds
//! - comparator lists such as `>=1.0.0 <2.0.0` or `>=1.0.0, <2.0.0`

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version range '{text}': {message}")]
pub struct VersionRangeError {
    pub text: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    text: String,
    req: VersionReq,
    pinned: Option<Version>,
}

impl VersionRange {
    pub fn any() -> Self {
        Self {
            text: String::new(),
            req: VersionReq::STAR,
            pinned: None,
        }
    }

    pub fn exact(version: Version) -> Self {
        Self {
            text: format!("@{}", version),
            req: exact_req(&version),
            pinned: Some(version),
        }
    }

    pub fn parse(text: &str) -> Result<Self, VersionRangeError> {
        let trimmed = text.trim();
        let error = |message: String| VersionRangeError {
            text: text.to_string(),
            message,
        };

        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self::any());
        }

        if let Some(pin) = trimmed
            .strip_prefix('@')
            .filter(|rest| starts_with_digit(rest))
            .or_else(|| trimmed.strip_prefix('=').filter(|rest| starts_with_digit(rest)))
        {
            let version = Version::parse(pin.trim()).map_err(|e| error(e.to_string()))?;
            return Ok(Self {
                text: trimmed.to_string(),
                req: exact_req(&version),
                pinned: Some(version),
            });
        }

        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);

        if let Some((min, max)) = body.split_once(':') {
            let min = Version::parse(min.trim()).map_err(|e| error(e.to_string()))?;
            let max = Version::parse(max.trim()).map_err(|e| error(e.to_string()))?;
            if min > max {
                return Err(error(format!("lower bound {} exceeds upper bound {}", min, max)));
            }
            let req = VersionReq::parse(&format!(">={}, <={}", min, max))
                .map_err(|e| error(e.to_string()))?;
            return Ok(Self {
                text: trimmed.to_string(),
                req,
                pinned: None,
            });
        }

        if starts_with_digit(body) && !body.contains(char::is_whitespace) && !body.contains(',') {
            let min = Version::parse(body).map_err(|e| error(e.to_string()))?;
            let req = VersionReq::parse(&format!(">={}", min)).map_err(|e| error(e.to_string()))?;
            return Ok(Self {
                text: trimmed.to_string(),
                req,
                pinned: None,
            });
        }

        let req = VersionReq::parse(&join_comparators(body)).map_err(|e| error(e.to_string()))?;
        Ok(Self {
            text: trimmed.to_string(),
            req,
            pinned: None,
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// The exact version this range pins, if any.
    pub fn pinned(&self) -> Option<&Version> {
        self.pinned.as_ref()
    }

    pub fn is_any(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::any()
    }
}

fn exact_req(version: &Version) -> VersionReq {
    VersionReq {
        comparators: vec![semver::Comparator {
            op: semver::Op::Exact,
            major: version.major,
            minor: Some(version.minor),
            patch: Some(version.patch),
            pre: version.pre.clone(),
        }],
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

/// Turn a whitespace- or comma-separated comparator list into the comma form
/// `semver` expects. A bare operator token is glued to the version after it.
fn join_comparators(body: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in body.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op = Some(token);
            continue;
        }
        match pending_op.take() {
            Some(op) => parts.push(format!("{}{}", op, token)),
            None => parts.push(token.to_string()),
        }
    }

    parts.join(", ")
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for VersionRange {
    type Err = VersionRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn empty_range_accepts_everything() {
        let range = VersionRange::parse("").unwrap();
        assert!(range.is_any());
        assert!(range.contains(&v("0.0.1")));
        assert!(range.contains(&v("99.0.0")));
    }

    #[test]
    fn whitespace_separated_comparators() {
        let range = VersionRange::parse(">=1.0.0 <2.0.0").unwrap();
        assert!(range.contains(&v("1.0.0")));
        assert!(range.contains(&v("1.2.0")));
        assert!(!range.contains(&v("2.0.0")));
        assert_eq!(range.to_string(), ">=1.0.0 <2.0.0");
    }

    #[test]
    fn detached_operator_is_joined() {
        let range = VersionRange::parse(">= 1.0.0").unwrap();
        assert!(range.contains(&v("1.5.0")));
        assert!(!range.contains(&v("0.9.0")));
    }

    #[test]
    fn pinned_versions() {
        let range = VersionRange::parse("@1.2.0").unwrap();
        assert_eq!(range.pinned(), Some(&v("1.2.0")));
        assert!(range.contains(&v("1.2.0")));
        assert!(!range.contains(&v("1.2.1")));

        let range = VersionRange::parse("=2.0.0").unwrap();
        assert_eq!(range.pinned(), Some(&v("2.0.0")));
    }

    #[test]
    fn bare_version_is_a_minimum() {
        let range = VersionRange::parse("5.9.0").unwrap();
        assert!(range.pinned().is_none());
        assert!(range.contains(&v("5.9.0")));
        assert!(range.contains(&v("6.1.0")));
        assert!(!range.contains(&v("5.8.9")));
    }

    #[test]
    fn colon_bounds_are_inclusive() {
        let range = VersionRange::parse("1.0.0:2.0.0").unwrap();
        assert!(range.contains(&v("1.0.0")));
        assert!(range.contains(&v("2.0.0")));
        assert!(!range.contains(&v("2.0.1")));
    }

    #[test]
    fn rejects_garbage() {
        assert!(VersionRange::parse(">=banana").is_err());
        assert!(VersionRange::parse("2.0.0:1.0.0").is_err());
        assert!(VersionRange::parse("@1.x").is_err());
    }
}
