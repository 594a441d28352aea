//! Context identifier value object
//!
//! A context is addressed as `project[.build-type][+target-type]`. The same
//! type doubles as a selection pattern: an empty project or an absent
//! build-/target-type matches every value of that axis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextIdError {
    #[error("context identifier is empty")]
    Empty,

    #[error("malformed context identifier '{text}': {reason}")]
    Malformed { text: String, reason: String },
}

/// Identifier of a context, or a pattern over contexts.
///
/// Ordering is field-wise (project, build-type, target-type) and case-sensitive,
/// with an absent axis sorting before any named one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContextId {
    project: String,
    build_type: Option<String>,
    target_type: Option<String>,
}

impl ContextId {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            build_type: None,
            target_type: None,
        }
    }

    /// Pattern that matches every context.
    pub fn any() -> Self {
        Self::default()
    }

    /// Pattern that only constrains the target-type axis.
    pub fn for_target_type(target_type: impl Into<String>) -> Self {
        Self::any().with_target_type(target_type)
    }

    pub fn with_build_type(mut self, build_type: impl Into<String>) -> Self {
        self.build_type = Some(build_type.into());
        self
    }

    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    pub fn parse(text: &str) -> Result<Self, ContextIdError> {
        if text.is_empty() {
            return Err(ContextIdError::Empty);
        }

        let malformed = |reason: &str| ContextIdError::Malformed {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let (head, target_type) = match text.split_once('+') {
            Some((head, target)) => {
                check_name(target).map_err(|r| malformed(&format!("target-type {}", r)))?;
                (head, Some(target.to_string()))
            }
            None => (text, None),
        };

        let (project, build_type) = match head.split_once('.') {
            Some((project, build)) => {
                check_name(build).map_err(|r| malformed(&format!("build-type {}", r)))?;
                (project, Some(build.to_string()))
            }
            None => (head, None),
        };

        if project.chars().any(char::is_whitespace) {
            return Err(malformed("project name contains whitespace"));
        }

        if project.is_empty() && build_type.is_none() && target_type.is_none() {
            return Err(malformed("no axis given"));
        }

        Ok(Self {
            project: project.to_string(),
            build_type,
            target_type,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn build_type(&self) -> Option<&str> {
        self.build_type.as_deref()
    }

    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    /// True when every non-empty field of `self` equals the corresponding
    /// field of `concrete`.
    pub fn matches(&self, concrete: &ContextId) -> bool {
        (self.project.is_empty() || self.project == concrete.project)
            && axis_matches(self.build_type(), concrete.build_type())
            && axis_matches(self.target_type(), concrete.target_type())
    }
}

/// Free-function form of [`ContextId::matches`].
pub fn matches(pattern: &ContextId, concrete: &ContextId) -> bool {
    pattern.matches(concrete)
}

fn axis_matches(pattern: Option<&str>, concrete: Option<&str>) -> bool {
    match pattern {
        None | Some("") => true,
        Some(p) => concrete == Some(p),
    }
}

fn check_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("is empty");
    }
    if name.contains('.') || name.contains('+') {
        return Err("contains a separator");
    }
    if name.chars().any(char::is_whitespace) {
        return Err("contains whitespace");
    }
    Ok(())
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.project)?;
        if let Some(build) = &self.build_type {
            write!(f, ".{}", build)?;
        }
        if let Some(target) = &self.target_type {
            write!(f, "+{}", target)?;
        }
        Ok(())
    }
}

impl FromStr for ContextId {
    type Err = ContextIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContextId {
    type Error = ContextIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContextId> for String {
    fn from(id: ContextId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_identifier() {
        let id = ContextId::parse("App.Debug+BoardA").unwrap();
        assert_eq!(id.project(), "App");
        assert_eq!(id.build_type(), Some("Debug"));
        assert_eq!(id.target_type(), Some("BoardA"));
    }

    #[test]
    fn parse_partial_patterns() {
        let id = ContextId::parse("+BoardA").unwrap();
        assert_eq!(id.project(), "");
        assert_eq!(id.build_type(), None);
        assert_eq!(id.target_type(), Some("BoardA"));

        let id = ContextId::parse(".Release").unwrap();
        assert_eq!(id.build_type(), Some("Release"));
        assert_eq!(id.target_type(), None);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(ContextId::parse(""), Err(ContextIdError::Empty));
        for text in ["App.", "App+", "App.Debug.Extra", "App+A+B", "My App", "App.De bug", "."] {
            assert!(
                matches!(ContextId::parse(text), Err(ContextIdError::Malformed { .. })),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for text in ["App", "App.Debug", "App+BoardA", "App.Debug+BoardA", "+BoardA", ".Debug"] {
            assert_eq!(ContextId::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn empty_fields_match_anything() {
        let concrete = ContextId::parse("App.Debug+BoardA").unwrap();
        assert!(ContextId::parse("App").unwrap().matches(&concrete));
        assert!(ContextId::parse("App.Debug").unwrap().matches(&concrete));
        assert!(ContextId::parse("+BoardA").unwrap().matches(&concrete));
        assert!(ContextId::any().matches(&concrete));
        assert!(!ContextId::parse("App.Release").unwrap().matches(&concrete));
        assert!(!ContextId::parse("Lib").unwrap().matches(&concrete));
    }

    #[test]
    fn named_axis_does_not_match_absent_axis() {
        let concrete = ContextId::parse("App+BoardA").unwrap();
        assert!(!ContextId::parse("App.Debug").unwrap().matches(&concrete));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let concrete = ContextId::parse("App.Debug").unwrap();
        assert!(!ContextId::parse("app.Debug").unwrap().matches(&concrete));
    }

    #[test]
    fn ordering_is_field_wise() {
        let mut ids: Vec<ContextId> = ["App.Release+B", "App.Debug+B", "App.Debug+A", "Lib"]
            .iter()
            .map(|s| ContextId::parse(s).unwrap())
            .collect();
        ids.sort();
        let text: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["App.Debug+A", "App.Debug+B", "App.Release+B", "Lib"]);
    }

    #[test]
    fn serde_uses_textual_form() {
        let id = ContextId::parse("App.Debug+BoardA").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""App.Debug+BoardA""#);
        let back: ContextId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
