//! # Validation Errors
//!
//! Structured error type returned by the schema validator, built with
//! `thiserror`. A [`ValidationError`] is never empty: it always carries at
//! least one [`FieldIssue`] naming the field that failed and why.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The field is absent from the payload.
    Required,
    /// The field (or the payload itself) has the wrong JSON type.
    InvalidType,
    /// The text is shorter than the kind's minimum length.
    TooShort,
    /// The text does not look like an email address.
    InvalidEmail,
    /// The text is not one of the enumerated values.
    InvalidEnumValue,
}

impl IssueKind {
    /// Return the snake_case name of this issue kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::TooShort => "too_short",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidEnumValue => "invalid_enum_value",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field of a submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldIssue {
    /// Name of the offending field. Empty when the payload as a whole is rejected.
    pub path: String,
    /// What went wrong.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl FieldIssue {
    /// Create an issue for the named field.
    pub fn new(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at \"{}\"", self.message, self.path)
        }
    }
}

/// A payload failed its submission kind's schema.
///
/// Renders as `Validation error: <issue>; <issue>` so the message can be
/// shown to the submitter as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation error: {}", render_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Build an error from a non-empty list of issues.
    ///
    /// Returns `None` when `issues` is empty, since an error without a cause
    /// cannot be reported.
    pub fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// Build an error rejecting the payload as a whole.
    pub fn root(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new("", kind, message)],
        }
    }

    /// The individual field issues, in the kind's declared field order.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Whether any issue names the given field.
    pub fn has_issue_for(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_issues_rejects_empty_list() {
        assert!(ValidationError::from_issues(Vec::new()).is_none());
    }

    #[test]
    fn display_joins_issues_with_paths() {
        let err = ValidationError::from_issues(vec![
            FieldIssue::new(
                "name",
                IssueKind::TooShort,
                "String must contain at least 2 character(s)",
            ),
            FieldIssue::new("email", IssueKind::InvalidEmail, "Invalid email"),
        ])
        .unwrap();
        assert_eq!(
            err.to_string(),
            "Validation error: String must contain at least 2 character(s) at \"name\"; Invalid email at \"email\""
        );
    }

    #[test]
    fn root_issue_has_no_path_suffix() {
        let err = ValidationError::root(IssueKind::InvalidType, "Expected object, received array");
        assert_eq!(
            err.to_string(),
            "Validation error: Expected object, received array"
        );
        assert!(err.has_issue_for(""));
    }

    #[test]
    fn has_issue_for_matches_exact_path() {
        let err = ValidationError::from_issues(vec![FieldIssue::new(
            "format",
            IssueKind::InvalidEnumValue,
            "bad",
        )])
        .unwrap();
        assert!(err.has_issue_for("format"));
        assert!(!err.has_issue_for("form"));
    }

    #[test]
    fn issue_kind_serializes_snake_case() {
        let json = serde_json::to_string(&IssueKind::InvalidEnumValue).unwrap();
        assert_eq!(json, "\"invalid_enum_value\"");
        assert_eq!(IssueKind::TooShort.as_str(), "too_short");
    }
}
