//! # Schema Validation Primitives
//!
//! [`FieldReader`] walks a raw JSON payload one declared field at a time,
//! applying the field's rule and collecting a [`FieldIssue`] for every
//! failure. Each per-kind `validate` function in [`crate::submission`] is a
//! short sequence of reader calls.
//!
//! A reader method returns `None` if and only if it recorded an issue, so a
//! form is assembled exactly when every field came back `Some`.
//!
//! Messages follow the wording the site's client-side forms already show,
//! e.g. `String must contain at least 2 character(s)`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::PlanFormat;
use crate::error::{FieldIssue, IssueKind, ValidationError};

/// Minimum length of a submitter's name.
pub const NAME_MIN_CHARS: usize = 2;

/// Minimum length of a contact-page message.
pub const CONTACT_MESSAGE_MIN_CHARS: usize = 10;

/// Minimum length of the experience summary on a mentorship application.
pub const EXPERIENCE_MIN_CHARS: usize = 10;

/// Minimum length of the motivation message on a mentorship application.
pub const APPLICATION_MESSAGE_MIN_CHARS: usize = 20;

// Local part: word characters plus ' + - . ; must end on a non-quote, non-dot.
// Domain: one or more labels followed by an alphabetic TLD.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("valid email regex")
});

/// Whether `candidate` has the shape of an email address.
pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.') && !candidate.contains("..") && EMAIL_RE.is_match(candidate)
}

/// Name of a JSON value's type, as used in `invalid_type` messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field-by-field reader over a submission payload.
#[derive(Debug)]
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    /// Start reading `payload`.
    ///
    /// Fails immediately, with a single root issue, when the payload is not a
    /// JSON object.
    pub fn new(payload: &'a Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                issues: Vec::new(),
            }),
            other => Err(ValidationError::root(
                IssueKind::InvalidType,
                format!("Expected object, received {}", json_type_name(other)),
            )),
        }
    }

    /// Read a required text field.
    pub fn text(&mut self, field: &str) -> Option<&'a str> {
        match self.object.get(field) {
            None => {
                self.push(field, IssueKind::Required, "Required");
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                let message = format!("Expected string, received {}", json_type_name(other));
                self.push(field, IssueKind::InvalidType, message);
                None
            }
        }
    }

    /// Read a required text field of at least `min` characters.
    pub fn text_min(&mut self, field: &str, min: usize) -> Option<String> {
        let value = self.text(field)?;
        if value.chars().count() < min {
            let message = format!("String must contain at least {min} character(s)");
            self.push(field, IssueKind::TooShort, message);
            return None;
        }
        Some(value.to_string())
    }

    /// Read a required email address.
    pub fn email(&mut self, field: &str) -> Option<String> {
        let value = self.text(field)?;
        if !is_valid_email(value) {
            self.push(field, IssueKind::InvalidEmail, "Invalid email");
            return None;
        }
        Some(value.to_string())
    }

    /// Read a required plan format.
    pub fn plan_format(&mut self, field: &str) -> Option<PlanFormat> {
        let value = self.text(field)?;
        match value.parse::<PlanFormat>() {
            Ok(plan) => Some(plan),
            Err(_) => {
                let expected = PlanFormat::ALL
                    .iter()
                    .map(|plan| format!("'{plan}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let message =
                    format!("Invalid enum value. Expected {expected}, received '{value}'");
                self.push(field, IssueKind::InvalidEnumValue, message);
                None
            }
        }
    }

    /// Whether every field read so far passed.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert the collected issues into an error.
    ///
    /// Only meaningful after a read returned `None`. If nothing was recorded,
    /// the error reports an inconsistent reader rather than succeeding.
    pub fn into_error(self) -> ValidationError {
        ValidationError::from_issues(self.issues).unwrap_or_else(|| {
            ValidationError::root(IssueKind::InvalidType, "Payload could not be validated")
        })
    }

    fn push(&mut self, field: &str, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, kind, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_accepts_common_addresses() {
        for ok in [
            "jo@x.com",
            "a@b.com",
            "first.last+tag@sub.example.co.uk",
            "o'neil@example.org",
            "UPPER@EXAMPLE.COM",
            "a-b_c@my-domain.io",
        ] {
            assert!(is_valid_email(ok), "should accept {ok}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in [
            "not-an-email",
            "",
            "@x.com",
            "jo@",
            "jo@x",
            "jo@x.c",
            ".jo@x.com",
            "jo.@x.com",
            "j..o@x.com",
            "jo@-x.com",
            "jo@x..com",
            "jo @x.com",
            "jo@x.com ",
            "jo@@x.com",
            "jo@x.123",
            "\u{212A}@x.com",
            "jo@x.co\u{17F}",
            "j\u{f6}@x.com",
        ] {
            assert!(!is_valid_email(bad), "should reject {bad:?}");
        }
    }

    #[test]
    fn reader_rejects_non_object_payloads() {
        let payload = json!(["name"]);
        let err = FieldReader::new(&payload).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "");
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidType);
        assert!(err.to_string().contains("Expected object, received array"));
    }

    #[test]
    fn text_reports_missing_and_wrong_type() {
        let payload = json!({"name": 42});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert!(reader.text("name").is_none());
        assert!(reader.text("email").is_none());
        let err = reader.into_error();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidType);
        assert_eq!(err.issues()[0].message, "Expected string, received number");
        assert_eq!(err.issues()[1].kind, IssueKind::Required);
        assert_eq!(err.issues()[1].path, "email");
    }

    #[test]
    fn null_is_a_type_error_not_missing() {
        let payload = json!({"name": null});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert!(reader.text("name").is_none());
        let err = reader.into_error();
        assert_eq!(err.issues()[0].kind, IssueKind::InvalidType);
        assert!(err.issues()[0].message.ends_with("null"));
    }

    #[test]
    fn text_min_counts_characters_not_bytes() {
        let payload = json!({"name": "Zoë", "short": "é"});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert_eq!(reader.text_min("name", 3).as_deref(), Some("Zoë"));
        assert!(reader.text_min("short", 2).is_none());
        let err = reader.into_error();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::TooShort);
    }

    #[test]
    fn plan_format_lists_allowed_values() {
        let payload = json!({"format": "Gold Tier"});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert!(reader.plan_format("format").is_none());
        let err = reader.into_error();
        assert_eq!(
            err.issues()[0].message,
            "Invalid enum value. Expected 'Self-Study' | 'Group Mentorship' | '1-on-1 Mentorship', received 'Gold Tier'"
        );
    }

    #[test]
    fn clean_reader_reports_no_issues() {
        let payload = json!({"email": "jo@x.com"});
        let mut reader = FieldReader::new(&payload).unwrap();
        assert_eq!(reader.email("email").as_deref(), Some("jo@x.com"));
        assert!(reader.is_clean());
    }
}
