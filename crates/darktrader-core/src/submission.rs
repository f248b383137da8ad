//! # Submission Kinds: Forms and Records
//!
//! Each submission kind is a pair of types:
//!
//! | Kind | Form (validated input) | Record (persisted) |
//! |------|------------------------|--------------------|
//! | [`SubmissionKind::Registration`] | [`RegistrationForm`] | [`Registration`] |
//! | [`SubmissionKind::ContactMessage`] | [`ContactForm`] | [`ContactMessage`] |
//! | [`SubmissionKind::MentorshipApplication`] | [`MentorshipApplicationForm`] | [`MentorshipApplication`] |
//!
//! Forms have private fields and no public constructor other than
//! [`Submission::validate`], so a form in hand has passed its schema.
//! Records are built only by [`Submission::into_record`], which the
//! submission store calls with a freshly generated id and timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{PlanFormat, SubmissionKind};
use crate::error::ValidationError;
use crate::identity::SubmissionId;
use crate::validation::{
    FieldReader, APPLICATION_MESSAGE_MIN_CHARS, CONTACT_MESSAGE_MIN_CHARS, EXPERIENCE_MIN_CHARS,
    NAME_MIN_CHARS,
};

/// A submission kind: its validator and how its records are assembled.
pub trait Submission: Sized + Send + Sync + 'static {
    /// The kind this form belongs to.
    const KIND: SubmissionKind;

    /// The persisted record type for this kind.
    type Record: Clone + Send + Sync + 'static;

    /// Check a raw payload against this kind's schema.
    ///
    /// On success the form holds exactly the recognized fields; any other
    /// keys in the payload are dropped.
    fn validate(payload: &Value) -> Result<Self, ValidationError>;

    /// Merge the validated fields with the store-generated id and timestamp.
    fn into_record(self, id: SubmissionId, created_at: DateTime<Utc>) -> Self::Record;
}

// ── Registration ────────────────────────────────────────────────────

/// A validated course registration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationForm {
    name: String,
    email: String,
    format: PlanFormat,
}

impl RegistrationForm {
    /// Submitter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Chosen plan.
    pub fn format(&self) -> PlanFormat {
        self.format
    }
}

impl Submission for RegistrationForm {
    const KIND: SubmissionKind = SubmissionKind::Registration;
    type Record = Registration;

    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;
        let name = fields.text_min("name", NAME_MIN_CHARS);
        let email = fields.email("email");
        let format = fields.plan_format("format");

        match (name, email, format) {
            (Some(name), Some(email), Some(format)) if fields.is_clean() => {
                Ok(Self { name, email, format })
            }
            _ => Err(fields.into_error()),
        }
    }

    fn into_record(self, id: SubmissionId, created_at: DateTime<Utc>) -> Registration {
        Registration {
            id,
            name: self.name,
            email: self.email,
            format: self.format,
            created_at,
        }
    }
}

/// A stored course registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: SubmissionId,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address.
    pub email: String,
    /// Chosen course plan.
    pub format: PlanFormat,
    /// When the registration was accepted.
    pub created_at: DateTime<Utc>,
}

// ── Contact message ─────────────────────────────────────────────────

/// A validated contact-page message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
}

impl ContactForm {
    /// Sender's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Submission for ContactForm {
    const KIND: SubmissionKind = SubmissionKind::ContactMessage;
    type Record = ContactMessage;

    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;
        let name = fields.text_min("name", NAME_MIN_CHARS);
        let email = fields.email("email");
        let message = fields.text_min("message", CONTACT_MESSAGE_MIN_CHARS);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if fields.is_clean() => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(fields.into_error()),
        }
    }

    fn into_record(self, id: SubmissionId, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at,
        }
    }
}

/// A stored contact-page message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Store-assigned identifier.
    pub id: SubmissionId,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// When the message was accepted.
    pub created_at: DateTime<Utc>,
}

// ── Mentorship application ──────────────────────────────────────────

/// A validated mentorship application.
///
/// Stricter than [`ContactForm`]: the motivation message must be at least
/// 20 characters, and a trading-experience summary is required.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MentorshipApplicationForm {
    name: String,
    email: String,
    experience: String,
    message: String,
}

impl MentorshipApplicationForm {
    /// Applicant's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applicant's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Summary of the applicant's trading experience.
    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// Why the applicant wants mentorship.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Submission for MentorshipApplicationForm {
    const KIND: SubmissionKind = SubmissionKind::MentorshipApplication;
    type Record = MentorshipApplication;

    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;
        let name = fields.text_min("name", NAME_MIN_CHARS);
        let email = fields.email("email");
        let experience = fields.text_min("experience", EXPERIENCE_MIN_CHARS);
        let message = fields.text_min("message", APPLICATION_MESSAGE_MIN_CHARS);

        match (name, email, experience, message) {
            (Some(name), Some(email), Some(experience), Some(message)) if fields.is_clean() => {
                Ok(Self {
                    name,
                    email,
                    experience,
                    message,
                })
            }
            _ => Err(fields.into_error()),
        }
    }

    fn into_record(self, id: SubmissionId, created_at: DateTime<Utc>) -> MentorshipApplication {
        MentorshipApplication {
            id,
            name: self.name,
            email: self.email,
            experience: self.experience,
            message: self.message,
            created_at,
        }
    }
}

/// A stored mentorship application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MentorshipApplication {
    /// Store-assigned identifier.
    pub id: SubmissionId,
    /// Applicant's name.
    pub name: String,
    /// Applicant's email address.
    pub email: String,
    /// Summary of the applicant's trading experience.
    pub experience: String,
    /// Why the applicant wants mentorship.
    pub message: String,
    /// When the application was accepted.
    pub created_at: DateTime<Utc>,
}
