#![deny(missing_docs)]

//! # darktrader-core: Domain Types for the Darktrader Intake Service
//!
//! This crate defines the submission kinds accepted by the Darktrader
//! website backend and the validator that every raw payload must pass before
//! it may reach the submission store. It has no web or storage dependencies.
//!
//! ## Design Principles
//!
//! 1. **One typed form per submission kind.** [`RegistrationForm`],
//!    [`ContactForm`] and [`MentorshipApplicationForm`] can only be obtained
//!    through [`Submission::validate`]. Holding a form is proof that the
//!    payload passed its schema.
//!
//! 2. **Validation returns a `Result`.** Bad input is an ordinary outcome,
//!    reported as a [`ValidationError`] carrying one [`FieldIssue`] per
//!    failing field.
//!
//! 3. **Records are immutable.** A record combines a form with a
//!    [`SubmissionId`] and a creation timestamp and exposes no mutators.

pub mod domain;
pub mod error;
pub mod identity;
pub mod submission;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use domain::{PlanFormat, SubmissionKind};
pub use error::{FieldIssue, IssueKind, ValidationError};
pub use identity::SubmissionId;
pub use submission::{
    ContactForm, ContactMessage, MentorshipApplication, MentorshipApplicationForm, Registration,
    RegistrationForm, Submission,
};
