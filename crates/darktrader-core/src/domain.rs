//! # Domain Enums
//!
//! [`SubmissionKind`] names the form types the site accepts and determines
//! which shape and rules apply. [`PlanFormat`] is the closed set of
//! course plans a registration may choose.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of submission accepted by the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// Course registration from the pricing page.
    Registration,
    /// Free-form message from the contact page.
    ContactMessage,
    /// Application for the 1-on-1 mentorship program.
    MentorshipApplication,
}

impl SubmissionKind {
    /// All kinds, in a fixed order.
    pub const ALL: [SubmissionKind; 3] = [
        Self::Registration,
        Self::ContactMessage,
        Self::MentorshipApplication,
    ];

    /// Return the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::ContactMessage => "contact_message",
            Self::MentorshipApplication => "mentorship_application",
        }
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course plan chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PlanFormat {
    /// Self-paced access to course content.
    #[serde(rename = "Self-Study")]
    SelfStudy,
    /// Weekly group sessions with a mentor.
    #[serde(rename = "Group Mentorship")]
    GroupMentorship,
    /// Private sessions with a dedicated mentor.
    #[serde(rename = "1-on-1 Mentorship")]
    OneOnOneMentorship,
}

impl PlanFormat {
    /// All plans, in the order they appear on the pricing page.
    pub const ALL: [PlanFormat; 3] = [
        Self::SelfStudy,
        Self::GroupMentorship,
        Self::OneOnOneMentorship,
    ];

    /// Return the display name of this plan (also its wire value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfStudy => "Self-Study",
            Self::GroupMentorship => "Group Mentorship",
            Self::OneOnOneMentorship => "1-on-1 Mentorship",
        }
    }
}

impl std::fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input did not name a known plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown plan format: \"{0}\"")]
pub struct UnknownPlanFormat(pub String);

impl FromStr for PlanFormat {
    type Err = UnknownPlanFormat;

    /// Exact, case-sensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| UnknownPlanFormat(s.to_string()))
    }
}
