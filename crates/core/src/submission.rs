//! Submission lifecycle states and the editorial state machine.
//!
//! A submission moves `pending -> under_review -> {approved | rejected |
//! revision_requested}`, with `revision_requested -> pending` as the only
//! cycle (resubmission by the original author). `approved` and `rejected`
//! are terminal: no workflow operation may mutate them again, and a rejected
//! submission has no resubmission path.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length for reviewer notes attached to a decision.
pub const MAX_REVIEW_NOTES_LENGTH: usize = 5_000;

/// Lifecycle status of a submission, matching the `submissions.status`
/// column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    RevisionRequested,
}

impl SubmissionStatus {
    /// String representation for database storage and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::RevisionRequested => "revision_requested",
        }
    }

    /// Parse a status string from the database.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "revision_requested" => Ok(Self::RevisionRequested),
            other => Err(CoreError::Internal(format!(
                "Unknown submission status '{other}' in stored data"
            ))),
        }
    }

    /// Terminal statuses accept no further workflow transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// An active submission occupies the (article, publication) slot and
    /// blocks duplicate submissions.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// The status strings counted as active; the storage layer's active
    /// filter must stay in sync with this list.
    pub fn active_states() -> [&'static str; 3] {
        ["pending", "under_review", "revision_requested"]
    }

    /// Whether the state machine permits a direct transition.
    pub fn can_transition(from: SubmissionStatus, to: SubmissionStatus) -> bool {
        use SubmissionStatus::*;
        match (from, to) {
            // A reviewer decision is valid from any active state.
            (Pending | UnderReview, Approved | Rejected | RevisionRequested) => true,
            (Pending, UnderReview) => true,
            (RevisionRequested, Pending) => true,
            // Decisions may also land on a revision_requested submission
            // (the reviewer changes their mind before resubmission).
            (RevisionRequested, Approved | Rejected) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate reviewer notes for a decision transition.
///
/// Notes are mandatory (and must be non-blank) when requesting a revision;
/// for approve/reject they are optional. Length is capped for all.
pub fn validate_review_notes(
    to: SubmissionStatus,
    notes: Option<&str>,
) -> Result<(), CoreError> {
    let trimmed = notes.map(str::trim).filter(|n| !n.is_empty());

    if to == SubmissionStatus::RevisionRequested && trimmed.is_none() {
        return Err(CoreError::Validation(
            "Revision requests must include review notes explaining what needs changing"
                .to_string(),
        ));
    }

    if let Some(n) = trimmed {
        if n.len() > MAX_REVIEW_NOTES_LENGTH {
            return Err(CoreError::Validation(format!(
                "Review notes exceed maximum length of {MAX_REVIEW_NOTES_LENGTH} characters"
            )));
        }
    }

    Ok(())
}
