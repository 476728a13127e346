//! Submission entity models and DTOs.

use folio_core::error::CoreError;
use folio_core::submission::SubmissionStatus;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `submissions` table: one article's candidacy in one
/// publication's review pipeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub article_id: DbId,
    pub publication_id: DbId,
    pub submitted_by: DbId,
    /// Stored status string; parse with [`Submission::status`].
    pub status: String,
    pub assigned_reviewer_id: Option<DbId>,
    pub review_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Submission {
    /// The submission's status as a typed state machine value.
    pub fn status(&self) -> Result<SubmissionStatus, CoreError> {
        SubmissionStatus::parse(&self.status)
    }
}

/// A pending-queue row joined with article and author display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingSubmission {
    pub id: DbId,
    pub article_id: DbId,
    pub publication_id: DbId,
    pub submitted_by: DbId,
    pub status: String,
    pub assigned_reviewer_id: Option<DbId>,
    pub article_title: String,
    pub author_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
