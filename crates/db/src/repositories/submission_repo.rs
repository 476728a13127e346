//! Repository for the `submissions` table -- the Submission Store.
//!
//! Status transitions are guarded UPDATEs: the expected source state is part
//! of the WHERE clause, so a transition that races with a conflicting one
//! affects zero rows instead of silently overwriting a terminal status. The
//! partial unique index `uq_submissions_active` enforces the single-active
//! invariant per (article, publication) pair at the storage layer.

use sqlx::PgPool;

use folio_core::submission::SubmissionStatus;
use folio_core::types::DbId;

use crate::models::submission::{PendingSubmission, Submission};

/// Column list for `submissions` queries.
const COLUMNS: &str = "id, article_id, publication_id, submitted_by, status, \
    assigned_reviewer_id, review_notes, created_at, updated_at";

/// SQL filter matching the non-terminal statuses.
const ACTIVE_FILTER: &str = "status IN ('pending', 'under_review', 'revision_requested')";

/// Provides lifecycle operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission in `pending` state, returning the created row.
    ///
    /// Violating the single-active index surfaces as a unique-constraint
    /// database error, which the API layer maps to 409.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        publication_id: DbId,
        submitted_by: DbId,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (article_id, publication_id, submitted_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(article_id)
            .bind(publication_id)
            .bind(submitted_by)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active (non-terminal) submission for an article+publication
    /// pair, if one exists.
    pub async fn find_active(
        pool: &PgPool,
        article_id: DbId,
        publication_id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE article_id = $1 AND publication_id = $2 AND {ACTIVE_FILTER}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(article_id)
            .bind(publication_id)
            .fetch_optional(pool)
            .await
    }

    /// List a publication's non-terminal submissions, oldest first, joined
    /// with article title and author username for display.
    pub async fn list_pending(
        pool: &PgPool,
        publication_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PendingSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT s.id, s.article_id, s.publication_id, s.submitted_by, s.status,
                    s.assigned_reviewer_id, a.title AS article_title,
                    u.username AS author_username, s.created_at, s.updated_at
             FROM submissions s
             JOIN articles a ON a.id = s.article_id
             JOIN users u ON u.id = a.author_id
             WHERE s.publication_id = $1 AND s.{ACTIVE_FILTER}
             ORDER BY s.created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PendingSubmission>(&query)
            .bind(publication_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a publication's non-terminal submissions.
    pub async fn count_pending(
        pool: &PgPool,
        publication_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM submissions WHERE publication_id = $1 AND {ACTIVE_FILTER}"
        );
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(publication_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Set the assigned reviewer. Does not change status.
    ///
    /// Returns the updated row, or `None` if the submission does not exist
    /// or is already terminal.
    pub async fn assign_reviewer(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions
             SET assigned_reviewer_id = $2, updated_at = NOW()
             WHERE id = $1 AND {ACTIVE_FILTER}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(reviewer_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a reviewer decision (`rejected` or `revision_requested`),
    /// storing the review notes.
    ///
    /// The UPDATE is guarded on the submission still being active; `None`
    /// means it was already terminal (or gone) and nothing changed.
    /// Approval goes through [`SubmissionRepo::approve`] instead, which also
    /// publishes the article.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        to: SubmissionStatus,
        notes: Option<&str>,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions
             SET status = $2, review_notes = $3, updated_at = NOW()
             WHERE id = $1 AND {ACTIVE_FILTER}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Approve a submission and publish its article, atomically.
    ///
    /// Both UPDATEs run in one transaction: either the submission becomes
    /// `approved` and the article is published under the publication, or
    /// neither happens. `None` means the submission was terminal or missing.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        notes: Option<&str>,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE submissions
             SET status = 'approved', review_notes = $2, updated_at = NOW()
             WHERE id = $1 AND {ACTIVE_FILTER}
             RETURNING {COLUMNS}"
        );
        let submission = sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(submission) = submission else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE articles
             SET status = 'published', publication_id = $2, published_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(submission.article_id)
        .bind(submission.publication_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(submission))
    }

    /// Return a `revision_requested` submission to `pending` (resubmission).
    ///
    /// Guarded on the exact source state; `None` means the submission was
    /// not awaiting revisions.
    pub async fn resubmit(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions
             SET status = 'pending', updated_at = NOW()
             WHERE id = $1 AND status = 'revision_requested'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
