//! Repository for the `revisions` table.
//!
//! Revision numbers are allocated inside the INSERT (max + 1 per article,
//! starting at 1); the unique index on (article_id, revision_number) turns
//! a concurrent allocation race into a retryable constraint error instead
//! of a duplicate number. Rows are immutable once written.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::revision::{CreateRevision, Revision, RevisionContributor};

/// Column list for `revisions` queries.
const COLUMNS: &str = "id, article_id, revision_number, revision_data, change_summary, \
    is_major, created_by, created_at";

/// Provides append-only operations for revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a new revision with the next number for the article.
    pub async fn create(pool: &PgPool, input: &CreateRevision) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions
                (article_id, revision_number, revision_data, change_summary, is_major, created_by)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(revision_number), 0) + 1 FROM revisions WHERE article_id = $1),
                $2, $3, $4, $5
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(input.article_id)
            .bind(&input.revision_data)
            .bind(&input.change_summary)
            .bind(input.is_major)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a specific revision of an article.
    pub async fn find_by_number(
        pool: &PgPool,
        article_id: DbId,
        revision_number: i32,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE article_id = $1 AND revision_number = $2"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(article_id)
            .bind(revision_number)
            .fetch_optional(pool)
            .await
    }

    /// List an article's revisions, newest first.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE article_id = $1
             ORDER BY revision_number DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(article_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count an article's revisions.
    pub async fn count_for_article(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM revisions WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }

    /// Restore an article's live content from a stored snapshot.
    ///
    /// Runs in one transaction: copies the snapshot at `revision_number`
    /// into `articles.content` and appends a new revision recording the
    /// restore. History is never rewritten. Returns the new revision, or
    /// `None` if the source revision does not exist.
    pub async fn restore(
        pool: &PgPool,
        article_id: DbId,
        revision_number: i32,
        restored_by: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE article_id = $1 AND revision_number = $2"
        );
        let source = sqlx::query_as::<_, Revision>(&query)
            .bind(article_id)
            .bind(revision_number)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(source) = source else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE articles SET content = $2, updated_at = NOW() WHERE id = $1")
            .bind(article_id)
            .bind(&source.revision_data)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO revisions
                (article_id, revision_number, revision_data, change_summary, is_major, created_by)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(revision_number), 0) + 1 FROM revisions WHERE article_id = $1),
                $2, $3, true, $4
             )
             RETURNING {COLUMNS}"
        );
        let restored = sqlx::query_as::<_, Revision>(&query)
            .bind(article_id)
            .bind(&source.revision_data)
            .bind(format!("Restored from revision {revision_number}"))
            .bind(restored_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(restored))
    }

    /// Aggregate contributors for an article's revision history, most
    /// prolific first.
    pub async fn contributors(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<RevisionContributor>, sqlx::Error> {
        sqlx::query_as::<_, RevisionContributor>(
            "SELECT r.created_by AS user_id, u.username, COUNT(*) AS revision_count
             FROM revisions r
             JOIN users u ON u.id = r.created_by
             WHERE r.article_id = $1
             GROUP BY r.created_by, u.username
             ORDER BY revision_count DESC, u.username ASC",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }
}
