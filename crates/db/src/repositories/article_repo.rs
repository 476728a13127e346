//! Repository for the `articles` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::article::{Article, CreateArticle};

/// Column list for `articles` queries.
const COLUMNS: &str = "id, author_id, title, content, status, publication_id, \
    published_at, created_at, updated_at";

/// Provides operations for articles.
///
/// The workflow reads articles for ownership checks and display fields.
/// Content and status writes run inside the transactions that own them:
/// publish-on-approval in [`crate::repositories::SubmissionRepo::approve`],
/// content restore in [`crate::repositories::RevisionRepo::restore`].
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new draft article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (author_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find an article by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
