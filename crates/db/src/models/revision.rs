//! Revision entity models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `revisions` table: an immutable content snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub article_id: DbId,
    pub revision_number: i32,
    pub revision_data: serde_json::Value,
    pub change_summary: Option<String>,
    pub is_major: bool,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a revision. The revision number is allocated by the
/// repository, never supplied by callers.
#[derive(Debug)]
pub struct CreateRevision {
    pub article_id: DbId,
    pub revision_data: serde_json::Value,
    pub change_summary: Option<String>,
    pub is_major: bool,
    pub created_by: DbId,
}

/// A contributor aggregate for an article's revision history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionContributor {
    pub user_id: DbId,
    pub username: String,
    pub revision_count: i64,
}
