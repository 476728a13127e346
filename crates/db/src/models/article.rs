//! Article entity models and DTOs.
//!
//! The workflow only mutates an article's publish status, publication
//! linkage, and (on revision restore) its content; everything else is owned
//! by the wider article subsystem.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    /// Structured block-editor document.
    pub content: serde_json::Value,
    /// `draft` or `published`.
    pub status: String,
    pub publication_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an article.
#[derive(Debug)]
pub struct CreateArticle {
    pub author_id: DbId,
    pub title: String,
    pub content: serde_json::Value,
}
