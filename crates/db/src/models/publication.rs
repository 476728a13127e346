//! Publication entity models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `publications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publication {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `publication_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicationMember {
    pub id: DbId,
    pub publication_id: DbId,
    pub user_id: DbId,
    /// One of `writer`, `editor`, `admin`. The owner is tracked on the
    /// publication row, never here.
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a publication.
#[derive(Debug)]
pub struct CreatePublication {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: DbId,
}
