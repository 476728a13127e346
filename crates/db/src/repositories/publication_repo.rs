//! Repository for the `publications` and `publication_members` tables.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::publication::{CreatePublication, Publication, PublicationMember};

/// Column list for `publications` queries.
const PUBLICATION_COLUMNS: &str = "id, name, description, owner_id, created_at, updated_at";

/// Column list for `publication_members` queries.
const MEMBER_COLUMNS: &str = "id, publication_id, user_id, role, created_at";

/// Provides operations for publications and their membership.
pub struct PublicationRepo;

impl PublicationRepo {
    /// Insert a new publication, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePublication,
    ) -> Result<Publication, sqlx::Error> {
        let query = format!(
            "INSERT INTO publications (name, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {PUBLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, Publication>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a publication by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!("SELECT {PUBLICATION_COLUMNS} FROM publications WHERE id = $1");
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add (or update) a member with the given role.
    pub async fn add_member(
        pool: &PgPool,
        publication_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<PublicationMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO publication_members (publication_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (publication_id, user_id) DO UPDATE SET role = EXCLUDED.role
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, PublicationMember>(&query)
            .bind(publication_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Look up a user's stored membership role, if any.
    ///
    /// Does not account for ownership; the permission resolver checks
    /// `publications.owner_id` first.
    pub async fn member_role(
        pool: &PgPool,
        publication_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT role FROM publication_members
             WHERE publication_id = $1 AND user_id = $2",
        )
        .bind(publication_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// List the user ids of the publication's editorial staff: the owner
    /// plus all members with `editor` or `admin` role.
    ///
    /// Used for submission-received fan-out.
    pub async fn staff_user_ids(
        pool: &PgPool,
        publication_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT owner_id FROM publications WHERE id = $1
             UNION
             SELECT user_id FROM publication_members
             WHERE publication_id = $1 AND role IN ('editor', 'admin')",
        )
        .bind(publication_id)
        .fetch_all(pool)
        .await
    }
}
