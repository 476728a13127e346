//! The Permission Resolver: effective publication roles and capability
//! checks.
//!
//! Resolution order: the publication owner always ranks `Owner`; otherwise
//! the stored membership role applies; otherwise the user has no
//! relationship to the publication and every check fails. All checks fail
//! closed -- an unknown publication or a malformed role row resolves to "no
//! permission", never to an error the caller might mistake for permission.

use sqlx::PgPool;

use folio_core::error::CoreError;
use folio_core::roles::PublicationRole;
use folio_core::types::DbId;

use folio_db::models::submission::Submission;
use folio_db::repositories::PublicationRepo;

use crate::error::AppResult;

/// Resolve a user's effective role in a publication.
///
/// Returns `None` when the publication does not exist or the user has no
/// relationship to it.
pub async fn effective_role(
    pool: &PgPool,
    publication_id: DbId,
    user_id: DbId,
) -> Result<Option<PublicationRole>, sqlx::Error> {
    let Some(publication) = PublicationRepo::find_by_id(pool, publication_id).await? else {
        return Ok(None);
    };

    if publication.owner_id == user_id {
        return Ok(Some(PublicationRole::Owner));
    }

    let Some(role) = PublicationRepo::member_role(pool, publication_id, user_id).await? else {
        return Ok(None);
    };

    match PublicationRole::parse(&role) {
        Ok(role) => Ok(Some(role)),
        Err(e) => {
            // Fail closed on malformed membership data.
            tracing::error!(
                publication_id,
                user_id,
                role,
                error = %e,
                "Malformed role in membership table; treating as no permission"
            );
            Ok(None)
        }
    }
}

/// Whether the user's effective role meets a minimum capability.
pub async fn has_permission(
    pool: &PgPool,
    publication_id: DbId,
    user_id: DbId,
    minimum: PublicationRole,
) -> Result<bool, sqlx::Error> {
    let role = effective_role(pool, publication_id, user_id).await?;
    Ok(role.is_some_and(|r| r.satisfies(minimum)))
}

/// Require a minimum capability, returning 403 Forbidden otherwise.
pub async fn require_permission(
    pool: &PgPool,
    publication_id: DbId,
    user_id: DbId,
    minimum: PublicationRole,
) -> AppResult<()> {
    if has_permission(pool, publication_id, user_id, minimum).await? {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Requires {minimum} capability in this publication"
        ))
        .into())
    }
}

/// Whether a user may review (approve / reject / request revision of) a
/// submission: `editor`+ capability in the publication, or being its
/// assigned reviewer.
pub async fn can_user_review(
    pool: &PgPool,
    submission: &Submission,
    user_id: DbId,
) -> Result<bool, sqlx::Error> {
    if submission.assigned_reviewer_id == Some(user_id) {
        return Ok(true);
    }
    has_permission(pool, submission.publication_id, user_id, PublicationRole::Editor).await
}

/// Require review capability on a submission, returning 403 otherwise.
pub async fn require_reviewer(
    pool: &PgPool,
    submission: &Submission,
    user_id: DbId,
) -> AppResult<()> {
    if can_user_review(pool, submission, user_id).await? {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Requires editor capability or reviewer assignment for this submission".into(),
        )
        .into())
    }
}
