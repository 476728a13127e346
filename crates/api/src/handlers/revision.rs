//! Handlers for article revision tracking: snapshot creation, history,
//! comparison, and restore.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_core::revision::{compare_snapshots, validate_change_summary, validate_snapshot};
use folio_core::roles::PublicationRole;
use folio_core::types::DbId;
use folio_db::models::article::Article;
use folio_db::models::revision::CreateRevision;
use folio_db::repositories::{ArticleRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::workflow::permissions;

/// Maximum page size for revision listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for revision listing.
const DEFAULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /articles/{id}/revisions`.
#[derive(Debug, Deserialize)]
pub struct CreateRevisionRequest {
    pub revision_data: serde_json::Value,
    pub change_summary: Option<String>,
    pub is_major: Option<bool>,
}

/// Query parameters for `GET /articles/{id}/revisions`.
#[derive(Debug, Deserialize)]
pub struct RevisionListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /articles/{id}/revisions/compare`.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub from: i32,
    pub to: i32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an article or fail with 404.
async fn load_article(pool: &sqlx::PgPool, id: DbId) -> AppResult<Article> {
    ArticleRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        })
    })
}

/// Require revision capability on an article: its author, or `editor`+ in
/// the publication it is published under. Fails closed for articles outside
/// any publication when the caller is not the author.
async fn require_revision_capability(
    pool: &sqlx::PgPool,
    article: &Article,
    user_id: DbId,
) -> AppResult<()> {
    if article.author_id == user_id {
        return Ok(());
    }
    if let Some(publication_id) = article.publication_id {
        if permissions::has_permission(pool, publication_id, user_id, PublicationRole::Editor)
            .await?
        {
            return Ok(());
        }
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Requires article authorship or editor capability in its publication".into(),
    )))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{id}/revisions
///
/// Store an immutable content snapshot with the next revision number.
pub async fn create_revision(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Json(input): Json<CreateRevisionRequest>,
) -> AppResult<impl IntoResponse> {
    let article = load_article(&state.pool, article_id).await?;
    require_revision_capability(&state.pool, &article, auth.user_id).await?;

    validate_snapshot(&input.revision_data).map_err(AppError::Core)?;
    validate_change_summary(input.change_summary.as_deref()).map_err(AppError::Core)?;

    let revision = RevisionRepo::create(
        &state.pool,
        &CreateRevision {
            article_id,
            revision_data: input.revision_data,
            change_summary: input.change_summary,
            is_major: input.is_major.unwrap_or(false),
            created_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(
        article_id,
        revision_number = revision.revision_number,
        user_id = auth.user_id,
        "Revision created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::data(revision))))
}

/// GET /api/v1/articles/{id}/revisions
///
/// Paginated revision history plus aggregate stats (total count and
/// contributor list).
pub async fn list_revisions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Query(params): Query<RevisionListQuery>,
) -> AppResult<impl IntoResponse> {
    let article = load_article(&state.pool, article_id).await?;
    require_revision_capability(&state.pool, &article, auth.user_id).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let revisions = RevisionRepo::list_for_article(&state.pool, article_id, limit, offset).await?;
    let total_revisions = RevisionRepo::count_for_article(&state.pool, article_id).await?;
    let contributors = RevisionRepo::contributors(&state.pool, article_id).await?;

    Ok(Json(ApiResponse::data(serde_json::json!({
        "revisions": revisions,
        "total_revisions": total_revisions,
        "contributors": contributors,
        "limit": limit,
        "offset": offset,
    }))))
}

/// GET /api/v1/articles/{id}/revisions/compare?from=&to=
///
/// Block-level diff between two stored snapshots. Pure read.
pub async fn compare_revisions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Query(params): Query<CompareQuery>,
) -> AppResult<impl IntoResponse> {
    let article = load_article(&state.pool, article_id).await?;
    require_revision_capability(&state.pool, &article, auth.user_id).await?;

    let from = RevisionRepo::find_by_number(&state.pool, article_id, params.from)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Revision",
                id: params.from as DbId,
            })
        })?;
    let to = RevisionRepo::find_by_number(&state.pool, article_id, params.to)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Revision",
                id: params.to as DbId,
            })
        })?;

    let changes = compare_snapshots(&from.revision_data, &to.revision_data);

    Ok(Json(ApiResponse::data(serde_json::json!({
        "article_id": article_id,
        "from_revision": from.revision_number,
        "to_revision": to.revision_number,
        "changed_blocks": changes.len(),
        "changes": changes,
    }))))
}

/// POST /api/v1/articles/{id}/revisions/{number}/restore
///
/// Copy a stored snapshot into the article's live content. History is
/// append-only: the restore itself is recorded as a new revision.
pub async fn restore_revision(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((article_id, revision_number)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let article = load_article(&state.pool, article_id).await?;
    require_revision_capability(&state.pool, &article, auth.user_id).await?;

    let restored = RevisionRepo::restore(&state.pool, article_id, revision_number, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Revision",
                id: revision_number as DbId,
            })
        })?;

    tracing::info!(
        article_id,
        source_revision = revision_number,
        new_revision = restored.revision_number,
        user_id = auth.user_id,
        "Article restored from revision"
    );

    Ok(Json(ApiResponse::message_with_data(
        format!("Restored article from revision {revision_number}"),
        restored,
    )))
}
