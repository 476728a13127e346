//! Handlers for the editorial submission workflow -- the orchestrator.
//!
//! Every state-changing operation follows the same shape: resolve the
//! caller's capability through the permission resolver, apply a guarded
//! update through the Submission Store, then dispatch queued notifications.
//! Notification delivery is best-effort and never reverses a committed
//! transition.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_core::notify::NotificationKind;
use folio_core::roles::PublicationRole;
use folio_core::submission::{validate_review_notes, SubmissionStatus};
use folio_core::types::DbId;
use folio_db::models::article::Article;
use folio_db::models::publication::Publication;
use folio_db::models::submission::Submission;
use folio_db::repositories::{ArticleRepo, PublicationRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::NotificationOutbox;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::workflow::permissions;

/// Maximum page size for submission listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for submission listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmitArticleRequest {
    pub article_id: DbId,
    pub publication_id: DbId,
}

/// Request body for `POST /submissions/{id}/assign-reviewer`.
#[derive(Debug, Deserialize)]
pub struct AssignReviewerRequest {
    pub reviewer_id: DbId,
}

/// Request body for the reviewer decision endpoints.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub review_notes: Option<String>,
}

/// Query parameters for `GET /publications/{id}/submissions`.
#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a submission or fail with 404.
async fn load_submission(pool: &sqlx::PgPool, id: DbId) -> AppResult<Submission> {
    SubmissionRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Submission",
                id,
            })
        })
}

/// Load the article and publication a submission refers to, for permission
/// checks and notification rendering.
async fn load_submission_context(
    pool: &sqlx::PgPool,
    submission: &Submission,
) -> AppResult<(Article, Publication)> {
    let article = ArticleRepo::find_by_id(pool, submission.article_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Article",
                id: submission.article_id,
            })
        })?;
    let publication = PublicationRepo::find_by_id(pool, submission.publication_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Publication",
                id: submission.publication_id,
            })
        })?;
    Ok((article, publication))
}

/// Reject the operation with 400 if the submission is already terminal.
fn ensure_not_terminal(submission: &Submission) -> AppResult<()> {
    let status = submission.status().map_err(AppError::Core)?;
    if status.is_terminal() {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Submission is already {status} and cannot be changed"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Submit / list
// ---------------------------------------------------------------------------

/// POST /api/v1/submissions
///
/// Submit an article to a publication's review pipeline. The caller must
/// own the article and hold at least `writer` capability in the
/// publication; an existing active submission for the pair blocks a new one.
pub async fn submit_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::find_by_id(&state.pool, input.article_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Article",
                id: input.article_id,
            })
        })?;

    if article.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the article's author can submit it".into(),
        )));
    }

    permissions::require_permission(
        &state.pool,
        input.publication_id,
        auth.user_id,
        PublicationRole::Writer,
    )
    .await?;

    // The permission check already established the publication exists.
    let publication = PublicationRepo::find_by_id(&state.pool, input.publication_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Publication",
                id: input.publication_id,
            })
        })?;

    if let Some(existing) =
        SubmissionRepo::find_active(&state.pool, input.article_id, input.publication_id).await?
    {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Article already has an active submission ({}) to this publication",
            existing.status
        ))));
    }

    let submission = SubmissionRepo::create(
        &state.pool,
        input.article_id,
        input.publication_id,
        auth.user_id,
    )
    .await?;

    tracing::info!(
        submission_id = submission.id,
        article_id = article.id,
        publication_id = publication.id,
        user_id = auth.user_id,
        "Article submitted for review"
    );

    // Fan out to the publication's editorial staff; the submitter may be on
    // staff themselves and is excluded.
    let staff = PublicationRepo::staff_user_ids(&state.pool, publication.id).await?;
    let mut outbox = NotificationOutbox::new();
    outbox.push_all(
        &staff,
        auth.user_id,
        NotificationKind::SubmissionReceived,
        &article.title,
        &publication.name,
        Some(submission.id),
    );
    outbox.dispatch(&state.pool).await;

    Ok((StatusCode::OK, Json(ApiResponse::data(submission))))
}

/// GET /api/v1/publications/{id}/submissions
///
/// List a publication's non-terminal submissions, oldest first. Requires
/// `editor` capability.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(publication_id): Path<DbId>,
    Query(params): Query<PendingQuery>,
) -> AppResult<impl IntoResponse> {
    permissions::require_permission(
        &state.pool,
        publication_id,
        auth.user_id,
        PublicationRole::Editor,
    )
    .await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let submissions =
        SubmissionRepo::list_pending(&state.pool, publication_id, limit, offset).await?;
    let total = SubmissionRepo::count_pending(&state.pool, publication_id).await?;

    Ok(Json(ApiResponse::data(serde_json::json!({
        "submissions": submissions,
        "total": total,
        "limit": limit,
        "offset": offset,
    }))))
}

// ---------------------------------------------------------------------------
// Reviewer assignment
// ---------------------------------------------------------------------------

/// POST /api/v1/submissions/{id}/assign-reviewer
///
/// Assign a reviewer to a submission. Requires `admin` capability in the
/// submission's publication. Does not change the submission's status.
pub async fn assign_reviewer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<AssignReviewerRequest>,
) -> AppResult<impl IntoResponse> {
    let submission = load_submission(&state.pool, submission_id).await?;

    permissions::require_permission(
        &state.pool,
        submission.publication_id,
        auth.user_id,
        PublicationRole::Admin,
    )
    .await?;

    ensure_not_terminal(&submission)?;

    // The reviewer needs some relationship to the publication; assignment
    // itself grants them review capability on this submission.
    let reviewer_role =
        permissions::effective_role(&state.pool, submission.publication_id, input.reviewer_id)
            .await?;
    if reviewer_role.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Reviewer must be a member of the publication".into(),
        )));
    }

    let updated = SubmissionRepo::assign_reviewer(&state.pool, submission_id, input.reviewer_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState(
                "Submission is terminal and cannot be assigned".into(),
            ))
        })?;

    tracing::info!(
        submission_id,
        reviewer_id = input.reviewer_id,
        user_id = auth.user_id,
        "Reviewer assigned"
    );

    let (article, publication) = load_submission_context(&state.pool, &updated).await?;
    let mut outbox = NotificationOutbox::new();
    outbox.push(
        input.reviewer_id,
        NotificationKind::ReviewerAssigned,
        &article.title,
        &publication.name,
        Some(updated.id),
    );
    outbox.dispatch(&state.pool).await;

    Ok(Json(ApiResponse::message_with_data(
        "Reviewer assigned",
        updated,
    )))
}

// ---------------------------------------------------------------------------
// Reviewer decisions
// ---------------------------------------------------------------------------

/// POST /api/v1/submissions/{id}/approve
///
/// Approve a submission and publish its article under the publication.
/// Allowed for `editor`+ capability or the assigned reviewer.
pub async fn approve_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    decide(
        &state,
        auth,
        submission_id,
        SubmissionStatus::Approved,
        input.review_notes,
    )
    .await
}

/// POST /api/v1/submissions/{id}/reject
///
/// Reject a submission. Terminal: the article can only re-enter the
/// pipeline through a fresh submission, and this endpoint never reopens one.
pub async fn reject_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    decide(
        &state,
        auth,
        submission_id,
        SubmissionStatus::Rejected,
        input.review_notes,
    )
    .await
}

/// POST /api/v1/submissions/{id}/request-revision
///
/// Send a submission back to its author for changes. Review notes are
/// mandatory: the reviewer must explain what needs changing.
pub async fn request_revision(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    decide(
        &state,
        auth,
        submission_id,
        SubmissionStatus::RevisionRequested,
        input.review_notes,
    )
    .await
}

/// Shared implementation of the three reviewer decisions.
///
/// Guard order matters: not-found (404) before capability (403) before
/// state conflict (400), so clients can tell the cases apart.
async fn decide(
    state: &AppState,
    auth: AuthUser,
    submission_id: DbId,
    to: SubmissionStatus,
    notes: Option<String>,
) -> AppResult<Json<ApiResponse<Submission>>> {
    let submission = load_submission(&state.pool, submission_id).await?;

    permissions::require_reviewer(&state.pool, &submission, auth.user_id).await?;

    ensure_not_terminal(&submission)?;
    validate_review_notes(to, notes.as_deref()).map_err(AppError::Core)?;

    let notes = notes.as_deref().map(str::trim).filter(|n| !n.is_empty());

    // Guarded update: a concurrent decision that already terminated the
    // submission shows up as zero rows here, not as a silent overwrite.
    let updated = match to {
        SubmissionStatus::Approved => {
            SubmissionRepo::approve(&state.pool, submission_id, notes).await?
        }
        _ => SubmissionRepo::decide(&state.pool, submission_id, to, notes).await?,
    };

    let updated = updated.ok_or_else(|| {
        AppError::Core(CoreError::InvalidState(
            "Submission was already decided by another reviewer".into(),
        ))
    })?;

    tracing::info!(
        submission_id,
        status = %to,
        user_id = auth.user_id,
        "Submission decision recorded"
    );

    let (article, publication) = load_submission_context(&state.pool, &updated).await?;

    let kind = match to {
        SubmissionStatus::Approved => NotificationKind::SubmissionApproved,
        SubmissionStatus::Rejected => NotificationKind::SubmissionRejected,
        _ => NotificationKind::RevisionRequested,
    };

    let mut outbox = NotificationOutbox::new();
    if article.author_id != auth.user_id {
        outbox.push(
            article.author_id,
            kind,
            &article.title,
            &publication.name,
            Some(updated.id),
        );
    }
    outbox.dispatch(&state.pool).await;

    Ok(Json(ApiResponse::message_with_data(
        format!("Submission {to}"),
        updated,
    )))
}

// ---------------------------------------------------------------------------
// Resubmission
// ---------------------------------------------------------------------------

/// POST /api/v1/submissions/{id}/resubmit
///
/// Return a `revision_requested` submission to `pending` after the author
/// has revised the article. Only the original submitter may resubmit.
pub async fn resubmit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = load_submission(&state.pool, submission_id).await?;

    if submission.submitted_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the original submitter can resubmit".into(),
        )));
    }

    let updated = SubmissionRepo::resubmit(&state.pool, submission_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState(format!(
                "Only submissions awaiting revisions can be resubmitted (current status: {})",
                submission.status
            )))
        })?;

    tracing::info!(submission_id, user_id = auth.user_id, "Submission resubmitted");

    let (article, publication) = load_submission_context(&state.pool, &updated).await?;

    // The author is the actor here, so the notification goes to the other
    // side of the workflow: the assigned reviewer if there is one, otherwise
    // the editorial staff.
    let mut outbox = NotificationOutbox::new();
    match updated.assigned_reviewer_id {
        Some(reviewer_id) => outbox.push(
            reviewer_id,
            NotificationKind::SubmissionResubmitted,
            &article.title,
            &publication.name,
            Some(updated.id),
        ),
        None => {
            let staff = PublicationRepo::staff_user_ids(&state.pool, publication.id).await?;
            outbox.push_all(
                &staff,
                auth.user_id,
                NotificationKind::SubmissionResubmitted,
                &article.title,
                &publication.name,
                Some(updated.id),
            );
        }
    }
    outbox.dispatch(&state.pool).await;

    Ok(Json(ApiResponse::message_with_data(
        "Submission resubmitted",
        updated,
    )))
}
