//! Route definitions for the editorial submission workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submission;
use crate::state::AppState;

/// Submission routes, nested under `/submissions`.
///
/// ```text
/// POST   /                          submit_article
/// POST   /{id}/assign-reviewer      assign_reviewer (admin)
/// POST   /{id}/approve              approve_submission (reviewer)
/// POST   /{id}/reject               reject_submission (reviewer)
/// POST   /{id}/request-revision     request_revision (reviewer)
/// POST   /{id}/resubmit             resubmit (submitter)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submission::submit_article))
        .route(
            "/{id}/assign-reviewer",
            post(submission::assign_reviewer),
        )
        .route("/{id}/approve", post(submission::approve_submission))
        .route("/{id}/reject", post(submission::reject_submission))
        .route("/{id}/request-revision", post(submission::request_revision))
        .route("/{id}/resubmit", post(submission::resubmit))
}

/// Publication-scoped review queue route, nested under `/publications`.
///
/// ```text
/// GET    /{id}/submissions          list_pending (editor)
/// ```
pub fn publication_router() -> Router<AppState> {
    Router::new().route("/{id}/submissions", get(submission::list_pending))
}
