//! Route definitions for article revision tracking.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::revision;
use crate::state::AppState;

/// Article-scoped revision routes, nested under `/articles`.
///
/// ```text
/// POST   /{id}/revisions                      create_revision
/// GET    /{id}/revisions                      list_revisions (+ stats)
/// GET    /{id}/revisions/compare              compare_revisions
/// POST   /{id}/revisions/{number}/restore     restore_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/revisions",
            post(revision::create_revision).get(revision::list_revisions),
        )
        .route("/{id}/revisions/compare", get(revision::compare_revisions))
        .route(
            "/{id}/revisions/{number}/restore",
            post(revision::restore_revision),
        )
}
