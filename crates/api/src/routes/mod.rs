pub mod articles;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /submissions                                     submit article (POST)
/// /submissions/{id}/assign-reviewer                assign reviewer (POST, admin)
/// /submissions/{id}/approve                        approve (POST, reviewer)
/// /submissions/{id}/reject                         reject (POST, reviewer)
/// /submissions/{id}/request-revision               request changes (POST, reviewer)
/// /submissions/{id}/resubmit                       resubmit (POST, submitter)
///
/// /publications/{id}/submissions                   pending queue (GET, editor)
///
/// /articles/{id}/revisions                         create (POST), history (GET)
/// /articles/{id}/revisions/compare                 diff two revisions (GET)
/// /articles/{id}/revisions/{number}/restore        restore snapshot (POST)
///
/// /notifications                                   list (GET)
/// /notifications/{id}/read                         mark read (POST)
/// /notifications/read-all                          mark all read (POST)
/// /notifications/unread-count                      unread count (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/submissions", submissions::router())
        .nest("/publications", submissions::publication_router())
        .nest("/articles", articles::router())
        .nest("/notifications", notifications::router())
}
