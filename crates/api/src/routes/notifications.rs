//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Notification routes, nested under `/notifications`.
///
/// ```text
/// GET    /                  list_notifications
/// POST   /{id}/read         mark_read
/// POST   /read-all          mark_all_read
/// GET    /unread-count      unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_notifications))
        .route("/{id}/read", post(notification::mark_read))
        .route("/read-all", post(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
}
