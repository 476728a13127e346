//! Notification kinds emitted by workflow transitions.
//!
//! Each successful transition produces exactly one kind of notification;
//! the rendered content carries the article title and publication name for
//! display. Delivery is handled by the API layer's outbox and is always
//! best-effort.

use serde::{Deserialize, Serialize};

/// The type of a workflow notification, stored in `notifications.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to publication staff when a new submission arrives.
    SubmissionReceived,
    /// Sent to the assigned reviewer.
    ReviewerAssigned,
    /// Sent to the article's author on approval.
    SubmissionApproved,
    /// Sent to the article's author on rejection.
    SubmissionRejected,
    /// Sent to the article's author when changes are requested.
    RevisionRequested,
    /// Sent to the assigned reviewer (if any) on resubmission.
    SubmissionResubmitted,
}

impl NotificationKind {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmissionReceived => "submission_received",
            Self::ReviewerAssigned => "reviewer_assigned",
            Self::SubmissionApproved => "submission_approved",
            Self::SubmissionRejected => "submission_rejected",
            Self::RevisionRequested => "revision_requested",
            Self::SubmissionResubmitted => "submission_resubmitted",
        }
    }

    /// Render the display message for this notification.
    pub fn render(&self, article_title: &str, publication_name: &str) -> String {
        match self {
            Self::SubmissionReceived => format!(
                "\"{article_title}\" was submitted to {publication_name} for review"
            ),
            Self::ReviewerAssigned => format!(
                "You were assigned to review \"{article_title}\" for {publication_name}"
            ),
            Self::SubmissionApproved => format!(
                "\"{article_title}\" was approved and published in {publication_name}"
            ),
            Self::SubmissionRejected => {
                format!("\"{article_title}\" was not accepted by {publication_name}")
            }
            Self::RevisionRequested => format!(
                "{publication_name} requested revisions to \"{article_title}\""
            ),
            Self::SubmissionResubmitted => format!(
                "\"{article_title}\" was resubmitted to {publication_name} after revisions"
            ),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_is_snake_case() {
        assert_eq!(NotificationKind::SubmissionReceived.as_str(), "submission_received");
        assert_eq!(NotificationKind::ReviewerAssigned.as_str(), "reviewer_assigned");
        assert_eq!(NotificationKind::RevisionRequested.as_str(), "revision_requested");
    }

    #[test]
    fn render_includes_title_and_publication() {
        let msg = NotificationKind::SubmissionApproved.render("My Essay", "The Weekly");
        assert!(msg.contains("My Essay"));
        assert!(msg.contains("The Weekly"));
    }

    #[test]
    fn serde_matches_as_str() {
        for kind in [
            NotificationKind::SubmissionReceived,
            NotificationKind::ReviewerAssigned,
            NotificationKind::SubmissionApproved,
            NotificationKind::SubmissionRejected,
            NotificationKind::RevisionRequested,
            NotificationKind::SubmissionResubmitted,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
