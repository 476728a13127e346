//! In-request notification outbox.
//!
//! Workflow operations queue `(recipient, kind, content, related_id)` events
//! while they run; a single [`NotificationOutbox::dispatch`] call at the end
//! of the request attempts delivery. The workflow transition is the source
//! of truth: a failed insert is logged at WARN and never surfaces to the
//! caller or reverses the transition.

use sqlx::PgPool;

use folio_core::notify::NotificationKind;
use folio_core::types::DbId;

use folio_db::repositories::NotificationRepo;

/// One queued notification event.
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub recipient: DbId,
    pub kind: NotificationKind,
    pub content: String,
    pub related_id: Option<DbId>,
}

/// Collects notification events during one request.
#[derive(Debug, Default)]
pub struct NotificationOutbox {
    events: Vec<OutboxEvent>,
}

impl NotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification for one recipient.
    ///
    /// The content is rendered from the kind plus the article title and
    /// publication name, per the workflow's display contract.
    pub fn push(
        &mut self,
        recipient: DbId,
        kind: NotificationKind,
        article_title: &str,
        publication_name: &str,
        related_id: Option<DbId>,
    ) {
        self.events.push(OutboxEvent {
            recipient,
            kind,
            content: kind.render(article_title, publication_name),
            related_id,
        });
    }

    /// Queue the same notification for several recipients, skipping one
    /// excluded user (typically the actor who triggered the transition).
    pub fn push_all(
        &mut self,
        recipients: &[DbId],
        exclude: DbId,
        kind: NotificationKind,
        article_title: &str,
        publication_name: &str,
        related_id: Option<DbId>,
    ) {
        for &recipient in recipients {
            if recipient != exclude {
                self.push(recipient, kind, article_title, publication_name, related_id);
            }
        }
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Attempt delivery of every queued event. Best-effort: failures are
    /// logged and swallowed.
    pub async fn dispatch(self, pool: &PgPool) {
        for event in self.events {
            let result = NotificationRepo::create(
                pool,
                event.recipient,
                event.kind.as_str(),
                &event.content,
                event.related_id,
            )
            .await;

            if let Err(e) = result {
                tracing::warn!(
                    recipient = event.recipient,
                    kind = %event.kind,
                    error = %e,
                    "Notification delivery failed; workflow state is already committed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_renders_content() {
        let mut outbox = NotificationOutbox::new();
        outbox.push(
            7,
            NotificationKind::SubmissionApproved,
            "My Essay",
            "The Weekly",
            Some(3),
        );
        assert_eq!(outbox.len(), 1);
        assert!(outbox.events[0].content.contains("My Essay"));
        assert!(outbox.events[0].content.contains("The Weekly"));
    }

    #[test]
    fn push_all_excludes_actor() {
        let mut outbox = NotificationOutbox::new();
        outbox.push_all(
            &[1, 2, 3],
            2,
            NotificationKind::SubmissionReceived,
            "Title",
            "Pub",
            None,
        );
        let recipients: Vec<_> = outbox.events.iter().map(|e| e.recipient).collect();
        assert_eq!(recipients, vec![1, 3]);
    }

    #[test]
    fn new_outbox_is_empty() {
        assert!(NotificationOutbox::new().is_empty());
    }
}
