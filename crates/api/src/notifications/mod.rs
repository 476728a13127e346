//! Workflow notification fan-out.
//!
//! Transitions never call the notification sink inline; they queue events
//! on a [`NotificationOutbox`] and the handler dispatches once after the
//! state change has committed.

pub mod outbox;

pub use outbox::NotificationOutbox;
