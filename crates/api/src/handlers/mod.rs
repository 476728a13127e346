pub mod auth;
pub mod notification;
pub mod revision;
pub mod submission;
