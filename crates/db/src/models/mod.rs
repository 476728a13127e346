pub mod article;
pub mod notification;
pub mod publication;
pub mod revision;
pub mod submission;
pub mod user;
