pub mod article_repo;
pub mod notification_repo;
pub mod publication_repo;
pub mod revision_repo;
pub mod submission_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use notification_repo::NotificationRepo;
pub use publication_repo::PublicationRepo;
pub use revision_repo::RevisionRepo;
pub use submission_repo::SubmissionRepo;
pub use user_repo::UserRepo;
