//! Storage-level tests for revision history: append-only numbering,
//! contributors, and the restore transaction.

use sqlx::PgPool;

use folio_core::types::DbId;
use folio_db::models::article::CreateArticle;
use folio_db::models::revision::CreateRevision;
use folio_db::models::user::CreateUser;
use folio_db::repositories::{ArticleRepo, RevisionRepo, UserRepo};

async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_article(pool: &PgPool, author_id: DbId) -> DbId {
    ArticleRepo::create(
        pool,
        &CreateArticle {
            author_id,
            title: "Versioned".to_string(),
            content: serde_json::json!({ "v": 0 }),
        },
    )
    .await
    .unwrap()
    .id
}

async fn record(pool: &PgPool, article_id: DbId, user_id: DbId, v: i64) -> i32 {
    RevisionRepo::create(
        pool,
        &CreateRevision {
            article_id,
            revision_data: serde_json::json!({ "v": v }),
            change_summary: None,
            is_major: false,
            created_by: user_id,
        },
    )
    .await
    .unwrap()
    .revision_number
}

/// Numbers are allocated per article, starting at 1, with no gaps.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_numbering_is_per_article(pool: PgPool) {
    let user_id = seed_user(&pool, "writer").await;
    let first = seed_article(&pool, user_id).await;
    let second = seed_article(&pool, user_id).await;

    assert_eq!(record(&pool, first, user_id, 1).await, 1);
    assert_eq!(record(&pool, first, user_id, 2).await, 2);
    assert_eq!(record(&pool, second, user_id, 1).await, 1);
    assert_eq!(record(&pool, first, user_id, 3).await, 3);
}

/// Listing pages newest first; lookup by number returns the exact snapshot.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_lookup(pool: PgPool) {
    let user_id = seed_user(&pool, "writer").await;
    let article_id = seed_article(&pool, user_id).await;
    for v in 1..=4 {
        record(&pool, article_id, user_id, v).await;
    }

    let page = RevisionRepo::list_for_article(&pool, article_id, 2, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].revision_number, 4);
    assert_eq!(page[1].revision_number, 3);

    let found = RevisionRepo::find_by_number(&pool, article_id, 2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.revision_data, serde_json::json!({ "v": 2 }));

    assert!(RevisionRepo::find_by_number(&pool, article_id, 9)
        .await
        .unwrap()
        .is_none());
}

/// Contributors aggregates per user across the article's history.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contributors(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let article_id = seed_article(&pool, alice).await;

    record(&pool, article_id, alice, 1).await;
    record(&pool, article_id, alice, 2).await;
    record(&pool, article_id, bob, 3).await;

    let contributors = RevisionRepo::contributors(&pool, article_id).await.unwrap();
    assert_eq!(contributors.len(), 2);
    let alice_row = contributors
        .iter()
        .find(|c| c.username == "alice")
        .expect("alice should be listed");
    assert_eq!(alice_row.revision_count, 2);
}

/// Restore copies the snapshot into the article and appends a new revision
/// marked major; it never rewrites or renumbers history.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_appends(pool: PgPool) {
    let user_id = seed_user(&pool, "writer").await;
    let article_id = seed_article(&pool, user_id).await;
    record(&pool, article_id, user_id, 1).await;
    record(&pool, article_id, user_id, 2).await;

    let restored = RevisionRepo::restore(&pool, article_id, 1, user_id)
        .await
        .unwrap()
        .expect("restore should find revision 1");
    assert_eq!(restored.revision_number, 3);
    assert_eq!(restored.revision_data, serde_json::json!({ "v": 1 }));
    assert_eq!(restored.change_summary.as_deref(), Some("Restored from revision 1"));
    assert!(restored.is_major);

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.content, serde_json::json!({ "v": 1 }));

    assert_eq!(RevisionRepo::count_for_article(&pool, article_id).await.unwrap(), 3);

    // Restoring a number that never existed changes nothing.
    assert!(RevisionRepo::restore(&pool, article_id, 9, user_id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(RevisionRepo::count_for_article(&pool, article_id).await.unwrap(), 3);
}
