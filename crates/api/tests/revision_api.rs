//! HTTP-level integration tests for article revision tracking: snapshot
//! creation, history listing, comparison, and restore.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::fixtures::{add_member, create_article, create_publication, create_user};
use common::{body_json, get_auth, post_json_auth, token_for};
use sqlx::PgPool;

use folio_core::types::DbId;
use folio_db::repositories::RevisionRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn snapshot(text: &str) -> serde_json::Value {
    serde_json::json!({
        "title": "Draft",
        "blocks": [{ "type": "paragraph", "text": text }],
    })
}

/// Create a revision via the API and return its revision number.
async fn create_revision(
    app: &Router,
    article_id: DbId,
    user_id: DbId,
    data: serde_json::Value,
    summary: Option<&str>,
) -> i32 {
    let mut body = serde_json::json!({ "revision_data": data });
    if let Some(s) = summary {
        body["change_summary"] = serde_json::json!(s);
    }
    let response = post_json_auth(
        app,
        &format!("/api/v1/articles/{article_id}/revisions"),
        &token_for(user_id),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["revision_number"]
        .as_i64()
        .expect("revision number") as i32
}

// ---------------------------------------------------------------------------
// Creation and numbering
// ---------------------------------------------------------------------------

/// Revision numbers are dense and start at 1.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revision_numbers_increment(pool: PgPool) {
    let author = create_user(&pool, "author").await;
    let article = create_article(&pool, author.id, "Numbered").await;
    let app = common::build_test_app(pool);

    for expected in 1..=3 {
        let number =
            create_revision(&app, article.id, author.id, snapshot(&format!("v{expected}")), None)
                .await;
        assert_eq!(number, expected);
    }
}

/// A snapshot must be a JSON object; scalars and arrays are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revision_data_must_be_object(pool: PgPool) {
    let author = create_user(&pool, "author").await;
    let article = create_article(&pool, author.id, "Strict").await;
    let app = common::build_test_app(pool);

    for data in [serde_json::json!([1, 2]), serde_json::json!("text"), serde_json::json!(null)] {
        let response = post_json_auth(
            &app,
            &format!("/api/v1/articles/{}/revisions", article.id),
            &token_for(author.id),
            serde_json::json!({ "revision_data": data }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

/// Only the author (or an editor of the article's publication) may record
/// revisions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revision_capability(pool: PgPool) {
    let author = create_user(&pool, "author").await;
    let editor = create_user(&pool, "editor").await;
    let stranger = create_user(&pool, "stranger").await;
    let owner = create_user(&pool, "owner").await;
    let publication = create_publication(&pool, owner.id, "Revisions Weekly").await;
    add_member(&pool, publication.id, editor.id, "editor").await;

    let article = create_article(&pool, author.id, "Shared Draft").await;
    // Published under the publication; editors gain revision capability.
    sqlx::query("UPDATE articles SET publication_id = $1, status = 'published' WHERE id = $2")
        .bind(publication.id)
        .bind(article.id)
        .execute(&pool)
        .await
        .expect("update should succeed");

    let app = common::build_test_app(pool);

    create_revision(&app, article.id, author.id, snapshot("by author"), None).await;
    create_revision(&app, article.id, editor.id, snapshot("by editor"), None).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions", article.id),
        &token_for(stranger.id),
        serde_json::json!({ "revision_data": snapshot("by stranger") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Unknown article yields 404 before any capability check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revision_unknown_article(pool: PgPool) {
    let user = create_user(&pool, "nobody").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        &app,
        "/api/v1/articles/555555/revisions",
        &token_for(user.id),
        serde_json::json!({ "revision_data": snapshot("x") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// History lists newest first and reports totals plus contributors.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revision_history_with_stats(pool: PgPool) {
    let author = create_user(&pool, "historian").await;
    let article = create_article(&pool, author.id, "Chronicle").await;
    let app = common::build_test_app(pool);

    for i in 1..=3 {
        create_revision(&app, article.id, author.id, snapshot(&format!("v{i}")), Some("edit"))
            .await;
    }

    let response = get_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions", article.id),
        &token_for(author.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["total_revisions"], 3);
    let revisions = json["data"]["revisions"].as_array().expect("array");
    assert_eq!(revisions[0]["revision_number"], 3);
    assert_eq!(revisions[2]["revision_number"], 1);

    let contributors = json["data"]["contributors"].as_array().expect("array");
    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0]["username"], "historian");
    assert_eq!(contributors[0]["revision_count"], 3);
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Comparing two snapshots reports added, removed, and changed blocks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_revisions(pool: PgPool) {
    let author = create_user(&pool, "differ").await;
    let article = create_article(&pool, author.id, "Diffable").await;
    let app = common::build_test_app(pool);

    create_revision(
        &app,
        article.id,
        author.id,
        serde_json::json!({ "title": "Old", "body": "same", "dropped": true }),
        None,
    )
    .await;
    create_revision(
        &app,
        article.id,
        author.id,
        serde_json::json!({ "title": "New", "body": "same", "added": 1 }),
        None,
    )
    .await;

    let response = get_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions/compare?from=1&to=2", article.id),
        &token_for(author.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["from_revision"], 1);
    assert_eq!(json["data"]["to_revision"], 2);
    // "added" added, "dropped" removed, "title" changed; "body" unchanged.
    assert_eq!(json["data"]["changed_blocks"], 3);
    let changes = json["data"]["changes"].as_array().expect("array");
    let change_for = |key: &str| {
        changes
            .iter()
            .find(|c| c["key"] == key)
            .unwrap_or_else(|| panic!("expected a change for {key}"))
    };
    assert_eq!(change_for("added")["status"], "added");
    assert_eq!(change_for("dropped")["status"], "removed");
    assert_eq!(change_for("title")["status"], "changed");
    assert_eq!(change_for("title")["from"], "Old");
    assert_eq!(change_for("title")["to"], "New");
}

/// Comparing against a revision number that does not exist yields 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compare_missing_revision(pool: PgPool) {
    let author = create_user(&pool, "differ").await;
    let article = create_article(&pool, author.id, "Sparse").await;
    let app = common::build_test_app(pool);

    create_revision(&app, article.id, author.id, snapshot("only one"), None).await;

    let response = get_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions/compare?from=1&to=9", article.id),
        &token_for(author.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

/// Restoring copies an old snapshot into the live article and records the
/// restore itself as a new revision; history never shrinks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_appends_revision(pool: PgPool) {
    let author = create_user(&pool, "restorer").await;
    let article = create_article(&pool, author.id, "Time Machine").await;
    let app = common::build_test_app(pool.clone());

    create_revision(&app, article.id, author.id, snapshot("original"), None).await;
    create_revision(&app, article.id, author.id, snapshot("regretted edit"), None).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions/1/restore", article.id),
        &token_for(author.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["revision_number"], 3);
    assert_eq!(json["data"]["revision_data"], snapshot("original"));
    assert_eq!(json["data"]["change_summary"], "Restored from revision 1");

    let content: serde_json::Value =
        sqlx::query_scalar("SELECT content FROM articles WHERE id = $1")
            .bind(article.id)
            .fetch_one(&pool)
            .await
            .expect("article lookup should succeed");
    assert_eq!(content, snapshot("original"));

    let total = RevisionRepo::count_for_article(&pool, article.id)
        .await
        .expect("count should succeed");
    assert_eq!(total, 3);
}

/// Restoring a nonexistent revision yields 404 and appends nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_missing_revision(pool: PgPool) {
    let author = create_user(&pool, "restorer").await;
    let article = create_article(&pool, author.id, "Nothing There").await;
    let app = common::build_test_app(pool.clone());

    create_revision(&app, article.id, author.id, snapshot("v1"), None).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/articles/{}/revisions/7/restore", article.id),
        &token_for(author.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let total = RevisionRepo::count_for_article(&pool, article.id)
        .await
        .expect("count should succeed");
    assert_eq!(total, 1);
}
