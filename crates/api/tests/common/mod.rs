//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the application router exactly as `main.rs` does (same middleware
//! stack) against a per-test database provided by `#[sqlx::test]`, and
//! provides request/response helpers built on `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Generate a valid access token for a user id, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Send a GET request without authentication.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// Database fixtures shared by the workflow test suites.
///
/// Entities are created through the repository layer, the same way the
/// handlers create them.
pub mod fixtures {
    use sqlx::PgPool;

    use folio_core::types::DbId;
    use folio_db::models::article::{Article, CreateArticle};
    use folio_db::models::publication::{CreatePublication, Publication};
    use folio_db::models::user::{CreateUser, User};
    use folio_db::repositories::{ArticleRepo, PublicationRepo, UserRepo};

    /// Create a user with a placeholder password hash (login is not under
    /// test here; auth tests hash for real).
    pub async fn create_user(pool: &PgPool, username: &str) -> User {
        UserRepo::create(
            pool,
            &CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                password_hash: "not-a-real-hash".to_string(),
            },
        )
        .await
        .expect("user creation should succeed")
    }

    /// Create a publication owned by `owner_id`.
    pub async fn create_publication(pool: &PgPool, owner_id: DbId, name: &str) -> Publication {
        PublicationRepo::create(
            pool,
            &CreatePublication {
                name: name.to_string(),
                description: None,
                owner_id,
            },
        )
        .await
        .expect("publication creation should succeed")
    }

    /// Add a member with the given role (`writer`, `editor`, or `admin`).
    pub async fn add_member(pool: &PgPool, publication_id: DbId, user_id: DbId, role: &str) {
        PublicationRepo::add_member(pool, publication_id, user_id, role)
            .await
            .expect("membership creation should succeed");
    }

    /// Create a draft article authored by `author_id`.
    pub async fn create_article(pool: &PgPool, author_id: DbId, title: &str) -> Article {
        ArticleRepo::create(
            pool,
            &CreateArticle {
                author_id,
                title: title.to_string(),
                content: serde_json::json!({ "blocks": [{ "text": "draft" }] }),
            },
        )
        .await
        .expect("article creation should succeed")
    }
}
