//! HTTP API - Router, shared state and request/response mapping.
//!
//! The API is a thin layer over [`crate::core`]: handlers validate input,
//! call a single core operation and map the result (or [`crate::errors::Error`])
//! to a JSON response.

pub mod error;
pub mod extractors;
pub mod handlers;

use crate::{auth::TokenManager, errors::Result};
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Signs and verifies access tokens
    pub tokens: Arc<TokenManager>,
    /// Lifetime of newly issued tokens
    pub token_ttl: chrono::Duration,
}

impl AppState {
    /// Creates the handler state.
    #[must_use]
    pub fn new(db: DatabaseConnection, tokens: TokenManager, token_ttl: chrono::Duration) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            token_ttl,
        }
    }
}

/// Builds the application router with request tracing enabled.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/users", post(handlers::users::register))
        .route("/users/login", post(handlers::users::login))
        .route("/book", post(handlers::reservations::book))
        .route("/cancel", post(handlers::reservations::cancel))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// In-flight requests then get up to `drain_timeout` to finish before the call
/// returns anyway.
///
/// # Errors
/// Returns [`crate::errors::Error::Io`] if the server fails or its task panics.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_rx.await.ok();
            })
            .await
    });

    shutdown.await;
    info!("Shutdown signal received, draining in-flight requests");
    stop_tx.send(()).ok();

    match tokio::time::timeout(drain_timeout, server).await {
        Ok(joined) => joined.map_err(std::io::Error::other)??,
        Err(_) => warn!("In-flight requests did not finish within {drain_timeout:?}, exiting"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::booking, errors::Result, test_utils::*};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TEST_SECRET: &str = "an-http-test-secret-that-is-long-enough";

    async fn test_app(table_sizes: &[i32]) -> Result<(Router, AppState)> {
        let db = setup_test_db().await?;
        seed_test_restaurant(&db, table_sizes, 10).await?;
        let state = AppState::new(
            db,
            TokenManager::new(TEST_SECRET)?,
            chrono::Duration::minutes(60),
        );
        Ok((build_router(state.clone()), state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn register_and_login(app: &Router, username: &str) -> String {
        let credentials = json!({ "username": username, "password": TEST_PASSWORD });
        let (status, _) = send(app, post_json("/users", None, &credentials)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app, post_json("/users/login", None, &credentials)).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    fn future_date() -> String {
        test_date().format("%Y-%m-%d").to_string()
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;

        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(
            listener,
            app,
            async move {
                stop_rx.await.ok();
            },
            Duration::from_secs(5),
        ));

        // Accepting connections before the shutdown signal
        tokio::net::TcpStream::connect(address).await?;

        stop_tx.send(()).unwrap();
        server.await.unwrap()?;

        Ok(())
    }

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_and_login() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let credentials = json!({ "username": "alice", "password": TEST_PASSWORD });

        let (status, body) = send(&app, post_json("/users", None, &credentials)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "alice");
        assert!(body["id"].is_i64());
        assert!(body.get("password_hash").is_none());

        let (status, body) = send(&app, post_json("/users", None, &credentials)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "username already exists");

        let (status, body) = send(&app, post_json("/users/login", None, &credentials)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["access_token"].is_string());
        assert_eq!(body["user"]["username"], "alice");

        let wrong = json!({ "username": "alice", "password": "not-the-password" });
        let (status, body) = send(&app, post_json("/users/login", None, &wrong)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "username or password is incorrect");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_validates_lengths() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;

        let short_name = json!({ "username": "bob", "password": TEST_PASSWORD });
        let (status, _) = send(&app, post_json("/users", None, &short_name)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let short_password = json!({ "username": "robert", "password": "short" });
        let (status, _) = send(&app, post_json("/users", None, &short_password)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, post_json("/users", None, &json!({ "username": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_book_requires_token() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let request = json!({ "seats_count": 2, "date": future_date() });

        let (status, body) = send(&app, post_json("/book", None, &request)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Authorization header is required");

        let malformed = Request::post("/book")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::from(request.to_string()))
            .unwrap();
        let (status, body) = send(&app, malformed).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid Authorization header format");

        let (status, _) = send(&app, post_json("/book", Some("not.a.token"), &request)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_book_and_cancel() -> Result<()> {
        let (app, state) = test_app(&[4, 6]).await?;
        let token = register_and_login(&app, "carol").await;

        let request = json!({ "seats_count": 3, "date": future_date() });
        let (status, body) = send(&app, post_json("/book", Some(&token), &request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["table_id"], 1);
        assert_eq!(body["seats_count"], 4);
        assert_eq!(body["price"], 30);

        let id = body["id"].as_i64().unwrap();
        let (status, body) = send(&app, post_json("/cancel", Some(&token), &json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Reservation canceled successfully");
        assert!(booking::get_reservation_by_id(&state.db, id).await?.is_none());

        let (status, body) = send(&app, post_json("/cancel", Some(&token), &json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "reservation not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_book_rejects_bad_requests() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let token = register_and_login(&app, "daniel").await;

        let cases = [
            json!({ "seats_count": 0, "date": future_date() }),
            json!({ "seats_count": 11, "date": future_date() }),
            json!({ "seats_count": 2, "date": "15/06/2099" }),
            json!({ "seats_count": 2, "date": "2000-01-01" }),
            json!({ "seats_count": "two", "date": future_date() }),
        ];
        for case in &cases {
            let (status, body) = send(&app, post_json("/book", Some(&token), case)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "request {case}");
            assert!(body["error"].is_string());
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_book_when_full() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let token = register_and_login(&app, "eve_user").await;
        let request = json!({ "seats_count": 4, "date": future_date() });

        let (status, _) = send(&app, post_json("/book", Some(&token), &request)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, post_json("/book", Some(&token), &request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no tables are available");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_other_users_reservation() -> Result<()> {
        let (app, _) = test_app(&[4]).await?;
        let owner = register_and_login(&app, "owner_user").await;
        let other = register_and_login(&app, "other_user").await;

        let request = json!({ "seats_count": 2, "date": future_date() });
        let (_, body) = send(&app, post_json("/book", Some(&owner), &request)).await;
        let id = body["id"].as_i64().unwrap();

        let (status, _) = send(&app, post_json("/cancel", Some(&other), &json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, post_json("/cancel", Some(&owner), &json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::OK);

        Ok(())
    }
}
