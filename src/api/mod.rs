// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AuthQuery, AuthResponse, ErrorResponse, MessageResponse, RegisterRequest,
        RegisterResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth", get(auth::authenticate).post(auth::register))
        .with_state(state.clone());

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/.well-known/jwks.json", get(auth::jwks))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/auth/docs").url("/auth/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/auth/redoc", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        auth::authenticate,
        auth::register,
        auth::jwks
    ),
    components(
        schemas(
            AuthQuery,
            AuthResponse,
            RegisterRequest,
            RegisterResponse,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Tax id authentication and customer registration"),
        (name = "Health", description = "Service status")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::claims::USER_CLAIMS;
    use crate::auth::testutil::test_private_pem;
    use crate::auth::{validate, TokenSigner};
    use crate::config::Settings;
    use crate::storage::InMemoryUserStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use jsonwebtoken::jwk::JwkSet;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            Settings::default(),
            TokenSigner::from_pem(test_private_pem()).unwrap(),
            Arc::new(InMemoryUserStore::new()),
        )
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn register(app: &Router, tax_id: &str, email: &str, name: &str) -> (StatusCode, Value) {
        let body = json!({ "tax_id": tax_id, "email": email, "name": name });
        send(app, post_json("/v1/auth", body.to_string())).await
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(test_state());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn root_and_health_return_json_messages() {
        let app = router(test_state());

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let (status, body) = send(&app, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Auth Service is running" }));

        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Auth Service is healthy" }));
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let state = test_state();
        let app = router(state.clone());

        let (status, registered) =
            register(&app, "12345678900", "test@example.com", "Test User").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(registered["tax_id"], "12345678900");
        assert_eq!(registered["message"], "User registered successfully");

        let (status, auth) = send(&app, get_request("/v1/auth?tax_id=12345678900")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(auth["user_id"], registered["user_id"]);
        assert_eq!(auth["name"], "Test User");
        assert_eq!(auth["email"], "test@example.com");

        let token = auth["token"].as_str().unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = state.signer.verify(token).unwrap();
        let keys: Vec<&str> = claims.keys().map(String::as_str).collect();
        assert_eq!(keys, USER_CLAIMS);
        assert_eq!(claims["sub"], registered["user_id"]);
        assert_eq!(claims["user_type"], "customers");
    }

    #[tokio::test]
    async fn authenticate_unknown_tax_id_is_not_found() {
        let app = router(test_state());

        let (status, body) = send(&app, get_request("/v1/auth?tax_id=99999999999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn authenticate_rejects_bad_query() {
        let app = router(test_state());

        for uri in [
            "/v1/auth",
            "/v1/auth?tax_id=",
            "/v1/auth?tax_id=+++++++++++",
            "/v1/auth?tax_id=1234567890",
            "/v1/auth?tax_id=123456789012345",
        ] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["detail"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let state = test_state();
        let app = router(state.clone());

        let (status, _) = register(&app, "12345678900", "a@b.com", "A").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = register(&app, "12345678900", "c@d.com", "C").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["detail"].as_str().unwrap().contains("already exists"));
        assert_eq!(state.users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn register_rejects_invalid_bodies() {
        let state = test_state();
        let app = router(state.clone());

        let cases = [
            json!({ "tax_id": "12345678900" }).to_string(),
            json!({ "tax_id": "12345678900", "email": "", "name": "A" }).to_string(),
            json!({ "tax_id": "123", "email": "a@b.com", "name": "A" }).to_string(),
            "{ not json".to_string(),
        ];
        for body in cases {
            let (status, response) = send(&app, post_json("/v1/auth", body.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
            assert!(response["detail"].is_string(), "{body}");
        }
        assert_eq!(state.users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn multiple_users_authenticate_independently() {
        let app = router(test_state());

        let (_, first) = register(&app, "11111111111", "user1@example.com", "User One").await;
        let (_, second) = register(&app, "22222222222", "user2@example.com", "User Two").await;
        assert_ne!(first["user_id"], second["user_id"]);

        let (_, auth) = send(&app, get_request("/v1/auth?tax_id=22222222222")).await;
        assert_eq!(auth["user_id"], second["user_id"]);
        assert_eq!(auth["name"], "User Two");
    }

    #[tokio::test]
    async fn published_key_validates_issued_token() {
        let app = router(test_state());
        register(&app, "12345678900", "a@b.com", "A").await;
        let (_, auth) = send(&app, get_request("/v1/auth?tax_id=12345678900")).await;
        let token = auth["token"].as_str().unwrap();

        let (status, body) = send(&app, get_request("/.well-known/jwks.json")).await;
        assert_eq!(status, StatusCode::OK);
        let set: JwkSet = serde_json::from_value(body).unwrap();
        assert_eq!(set.keys.len(), 1);
        assert!(validate(token, &set.keys[0]));
        assert!(!validate(&format!("{token}x"), &set.keys[0]));
    }

    #[tokio::test]
    async fn redoc_page_is_served() {
        let app = router(test_state());

        let response = app.oneshot(get_request("/auth/redoc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/v1/auth"));
    }

    #[tokio::test]
    async fn openapi_document_lists_auth_routes() {
        let app = router(test_state());

        let (status, body) = send(&app, get_request("/auth/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/v1/auth"]["get"].is_object());
        assert!(body["paths"]["/v1/auth"]["post"].is_object());
    }
}
