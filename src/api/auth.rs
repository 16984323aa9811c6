// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and registration endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use jsonwebtoken::jwk::JwkSet;

use crate::auth::jwk_set;
use crate::error::ApiError;
use crate::models::{AuthQuery, AuthResponse, ErrorResponse, RegisterRequest, RegisterResponse};
use crate::state::AppState;

/// Exchange a tax id for a signed bearer token.
#[utoipa::path(
    get,
    path = "/v1/auth",
    tag = "Auth",
    params(AuthQuery),
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 404, description = "No user with this tax id", body = ErrorResponse),
        (status = 422, description = "Missing or malformed tax id", body = ErrorResponse),
        (status = 500, description = "Store or signing failure", body = ErrorResponse),
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    query: Result<Query<AuthQuery>, QueryRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
    query.validate()?;

    let response = state.auth_use_case().execute(&query.tax_id).await?;
    Ok(Json(response))
}

/// Register a new customer.
#[utoipa::path(
    post,
    path = "/v1/auth",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 409, description = "Tax id already registered", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
    request.validate()?;

    let response = state
        .register_use_case()
        .execute(&request.tax_id, &request.email, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Public half of the signing key, as an RFC 7517 key set.
#[utoipa::path(
    get,
    path = "/.well-known/jwks.json",
    tag = "Auth",
    responses(
        (status = 200, description = "JWK set holding the token verification key"),
    )
)]
pub async fn jwks(State(state): State<AppState>) -> Json<JwkSet> {
    Json(jwk_set(state.signer.public_jwk()))
}
