// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::models::MessageResponse;

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = MessageResponse)
    )
)]
pub async fn root() -> Json<MessageResponse> {
    message("Auth Service is running")
}

/// Liveness probe. Always 200 while the process is up; does not touch the
/// user store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = MessageResponse)
    )
)]
pub async fn health() -> Json<MessageResponse> {
    message("Auth Service is healthy")
}
