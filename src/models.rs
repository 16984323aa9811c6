// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! This module defines the stored [`User`] record and the request and
//! response structures used by the REST API. API types derive `ToSchema`
//! for OpenAPI documentation.
//!
//! ## Validation
//!
//! Request DTOs carry their own field checks ([`AuthQuery::validate`],
//! [`RegisterRequest::validate`]). Handlers run them before invoking a use
//! case; use cases assume validated input.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Minimum tax id length, in characters.
pub const TAX_ID_MIN_LEN: usize = 11;
/// Maximum tax id length, in characters.
pub const TAX_ID_MAX_LEN: usize = 14;

/// Message returned on successful registration.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

// =============================================================================
// User
// =============================================================================

/// Kind of account.
///
/// Registration only ever creates `Customer`; `Employee` records can exist in
/// the store (provisioned externally) and authenticate like any other user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum UserType {
    #[serde(rename = "customers")]
    Customer,
    #[serde(rename = "employees")]
    Employee,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customers",
            UserType::Employee => "employees",
        }
    }
}

/// Stored user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    /// Unique identifier (UUIDv4), immutable after creation.
    pub id: String,
    /// Tax identifier, unique across users.
    pub tax_id: String,
    pub email: String,
    pub name: String,
    pub user_type: UserType,
}

impl User {
    /// New customer record with a freshly generated id.
    pub fn new_customer(
        tax_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tax_id: tax_id.into(),
            email: email.into(),
            name: name.into(),
            user_type: UserType::Customer,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Field-level validation failure, reported as 422 at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

fn validate_tax_id(tax_id: &str) -> Result<(), ValidationError> {
    let len = tax_id.chars().count();
    if !(TAX_ID_MIN_LEN..=TAX_ID_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(
            "tax_id",
            format!(
                "must be between {TAX_ID_MIN_LEN} and {TAX_ID_MAX_LEN} characters, got {len}"
            ),
        ));
    }
    Ok(())
}

fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Query for `GET /v1/auth`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams, PartialEq, Eq)]
#[into_params(parameter_in = Query)]
pub struct AuthQuery {
    /// Tax identifier (CPF), 11 to 14 characters.
    #[param(min_length = 11, max_length = 14)]
    pub tax_id: String,
}

impl AuthQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("tax_id", &self.tax_id)?;
        validate_tax_id(&self.tax_id)
    }
}

/// Body for `POST /v1/auth`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Tax identifier (CPF), 11 to 14 characters.
    pub tax_id: String,
    pub email: String,
    /// Full name.
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("tax_id", &self.tax_id)?;
        validate_tax_id(&self.tax_id)?;
        validate_required("email", &self.email)?;
        validate_required("name", &self.name)?;
        Ok(())
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthResponse {
    /// RS256 bearer token.
    pub token: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RegisterResponse {
    pub user_id: String,
    pub tax_id: String,
    pub email: String,
    pub name: String,
    pub message: String,
}

impl From<&User> for RegisterResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            tax_id: user.tax_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            message: REGISTERED_MESSAGE.to_string(),
        }
    }
}

/// Plain status message (`/` and `/health`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}
