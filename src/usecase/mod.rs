// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Application use cases.
//!
//! - [`AuthUseCase`]: tax id → signed bearer token
//! - [`RegisterUseCase`]: tax id, email, name → new customer record
//!
//! Both receive their collaborators through their constructors and return
//! domain-typed [`ServiceError`]s; the HTTP layer maps them to status codes.

pub mod auth;
pub mod register;

pub use auth::AuthUseCase;
pub use register::RegisterUseCase;

use crate::auth::TokenError;
use crate::storage::StoreError;

/// Domain error taxonomy for the use cases.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No user for the tax id.
    #[error("User with tax_id {tax_id} not found")]
    NotFound { tax_id: String },

    /// A user with the tax id already exists.
    #[error("User with tax_id {tax_id} already exists")]
    Conflict { tax_id: String },

    /// The user store failed; fatal for the request.
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// Token signing failed.
    #[error(transparent)]
    Token(#[from] TokenError),
}
