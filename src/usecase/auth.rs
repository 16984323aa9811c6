// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tax-id authentication.

use std::sync::Arc;

use super::ServiceError;
use crate::auth::{user_claims, ClaimSigner};
use crate::models::AuthResponse;
use crate::storage::UserStore;

/// Looks a user up by tax id and issues a signed token.
///
/// One store lookup, at most one signing call, no retries.
pub struct AuthUseCase {
    users: Arc<dyn UserStore>,
    signer: Arc<dyn ClaimSigner>,
}

impl AuthUseCase {
    pub fn new(users: Arc<dyn UserStore>, signer: Arc<dyn ClaimSigner>) -> Self {
        Self { users, signer }
    }

    pub async fn execute(&self, tax_id: &str) -> Result<AuthResponse, ServiceError> {
        let user = self
            .users
            .find_by_tax_id(tax_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                tax_id: tax_id.to_string(),
            })?;

        let token = self.signer.sign(&user_claims(&user))?;
        tracing::info!(user_id = %user.id, "Issued token");

        Ok(AuthResponse {
            token,
            user_id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}
