// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Customer registration.
//!
//! ## Known gap
//!
//! The existence check and the insert are two separate store calls with no
//! lock, transaction or conditional write between them. Two concurrent
//! registrations for the same tax id can both pass the check and both be
//! stored. Closing it needs an insert-if-absent on the tax-id index.

use std::sync::Arc;

use super::ServiceError;
use crate::models::{RegisterResponse, User};
use crate::storage::UserStore;

/// Creates a customer record unless the tax id is already registered.
pub struct RegisterUseCase {
    users: Arc<dyn UserStore>,
}

impl RegisterUseCase {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn execute(
        &self,
        tax_id: &str,
        email: &str,
        name: &str,
    ) -> Result<RegisterResponse, ServiceError> {
        if self.users.find_by_tax_id(tax_id).await?.is_some() {
            return Err(ServiceError::Conflict {
                tax_id: tax_id.to_string(),
            });
        }

        let user = User::new_customer(tax_id, email, name);
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "Registered customer");

        Ok(RegisterResponse::from(&user))
    }
}
