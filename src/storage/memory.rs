// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreResult, UserStore};
use crate::models::User;

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    /// tax_id -> user ids, in insertion order.
    tax_id_index: HashMap<String, Vec<String>>,
}

/// Process-local store with the same lookup semantics as the redb backend.
#[derive(Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user and its index entry. Test and admin use only.
    pub async fn delete(&self, user_id: &str) -> Option<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.remove(user_id)?;
        if let Some(ids) = tables.tax_id_index.get_mut(&user.tax_id) {
            ids.retain(|id| id != user_id);
            if ids.is_empty() {
                tables.tax_id_index.remove(&user.tax_id);
            }
        }
        Some(user)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        let user = tables
            .tax_id_index
            .get(tax_id)
            .and_then(|ids| ids.iter().find_map(|id| tables.users.get(id)))
            .cloned();
        Ok(user)
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .tax_id_index
            .entry(user.tax_id.clone())
            .or_default()
            .push(user.id.clone());
        tables.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn ensure_schema(&self) -> StoreResult<bool> {
        Ok(false)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}
