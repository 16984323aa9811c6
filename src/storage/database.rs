// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded user database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `<table>`: user id → serialized [`User`] (JSON bytes)
//! - `<table>-TaxIDIndex`: composite key `(tax_id, user_id)` → `()`
//!
//! The composite index key keeps every row for a tax id adjacent, so an
//! exact-match lookup is a range scan starting at `(tax_id, "")`.
//!
//! redb calls are blocking; each operation runs on the blocking pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{
    Database, ReadableDatabase, ReadableTableMetadata, TableDefinition, TableError,
};

use super::{tax_id_index_name, StoreError, StoreResult, UserStore};
use crate::models::User;

type UsersTable<'a> = TableDefinition<'a, &'static str, &'static [u8]>;
type TaxIdIndex<'a> = TableDefinition<'a, (&'static str, &'static str), ()>;

struct Inner {
    db: Database,
    users_table: String,
    index_table: String,
}

/// User store persisted in a redb file.
#[derive(Clone)]
pub struct RedbUserStore {
    inner: Arc<Inner>,
}

impl RedbUserStore {
    /// Open (or create) the database at `path` and make sure the user table
    /// and its tax-id index exist.
    pub fn open(path: &Path, table_name: &str) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        let inner = Inner {
            db,
            users_table: table_name.to_string(),
            index_table: tax_id_index_name(table_name),
        };
        if inner.ensure_schema()? {
            tracing::info!(
                table = %inner.users_table,
                index = %inner.index_table,
                "Created user table and tax id index"
            );
        }

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Remove a user and its index entry. Test and admin use only.
    pub async fn delete(&self, user_id: &str) -> StoreResult<bool> {
        let user_id = user_id.to_string();
        self.run(move |inner| inner.delete(&user_id)).await
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&Inner) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner)).await?
    }
}

#[async_trait]
impl UserStore for RedbUserStore {
    async fn find_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<User>> {
        let tax_id = tax_id.to_string();
        self.run(move |inner| inner.find_by_tax_id(&tax_id)).await
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        let user = user.clone();
        self.run(move |inner| inner.create(&user)).await
    }

    async fn ensure_schema(&self) -> StoreResult<bool> {
        self.run(Inner::ensure_schema).await
    }

    async fn count(&self) -> StoreResult<u64> {
        self.run(Inner::count).await
    }
}

// =============================================================================
// Blocking operations
// =============================================================================

impl Inner {
    fn users(&self) -> UsersTable<'_> {
        TableDefinition::new(&self.users_table)
    }

    fn index(&self) -> TaxIdIndex<'_> {
        TableDefinition::new(&self.index_table)
    }

    fn ensure_schema(&self) -> StoreResult<bool> {
        let missing = {
            let read_txn = self.db.begin_read()?;
            let users_missing = is_missing(read_txn.open_table(self.users()))?;
            let index_missing = is_missing(read_txn.open_table(self.index()))?;
            users_missing || index_missing
        };
        if !missing {
            return Ok(false);
        }

        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(self.users())?;
            let _ = write_txn.open_table(self.index())?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    fn find_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(self.index())?;
        let users = read_txn.open_table(self.users())?;

        // First index entry at or after (tax_id, ""); stop as soon as the
        // tax id changes.
        let start: (&str, &str) = (tax_id, "");
        if let Some(entry) = index.range(start..)?.next() {
            let (key, _) = entry?;
            let (entry_tax_id, user_id) = key.value();
            if entry_tax_id != tax_id {
                return Ok(None);
            }

            return match users.get(user_id)? {
                Some(record) => Ok(Some(serde_json::from_slice(record.value())?)),
                None => Err(StoreError::DanglingIndex {
                    tax_id: tax_id.to_string(),
                    user_id: user_id.to_string(),
                }),
            };
        }

        Ok(None)
    }

    fn create(&self, user: &User) -> StoreResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut users = write_txn.open_table(self.users())?;
            users.insert(user.id.as_str(), json.as_slice())?;

            let mut index = write_txn.open_table(self.index())?;
            index.insert((user.tax_id.as_str(), user.id.as_str()), ())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete(&self, user_id: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut users = write_txn.open_table(self.users())?;
            let removed: Option<User> = match users.remove(user_id)? {
                Some(record) => Some(serde_json::from_slice(record.value())?),
                None => None,
            };

            if let Some(user) = &removed {
                let mut index = write_txn.open_table(self.index())?;
                index.remove((user.tax_id.as_str(), user.id.as_str()))?;
            }
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    fn count(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(self.users())?;
        Ok(users.len()?)
    }
}

fn is_missing<T>(result: Result<T, TableError>) -> StoreResult<bool> {
    match result {
        Ok(_) => Ok(false),
        Err(TableError::TableDoesNotExist(_)) => Ok(true),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Tests
// =============================================================================
