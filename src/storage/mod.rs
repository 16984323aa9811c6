// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Storage Module
//!
//! Users live in a key-value table keyed by the generated user id, with a
//! secondary index on tax id for exact-match lookups.
//!
//! ## Backends
//!
//! - [`RedbUserStore`]: embedded redb database (pure Rust, ACID), one file
//!   per table under `DATA_DIR`
//! - [`InMemoryUserStore`]: process-local maps, for tests and `STORE_BACKEND=memory`
//!
//! ## Uniqueness
//!
//! `create` is an unconditional insert. Tax-id uniqueness is checked by the
//! registration use case before calling it, which is not atomic with the
//! insert; the index therefore tolerates several rows per tax id and
//! `find_by_tax_id` returns the first one encountered.

use async_trait::async_trait;

use crate::models::User;

pub mod database;
pub mod memory;

pub use database::RedbUserStore;
pub use memory::InMemoryUserStore;

/// Persistence failure (store unavailable, I/O, corrupt record).
///
/// Not retried at this layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("index entry {tax_id} -> {user_id} has no user record")]
    DanglingIndex { tax_id: String, user_id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User persistence consumed by the use cases.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup on the tax-id index.
    async fn find_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<User>>;

    /// Insert a user record. No existence check is made here.
    async fn create(&self, user: &User) -> StoreResult<()>;

    /// Create the user table and its tax-id index if they are missing.
    ///
    /// Returns `true` when something was created. Administrative; not on the
    /// request path.
    async fn ensure_schema(&self) -> StoreResult<bool>;

    /// Number of stored user records.
    async fn count(&self) -> StoreResult<u64>;
}

/// Name of the tax-id index for a user table.
pub fn tax_id_index_name(table_name: &str) -> String {
    format!("{table_name}-TaxIDIndex")
}
