// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{TokenError, TokenSigner};
use crate::config::{ConfigError, Settings, StoreBackend};
use crate::secrets::Secrets;
use crate::storage::{InMemoryUserStore, RedbUserStore, StoreError, UserStore};
use crate::usecase::{AuthUseCase, RegisterUseCase};

/// Anything that stops the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("signing key error: {0}")]
    Token(#[from] TokenError),

    #[error("user store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared handler state. Cheap to clone; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub signer: Arc<TokenSigner>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(settings: Settings, signer: TokenSigner, users: Arc<dyn UserStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            signer: Arc::new(signer),
            users,
        }
    }

    /// Build the signer from `secrets` and open the configured user store.
    pub fn initialize(settings: Settings, secrets: &Secrets) -> Result<Self, StartupError> {
        let signer = TokenSigner::from_pem(&secrets.jwt_private_key)?;
        tracing::info!(kid = signer.key_id().unwrap_or("-"), "Loaded signing key");

        let users: Arc<dyn UserStore> = match settings.store_backend {
            StoreBackend::Redb => {
                let path = settings.database_path();
                tracing::info!(path = %path.display(), "Opening user database");
                Arc::new(RedbUserStore::open(
                    &path,
                    &settings.application_table_name,
                )?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory user store; data is lost on restart");
                Arc::new(InMemoryUserStore::new())
            }
        };

        Ok(Self::new(settings, signer, users))
    }

    pub fn auth_use_case(&self) -> AuthUseCase {
        AuthUseCase::new(self.users.clone(), self.signer.clone())
    }

    pub fn register_use_case(&self) -> RegisterUseCase {
        RegisterUseCase::new(self.users.clone())
    }
}
