// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth Service - tax id authentication and customer registration
//!
//! Issues RS256-signed bearer tokens to users identified by their tax id,
//! and registers new customers.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token signing, verification and public JWK
//! - `storage` - User store (redb or in-memory)
//! - `usecase` - Authentication and registration flows

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod secrets;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod usecase;
