// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Token Module
//!
//! Issues and checks the bearer tokens handed out by `GET /v1/auth`.
//!
//! ## Token Format
//!
//! Compact JWS, three base64url segments:
//!
//! - header: exactly `{"alg":"RS256"}`
//! - payload: the user claim set `{sub, tax_id, email, name, user_type}`
//! - signature: RSASSA-PKCS1-v1_5 with SHA-256
//!
//! ## Keys
//!
//! - One RSA private key (PKCS#8 PEM) is loaded from the secret store at
//!   startup and never leaves the process
//! - The public key is derived from it and published as a JWK at
//!   `/.well-known/jwks.json`
//! - No expiry, refresh or revocation is modelled

pub mod claims;
pub mod error;
pub mod jwk;
pub mod signer;

#[cfg(test)]
pub(crate) mod testutil;

pub use claims::{user_claims, ClaimSet};
pub use error::TokenError;
pub use jwk::{jwk_set, validate};
pub use signer::{ClaimSigner, TokenSigner};
