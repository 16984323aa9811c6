// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared test helpers for key material.
//!
//! RSA key generation is slow, so each test binary generates two key pairs
//! once and hands out the cached PKCS#8 PEM strings.

use std::sync::OnceLock;

use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;

static PRIMARY: OnceLock<String> = OnceLock::new();
static SECONDARY: OnceLock<String> = OnceLock::new();

/// Generate a fresh 2048-bit RSA key as PKCS#8 PEM (no passphrase).
pub fn generate_private_pem() -> String {
    let mut rng = rand::thread_rng();
    let key = RsaPrivateKey::new(&mut rng, 2048).expect("RSA key generation failed");
    key.to_pkcs8_pem(LineEnding::LF)
        .expect("PKCS#8 encoding failed")
        .to_string()
}

/// Key pair A.
pub fn test_private_pem() -> &'static str {
    PRIMARY.get_or_init(generate_private_pem)
}

/// Key pair B, distinct from [`test_private_pem`].
pub fn other_private_pem() -> &'static str {
    SECONDARY.get_or_init(generate_private_pem)
}
