// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RS256 token signing and verification.
//!
//! [`TokenSigner`] owns the process key pair: the private key signs claim
//! sets into compact JWS tokens, and the derived public key verifies them.
//! It is built once at startup from the PEM secret and shared behind an
//! `Arc`; all operations take `&self`.

use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;

use super::claims::ClaimSet;
use super::error::TokenError;
use super::jwk::{rsa_public_jwk, verification_rules};

/// Signing algorithm for every issued token.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::RS256;

/// Something that turns a claim set into a bearer token.
///
/// The use cases depend on this seam rather than on [`TokenSigner`] so they
/// can be exercised without key material.
pub trait ClaimSigner: Send + Sync {
    fn sign(&self, claims: &ClaimSet) -> Result<String, TokenError>;
}

/// RSA key pair wrapper that signs and verifies tokens.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_jwk: Jwk,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("kid", &self.key_id())
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Build a signer from a PEM RSA private key (PKCS#8, or PKCS#1 as a fallback).
    pub fn from_pem(pem: &str) -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| TokenError::InvalidKey(format!("failed to parse RSA private key: {e}")))?;

        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;

        let public_jwk = rsa_public_jwk(&private_key);
        let decoding_key = DecodingKey::from_jwk(&public_jwk)
            .map_err(|e| TokenError::InvalidKey(format!("failed to derive public key: {e}")))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            public_jwk,
        })
    }

    /// Sign a claim set. The header is exactly `{"alg":"RS256"}`.
    pub fn sign(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        let mut header = Header::new(TOKEN_ALGORITHM);
        header.typ = None;

        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token against the held key and return its claims.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        decode::<ClaimSet>(token, &self.decoding_key, &verification_rules())
            .map(|data| data.claims)
            .map_err(TokenError::from_decode)
    }

    /// Public half of the key pair, in JWK form.
    pub fn public_jwk(&self) -> &Jwk {
        &self.public_jwk
    }

    /// RFC 7638 thumbprint of the public key.
    pub fn key_id(&self) -> Option<&str> {
        self.public_jwk.common.key_id.as_deref()
    }
}

impl ClaimSigner for TokenSigner {
    fn sign(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        TokenSigner::sign(self, claims)
    }
}
