// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token errors.

use jsonwebtoken::errors::ErrorKind;

/// Errors raised while loading keys, signing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The private key could not be parsed or converted.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// Signing failed for a well-formed claim set.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Token is malformed or its signature does not validate.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl TokenError {
    /// Short machine-readable code, used in log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidKey(_) => "invalid_key",
            TokenError::Signing(_) => "signing_failed",
            TokenError::InvalidToken(_) => "invalid_token",
        }
    }

    pub(crate) fn from_decode(err: jsonwebtoken::errors::Error) -> Self {
        let reason = match err.kind() {
            ErrorKind::InvalidSignature => "signature does not validate".to_string(),
            ErrorKind::InvalidToken => "wrong segment count".to_string(),
            ErrorKind::Base64(_) => "invalid base64url encoding".to_string(),
            ErrorKind::Json(_) | ErrorKind::Utf8(_) => "invalid JSON segment".to_string(),
            ErrorKind::InvalidAlgorithm => "unexpected algorithm".to_string(),
            _ => err.to_string(),
        };
        TokenError::InvalidToken(reason)
    }
}
