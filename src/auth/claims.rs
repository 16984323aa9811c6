// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claim sets.
//!
//! A claim set is an insertion-ordered JSON object (`serde_json` is built
//! with `preserve_order`), so the payload bytes of a signed token follow the
//! order in which claims were added.

use serde_json::{Map, Value};

use crate::models::User;

/// Ordered mapping of claim name to JSON value.
pub type ClaimSet = Map<String, Value>;

pub const CLAIM_SUB: &str = "sub";
pub const CLAIM_TAX_ID: &str = "tax_id";
pub const CLAIM_EMAIL: &str = "email";
pub const CLAIM_NAME: &str = "name";
pub const CLAIM_USER_TYPE: &str = "user_type";

/// Claims carried by every issued token, in wire order.
pub const USER_CLAIMS: [&str; 5] = [
    CLAIM_SUB,
    CLAIM_TAX_ID,
    CLAIM_EMAIL,
    CLAIM_NAME,
    CLAIM_USER_TYPE,
];

/// Build the claim set for a stored user.
///
/// Values are copied verbatim; nothing else (no `exp`, `iat`, `iss`) is added.
pub fn user_claims(user: &User) -> ClaimSet {
    let mut claims = ClaimSet::new();
    claims.insert(CLAIM_SUB.to_string(), Value::String(user.id.clone()));
    claims.insert(CLAIM_TAX_ID.to_string(), Value::String(user.tax_id.clone()));
    claims.insert(CLAIM_EMAIL.to_string(), Value::String(user.email.clone()));
    claims.insert(CLAIM_NAME.to_string(), Value::String(user.name.clone()));
    claims.insert(
        CLAIM_USER_TYPE.to_string(),
        Value::String(user.user_type.as_str().to_string()),
    );
    claims
}
