// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public key export (JWK) and verification-only token validation.
//!
//! A resource server that only holds the public JWK can call [`validate`]
//! to make a yes/no trust decision without the private key and without
//! extracting claims.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::jwk::{
    AlgorithmParameters, CommonParameters, Jwk, JwkSet, KeyAlgorithm, PublicKeyUse,
    RSAKeyParameters, RSAKeyType,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};

use super::claims::ClaimSet;
use super::signer::TOKEN_ALGORITHM;

/// Validation rules for issued tokens.
///
/// Issued claim sets carry no registered time claims, so expiry is not
/// required and no issuer or audience is checked; only the RS256 signature
/// and token structure are.
pub(crate) fn verification_rules() -> Validation {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation
}

/// Derive the public JWK (`kty=RSA`, `use=sig`, `alg=RS256`) of a private key.
pub(crate) fn rsa_public_jwk(private_key: &RsaPrivateKey) -> Jwk {
    let n = URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be());
    let e = URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be());
    let kid = thumbprint(&n, &e);

    Jwk {
        common: CommonParameters {
            public_key_use: Some(PublicKeyUse::Signature),
            key_algorithm: Some(KeyAlgorithm::RS256),
            key_id: Some(kid),
            ..Default::default()
        },
        algorithm: AlgorithmParameters::RSA(RSAKeyParameters {
            key_type: RSAKeyType::RSA,
            n,
            e,
        }),
    }
}

/// RFC 7638 JWK thumbprint (SHA-256, base64url) over the required RSA members.
fn thumbprint(n: &str, e: &str) -> String {
    // Members in lexicographic order, no whitespace.
    let canonical = format!(r#"{{"e":"{e}","kty":"RSA","n":"{n}"}}"#);
    URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
}

/// Wrap a public key in a JWK set document.
pub fn jwk_set(jwk: &Jwk) -> JwkSet {
    JwkSet {
        keys: vec![jwk.clone()],
    }
}

/// Check a token against a public JWK.
///
/// Returns `false` on any failure: non-RSA key, malformed token, wrong
/// algorithm, or a signature made by a different key.
pub fn validate(token: &str, jwk: &Jwk) -> bool {
    if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
        return false;
    }

    let key = match DecodingKey::from_jwk(jwk) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting token: unusable JWK");
            return false;
        }
    };

    match decode::<ClaimSet>(token, &key, &verification_rules()) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting token");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signer::TokenSigner;
    use crate::auth::testutil::test_private_pem;
    use serde_json::{json, Value};

    fn signer() -> TokenSigner {
        TokenSigner::from_pem(test_private_pem()).unwrap()
    }

    #[test]
    fn public_jwk_has_expected_members() {
        let signer = signer();
        let value = serde_json::to_value(signer.public_jwk()).unwrap();
        assert_eq!(value["kty"], "RSA");
        assert_eq!(value["use"], "sig");
        assert_eq!(value["alg"], "RS256");
        assert_eq!(value["e"], "AQAB");
        assert!(value["n"].as_str().is_some_and(|n| !n.is_empty()));
        assert!(value.get("d").is_none(), "private exponent must never be exported");
    }

    #[test]
    fn thumbprint_matches_rfc7638_example() {
        // RFC 7638 section 3.1 example key.
        let n = "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw";
        let e = "AQAB";
        assert_eq!(thumbprint(n, e), "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs");
    }

    #[test]
    fn validate_accepts_own_token() {
        let signer = signer();
        let token = signer
            .sign(json!({"sub": "user-123"}).as_object().unwrap())
            .unwrap();
        assert!(validate(&token, signer.public_jwk()));
    }

    #[test]
    fn validate_rejects_garbage() {
        let signer = signer();
        assert!(!validate("not-a-valid-jwt", signer.public_jwk()));
        assert!(!validate("a.b.c", signer.public_jwk()));
        assert!(!validate("", signer.public_jwk()));
    }

    #[test]
    fn validate_rejects_unsigned_token() {
        let signer = signer();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-123"}"#);
        let token = format!("{header}.{payload}.");
        assert!(!validate(&token, signer.public_jwk()));
    }

    #[test]
    fn validate_works_from_serialized_jwk() {
        let signer = signer();
        let token = signer
            .sign(json!({"sub": "user-123"}).as_object().unwrap())
            .unwrap();

        let published: Value = serde_json::to_value(jwk_set(signer.public_jwk())).unwrap();
        let set: JwkSet = serde_json::from_value(published).unwrap();
        assert_eq!(set.keys.len(), 1);
        assert!(validate(&token, &set.keys[0]));
    }
}
