// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued at login decode with the claim
//! layout the auth middleware expects, catching compatibility issues early.

use fit_track::middleware::auth::{create_jwt, decode_session, SESSION_TTL_SECS};
use fit_track::models::Session;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims structure that must match what the middleware expects.
/// If either create_jwt or the middleware changes, this test should
/// catch the incompatibility.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: usize,
    iat: usize,
}

const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn session() -> Session {
    Session {
        user_id: "3f1c2a9e-7b1d-4c55-9a0e-2d6f8b4e1a77".to_string(),
        email: "runner@example.com".to_string(),
    }
}

#[test]
fn test_issued_token_has_expected_claims() {
    let token = create_jwt(&session(), KEY).unwrap();

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(KEY),
        &Validation::new(Algorithm::HS256),
    )
    .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, session().user_id);
    assert_eq!(token_data.claims.email, session().email);
    assert_eq!(token_data.claims.exp - token_data.claims.iat, SESSION_TTL_SECS);
}

#[test]
fn test_expiration_is_thirty_days_out() {
    let token = create_jwt(&session(), KEY).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually
    let token_data =
        decode::<Claims>(&token, &DecodingKey::from_secret(KEY), &validation).unwrap();

    assert!(
        token_data.claims.exp > now() + 86400 * 29,
        "Token expiration should be ~30 days in the future"
    );
}

#[test]
fn test_expired_token_rejected() {
    let claims = Claims {
        sub: session().user_id,
        email: session().email,
        iat: now() - 86400 * 31,
        exp: now() - 86400,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(KEY),
    )
    .unwrap();

    assert_eq!(decode_session(&token, KEY), None);
}

#[test]
fn test_other_algorithm_rejected() {
    let claims = Claims {
        sub: session().user_id,
        email: session().email,
        iat: now(),
        exp: now() + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(KEY),
    )
    .unwrap();

    assert_eq!(decode_session(&token, KEY), None);
}
