//! Session-token codec.
//!
//! Tokens are HS256 JWTs carrying `{sub, email, iat, exp}`. Verification is
//! stateless: signature plus expiry, nothing else. There is no revocation —
//! a token stays valid until its expiry instant.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::domain::Claims;
use super::errors::AuthError;

/// Sign a session token for the given identity, expiring `ttl_days` from now.
pub fn issue(secret: &str, sub: Uuid, email: &str, ttl_days: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::Token(e.to_string()))
}

/// Validate signature and expiry. Every failure mode (bad signature,
/// malformed, expired) collapses to `InvalidToken`.
pub fn verify(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::errors::AuthError;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_verifies_and_round_trips_claims() {
        let sub = Uuid::new_v4();
        let token = issue(SECRET, sub, "a@x.com", 7).unwrap();
        let claims = verify(SECRET, &token).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_rejected_even_with_valid_signature() {
        let token = issue(SECRET, Uuid::new_v4(), "a@x.com", -1).unwrap();
        assert!(matches!(verify(SECRET, &token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issue(SECRET, Uuid::new_v4(), "a@x.com", 7).unwrap();
        assert!(matches!(verify("other-secret", &token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(verify(SECRET, "not.a.jwt"), Err(AuthError::InvalidToken)));
    }
}
