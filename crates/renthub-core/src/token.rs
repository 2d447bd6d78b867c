// Bearer token claims
//
// The client decodes the token payload only to read its expiry; it has no
// signing key and performs no signature verification. A token that fails to
// parse is reported as InvalidToken and handled as if it had already expired.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Claims carried by the user service's access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id, as issued by the server)
    pub sub: String,
    /// User email, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account role, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Decode the claims of a bearer token without verifying its signature.
    ///
    /// Expiry is not enforced here; callers decide what an expired token
    /// means for them (the session store purges it from storage).
    pub fn decode(token: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.algorithms = vec![
            Algorithm::HS256,
            Algorithm::HS384,
            Algorithm::HS512,
            Algorithm::RS256,
        ];

        let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| AuthError::invalid_token(e.to_string()))?;

        Ok(data.claims)
    }

    /// Expiration instant of the token
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check expiry against an explicit clock
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at <= now,
            // An out-of-range timestamp is as unusable as a missing one
            None => true,
        }
    }

    /// Check expiry against the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
