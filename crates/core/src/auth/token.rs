//! HS256 token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims};

/// Issues and verifies signed, time-limited tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // Expiry is exact: a token with exp in the past never verifies
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token bound to `sub`, expiring after the configured ttl.
    pub fn issue(&self, sub: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Configuration(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}
