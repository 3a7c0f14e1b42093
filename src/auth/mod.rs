use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub mod clock;

pub use clock::{Clock, SystemClock};

/// Token lifetime. Expiry is always exactly this far from issuance.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("signing secret is not configured")]
    MissingSecret,
}

/// Issues and verifies the signed identity tokens that travel between
/// services as `Authorization: Bearer <token>`.
pub struct TokenService {
    secret: String,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            clock,
        }
    }

    /// Build and sign a token for the given subject (NetID).
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let now = self.clock.now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    /// Decode a token, check signature and expiry, return the subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        // Expiry is validated against the injected clock, not the OS clock,
        // so the library's own exp check is disabled.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn frozen(ts: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.timestamp_opt(ts, 0).unwrap()))
    }

    #[test]
    fn round_trip_returns_subject() {
        let service = TokenService::new("secret", frozen(1_700_000_000));
        let token = service.issue("jsmith").unwrap();
        assert_eq!(service.verify(&token).unwrap(), "jsmith");
    }

    #[test]
    fn expiry_is_exactly_24h_after_issuance() {
        let issued_at = 1_700_000_000;
        let service = TokenService::new("secret", frozen(issued_at));
        let token = service.issue("jsmith").unwrap();

        // One second before the deadline the token still verifies
        let verifier = TokenService::new("secret", frozen(issued_at + 24 * 3600 - 1));
        assert_eq!(verifier.verify(&token).unwrap(), "jsmith");

        // At exactly iat + 24h it is expired
        let verifier = TokenService::new("secret", frozen(issued_at + 24 * 3600));
        assert_eq!(verifier.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let service = TokenService::new("secret", frozen(1_700_000_000));
        let token = service.issue("jsmith").unwrap();

        let other = TokenService::new("other-secret", frozen(1_700_000_000));
        assert_eq!(
            other.verify(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let service = TokenService::new("secret", frozen(1_700_000_000));
        assert!(matches!(
            service.verify("not-a-token").unwrap_err(),
            TokenError::Malformed(_)
        ));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let service = TokenService::new("", frozen(1_700_000_000));
        assert_eq!(service.issue("jsmith").unwrap_err(), TokenError::MissingSecret);
    }
}
