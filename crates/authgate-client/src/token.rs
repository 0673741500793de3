//! Session token verification.

use crate::{Error, Result};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;

/// A verified bearer credential.
///
/// Lives for one dispatch: the gateway re-derives it on every
/// credential-requiring call and never caches or persists it.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    claims: Value,
}

impl Credential {
    /// Build a credential from an already-verified token and its claims.
    /// Intended for [`TokenVerifier`] implementations.
    pub fn new(token: impl Into<String>, claims: Value) -> Self {
        Self {
            token: token.into(),
            claims,
        }
    }

    /// The `Authorization` header value for this credential.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Get a claim by key.
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Convenience accessor for `sub`.
    pub fn sub(&self) -> Option<&str> {
        self.claim("sub").and_then(|v| v.as_str())
    }
}

/// Turns a raw session token into a usable [`Credential`], or fails when
/// the token is absent, malformed, or expired.
pub trait TokenVerifier {
    fn verify(&self, token: &str) -> Result<Credential>;
}

/// HS256 verifier for locally-issued session tokens.
#[derive(Clone)]
pub struct Hs256Verifier {
    key: DecodingKey,
    leeway_seconds: u64,
}

impl Hs256Verifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            leeway_seconds: 60,
        }
    }

    /// Override the clock-skew leeway (seconds).
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}

impl TokenVerifier for Hs256Verifier {
    fn verify(&self, token: &str) -> Result<Credential> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_seconds;
        validation.validate_exp = true;

        let data = jsonwebtoken::decode::<Value>(token, &self.key, &validation)
            .map_err(|e| Error::InvalidToken(e.to_string()))?;

        Ok(Credential::new(token, data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &[u8] = b"test-secret";

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn issue(sub: &str, exp: u64) -> String {
        let claims = serde_json::json!({ "sub": sub, "exp": exp });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn verifies_valid_token() {
        let token = issue("user-1", now_secs() + 3600);
        let verifier = Hs256Verifier::new(SECRET);
        let credential = verifier.verify(&token).unwrap();
        assert_eq!(credential.sub(), Some("user-1"));
        assert_eq!(credential.bearer(), format!("Bearer {token}"));
    }

    #[test]
    fn rejects_expired_token() {
        let token = issue("user-1", now_secs().saturating_sub(3600));
        let verifier = Hs256Verifier::new(SECRET).with_leeway(0);
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, Error::InvalidToken(_)));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue("user-1", now_secs() + 3600);
        let verifier = Hs256Verifier::new(b"other-secret");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let verifier = Hs256Verifier::new(SECRET);
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
