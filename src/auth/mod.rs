pub mod cookie;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub authorized: bool,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn new(user_id: i64, kind: TokenKind, lifespan: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(lifespan)
            .ok_or_else(|| TokenError::Generation("expiry is out of range".to_string()))?;
        Ok(Self {
            user_id,
            authorized: kind == TokenKind::Access,
            kind,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is missing")]
    Missing,

    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,

    #[error("token cannot be used for this purpose")]
    WrongKind,

    #[error("token secret is not configured")]
    InvalidSecret,

    #[error("token lifespan of {0}h is out of range")]
    InvalidLifespan(u64),

    #[error("token generation error: {0}")]
    Generation(String),
}

/// Issues and verifies the HS256 bearer tokens.
///
/// Tokens are stateless: nothing is persisted, so a token stays valid until
/// its `exp` even after logout.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifespan: Duration,
    refresh_lifespan: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_lifespan", &self.access_lifespan)
            .field("refresh_lifespan", &self.refresh_lifespan)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, access_hours: u64, refresh_hours: u64) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifespan: lifespan(access_hours)?,
            refresh_lifespan: lifespan(refresh_hours)?,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(
            &security.api_secret,
            security.token_lifespan_hours,
            security.refresh_lifespan_hours,
        )
    }

    pub fn refresh_lifespan(&self) -> Duration {
        self.refresh_lifespan
    }

    pub fn issue_access_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.sign(&Claims::new(user_id, TokenKind::Access, self.access_lifespan)?)
    }

    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.sign(&Claims::new(user_id, TokenKind::Refresh, self.refresh_lifespan)?)
    }

    /// Validates an access token and returns the account id it carries.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_kind(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_kind(token, TokenKind::Refresh)
    }

    fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<i64, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        // Only HS256 is accepted; anything else in the header is rejected.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
            _ => TokenError::Malformed,
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::WrongKind);
        }

        Ok(data.claims.user_id)
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }
}

fn lifespan(hours: u64) -> Result<Duration, TokenError> {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .ok_or(TokenError::InvalidLifespan(hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 24, 168).unwrap()
    }

    fn forge(claims: &Claims, alg: Algorithm, secret: &str) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn access_token_round_trips_account_id() {
        let tokens = service();
        let token = tokens.issue_access_token(42).unwrap();
        assert_eq!(tokens.verify(&token), Ok(42));
    }

    #[test]
    fn rejects_empty_secret() {
        assert_eq!(TokenService::new("  ", 24, 168).unwrap_err(), TokenError::InvalidSecret);
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let claims = Claims {
            user_id: 7,
            authorized: true,
            kind: TokenKind::Access,
            exp: Utc::now().timestamp() - 5,
            iat: Utc::now().timestamp() - 3600,
        };
        let token = forge(&claims, Algorithm::HS256, "test-secret");
        assert_eq!(service().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn rejects_other_hmac_algorithms() {
        let claims = Claims::new(7, TokenKind::Access, Duration::hours(1)).unwrap();
        let token = forge(&claims, Algorithm::HS512, "test-secret");
        assert_eq!(service().verify(&token), Err(TokenError::UnexpectedAlgorithm));
    }

    #[test]
    fn rejects_foreign_signature() {
        let claims = Claims::new(7, TokenKind::Access, Duration::hours(1)).unwrap();
        let token = forge(&claims, Algorithm::HS256, "someone-else");
        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn rejects_garbage_and_empty_tokens() {
        let tokens = service();
        assert_eq!(tokens.verify("not.a.jwt"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Missing));
    }

    #[test]
    fn refresh_and_access_tokens_are_not_interchangeable() {
        let tokens = service();
        let refresh = tokens.issue_refresh_token(3).unwrap();
        let access = tokens.issue_access_token(3).unwrap();

        assert_eq!(tokens.verify(&refresh), Err(TokenError::WrongKind));
        assert_eq!(tokens.verify_refresh(&access), Err(TokenError::WrongKind));
        assert_eq!(tokens.verify_refresh(&refresh), Ok(3));
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let tokens = service();
        assert_eq!(tokens.refresh_lifespan(), Duration::hours(168));
        assert!(tokens.refresh_lifespan() > tokens.access_lifespan);
    }

    #[test]
    fn oversized_lifespans_are_errors_not_panics() {
        assert_eq!(
            TokenService::new("test-secret", 24, u64::MAX).unwrap_err(),
            TokenError::InvalidLifespan(u64::MAX)
        );
        assert!(matches!(
            TokenService::new("test-secret", i64::MAX as u64, i64::MAX as u64),
            Err(TokenError::InvalidLifespan(_))
        ));

        // Representable as a duration, but too far out to be a timestamp
        let tokens = TokenService::new("test-secret", 24, 24 * 365 * 1_000_000).unwrap();
        assert!(matches!(tokens.issue_refresh_token(1), Err(TokenError::Generation(_))));
        assert!(tokens.issue_access_token(1).is_ok());
    }
}
