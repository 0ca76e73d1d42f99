pub mod accounts;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

/// Session token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when the lifetime does not fit a timestamp
    pub fn for_user(user: &User, ttl_hours: u64) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenGeneration(format!("session lifetime of {} hours is out of range", ttl_hours)))?;

        Ok(Self {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// A signed session plus its metadata
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
    pub ttl_seconds: i64,
}

/// Sign a new session for a user whose credentials were just checked
pub fn issue_session(user: &User, security: &SecurityConfig) -> Result<IssuedSession, AuthError> {
    let claims = Claims::for_user(user, security.session_ttl_hours)?;
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    Ok(IssuedSession {
        token,
        ttl_seconds: claims.exp - claims.iat,
        claims,
    })
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_validates_with_same_secret() {
        let security = AppConfig::development().security;
        let user = sample_user();

        let session = issue_session(&user, &security).unwrap();
        let claims = validate_jwt(&session.token, &security.jwt_secret).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(session.ttl_seconds, 24 * 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = Claims::for_user(&sample_user(), 1).unwrap();
        let token = generate_jwt(&claims, "one-secret").unwrap();
        assert!(matches!(validate_jwt(&token, "another-secret"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::for_user(&sample_user(), 1).unwrap();
        claims.iat -= 7200;
        claims.exp = Utc::now().timestamp() - 60;
        let token = generate_jwt(&claims, "secret").unwrap();

        assert!(validate_jwt(&token, "secret").is_err());
    }

    #[test]
    fn oversized_lifetime_is_an_error_not_a_panic() {
        assert!(matches!(
            Claims::for_user(&sample_user(), 10_000_000_000),
            Err(AuthError::TokenGeneration(_))
        ));
        assert!(matches!(Claims::for_user(&sample_user(), u64::MAX), Err(AuthError::TokenGeneration(_))));

        let mut security = AppConfig::development().security;
        security.session_ttl_hours = 10_000_000_000;
        assert!(issue_session(&sample_user(), &security).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_jwt("not.a.jwt", "secret").is_err());
        assert!(matches!(validate_jwt("x", ""), Err(AuthError::InvalidSecret)));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse", 4).unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-bcrypt-hash"));
    }
}
