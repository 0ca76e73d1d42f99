use thiserror::Error;

use super::{hash_password, verify_password, AuthError};
use crate::api::payload::{Credentials, Registration};
use crate::config::SecurityConfig;
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, Store};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email already registered")]
    AlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Create an admin account: duplicate check, bcrypt hash, insert.
///
/// The explicit lookup gives the common case a clean error; the store's unique
/// constraint still decides when two registrations race.
pub async fn create_account(
    store: &dyn Store,
    security: &SecurityConfig,
    registration: Registration,
) -> Result<User, AccountError> {
    if store.find_user_by_email(&registration.email).await?.is_some() {
        return Err(AccountError::AlreadyRegistered);
    }

    let cost = security.bcrypt_cost;
    let password = registration.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AuthError::Task(e.to_string()))??;

    let user = store
        .create_user(NewUser {
            email: registration.email,
            name: registration.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => AccountError::AlreadyRegistered,
            other => AccountError::Store(other),
        })?;

    Ok(user)
}

/// Check an email/password pair; unknown email and wrong password look the same
pub async fn authenticate(store: &dyn Store, credentials: Credentials) -> Result<User, AccountError> {
    let user = store
        .find_user_by_email(&credentials.email)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;

    let hash = user.password_hash.clone();
    let password = credentials.password;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or(false);

    if matches {
        Ok(user)
    } else {
        Err(AccountError::InvalidCredentials)
    }
}
