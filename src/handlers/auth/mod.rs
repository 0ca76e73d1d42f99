// handlers/auth/mod.rs - Account and session endpoints
//
// POST /api/register      create an admin account
// POST /api/auth/login    check credentials, issue a session
// POST /api/auth/logout   drop the session cookie
// GET  /api/auth/session  current session (admin-only)

pub mod login;
pub mod register;
pub mod session;

pub use login::{login, logout};
pub use register::register;
pub use session::session;

use crate::auth::accounts::AccountError;
use crate::auth::AuthError;
use crate::error::ApiError;
use crate::types::{Operation, Resource};

/// Map account failures at the handler boundary
fn account_error(operation: Operation, err: AccountError) -> ApiError {
    match err {
        AccountError::AlreadyRegistered => ApiError::bad_request("Email already registered"),
        AccountError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
        AccountError::Store(e) => ApiError::persistence(operation, Resource::User, e),
        AccountError::Auth(e) => auth_error(e),
    }
}

fn auth_error(err: AuthError) -> ApiError {
    tracing::error!(error = %err, "session or password handling failed");
    ApiError::internal_server_error("Authentication failed")
}
