pub mod auth;
pub mod guard;
pub mod response;

pub use auth::AuthUser;
pub use guard::{classify, route_guard, Access};
pub use response::{ApiResponse, ApiResult, Message};
