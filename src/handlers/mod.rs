// handlers/mod.rs - HTTP handlers grouped by resource
//
// Handlers never check sessions themselves: the route guard in
// `middleware::guard` has already accepted or rejected the request by the time
// one of these runs. Each handler validates its body, makes at most one store
// call per step, and maps store failures at this boundary.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod projects;
pub mod skills;
pub mod system;

use serde::Deserialize;

use crate::error::ApiError;
use crate::types::Resource;

/// `?id=` selector used by the collection routes
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// The selected id, or a 400 naming the resource
    pub fn require(self, resource: Resource) -> Result<String, ApiError> {
        self.id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::bad_request(format!("{} ID is required", resource.label())))
    }
}
