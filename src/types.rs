/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store operations a handler can fail on
/// Used to build client-facing failure messages and log context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Select,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Select => "fetch",
        }
    }
}

/// The flat resource tables exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Project,
    Skill,
    Contact,
    User,
}

impl Resource {
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Project => "project",
            Resource::Skill => "skill",
            Resource::Contact => "contact request",
            Resource::User => "user",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Resource::Project => "projects",
            Resource::Skill => "skills",
            Resource::Contact => "contact requests",
            Resource::User => "users",
        }
    }

    /// Capitalized label for messages such as "Project not found"
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Project => "Project",
            Resource::Skill => "Skill",
            Resource::Contact => "Contact request",
            Resource::User => "User",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// "Failed to create project", "Failed to fetch skills", ...
pub fn failure_message(operation: Operation, resource: Resource, collection: bool) -> String {
    let noun = if collection { resource.plural() } else { resource.singular() };
    format!("Failed to {} {}", operation.verb(), noun)
}
