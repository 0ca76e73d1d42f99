pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use models::{
    Contact, NewContact, NewProject, NewSkill, NewUser, Project, ProjectChanges, Skill, SkillChanges, User,
};

/// Durable storage for the portfolio tables.
///
/// Each method is one independent datastore call; there are no cross-row
/// transactions. Ids arrive as the raw strings clients sent, and an id that
/// cannot name a row is reported the same way as an absent row.
#[async_trait]
pub trait Store: Send + Sync {
    /// All projects, newest first
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError>;
    async fn find_project(&self, id: &str) -> Result<Option<Project>, DatabaseError>;
    async fn create_project(&self, project: NewProject) -> Result<Project, DatabaseError>;
    /// Fails with `NotFound` when no row has this id
    async fn update_project(&self, id: &str, changes: ProjectChanges) -> Result<Project, DatabaseError>;
    /// Fails with `NotFound` when no row has this id
    async fn delete_project(&self, id: &str) -> Result<(), DatabaseError>;

    async fn list_skills(&self) -> Result<Vec<Skill>, DatabaseError>;
    async fn find_skill(&self, id: &str) -> Result<Option<Skill>, DatabaseError>;
    async fn create_skill(&self, skill: NewSkill) -> Result<Skill, DatabaseError>;
    async fn update_skill(&self, id: &str, changes: SkillChanges) -> Result<Skill, DatabaseError>;
    async fn delete_skill(&self, id: &str) -> Result<(), DatabaseError>;

    async fn list_contacts(&self) -> Result<Vec<Contact>, DatabaseError>;
    async fn create_contact(&self, contact: NewContact) -> Result<Contact, DatabaseError>;
    async fn delete_contact(&self, id: &str) -> Result<(), DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    /// Fails with `Conflict` when the email is already registered
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Release backing resources at shutdown
    async fn close(&self) {}
}

/// Parse a client-supplied id; anything that is not a UUID cannot exist
pub fn parse_id(id: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(id.trim()).map_err(|_| DatabaseError::NotFound(format!("no row with id '{}'", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uuid_ids_are_not_found() {
        assert!(matches!(parse_id("missing-id"), Err(DatabaseError::NotFound(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
