use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{
    Contact, NewContact, NewProject, NewSkill, NewUser, Project, ProjectChanges, Skill, SkillChanges, User,
};
use super::{parse_id, Store};

/// Volatile store with the same contract as [`super::PgStore`].
///
/// Rows live in insertion order; listings come back newest first with ties on
/// `created_at` broken by insertion order, matching the Postgres ordering
/// closely enough for tests and local demos.
#[derive(Default)]
pub struct MemoryStore {
    projects: RwLock<Vec<Project>>,
    skills: RwLock<Vec<Skill>>,
    contacts: RwLock<Vec<Contact>>,
    users: RwLock<Vec<User>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn skill_count(&self) -> usize {
        self.skills.read().await.len()
    }

    pub async fn contact_count(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

fn remove_by_id<T>(rows: &mut Vec<T>, id: Uuid, row_id: impl Fn(&T) -> Uuid, table: &str) -> Result<(), DatabaseError> {
    let before = rows.len();
    rows.retain(|row| row_id(row) != id);
    if rows.len() == before {
        return Err(DatabaseError::NotFound(format!("{} row {}", table, id)));
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let rows = self.projects.read().await;
        Ok(newest_first(rows.as_slice(), |p| p.created_at))
    }

    async fn find_project(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        let Ok(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.projects.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, DatabaseError> {
        let row = Project {
            id: Uuid::new_v4(),
            title: project.title,
            image: project.image,
            description: project.description,
            link: project.link,
            created_at: Utc::now(),
        };
        self.projects.write().await.push(row.clone());
        Ok(row)
    }

    async fn update_project(&self, id: &str, changes: ProjectChanges) -> Result<Project, DatabaseError> {
        let id = parse_id(id)?;
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("projects row {}", id)))?;
        project.apply(changes);
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        let id = parse_id(id)?;
        remove_by_id(&mut *self.projects.write().await, id, |p| p.id, "projects")
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, DatabaseError> {
        let rows = self.skills.read().await;
        Ok(newest_first(rows.as_slice(), |s| s.created_at))
    }

    async fn find_skill(&self, id: &str) -> Result<Option<Skill>, DatabaseError> {
        let Ok(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.skills.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn create_skill(&self, skill: NewSkill) -> Result<Skill, DatabaseError> {
        let row = Skill {
            id: Uuid::new_v4(),
            name: skill.name,
            level: skill.level,
            image: skill.image,
            created_at: Utc::now(),
        };
        self.skills.write().await.push(row.clone());
        Ok(row)
    }

    async fn update_skill(&self, id: &str, changes: SkillChanges) -> Result<Skill, DatabaseError> {
        let id = parse_id(id)?;
        let mut skills = self.skills.write().await;
        let skill = skills
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("skills row {}", id)))?;
        skill.apply(changes);
        Ok(skill.clone())
    }

    async fn delete_skill(&self, id: &str) -> Result<(), DatabaseError> {
        let id = parse_id(id)?;
        remove_by_id(&mut *self.skills.write().await, id, |s| s.id, "skills")
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, DatabaseError> {
        let rows = self.contacts.read().await;
        Ok(newest_first(rows.as_slice(), |c| c.created_at))
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let row = Contact {
            id: Uuid::new_v4(),
            name: contact.name,
            email: contact.email,
            message: contact.message,
            created_at: Utc::now(),
        };
        self.contacts.write().await.push(row.clone());
        Ok(row)
    }

    async fn delete_contact(&self, id: &str) -> Result<(), DatabaseError> {
        let id = parse_id(id)?;
        remove_by_id(&mut *self.contacts.write().await, id, |c| c.id, "contacts")
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("email '{}' already registered", user.email)));
        }
        let row = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
