use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{
    Contact, NewContact, NewProject, NewSkill, NewUser, Project, ProjectChanges, Skill, SkillChanges, User,
};
use super::{parse_id, Store};

const PROJECT_COLUMNS: &str = "id, title, image, description, link, created_at";
const SKILL_COLUMNS: &str = "id, name, level, image, created_at";
const CONTACT_COLUMNS: &str = "id, name, email, message, created_at";
const USER_COLUMNS: &str = "id, email, name, password_hash, created_at";

/// Postgres-backed store over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(&self, table: &'static str, id: &str) -> Result<(), DatabaseError> {
        let id = parse_id(id)?;
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("{} row {}", table, id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects ORDER BY created_at DESC, id DESC", PROJECT_COLUMNS);
        Ok(sqlx::query_as::<_, Project>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_project(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        let Ok(id) = parse_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
        Ok(sqlx::query_as::<_, Project>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, DatabaseError> {
        let sql = format!(
            "INSERT INTO projects (id, title, image, description, link) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PROJECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::new_v4())
            .bind(&project.title)
            .bind(&project.image)
            .bind(&project.description)
            .bind(&project.link)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_project(&self, id: &str, changes: ProjectChanges) -> Result<Project, DatabaseError> {
        let id = parse_id(id)?;
        let sql = format!(
            r#"
            UPDATE projects SET
                title = COALESCE($2, title),
                image = COALESCE($3, image),
                description = COALESCE($4, description),
                link = COALESCE($5, link)
            WHERE id = $1
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.image)
            .bind(changes.description)
            .bind(changes.link)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("projects row {}", id)))
    }

    async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_id("projects", id).await
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, DatabaseError> {
        let sql = format!("SELECT {} FROM skills ORDER BY created_at DESC, id DESC", SKILL_COLUMNS);
        Ok(sqlx::query_as::<_, Skill>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_skill(&self, id: &str) -> Result<Option<Skill>, DatabaseError> {
        let Ok(id) = parse_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM skills WHERE id = $1", SKILL_COLUMNS);
        Ok(sqlx::query_as::<_, Skill>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn create_skill(&self, skill: NewSkill) -> Result<Skill, DatabaseError> {
        let sql = format!(
            "INSERT INTO skills (id, name, level, image) VALUES ($1, $2, $3, $4) RETURNING {}",
            SKILL_COLUMNS
        );
        let row = sqlx::query_as::<_, Skill>(&sql)
            .bind(Uuid::new_v4())
            .bind(&skill.name)
            .bind(skill.level)
            .bind(&skill.image)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_skill(&self, id: &str, changes: SkillChanges) -> Result<Skill, DatabaseError> {
        let id = parse_id(id)?;
        let sql = format!(
            r#"
            UPDATE skills SET
                name = COALESCE($2, name),
                level = COALESCE($3, level),
                image = COALESCE($4, image)
            WHERE id = $1
            RETURNING {}
            "#,
            SKILL_COLUMNS
        );
        sqlx::query_as::<_, Skill>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.level)
            .bind(changes.image)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("skills row {}", id)))
    }

    async fn delete_skill(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_id("skills", id).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, DatabaseError> {
        let sql = format!("SELECT {} FROM contacts ORDER BY created_at DESC, id DESC", CONTACT_COLUMNS);
        Ok(sqlx::query_as::<_, Contact>(&sql).fetch_all(&self.pool).await?)
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "INSERT INTO contacts (id, name, email, message) VALUES ($1, $2, $3, $4) RETURNING {}",
            CONTACT_COLUMNS
        );
        let row = sqlx::query_as::<_, Contact>(&sql)
            .bind(Uuid::new_v4())
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.message)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_contact(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_by_id("contacts", id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool).await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, email, name, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DatabaseError::Conflict(format!("email '{}' already registered", user.email))
                }
                other => other.into(),
            })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn close(&self) {
        DatabaseManager::close(&self.pool).await;
    }
}
