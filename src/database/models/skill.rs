use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    /// Always within 1..=100; enforced before the store and by a table CHECK
    pub level: i32,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSkill {
    pub name: String,
    pub level: i32,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillChanges {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub image: Option<String>,
}

impl Skill {
    pub fn apply(&mut self, changes: SkillChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(level) = changes.level {
            self.level = level;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
    }
}
