use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub description: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new project row
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub image: String,
    pub description: String,
    pub link: String,
}

/// Column values to overwrite; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl From<NewProject> for ProjectChanges {
    fn from(full: NewProject) -> Self {
        Self {
            title: Some(full.title),
            image: Some(full.image),
            description: Some(full.description),
            link: Some(full.link),
        }
    }
}

impl Project {
    pub fn apply(&mut self, changes: ProjectChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(link) = changes.link {
            self.link = link;
        }
    }
}
