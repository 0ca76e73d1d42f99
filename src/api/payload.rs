//! Request bodies accepted by the HTTP surface.
//!
//! Every field is optional at the serde level so a partial body still parses;
//! the [`Validate`] impls decide what is actually required for each flow.

use serde::Deserialize;

use crate::database::models::{NewContact, NewProject, NewSkill, ProjectChanges, SkillChanges};
use crate::validation::{Checker, Validate, Validated, NOTHING_TO_UPDATE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Project create and full update: all four fields required
impl Validate for ProjectPayload {
    type Output = NewProject;

    fn validate(self) -> Validated<NewProject> {
        let mut check = Checker::new();
        let title = check.required("title", self.title);
        let image = check.required("image", self.image);
        let description = check.required("description", self.description);
        let link = check.required("link", self.link);
        check.finish()?;

        Ok(NewProject {
            title: title.unwrap_or_default(),
            image: image.unwrap_or_default(),
            description: description.unwrap_or_default(),
            link: link.unwrap_or_default(),
        })
    }
}

/// Partial project update: any subset of fields, none blank
#[derive(Debug, Clone)]
pub struct ProjectPatch(pub ProjectPayload);

impl Validate for ProjectPatch {
    type Output = ProjectChanges;

    fn validate(self) -> Validated<ProjectChanges> {
        let payload = self.0;
        let mut check = Checker::new();
        let changes = ProjectChanges {
            title: check.optional("title", payload.title),
            image: check.optional("image", payload.image),
            description: check.optional("description", payload.description),
            link: check.optional("link", payload.link),
        };
        if changes == ProjectChanges::default() {
            check.reject(NOTHING_TO_UPDATE);
        }
        check.finish()?;
        Ok(changes)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillPayload {
    pub name: Option<String>,
    pub level: Option<i64>,
    pub image: Option<String>,
}

/// Skill create: name, level and image required
impl Validate for SkillPayload {
    type Output = NewSkill;

    fn validate(self) -> Validated<NewSkill> {
        let mut check = Checker::new();
        let name = check.required("name", self.name);
        let level = check.required_level("level", self.level);
        let image = check.required("image", self.image);
        check.finish()?;

        Ok(NewSkill {
            name: name.unwrap_or_default(),
            level: level.unwrap_or_default(),
            image: image.unwrap_or_default(),
        })
    }
}

/// Full skill update: name and level required, image replaced only when sent
#[derive(Debug, Clone)]
pub struct SkillReplace(pub SkillPayload);

impl Validate for SkillReplace {
    type Output = SkillChanges;

    fn validate(self) -> Validated<SkillChanges> {
        let payload = self.0;
        let mut check = Checker::new();
        let changes = SkillChanges {
            name: check.required("name", payload.name),
            level: check.required_level("level", payload.level),
            image: check.optional("image", payload.image),
        };
        check.finish()?;
        Ok(changes)
    }
}

/// Partial skill update
#[derive(Debug, Clone)]
pub struct SkillPatch(pub SkillPayload);

impl Validate for SkillPatch {
    type Output = SkillChanges;

    fn validate(self) -> Validated<SkillChanges> {
        let payload = self.0;
        let nothing_sent = payload.name.is_none() && payload.level.is_none() && payload.image.is_none();

        let mut check = Checker::new();
        let changes = SkillChanges {
            name: check.optional("name", payload.name),
            level: check.optional_level("level", payload.level),
            image: check.optional("image", payload.image),
        };
        if nothing_sent {
            check.reject(NOTHING_TO_UPDATE);
        }
        check.finish()?;
        Ok(changes)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl Validate for ContactPayload {
    type Output = NewContact;

    fn validate(self) -> Validated<NewContact> {
        let mut check = Checker::new();
        let name = check.required("name", self.name);
        let email = check.required_email("email", self.email);
        let message = check.required("message", self.message);
        check.finish()?;

        Ok(NewContact {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterPayload {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A registration that passed validation; the password is still plain text
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Validate for RegisterPayload {
    type Output = Registration;

    fn validate(self) -> Validated<Registration> {
        let mut check = Checker::new();
        let email = check.required_email("email", self.email);
        let name = check.required("name", self.name);
        let password = check.required_verbatim("password", self.password);
        check.finish()?;

        Ok(Registration {
            email: email.unwrap_or_default(),
            name: name.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for LoginPayload {
    type Output = Credentials;

    fn validate(self) -> Validated<Credentials> {
        let mut check = Checker::new();
        let email = check.required("email", self.email);
        let password = check.required_verbatim("password", self.password);
        check.finish()?;

        Ok(Credentials {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}
