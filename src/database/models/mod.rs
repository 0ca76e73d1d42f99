pub mod contact;
pub mod project;
pub mod skill;
pub mod user;

pub use contact::{Contact, NewContact};
pub use project::{NewProject, Project, ProjectChanges};
pub use skill::{NewSkill, Skill, SkillChanges};
pub use user::{NewUser, User, UserInfo};
