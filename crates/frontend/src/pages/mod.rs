//! Page components.

mod home;
mod skill_types;

pub use home::HomePage;
pub use skill_types::SkillTypesPage;
