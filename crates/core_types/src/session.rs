//! Session user, capabilities and navigation gating.

use serde::{Deserialize, Deserializer, Serialize};

/// Role flag granting access to a section of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May build scenarios
    Creator,
    /// May manage users
    Admin,
    /// May edit platform data such as skill types
    Staff,
}

/// The logged-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub creator: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub admin: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub staff: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl SessionUser {
    /// Create a user without any capabilities.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Whether the user holds a capability.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Creator => self.creator,
            Capability::Admin => self.admin,
            Capability::Staff => self.staff,
        }
    }

    /// All capabilities the user holds.
    pub fn capabilities(&self) -> Vec<Capability> {
        [Capability::Creator, Capability::Admin, Capability::Staff]
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }
}

/// Client-side view of the backend session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Session {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Whether the session grants a capability. Anonymous sessions grant none.
    pub fn can(&self, capability: Capability) -> bool {
        self.user().is_some_and(|u| u.has(capability))
    }
}

/// Top-level sections reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavLink {
    Scenarios,
    ScenarioStudio,
    UserManagement,
    Help,
    SkillTypes,
}

impl NavLink {
    /// All links in navbar order.
    pub const ALL: [NavLink; 5] = [
        NavLink::Scenarios,
        NavLink::ScenarioStudio,
        NavLink::UserManagement,
        NavLink::Help,
        NavLink::SkillTypes,
    ];

    /// Capability needed to see the link, if any.
    pub fn required(self) -> Option<Capability> {
        match self {
            NavLink::Scenarios | NavLink::Help => None,
            NavLink::ScenarioStudio => Some(Capability::Creator),
            NavLink::UserManagement => Some(Capability::Admin),
            NavLink::SkillTypes => Some(Capability::Staff),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            NavLink::Scenarios => "Scenarios",
            NavLink::ScenarioStudio => "Scenario Studio",
            NavLink::UserManagement => "User Management",
            NavLink::Help => "Help",
            NavLink::SkillTypes => "Skill Types",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            NavLink::Scenarios => "/scenarios",
            NavLink::ScenarioStudio => "/scenario-studio",
            NavLink::UserManagement => "/users",
            NavLink::Help => "/help",
            NavLink::SkillTypes => "/skill-types",
        }
    }

    pub fn is_visible_for(self, session: &Session) -> bool {
        self.required().is_none_or(|c| session.can(c))
    }

    /// Links to render for a session, in navbar order.
    pub fn visible_for(session: &Session) -> Vec<NavLink> {
        Self::ALL
            .into_iter()
            .filter(|link| link.is_visible_for(session))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_deserialization() {
        let json = r#"{"username": "alice", "creator": true, "admin": null}"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.creator);
        assert!(!user.admin);
        assert!(!user.staff);
        assert_eq!(user.capabilities(), vec![Capability::Creator]);
    }

    #[test]
    fn test_anonymous_sees_public_links() {
        let links = NavLink::visible_for(&Session::Anonymous);
        assert_eq!(links, vec![NavLink::Scenarios, NavLink::Help]);
    }

    #[test]
    fn test_links_follow_capabilities() {
        let user = SessionUser {
            username: "bob".to_string(),
            admin: true,
            staff: true,
            ..Default::default()
        };
        let links = NavLink::visible_for(&Session::Authenticated(user));
        assert_eq!(
            links,
            vec![
                NavLink::Scenarios,
                NavLink::UserManagement,
                NavLink::Help,
                NavLink::SkillTypes,
            ]
        );
    }

    #[test]
    fn test_plain_user_has_no_capabilities() {
        let session = Session::Authenticated(SessionUser::new("carol"));
        assert!(session.is_authenticated());
        assert!(!session.can(Capability::Staff));
        assert_eq!(NavLink::visible_for(&session).len(), 2);
    }

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
