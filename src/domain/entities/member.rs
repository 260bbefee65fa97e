use super::Permissions;

/// A user's membership in a group, as reported by the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub group_id: String,
    pub user_id: String,
    pub roles: Vec<String>,
}

impl Member {
    pub fn new(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            user_id: user_id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.roles.push(role_id.into());
        self
    }
}

/// A group role and the permissions it grants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: Permissions,
}

impl Role {
    pub fn new(id: impl Into<String>, permissions: Permissions) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            permissions,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
