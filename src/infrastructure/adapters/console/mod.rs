//! Console adapter for development/testing

use async_trait::async_trait;
use std::collections::HashMap;
use crate::domain::entities::{Member, Role};
use crate::domain::traits::{BotInfo, ChatClient};
use crate::application::errors::BotError;

/// Members and roles keyed by group
#[derive(Debug, Clone, Default)]
pub struct Directory {
    members: HashMap<(String, String), Member>,
    roles: HashMap<(String, String), Role>,
}

impl Directory {
    pub fn add_member(&mut self, member: Member) {
        self.members
            .insert((member.group_id.clone(), member.user_id.clone()), member);
    }

    pub fn add_role(&mut self, group_id: impl Into<String>, role: Role) {
        self.roles.insert((group_id.into(), role.id.clone()), role);
    }

    pub fn member(&self, group_id: &str, user_id: &str) -> Option<&Member> {
        self.members.get(&(group_id.to_string(), user_id.to_string()))
    }

    pub fn role(&self, group_id: &str, role_id: &str) -> Option<&Role> {
        self.roles.get(&(group_id.to_string(), role_id.to_string()))
    }
}

/// Console bot adapter for local development
///
/// `directory` plays the role of the platform's local state, `remote` the
/// platform API; anything in neither is reported as not found.
pub struct ConsoleAdapter {
    info: BotInfo,
    directory: Directory,
    remote: Directory,
}

impl ConsoleAdapter {
    pub fn new(bot_id: impl Into<String>) -> Self {
        Self {
            info: BotInfo::new(bot_id, "guild-router"),
            directory: Directory::default(),
            remote: Directory::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    pub fn with_directory(mut self, directory: Directory) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_remote(mut self, remote: Directory) -> Self {
        self.remote = remote;
        self
    }
}

#[async_trait]
impl ChatClient for ConsoleAdapter {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT #{}] {}", channel_id, text);
        Ok(())
    }

    fn cached_member(&self, group_id: &str, user_id: &str) -> Option<Member> {
        self.directory.member(group_id, user_id).cloned()
    }

    async fn fetch_member(&self, group_id: &str, user_id: &str) -> Result<Member, BotError> {
        self.remote
            .member(group_id, user_id)
            .cloned()
            .ok_or_else(|| BotError::NotFound(format!("member {} in {}", user_id, group_id)))
    }

    fn cached_role(&self, group_id: &str, role_id: &str) -> Option<Role> {
        self.directory.role(group_id, role_id).cloned()
    }

    async fn fetch_role(&self, group_id: &str, role_id: &str) -> Result<Role, BotError> {
        self.remote
            .role(group_id, role_id)
            .cloned()
            .ok_or_else(|| BotError::NotFound(format!("role {} in {}", role_id, group_id)))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
