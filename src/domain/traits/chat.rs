use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Member, Role};

/// Chat platform session - abstraction for messaging platform adapters
///
/// Member and role lookups come in two tiers: `cached_*` reads local state
/// and never fails, `fetch_*` asks the platform and may.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a message to a channel
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError>;

    /// Member from local state, if present
    fn cached_member(&self, group_id: &str, user_id: &str) -> Option<Member>;

    /// Member from the platform
    async fn fetch_member(&self, group_id: &str, user_id: &str) -> Result<Member, BotError>;

    /// Role from local state, if present
    fn cached_role(&self, group_id: &str, role_id: &str) -> Option<Role>;

    /// Role from the platform
    async fn fetch_role(&self, group_id: &str, role_id: &str) -> Result<Role, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}

impl BotInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
