//! Message dispatcher - Routes prefixed messages to registered commands

use std::sync::Arc;

use crate::application::errors::{BotError, RegistryError, StorageError};
use crate::application::services::SettingsStore;
use crate::domain::entities::{Command, CommandRegistry, Message, PrefixChange};
use crate::domain::traits::{ChatClient, CommandHandler, KeyValueStore};
use super::commands::HelpCommand;
use super::context::Context;
use super::parser;

/// Prefix used by groups that never configured one
pub const DEFAULT_PREFIX: &str = "!";

/// Name of the built-in help command
pub const HELP_COMMAND: &str = "help";

pub const SUB_COMMAND_NEEDED: &str = "Sub command needed. ";
pub const NOT_RECOGNIZED: &str = "Command not recognized";

/// What happened to an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Authored by the bot itself
    FromSelf,
    /// Did not start with the group's prefix
    NoPrefix,
    /// A registered command ran
    Handled(String),
    /// Prefix with no command name; help was sent
    HelpFallback,
    /// Empty name under an empty prefix; notice and help were sent
    SubCommandNeeded,
    /// Unknown command name; notice and help were sent
    NotRecognized(String),
}

/// Command router
///
/// Built once at startup, commands registered, then shared behind an `Arc`.
/// The registry is read-only from then on; group settings sit behind their
/// own lock inside `SettingsStore`.
pub struct Router {
    registry: CommandRegistry,
    settings: SettingsStore,
    default_prefix: String,
}

impl Router {
    /// Router with the "!" default prefix
    pub async fn new(store: Arc<dyn KeyValueStore>) -> Result<Self, BotError> {
        Self::with_prefix(DEFAULT_PREFIX, store).await
    }

    /// Load group settings from `store` and register the built-in help command.
    ///
    /// An empty default prefix makes every message a command candidate.
    pub async fn with_prefix(
        prefix: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, BotError> {
        let settings = SettingsStore::load(store).await;
        let mut router = Self {
            registry: CommandRegistry::new(),
            settings,
            default_prefix: prefix.into(),
        };
        router.register_command(HELP_COMMAND, "This help text", HelpCommand)?;
        Ok(router)
    }

    /// Register a command handler. "help" is reserved.
    pub fn register_command<H>(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: CommandHandler + 'static,
    {
        self.register(Command::new(name, help, Arc::new(handler)))
    }

    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        tracing::debug!("Registering command: {}", command.name);
        self.registry.register(command)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn default_prefix(&self) -> &str {
        &self.default_prefix
    }

    /// Prefix in effect for a group
    pub async fn prefix_for(&self, group_id: &str) -> String {
        self.settings.prefix_for(group_id, &self.default_prefix).await
    }

    pub async fn set_prefix(
        &self,
        group_id: &str,
        prefix: &str,
    ) -> Result<PrefixChange, StorageError> {
        self.settings
            .set_prefix(group_id, prefix, &self.default_prefix)
            .await
    }

    /// Every registered command with its help text, one per line
    pub fn help_message(&self) -> String {
        let mut help = "Here's a list of available commands:\n".to_string();
        for (name, text) in self.registry.help_text() {
            help.push_str(&format!("* {}: {}\n", name, text));
        }
        help
    }

    pub async fn send_help(&self, session: &dyn ChatClient, channel_id: &str) -> Result<(), BotError> {
        session.send_message(channel_id, &self.help_message()).await
    }

    /// Route one inbound message.
    ///
    /// On a match the handler receives the message with prefix and command
    /// name removed. Unknown or missing commands get a notice (where one
    /// applies) followed by the help listing.
    pub async fn handle_message(
        self: &Arc<Self>,
        session: Arc<dyn ChatClient>,
        mut message: Message,
    ) -> Result<DispatchOutcome, BotError> {
        if message.author_id == session.bot_info().id {
            return Ok(DispatchOutcome::FromSelf);
        }

        let prefix = self.prefix_for(&message.group_id).await;

        let Some(parsed) = parser::parse(&message.content, &prefix) else {
            return Ok(DispatchOutcome::NoPrefix);
        };
        let name = parsed.name.to_string();
        let args = parsed.args.to_string();

        if let Some(handler) = self.registry.lookup(&name) {
            message.content = args;
            tracing::debug!(
                "Calling handler for command: {} (message {} from {})",
                name, message.id, message.platform
            );
            let ctx = Context::new(session, Arc::clone(self));
            handler.handle(ctx, message).await?;
            return Ok(DispatchOutcome::Handled(name));
        }

        let outcome = if name.is_empty() && prefix.is_empty() {
            session
                .send_message(&message.channel_id, SUB_COMMAND_NEEDED)
                .await?;
            DispatchOutcome::SubCommandNeeded
        } else if !name.is_empty() {
            session.send_message(&message.channel_id, NOT_RECOGNIZED).await?;
            DispatchOutcome::NotRecognized(name)
        } else {
            DispatchOutcome::HelpFallback
        };

        self.send_help(session.as_ref(), &message.channel_id).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Member, Permissions, Role};
    use crate::infrastructure::adapters::console::{ConsoleAdapter, Directory};
    use crate::infrastructure::storage::MemoryStore;

    async fn router() -> Router {
        Router::new(Arc::new(MemoryStore::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_help_is_builtin_and_reserved() {
        let mut router = router().await;
        assert!(router.registry().contains(HELP_COMMAND));

        let err = router
            .register_command("help", "mine", |_ctx: Context, _msg: Message| async move {
                Ok::<(), BotError>(())
            })
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCommand("help".to_string()));
        assert_eq!(router.registry().get("help").unwrap().help, "This help text");
    }

    #[tokio::test]
    async fn test_help_message_lists_commands() {
        let mut router = router().await;
        router
            .register_command("ping", "Replies with pong", |_ctx: Context, _msg: Message| async move {
                Ok::<(), BotError>(())
            })
            .unwrap();

        assert_eq!(
            router.help_message(),
            "Here's a list of available commands:\n* help: This help text\n* ping: Replies with pong\n"
        );
    }

    #[tokio::test]
    async fn test_default_prefix_until_changed() {
        let router = router().await;
        assert_eq!(router.prefix_for("g").await, "!");

        router.set_prefix("g", "?").await.unwrap();
        assert_eq!(router.prefix_for("g").await, "?");
        assert_eq!(router.prefix_for("other").await, "!");
    }

    #[tokio::test]
    async fn test_self_messages_are_dropped() {
        let router = Arc::new(router().await);
        let session: Arc<dyn ChatClient> = Arc::new(ConsoleAdapter::new("bot"));

        let outcome = router
            .handle_message(session, Message::new("bot", "c", "g", "!help"))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::FromSelf);
    }

    #[tokio::test]
    async fn test_unprefixed_messages_are_ignored() {
        let router = Arc::new(router().await);
        let session: Arc<dyn ChatClient> = Arc::new(ConsoleAdapter::new("bot"));

        let outcome = router
            .handle_message(session, Message::new("u", "c", "g", "hello there"))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::NoPrefix);
    }

    #[tokio::test]
    async fn test_prefix_command_changes_prefix_for_admin() {
        let mut router = router().await;
        router
            .register_command("prefix", "Change the prefix", crate::application::messaging::SetPrefixCommand)
            .unwrap();
        let router = Arc::new(router);

        let mut dir = Directory::default();
        dir.add_role("g", Role::new("admin", Permissions::ADMINISTRATOR));
        dir.add_member(Member::new("g", "u").with_role("admin"));
        let session: Arc<dyn ChatClient> = Arc::new(ConsoleAdapter::new("bot").with_directory(dir));

        let outcome = router
            .handle_message(session, Message::new("u", "c", "g", "!prefix ?"))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Handled("prefix".to_string()));
        assert_eq!(router.prefix_for("g").await, "?");
    }
}
