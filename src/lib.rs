//! Command routing for a chat bot.
//!
//! Inbound messages are matched against a per-group prefix, split into a
//! command name and arguments, and handed to the registered handler. The
//! prefix is the only persisted per-group setting.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{BotError, PermissionError, RegistryError, StorageError};
pub use application::messaging::{Context, DispatchOutcome, Router, SetPrefixCommand};
pub use application::services::member_has_permission;
pub use domain::entities::{GroupSettings, Member, Message, Permissions, Role};
pub use domain::traits::{ChatClient, CommandHandler, KeyValueStore};
