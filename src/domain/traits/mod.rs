//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod handler;
pub mod store;

pub use chat::{BotInfo, ChatClient};
pub use handler::{CommandHandler, HandlerResult};
pub use store::{KeyValueStore, Record};
