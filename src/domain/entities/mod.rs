//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod member;
pub mod message;
pub mod permissions;
pub mod settings;

pub use command::{Command, CommandRegistry};
pub use member::{Member, Role};
pub use message::Message;
pub use permissions::Permissions;
pub use settings::{GroupSettings, PrefixChange};
