//! Message handling - Prefix matching, command routing and built-in commands

pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod parser;

pub use commands::{HelpCommand, SetPrefixCommand};
pub use context::Context;
pub use dispatcher::{DispatchOutcome, Router, DEFAULT_PREFIX, HELP_COMMAND};
