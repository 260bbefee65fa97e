use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::errors::RegistryError;
use crate::domain::traits::CommandHandler;

/// Represents a registered bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub help: String,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            handler,
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// Command registry for managing available commands
///
/// Name, help text and handler live in one entry, so a name is either
/// fully registered or not at all. Ordered by name for the help listing.
#[derive(Default, Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Fails without touching the registry if the name is taken.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.name) {
            return Err(RegistryError::DuplicateCommand(command.name));
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).map(|c| Arc::clone(&c.handler))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Name to help text, ordered by name
    pub fn help_text(&self) -> BTreeMap<&str, &str> {
        self.commands
            .values()
            .map(|c| (c.name.as_str(), c.help.as_str()))
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
