pub mod booking;
pub mod catalog;
pub mod config;
pub mod system;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(booking::definitions());
    commands.extend(catalog::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands in registration order. The first definition of a name wins.
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut unique: Vec<CommandDefinition> = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if unique.iter().all(|known| known.name != definition.name) {
                unique.push(definition);
            }
        }
        Self {
            definitions: unique,
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|definition| definition.name)
    }
}
