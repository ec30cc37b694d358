use std::collections::HashMap;

use crate::cli::context::CliContext;
use crate::cli::CommandResult;

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
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

/// Command table keyed by name, remembering registration order for help output.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn with_entries(entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        let mut registry = Self::default();
        for entry in entries {
            registry.register(entry);
        }
        registry
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Closest registered name within a small edit distance.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.names()
            .map(|name| (strsim::levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= 3)
            .map(|(_, name)| name)
    }
}
