pub mod interval;
pub mod list;
pub mod summary;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(interval::definitions());
    commands.extend(summary::definitions());
    commands.extend(list::definitions());
    commands.extend(system::definitions());
    commands
}

/// Registry holding every CLI command, in help order.
pub fn registry() -> CommandRegistry {
    CommandRegistry::with_entries(all_entries())
}
