use folio_domain::CURRENT_SCHEMA_VERSION;

use crate::cli::context::CliContext;
use crate::cli::registry::CommandEntry;
use crate::cli::{CommandError, CommandResult};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Stop reading script input", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    context
        .formatter
        .print_header(format!("Folio {}", meta.version));
    let rows = [
        ("Book schema", format!("v{CURRENT_SCHEMA_VERSION}")),
        (
            "Build hash",
            format!("{} ({})", meta.git_hash, meta.git_status),
        ),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ];
    let borrowed: Vec<_> = rows
        .iter()
        .map(|(label, value)| (*label, value.as_str()))
        .collect();
    context.formatter.print_two_column(&borrowed);
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        let name = raw.to_lowercase();
        let Some(entry) = context.registry.get(&name) else {
            return Err(CommandError::UnknownCommand {
                suggestion: context.registry.suggest(&name),
                input: raw.to_string(),
            });
        };
        context.formatter.print_header(entry.name);
        context.formatter.print_line(entry.description);
        context
            .formatter
            .print_line(format!("Usage: {}", entry.usage));
        return Ok(());
    }

    context.formatter.print_header("Commands");
    let rows: Vec<_> = context
        .registry
        .list()
        .map(|entry| (entry.usage, entry.description))
        .collect();
    context.formatter.print_two_column(&rows);
    Ok(())
}

fn cmd_exit(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
