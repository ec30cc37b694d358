pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod system_clock;

use std::io::{self, BufRead};

use folio_config::ConfigError;
use folio_core::CoreError;
use thiserror::Error;

use crate::cli::context::CliContext;

/// Environment variable switching the binary to line-per-command script mode.
pub const SCRIPT_ENV: &str = "FOLIO_CLI_SCRIPT";

/// Errors that abort the whole CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors returned by individual command handlers.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{input}`{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        input: String,
        suggestion: Option<&'static str>,
    },
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|name| format!(" (did you mean `{name}`?)"))
        .unwrap_or_default()
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Runs one command from `argv`, or a command per stdin line when
/// `FOLIO_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mut context = CliContext::load(commands::registry())?;
    if std::env::var_os(SCRIPT_ENV).is_some() {
        return run_script(&mut context, io::stdin().lock());
    }

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        args.push("help".into());
    }
    dispatch(&mut context, &args)?;
    Ok(())
}

/// Script mode reports failures and keeps going until `exit` or end of input.
fn run_script(context: &mut CliContext, input: impl BufRead) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let tokens = match shell_words::split(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                context.formatter.print_warning(err);
                continue;
            }
        };
        match dispatch(context, &tokens) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => report_error(context, &err),
        }
    }
    Ok(())
}

fn dispatch(context: &mut CliContext, tokens: &[String]) -> Result<LoopControl, CommandError> {
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let Some(handler) = context.registry.get(&command).map(|entry| entry.handler) else {
        return Err(CommandError::UnknownCommand {
            suggestion: context.registry.suggest(&command),
            input: raw.clone(),
        });
    };
    tracing::debug!(command = %command, args = args.len(), "dispatching");
    match handler(context, &args) {
        Ok(()) => Ok(LoopControl::Continue),
        Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
        Err(err) => Err(err),
    }
}

fn report_error(context: &CliContext, err: &CommandError) {
    context.formatter.print_error(err);
    if matches!(err, CommandError::InvalidArguments(_)) {
        context
            .formatter
            .print_line("Use `help <command>` for usage details.");
    }
}
