use folio_core::PeriodService;

use crate::cli::context::{CliContext, ParsedArgs};
use crate::cli::registry::CommandEntry;
use crate::cli::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "interval",
        "Show the bounds a period selects",
        "interval <today|yesterday|week|month|year|all> [--now RFC3339]",
        cmd_interval,
    )]
}

fn cmd_interval(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let args = ParsedArgs::parse(args, &[])?;
    args.expect_options(&["now"])?;
    let raw = args.required(0, "period")?;
    let filter = PeriodService::parse_filter(raw, context.policy())?;
    let now = context.now(&args)?;

    context.formatter.print_header(filter);
    match context.resolve_interval(filter, now)? {
        Some(interval) => {
            let start = interval.start.to_rfc3339();
            let end = interval.end.to_rfc3339();
            let hours = interval.duration().num_hours().to_string();
            context.formatter.print_two_column(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("hours", hours.as_str()),
            ]);
        }
        None => context.formatter.print_line("  unbounded"),
    }
    Ok(())
}
