use folio_core::{AggregationService, CoreError, SummaryService, Totals};
use folio_domain::{Interval, RecordBook, RecordField};

use crate::cli::context::{CliContext, ParsedArgs};
use crate::cli::registry::CommandEntry;
use crate::cli::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Chart totals for a book over a period",
        "summary [book] [--period P] [--by type|category|status|mood] [--now RFC3339] [--json]",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let args = ParsedArgs::parse(args, &["json"])?;
    args.expect_options(&["period", "by", "now"])?;
    let field: RecordField = args
        .option("by")
        .unwrap_or("type")
        .parse()
        .map_err(CoreError::from)?;
    let filter = context.parse_period(&args)?;
    let now = context.now(&args)?;
    let book = context.load_book(args.positional.first().copied())?;

    let interval = context.resolve_interval(filter, now)?;
    let totals = totals_for(&book, field, interval.as_ref());
    let summary = SummaryService::present(&totals, &context.palette());

    if args.flag("json") {
        context
            .formatter
            .print_line(serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    context
        .formatter
        .print_header(format!("{} by {field} ({filter})", book.name));
    if summary.is_empty() {
        context.formatter.print_line("  no records in period");
        return Ok(());
    }
    let unit = match field {
        RecordField::Type | RecordField::Category => format!(" {}", context.config.currency),
        RecordField::Status | RecordField::Mood => String::new(),
    };
    let mut lines = SummaryService::render_lines(&summary, context.precision());
    let balance = lines.pop();
    for (line, color) in lines.iter().zip(&summary.colors) {
        context.formatter.print_swatch(color, format!("{line}{unit}"));
    }
    if field == RecordField::Type {
        if let Some(balance) = balance {
            context.formatter.print_line(format!("  {balance}{unit}"));
        }
    }
    Ok(())
}

fn totals_for(book: &RecordBook, field: RecordField, interval: Option<&Interval>) -> Totals {
    match field {
        RecordField::Type => AggregationService::finance_by_type(&book.finance, interval),
        RecordField::Category => AggregationService::finance_by_category(&book.finance, interval),
        RecordField::Status => AggregationService::todo_by_status(&book.todos, interval),
        RecordField::Mood => AggregationService::journal_by_mood(&book.journal, interval),
    }
}
