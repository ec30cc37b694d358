use folio_core::{CoreError, FilteredCollection};
use folio_domain::{FinanceRecord, JournalEntry, Record, RecordField, Searchable, TodoRecord};

use crate::cli::context::{CliContext, ParsedArgs};
use crate::cli::registry::CommandEntry;
use crate::cli::{CommandError, CommandResult};

const LIST_OPTIONS: &[&str] = &["period", "page", "page-size", "where", "search", "now"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "list",
        "Page through finance, todo or journal records",
        "list <finance|todos|journal> [book] [--period P] [--page N] [--page-size N] \
         [--where field=value] [--search text] [--now RFC3339]",
        cmd_list,
    )]
}

fn cmd_list(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let args = ParsedArgs::parse(args, &[])?;
    args.expect_options(LIST_OPTIONS)?;
    let kind = args.required(0, "record kind (finance, todos or journal)")?;
    let book = context.load_book(args.positional.get(1).copied())?;

    match kind.to_ascii_lowercase().as_str() {
        "finance" => list_records(context, &args, &book.finance, finance_row),
        "todos" | "todo" => list_records(context, &args, &book.todos, todo_row),
        "journal" => list_records(context, &args, &book.journal, journal_row),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown record kind `{other}` (expected finance, todos or journal)"
        ))),
    }
}

type RowFormatter<R> = fn(&R, &str, usize) -> String;

fn list_records<R>(
    context: &CliContext,
    args: &ParsedArgs,
    records: &[R],
    row: RowFormatter<R>,
) -> CommandResult
where
    R: Record + Searchable + Clone,
{
    let page_size = match args.option("page-size") {
        Some(raw) => parse_number(raw, "page-size")?,
        None => context.config.page_size,
    };
    let mut collection = FilteredCollection::new(page_size)?;
    collection.set_period(context.parse_period(args)?);
    collection.set_discriminant(args.option("where").map(parse_where).transpose()?);
    collection.set_search(args.option("search").map(str::to_string));
    if let Some(raw) = args.option("page") {
        collection.go_to(parse_number(raw, "page")?);
    }

    let now = context.now(args)?;
    context.refresh(&mut collection, records, now)?;
    let page = collection.page();

    context.formatter.print_header(collection.period());
    if page.items.is_empty() {
        context.formatter.print_line("  no matching records");
    }
    for record in &page.items {
        let date = context.format_date(record.date())?;
        context
            .formatter
            .print_line(format!("  {}", row(record, &date, context.precision())));
    }
    context.formatter.print_line(format!(
        "Page {} of {} ({} records)",
        page.page, page.total_pages, page.total_items
    ));
    Ok(())
}

fn parse_where(raw: &str) -> Result<(RecordField, String), CommandError> {
    let (field, value) = raw.split_once('=').ok_or_else(|| {
        CommandError::InvalidArguments(format!("--where expects field=value, got `{raw}`"))
    })?;
    let field: RecordField = field.parse().map_err(CoreError::from)?;
    Ok((field, value.trim().to_string()))
}

fn parse_number(raw: &str, option: &str) -> Result<usize, CommandError> {
    raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("--{option} expects a number, got `{raw}`"))
    })
}

fn finance_row(record: &FinanceRecord, date: &str, precision: usize) -> String {
    format!(
        "{date}  {:<10}  {:<16}  {:>12.precision$}",
        record.kind.as_str(),
        record.category,
        record.amount
    )
}

fn todo_row(record: &TodoRecord, date: &str, _precision: usize) -> String {
    format!("{date}  {:<11}  {}", record.status.to_string(), record.title)
}

fn journal_row(entry: &JournalEntry, date: &str, _precision: usize) -> String {
    format!("{date}  {:<10}  {}", entry.mood, entry.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use folio_domain::FinanceType;

    #[test]
    fn where_clause_parses_field_and_value() {
        let (field, value) = parse_where("status= completed").unwrap();
        assert_eq!(field, RecordField::Status);
        assert_eq!(value, "completed");
        assert!(parse_where("status").is_err());
        assert!(parse_where("colour=red").is_err());
    }

    #[test]
    fn finance_rows_use_the_configured_precision() {
        let date = Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).unwrap();
        let record = FinanceRecord::new(FinanceType::Expense, 12.5, "Groceries", date);
        assert_eq!(
            finance_row(&record, "2024-05-14 09:00", 2),
            "2024-05-14 09:00  expense     Groceries                12.50"
        );
    }
}
