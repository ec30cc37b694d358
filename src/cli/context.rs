use std::{collections::HashMap, path::Path};

use chrono::{DateTime, Local, Utc};
use folio_config::{Config, ConfigManager};
use folio_core::{
    storage::RecordStorage, Clock, FilteredCollection, Palette, PeriodPolicy, PeriodService,
};
use folio_domain::{Interval, PeriodFilter, Record, RecordBook, Searchable};
use folio_storage_json::{load_book_from_path, JsonRecordStorage};

use crate::cli::{
    output::Formatter, registry::CommandRegistry, system_clock::SystemClock, CommandError,
};

/// State shared by every command handler.
pub struct CliContext {
    pub config: Config,
    pub registry: CommandRegistry,
    pub formatter: Formatter,
    clock: Box<dyn Clock>,
}

impl CliContext {
    /// Loads configuration from the data directory (`FOLIO_HOME` or `~/.folio`).
    pub fn load(registry: CommandRegistry) -> Result<Self, CommandError> {
        let config = ConfigManager::from_default_root()?.load()?;
        Ok(Self::new(config, registry, Box::new(SystemClock)))
    }

    pub fn new(config: Config, registry: CommandRegistry, clock: Box<dyn Clock>) -> Self {
        let formatter = Formatter::new(config.ui_color_enabled);
        Self {
            config,
            registry,
            formatter,
            clock,
        }
    }

    pub fn policy(&self) -> PeriodPolicy {
        PeriodPolicy::from_strict(self.config.strict_periods)
    }

    pub fn palette(&self) -> Palette {
        Palette::dashboard().extend(self.config.palette.clone())
    }

    pub fn precision(&self) -> usize {
        self.config.currency_precision as usize
    }

    /// The instant a command works against: `--now` if given, the clock otherwise.
    pub fn now(&self, args: &ParsedArgs) -> Result<DateTime<Utc>, CommandError> {
        match args.option("now") {
            Some(raw) => {
                let parsed = DateTime::parse_from_rfc3339(raw).map_err(|err| {
                    CommandError::InvalidArguments(format!("invalid --now `{raw}`: {err}"))
                })?;
                Ok(parsed.with_timezone(&Utc))
            }
            None => Ok(self.clock.now()),
        }
    }

    /// Resolves `filter` against `now` in the configured zone (host zone when unset).
    pub fn resolve_interval(
        &self,
        filter: PeriodFilter,
        now: DateTime<Utc>,
    ) -> Result<Option<Interval>, CommandError> {
        let interval = match self.config.fixed_offset()? {
            Some(offset) => PeriodService::resolve_filter(filter, &now.with_timezone(&offset)),
            None => PeriodService::resolve_filter(filter, &now.with_timezone(&Local)),
        };
        Ok(interval)
    }

    /// Refreshes `collection` with period bounds taken in the configured zone.
    pub fn refresh<R>(
        &self,
        collection: &mut FilteredCollection<R>,
        records: &[R],
        now: DateTime<Utc>,
    ) -> Result<(), CommandError>
    where
        R: Record + Searchable + Clone,
    {
        match self.config.fixed_offset()? {
            Some(offset) => collection.refresh(records, &now.with_timezone(&offset)),
            None => collection.refresh(records, &now.with_timezone(&Local)),
        }
        Ok(())
    }

    /// `YYYY-MM-DD HH:MM` in the configured zone.
    pub fn format_date(&self, date: DateTime<Utc>) -> Result<String, CommandError> {
        const FORMAT: &str = "%Y-%m-%d %H:%M";
        let text = match self.config.fixed_offset()? {
            Some(offset) => date.with_timezone(&offset).format(FORMAT).to_string(),
            None => date.with_timezone(&Local).format(FORMAT).to_string(),
        };
        Ok(text)
    }

    pub fn parse_period(&self, args: &ParsedArgs) -> Result<PeriodFilter, CommandError> {
        let raw = args.option("period").unwrap_or("all");
        Ok(PeriodService::parse_filter(raw, self.policy())?)
    }

    /// Loads the book named by `reference`, or the configured default book.
    pub fn load_book(&self, reference: Option<&str>) -> Result<RecordBook, CommandError> {
        let reference = reference
            .or(self.config.default_book.as_deref())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "missing book (pass a path or name, or set `default_book`)".into(),
                )
            })?;
        let path = Path::new(reference);
        if path.extension().is_some() || path.exists() {
            return Ok(load_book_from_path(path)?);
        }
        let storage = JsonRecordStorage::new(self.config.books_dir())?;
        Ok(storage.load_book(reference)?)
    }
}

/// Positional arguments plus `--key value` options and bare `--flag`s.
#[derive(Debug, Default)]
pub struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'a str, &'a str>,
    flags: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str], flags: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            if flags.contains(&name) {
                parsed.flags.push(name);
                continue;
            }
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option --{name} requires a value"))
            })?;
            parsed.options.insert(name, value);
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(&name)
    }

    pub fn required(&self, index: usize, what: &str) -> Result<&'a str, CommandError> {
        self.positional
            .get(index)
            .copied()
            .ok_or_else(|| CommandError::InvalidArguments(format!("missing {what}")))
    }

    /// Rejects options outside `known`, so typos do not silently fall back to defaults.
    pub fn expect_options(&self, known: &[&str]) -> Result<(), CommandError> {
        match self.options.keys().find(|name| !known.contains(name)) {
            Some(name) => Err(CommandError::InvalidArguments(format!(
                "unknown option --{name}"
            ))),
            None => Ok(()),
        }
    }
}
