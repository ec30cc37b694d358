//! Resolves period tokens into half-open UTC intervals.
//!
//! Calendar boundaries (midnight, week start, month start) are taken in the
//! caller's time zone and converted to UTC, so a single resolved interval can
//! bound a query over UTC-stamped records.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use folio_domain::{Interval, PeriodFilter, PeriodToken};

use crate::{time::Clock, CoreError};

/// Longest local-time gap skipped when a midnight does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// How unrecognised period strings are treated when parsing filter input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPolicy {
    /// Unknown tokens mean "no bound".
    #[default]
    Permissive,
    /// Unknown tokens are a validation error.
    Strict,
}

impl PeriodPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            PeriodPolicy::Strict
        } else {
            PeriodPolicy::Permissive
        }
    }
}

pub struct PeriodService;

impl PeriodService {
    /// Computes the interval for `token` relative to `now`, in `now`'s time zone.
    pub fn resolve<Tz: TimeZone>(token: PeriodToken, now: &DateTime<Tz>) -> Interval {
        let tz = now.timezone();
        let today = now.date_naive();
        let (start, end) = match token {
            PeriodToken::Today => (today, today + Duration::days(1)),
            PeriodToken::Yesterday => (today - Duration::days(1), today),
            PeriodToken::Week => {
                let offset = today.weekday().num_days_from_sunday() as i64;
                let sunday = today - Duration::days(offset);
                (sunday, sunday + Duration::days(7))
            }
            PeriodToken::Month => {
                let first = month_start(today);
                (first, next_month_start(first))
            }
            PeriodToken::Year => {
                let first = year_start(today);
                (first, next_year_start(first))
            }
        };
        let interval = Interval {
            start: local_midnight(&tz, start),
            end: local_midnight(&tz, end),
        };
        tracing::debug!(period = %token, %interval, "resolved period");
        interval
    }

    /// Resolves a filter selection. `All` yields no bound.
    pub fn resolve_filter<Tz: TimeZone>(
        filter: PeriodFilter,
        now: &DateTime<Tz>,
    ) -> Option<Interval> {
        filter.token().map(|token| Self::resolve(token, now))
    }

    /// Captures `now` once from `clock` and resolves `filter` in `tz`.
    pub fn resolve_now<Tz: TimeZone>(
        clock: &dyn Clock,
        tz: &Tz,
        filter: PeriodFilter,
    ) -> Option<Interval> {
        let now = clock.now().with_timezone(tz);
        Self::resolve_filter(filter, &now)
    }

    /// Parses user input into a filter according to `policy`.
    pub fn parse_filter(raw: &str, policy: PeriodPolicy) -> Result<PeriodFilter, CoreError> {
        match raw.parse::<PeriodFilter>() {
            Ok(filter) => Ok(filter),
            Err(err) => match policy {
                PeriodPolicy::Strict => Err(err.into()),
                PeriodPolicy::Permissive => {
                    tracing::warn!(period = raw, "unrecognised period, applying no bound");
                    Ok(PeriodFilter::All)
                }
            },
        }
    }
}

/// First instant of `date` in `tz`. A midnight that falls in a DST gap moves
/// forward to the first local time that exists.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=MAX_GAP_MINUTES)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn next_month_start(first: NaiveDate) -> NaiveDate {
    let probe = first + Duration::days(32);
    month_start(probe)
}

fn year_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

fn next_year_start(first: NaiveDate) -> NaiveDate {
    let probe = first + Duration::days(366);
    year_start(probe)
}
