//! Filtered, paginated view over any dashboard record type.
//!
//! Finance, todo and journal list screens share this one state object:
//! a period filter, an optional discriminant match, an optional text search,
//! and a page cursor.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use folio_domain::{Interval, PeriodFilter, Record, RecordField, Searchable};

use crate::{period_service::PeriodService, AggregationService, CoreError};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of matched records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<R> Page<R> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone)]
pub struct FilteredCollection<R> {
    period: PeriodFilter,
    discriminant: Option<(RecordField, String)>,
    search: Option<String>,
    page: usize,
    page_size: usize,
    interval: Option<Interval>,
    matched: Vec<R>,
}

impl<R> FilteredCollection<R>
where
    R: Record + Searchable + Clone,
{
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        validate_page_size(page_size)?;
        Ok(Self {
            period: PeriodFilter::All,
            discriminant: None,
            search: None,
            page: 1,
            page_size,
            interval: None,
            matched: Vec::new(),
        })
    }

    pub fn period(&self) -> PeriodFilter {
        self.period
    }

    /// Interval resolved by the last [`refresh`](Self::refresh), if bounded.
    pub fn interval(&self) -> Option<&Interval> {
        self.interval.as_ref()
    }

    pub fn set_period(&mut self, period: PeriodFilter) {
        self.period = period;
        self.page = 1;
    }

    /// Restricts matches to records whose `field` equals `value` (ASCII case-insensitive).
    pub fn set_discriminant(&mut self, discriminant: Option<(RecordField, String)>) {
        self.discriminant = discriminant;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), CoreError> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Moves the cursor; out-of-range pages clamp when the page is read.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = (self.current_page() + 1).min(self.total_pages());
    }

    pub fn previous_page(&mut self) {
        self.page = self.current_page().saturating_sub(1).max(1);
    }

    /// Re-applies every filter to `records`, resolving the period against a single `now`.
    pub fn refresh<Tz: TimeZone>(&mut self, records: &[R], now: &DateTime<Tz>) {
        self.interval = PeriodService::resolve_filter(self.period, now);
        let mut matched: Vec<R> = AggregationService::filter_in(records, self.interval.as_ref())
            .into_iter()
            .filter(|record| self.matches_discriminant(*record))
            .filter(|record| {
                self.search
                    .as_deref()
                    .map_or(true, |needle| record.matches_text(needle))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date().cmp(&a.date()));
        tracing::debug!(
            period = %self.period,
            total = records.len(),
            matched = matched.len(),
            "refreshed collection"
        );
        self.matched = matched;
    }

    pub fn total_items(&self) -> usize {
        self.matched.len()
    }

    /// Always at least one, so an empty result still has a (blank) first page.
    pub fn total_pages(&self) -> usize {
        self.matched.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.page.clamp(1, self.total_pages())
    }

    pub fn page(&self) -> Page<R> {
        let page = self.current_page();
        let items = self
            .matched
            .iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();
        Page {
            items,
            page,
            page_size: self.page_size,
            total_items: self.matched.len(),
            total_pages: self.total_pages(),
        }
    }

    /// Every matched record, newest first.
    pub fn matched(&self) -> &[R] {
        &self.matched
    }

    fn matches_discriminant(&self, record: &R) -> bool {
        match &self.discriminant {
            None => true,
            Some((field, expected)) => record
                .field(*field)
                .is_some_and(|value| value.eq_ignore_ascii_case(expected)),
        }
    }
}

fn validate_page_size(page_size: usize) -> Result<(), CoreError> {
    if page_size == 0 {
        return Err(CoreError::Validation("page size must be at least 1".into()));
    }
    Ok(())
}
