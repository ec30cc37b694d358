//! Filters dated records into an interval and reduces them per discriminant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use folio_domain::{
    FinanceRecord, FinanceType, Interval, JournalEntry, Record, RecordField, TodoRecord,
    TodoStatus,
};

/// How contributing records are folded into a key's total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Adds each record's amount.
    Sum,
    /// Adds one per record.
    Count,
}

/// Which keys appear in an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySet {
    /// Every listed key is present, seeded with zero, in the listed order.
    Declared(Vec<String>),
    /// Only keys with at least one contributing record.
    Sparse,
}

impl KeySet {
    pub fn declared<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: ToString,
    {
        KeySet::Declared(keys.into_iter().map(|key| key.to_string()).collect())
    }

    fn shape(&self) -> KeyShape {
        match self {
            KeySet::Declared(_) => KeyShape::Declared,
            KeySet::Sparse => KeyShape::Sparse,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyShape {
    Declared,
    Sparse,
}

/// Ordered key → total mapping. Iteration follows insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    field: RecordField,
    shape: KeyShape,
    entries: Vec<(String, f64)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Totals {
    fn with_keys(field: RecordField, keys: &KeySet) -> Self {
        let mut totals = Self {
            field,
            shape: keys.shape(),
            entries: Vec::new(),
            index: HashMap::new(),
        };
        if let KeySet::Declared(declared) = keys {
            for key in declared {
                totals.slot(key);
            }
        }
        totals
    }

    fn slot(&mut self, key: &str) -> &mut f64 {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_string(), 0.0));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    /// Record field the totals are grouped by.
    pub fn field(&self) -> RecordField {
        self.field
    }

    pub fn shape(&self) -> KeyShape {
        self.shape
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|position| self.entries[*position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(key, total)| (key.as_str(), *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every total.
    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }
}

pub struct AggregationService;

impl AggregationService {
    /// Keeps records inside `interval`; an absent interval keeps everything.
    pub fn filter_in<'a, R: Record>(records: &'a [R], interval: Option<&Interval>) -> Vec<&'a R> {
        records
            .iter()
            .filter(|record| interval.map_or(true, |bounds| bounds.contains(record.date())))
            .collect()
    }

    /// Groups the records inside `interval` by `field` and reduces each group.
    ///
    /// Records that do not carry `field` are skipped. With [`KeySet::Declared`],
    /// keys seen in the data but missing from the declaration are appended after
    /// the declared keys in first-seen order.
    pub fn aggregate<R: Record>(
        records: &[R],
        interval: Option<&Interval>,
        field: RecordField,
        reduction: Reduction,
        keys: &KeySet,
    ) -> Totals {
        let mut totals = Totals::with_keys(field, keys);
        let mut contributing = 0usize;
        for record in Self::filter_in(records, interval) {
            let Some(key) = record.field(field) else {
                continue;
            };
            let weight = match reduction {
                Reduction::Sum => record.amount().unwrap_or(0.0),
                Reduction::Count => 1.0,
            };
            *totals.slot(&key) += weight;
            contributing += 1;
        }
        tracing::debug!(
            %field,
            records = records.len(),
            contributing,
            keys = totals.len(),
            "aggregated records"
        );
        totals
    }

    /// Finance totals for every [`FinanceType`], zero-filled.
    pub fn finance_by_type(records: &[FinanceRecord], interval: Option<&Interval>) -> Totals {
        Self::aggregate(
            records,
            interval,
            RecordField::Type,
            Reduction::Sum,
            &KeySet::declared(FinanceType::ALL),
        )
    }

    pub fn finance_by_category(records: &[FinanceRecord], interval: Option<&Interval>) -> Totals {
        Self::aggregate(
            records,
            interval,
            RecordField::Category,
            Reduction::Sum,
            &KeySet::Sparse,
        )
    }

    /// Todo counts for every [`TodoStatus`], zero-filled.
    pub fn todo_by_status(records: &[TodoRecord], interval: Option<&Interval>) -> Totals {
        Self::aggregate(
            records,
            interval,
            RecordField::Status,
            Reduction::Count,
            &KeySet::declared(TodoStatus::ALL),
        )
    }

    pub fn journal_by_mood(entries: &[JournalEntry], interval: Option<&Interval>) -> Totals {
        Self::aggregate(
            entries,
            interval,
            RecordField::Mood,
            Reduction::Count,
            &KeySet::Sparse,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeriodService;
    use chrono::{DateTime, TimeZone, Utc};
    use folio_domain::PeriodToken;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
    }

    fn finance(
        kind: FinanceType,
        amount: f64,
        category: &str,
        date: DateTime<Utc>,
    ) -> FinanceRecord {
        FinanceRecord::new(kind, amount, category, date)
    }

    #[test]
    fn declared_keys_are_present_for_empty_input() {
        let totals = AggregationService::finance_by_type(&[], None);
        assert_eq!(totals.len(), FinanceType::ALL.len());
        assert_eq!(totals.shape(), KeyShape::Declared);
        for kind in FinanceType::ALL {
            assert_eq!(totals.get(kind.as_str()), Some(0.0));
        }
        let order: Vec<_> = totals.keys().collect();
        assert_eq!(
            order,
            vec!["income", "expense", "saving", "investment", "debt", "loan", "other"]
        );
    }

    #[test]
    fn sparse_keys_only_appear_with_contributions() {
        let entries = vec![
            JournalEntry::new("a", "happy", at(1, 8)),
            JournalEntry::new("b", "tired", at(2, 8)),
            JournalEntry::new("c", "happy", at(3, 8)),
        ];
        let totals = AggregationService::journal_by_mood(&entries, None);
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["happy", "tired"]);
        assert_eq!(totals.get("happy"), Some(2.0));
        assert_eq!(totals.get("anxious"), None);
        assert!(AggregationService::journal_by_mood(&[], None).is_empty());
    }

    #[test]
    fn sums_amounts_per_type_inside_interval() {
        let now = at(15, 12);
        let today = PeriodService::resolve(PeriodToken::Today, &now);
        let records = vec![
            finance(FinanceType::Income, 100.0, "Salary", at(15, 9)),
            finance(FinanceType::Income, 50.5, "Bonus", at(15, 23)),
            finance(FinanceType::Expense, 20.0, "Food", at(15, 0)),
            finance(FinanceType::Expense, 999.0, "Rent", at(14, 23)),
            finance(FinanceType::Saving, 5.0, "Fund", at(16, 0)),
        ];
        let totals = AggregationService::finance_by_type(&records, Some(&today));
        assert_eq!(totals.get("income"), Some(150.5));
        assert_eq!(totals.get("expense"), Some(20.0));
        assert_eq!(totals.get("saving"), Some(0.0));
    }

    #[test]
    fn interval_start_is_included_and_end_excluded() {
        let interval = Interval::new(at(10, 0), at(11, 0)).unwrap();
        let records = vec![
            finance(FinanceType::Other, 1.0, "start", at(10, 0)),
            finance(FinanceType::Other, 1.0, "end", at(11, 0)),
        ];
        let kept = AggregationService::filter_in(&records, Some(&interval));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].category, "start");
    }

    #[test]
    fn week_scenario_keeps_previous_sunday_and_drops_following_sunday() {
        // Wednesday 2024-05-15; Sundays are the 12th and 19th.
        let now = at(15, 10);
        let week = PeriodService::resolve(PeriodToken::Week, &now);
        let records = vec![
            finance(FinanceType::Expense, 10.0, "prev-sunday", at(12, 0)),
            finance(FinanceType::Expense, 70.0, "next-sunday", at(19, 0)),
        ];
        let totals = AggregationService::finance_by_type(&records, Some(&week));
        assert_eq!(totals.get("expense"), Some(10.0));
    }

    #[test]
    fn todo_counts_by_status() {
        let todos = vec![
            TodoRecord::new("a", TodoStatus::Pending, at(1, 0)),
            TodoRecord::new("b", TodoStatus::Pending, at(2, 0)),
            TodoRecord::new("c", TodoStatus::Completed, at(3, 0)),
        ];
        let totals = AggregationService::todo_by_status(&todos, None);
        assert_eq!(
            totals.iter().collect::<Vec<_>>(),
            vec![("pending", 2.0), ("in-progress", 0.0), ("completed", 1.0)]
        );
    }

    #[test]
    fn undeclared_keys_are_appended_after_declared_ones() {
        let records = vec![
            finance(FinanceType::Income, 3.0, "travel", at(1, 0)),
            finance(FinanceType::Income, 4.0, "rent", at(1, 0)),
        ];
        let totals = AggregationService::aggregate(
            &records,
            None,
            RecordField::Category,
            Reduction::Sum,
            &KeySet::declared(["rent", "food"]),
        );
        assert_eq!(
            totals.iter().collect::<Vec<_>>(),
            vec![("rent", 4.0), ("food", 0.0), ("travel", 3.0)]
        );
    }

    #[test]
    fn records_without_the_field_are_skipped() {
        let todos = vec![TodoRecord::new("a", TodoStatus::Pending, at(1, 0))];
        let totals = AggregationService::aggregate(
            &todos,
            None,
            RecordField::Mood,
            Reduction::Count,
            &KeySet::Sparse,
        );
        assert!(totals.is_empty());
    }

    #[test]
    fn aggregation_is_repeatable() {
        let records = vec![
            finance(FinanceType::Debt, 0.1, "card", at(1, 0)),
            finance(FinanceType::Debt, 0.2, "card", at(2, 0)),
            finance(FinanceType::Loan, 7.0, "car", at(3, 0)),
        ];
        let first = AggregationService::finance_by_category(&records, None);
        let second = AggregationService::finance_by_category(&records, None);
        assert_eq!(first, second);
        assert_eq!(first.get("card"), Some(0.1 + 0.2));
        assert!((first.grand_total() - 7.3).abs() < 1e-9);
    }
}
