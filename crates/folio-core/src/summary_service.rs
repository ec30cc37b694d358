//! Turns aggregated totals into chart-ready series.

use std::collections::HashMap;

use serde::Serialize;

use folio_domain::{FinanceType, RecordField};

use crate::aggregation_service::{KeyShape, Totals};

/// Colour used for keys the palette does not know.
pub const FALLBACK_COLOR: &str = "#9CA3AF";

/// Key → colour lookup with a fallback for unmapped keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl Palette {
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
            fallback: FALLBACK_COLOR.to_string(),
        }
    }

    /// Finance type and todo status colours used by the back-office charts.
    pub fn dashboard() -> Self {
        Self::empty().extend([
            ("income", "#22C55E"),
            ("expense", "#EF4444"),
            ("saving", "#3B82F6"),
            ("investment", "#A855F7"),
            ("debt", "#F97316"),
            ("loan", "#EAB308"),
            ("other", "#6B7280"),
            ("pending", "#F59E0B"),
            ("in-progress", "#0EA5E9"),
            ("completed", "#10B981"),
        ])
    }

    pub fn with(mut self, key: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(key.into(), color.into());
        self
    }

    pub fn extend<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.colors
            .extend(entries.into_iter().map(|(key, color)| (key.into(), color.into())));
        self
    }

    pub fn color_for(&self, key: &str) -> &str {
        self.colors
            .get(key)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

/// Parallel label/value/colour series plus the finance balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub colors: Vec<String>,
    pub balance: f64,
}

impl ChartSummary {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Builds chart series in the totals' insertion order.
    ///
    /// Sparse totals drop zero-valued keys; declared totals keep every key.
    pub fn present(totals: &Totals, palette: &Palette) -> ChartSummary {
        let keep_zero = totals.shape() == KeyShape::Declared;
        let mut summary = ChartSummary {
            labels: Vec::with_capacity(totals.len()),
            series: Vec::with_capacity(totals.len()),
            colors: Vec::with_capacity(totals.len()),
            balance: Self::balance(totals),
        };
        for (key, total) in totals.iter() {
            if !keep_zero && total == 0.0 {
                continue;
            }
            summary.labels.push(key.to_string());
            summary.series.push(total);
            summary.colors.push(palette.color_for(key).to_string());
        }
        summary
    }

    /// `income + saving + investment - expense - debt - loan`.
    ///
    /// Only totals grouped by finance type carry a balance; any other grouping
    /// yields zero, even when a category happens to be named `income`.
    pub fn balance(totals: &Totals) -> f64 {
        if totals.field() != RecordField::Type {
            return 0.0;
        }
        FinanceType::ALL
            .into_iter()
            .map(|kind| kind.balance_sign() * totals.get(kind.as_str()).unwrap_or(0.0))
            .sum()
    }

    /// Fixed-decimal text rows (`label  value`) followed by the balance row.
    pub fn render_lines(summary: &ChartSummary, precision: usize) -> Vec<String> {
        let width = summary
            .labels
            .iter()
            .map(|label| label.chars().count())
            .chain(std::iter::once("balance".len()))
            .max()
            .unwrap_or(0);
        summary
            .labels
            .iter()
            .zip(&summary.series)
            .map(|(label, value)| format!("{label:<width$}  {value:>12.precision$}"))
            .chain(std::iter::once(format!(
                "{:<width$}  {:>12.precision$}",
                "balance", summary.balance
            )))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation_service::{AggregationService, KeySet, Reduction};
    use chrono::{TimeZone, Utc};
    use folio_domain::{FinanceRecord, JournalEntry};

    fn finance_totals(values: &[(FinanceType, f64)]) -> Totals {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records: Vec<_> = values
            .iter()
            .map(|(kind, amount)| FinanceRecord::new(*kind, *amount, "x", date))
            .collect();
        AggregationService::finance_by_type(&records, None)
    }

    #[test]
    fn balance_ignores_other() {
        let totals = finance_totals(&[
            (FinanceType::Income, 100.0),
            (FinanceType::Expense, 40.0),
            (FinanceType::Saving, 10.0),
            (FinanceType::Investment, 5.0),
            (FinanceType::Debt, 20.0),
            (FinanceType::Loan, 5.0),
            (FinanceType::Other, 1000.0),
        ]);
        assert_eq!(SummaryService::balance(&totals), 50.0);
    }

    #[test]
    fn declared_totals_keep_zero_slices() {
        let totals = finance_totals(&[(FinanceType::Income, 10.0)]);
        let summary = SummaryService::present(&totals, &Palette::dashboard());
        assert_eq!(summary.labels.len(), FinanceType::ALL.len());
        assert_eq!(summary.series[0], 10.0);
        assert_eq!(summary.series[1], 0.0);
        assert_eq!(summary.colors[0], "#22C55E");
        assert_eq!(summary.balance, 10.0);
    }

    #[test]
    fn sparse_totals_drop_zero_slices_and_use_fallback_colour() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = vec![
            FinanceRecord::new(FinanceType::Income, 5.0, "refund", date),
            FinanceRecord::new(FinanceType::Expense, -5.0, "refund", date),
            FinanceRecord::new(FinanceType::Expense, 12.0, "books", date),
        ];
        let totals = AggregationService::finance_by_category(&records, None);
        let summary = SummaryService::present(&totals, &Palette::empty().with("books", "#000"));
        assert_eq!(summary.labels, vec!["books"]);
        assert_eq!(summary.series, vec![12.0]);
        assert_eq!(summary.colors, vec!["#000"]);

        let moods = AggregationService::aggregate(
            &[JournalEntry::new("t", "curious", date)],
            None,
            RecordField::Mood,
            Reduction::Count,
            &KeySet::Sparse,
        );
        let summary = SummaryService::present(&moods, &Palette::dashboard());
        assert_eq!(summary.colors, vec![FALLBACK_COLOR]);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn categories_named_like_finance_types_do_not_move_the_balance() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = vec![
            FinanceRecord::new(FinanceType::Expense, 300.0, "loan", date),
            FinanceRecord::new(FinanceType::Expense, 50.0, "income", date),
        ];
        let by_type = AggregationService::finance_by_type(&records, None);
        let summary = SummaryService::present(&by_type, &Palette::dashboard());
        assert_eq!(summary.balance, -350.0);

        let by_category = AggregationService::finance_by_category(&records, None);
        assert_eq!(by_category.get("loan"), Some(300.0));
        let summary = SummaryService::present(&by_category, &Palette::dashboard());
        assert_eq!(summary.labels, vec!["loan", "income"]);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn render_lines_formats_fixed_decimals() {
        let summary = ChartSummary {
            labels: vec!["income".into(), "expense".into()],
            series: vec![1234.5, 0.126],
            colors: vec![FALLBACK_COLOR.into(); 2],
            balance: 1234.376,
        };
        let lines = SummaryService::render_lines(&summary, 2);
        insta::assert_snapshot!(lines.join("\n"), @r"
        income        1234.50
        expense          0.13
        balance       1234.38
        ");
    }
}
