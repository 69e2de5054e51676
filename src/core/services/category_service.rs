//! Per-category expense breakdown for a single month.

use crate::currency::Formatter;
use crate::domain::{
    CalendarZone, Category, ParsedRecord, TransactionRecord, TransactionType, ViewedPeriod,
};

/// One category's share of a month's expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub formatted_total: String,
    pub percent: u32,
    pub formatted_percent: String,
}

impl CategorySummary {
    pub fn key(&self) -> &'static str {
        self.category.key()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBreakdown {
    pub period: ViewedPeriod,
    pub label: String,
    /// Every expense of the month, including ones whose category is not in the catalog.
    pub total: f64,
    pub formatted_total: String,
    /// Part of `total` that matched no catalog category.
    pub unassigned: f64,
    pub categories: Vec<CategorySummary>,
}

impl MonthlyBreakdown {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub struct CategoryService;

impl CategoryService {
    /// Well-formed expense records dated inside `period`.
    pub fn monthly_expenses(
        records: &[TransactionRecord],
        period: ViewedPeriod,
        zone: CalendarZone,
    ) -> Vec<ParsedRecord<'_>> {
        records
            .iter()
            .filter(|record| record.kind == TransactionType::Negative)
            .filter_map(|record| match record.parse_in(zone) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    tracing::debug!(record = err.record_id(), "ignoring for breakdown: {err}");
                    None
                }
            })
            .filter(|parsed| period.contains(parsed.timestamp))
            .collect()
    }

    /// Sums the month's expenses per catalog category and derives percentage shares.
    ///
    /// Categories without spending are omitted; output follows catalog order.
    pub fn monthly_breakdown(
        records: &[TransactionRecord],
        period: ViewedPeriod,
        catalog: &[Category],
        formatter: &Formatter,
    ) -> MonthlyBreakdown {
        let expenses = Self::monthly_expenses(records, period, formatter.zone);
        let total = expenses.iter().fold(0.0, |acc, expense| acc + expense.amount);

        let mut assigned = 0.0;
        let mut categories = Vec::new();
        if total > 0.0 {
            for category in catalog {
                let category_sum = expenses
                    .iter()
                    .filter(|expense| expense.record.category == category.key())
                    .fold(0.0, |acc, expense| acc + expense.amount);
                if category_sum <= 0.0 {
                    continue;
                }
                assigned += category_sum;
                let percent = Self::percent_of(category_sum, total);
                categories.push(CategorySummary {
                    category: *category,
                    name: category.display_name().to_string(),
                    color: category.color().to_string(),
                    total: category_sum,
                    formatted_total: formatter.format_amount(category_sum),
                    percent,
                    formatted_percent: formatter.format_percent(percent),
                });
            }
        }

        let unassigned = (total - assigned).max(0.0);
        if unassigned > 0.0 {
            tracing::debug!(%period, unassigned, "expenses without a catalog category");
        }

        MonthlyBreakdown {
            period,
            label: formatter.format_period(period),
            total,
            formatted_total: formatter.format_amount(total),
            unassigned,
            categories,
        }
    }

    /// Whole-number percentage of `part` in `total`; zero for an empty total.
    pub fn percent_of(part: f64, total: f64) -> u32 {
        if total <= 0.0 {
            return 0;
        }
        (part / total * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, amount: &str, category: &str, date: &str) -> TransactionRecord {
        TransactionRecord::new(id, "Item", amount, TransactionType::Negative, category, date)
    }

    fn january() -> ViewedPeriod {
        ViewedPeriod::new(2024, 1).unwrap()
    }

    fn breakdown(records: &[TransactionRecord]) -> MonthlyBreakdown {
        CategoryService::monthly_breakdown(
            records,
            january(),
            Category::catalog(),
            &Formatter::default(),
        )
    }

    #[test]
    fn groups_by_category_in_catalog_order() {
        let records = vec![
            expense("1", "25", "leisure", "2024-01-03"),
            expense("2", "75", "purchases", "2024-01-04"),
        ];
        let result = breakdown(&records);
        let keys: Vec<_> = result.categories.iter().map(CategorySummary::key).collect();
        assert_eq!(keys, ["purchases", "leisure"]);
        assert_eq!(result.categories[0].formatted_percent, "75%");
        assert_eq!(result.categories[1].formatted_percent, "25%");
        assert_eq!(result.label, "January 2024");
    }

    #[test]
    fn ignores_income_and_other_months() {
        let records = vec![
            expense("1", "40", "food", "2024-01-10"),
            expense("2", "60", "food", "2024-02-10"),
            expense("3", "60", "food", "2023-01-10"),
            TransactionRecord::new(
                "4",
                "Salary",
                "500",
                TransactionType::Positive,
                "salary",
                "2024-01-01",
            ),
        ];
        let result = breakdown(&records);
        assert_eq!(result.total, 40.0);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].category, Category::Food);
    }

    #[test]
    fn unknown_category_counts_toward_total_only() {
        let records = vec![
            expense("1", "50", "food", "2024-01-10"),
            expense("2", "50", "pets", "2024-01-11"),
        ];
        let result = breakdown(&records);
        assert_eq!(result.total, 100.0);
        assert_eq!(result.unassigned, 50.0);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].percent, 50);
    }

    #[test]
    fn zero_amount_month_yields_empty_breakdown() {
        let records = vec![expense("1", "0", "food", "2024-01-10")];
        let result = breakdown(&records);
        assert!(result.is_empty());
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn offset_timestamps_are_bucketed_by_the_formatter_zone() {
        let records = vec![expense("1", "40", "food", "2024-02-01T01:00:00.000Z")];
        let sao_paulo = CalendarZone::parse("-03:00").expect("offset");
        let in_zone = |zone| {
            CategoryService::monthly_breakdown(
                &records,
                january(),
                Category::catalog(),
                &Formatter::default().with_zone(zone),
            )
        };

        let local_january = in_zone(sao_paulo);
        assert_eq!(local_january.total, 40.0);
        assert_eq!(local_january.categories[0].formatted_total, "¥40");

        assert!(in_zone(CalendarZone::utc()).is_empty());
        assert_eq!(
            CategoryService::monthly_expenses(&records, january().next(), CalendarZone::utc()).len(),
            1
        );
    }

    #[test]
    fn empty_month_total_is_positive_zero() {
        let result = breakdown(&[]);
        assert_eq!(result.total, 0.0);
        assert!(result.total.is_sign_positive());
        assert_eq!(result.formatted_total, "¥0");
    }

    #[test]
    fn percent_of_guards_zero_total() {
        assert_eq!(CategoryService::percent_of(10.0, 0.0), 0);
        assert_eq!(CategoryService::percent_of(1.0, 3.0), 33);
        assert_eq!(CategoryService::percent_of(2.0, 3.0), 67);
    }
}
