//! Month-over-month income/expense statistics and dashboard listings.

use std::{cmp::Reverse, collections::HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use zen_domain::{
    category_name, first_day_of_month, first_day_of_previous_month, last_day_of_month, Category,
    Transaction, TransactionKind,
};

/// Income and expense sums over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
}

impl PeriodTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Current-month figures shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonth {
    pub income: f64,
    pub expense: f64,
    /// Lifetime balance: all income minus all expense, unbounded by date.
    pub balance: f64,
    /// Income minus expense within the current-month window.
    pub net: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentChange {
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub current_month: CurrentMonth,
    pub previous_month: PeriodTotals,
    pub percent_change: PercentChange,
}

/// Expense total for one category, used by the breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: String,
    pub name: String,
    pub total: f64,
}

/// Stateless reporting helpers over transaction slices.
pub struct SummaryService;

impl SummaryService {
    /// Compares `[first day of as_of's month, as_of]` against the whole previous month.
    pub fn monthly_stats(transactions: &[Transaction], as_of: NaiveDate) -> MonthlyStats {
        let current = Self::totals_between(transactions, first_day_of_month(as_of), as_of);
        let previous_start = first_day_of_previous_month(as_of);
        let previous = Self::totals_between(
            transactions,
            previous_start,
            last_day_of_month(previous_start),
        );

        MonthlyStats {
            current_month: CurrentMonth {
                income: current.income,
                expense: current.expense,
                balance: Self::lifetime_balance(transactions),
                net: current.net(),
            },
            previous_month: previous,
            percent_change: PercentChange {
                income: percent_change(current.income, previous.income),
                expense: percent_change(current.expense, previous.expense),
            },
        }
    }

    /// Sums income and expense dated within `[start, end]` inclusive.
    pub fn totals_between(
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PeriodTotals {
        transactions
            .iter()
            .filter(|txn| txn.date >= start && txn.date <= end)
            .fold(PeriodTotals::default(), |mut totals, txn| {
                match txn.kind {
                    TransactionKind::Income => totals.income += txn.amount,
                    TransactionKind::Expense => totals.expense += txn.amount,
                }
                totals
            })
    }

    pub fn lifetime_balance(transactions: &[Transaction]) -> f64 {
        transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Newest transactions first; equal dates keep their stored order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|txn| Reverse(txn.date));
        sorted.truncate(limit);
        sorted
    }

    /// Expense totals per category within `[start, end]`, largest first.
    ///
    /// Dangling category ids are grouped under the uncategorized label.
    pub fn expenses_by_category(
        transactions: &[Transaction],
        categories: &[Category],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<CategoryTotal> {
        let mut by_category: HashMap<&str, f64> = HashMap::new();
        for txn in transactions {
            if !txn.is_expense() || txn.date < start || txn.date > end {
                continue;
            }
            *by_category.entry(txn.category_id.as_str()).or_insert(0.0) += txn.amount;
        }
        let mut rows: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(id, total)| CategoryTotal {
                category_id: id.to_string(),
                name: category_name(categories, id).to_string(),
                total,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.name.cmp(&b.name))
        });
        rows
    }
}

/// Percent change rounded to one decimal; zero when there is no previous value.
fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round_one_decimal((current - previous) / previous * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use zen_domain::CategoryKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(amount: f64, on: NaiveDate, kind: TransactionKind) -> Transaction {
        Transaction::new(amount, on, "", "cat-1", kind)
    }

    #[test]
    fn compares_current_window_with_previous_month() {
        let txns = vec![
            txn(2000.0, date(2025, 3, 28), TransactionKind::Income),
            txn(800.0, date(2025, 3, 5), TransactionKind::Expense),
            txn(2500.0, date(2025, 4, 10), TransactionKind::Income),
            txn(600.0, date(2025, 4, 5), TransactionKind::Expense),
            // after as_of, still part of the lifetime balance
            txn(100.0, date(2025, 4, 25), TransactionKind::Expense),
            txn(50.0, date(2024, 12, 1), TransactionKind::Income),
        ];

        let stats = SummaryService::monthly_stats(&txns, date(2025, 4, 15));
        assert_eq!(stats.current_month.income, 2500.0);
        assert_eq!(stats.current_month.expense, 600.0);
        assert_eq!(stats.current_month.net, 1900.0);
        assert_eq!(stats.current_month.balance, 3050.0);
        assert_eq!(stats.previous_month.income, 2000.0);
        assert_eq!(stats.previous_month.expense, 800.0);
        assert_eq!(stats.percent_change.income, 25.0);
        assert_eq!(stats.percent_change.expense, -25.0);
    }

    #[test]
    fn empty_previous_month_yields_zero_change() {
        let txns = vec![txn(300.0, date(2025, 4, 2), TransactionKind::Expense)];
        let stats = SummaryService::monthly_stats(&txns, date(2025, 4, 30));
        assert_eq!(stats.percent_change.expense, 0.0);
        assert_eq!(stats.percent_change.income, 0.0);
        assert!(stats.percent_change.expense.is_finite());
    }

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let stats = SummaryService::monthly_stats(&[], date(2025, 4, 30));
        let json = serde_json::to_value(stats).unwrap();
        assert!(json.get("currentMonth").is_some());
        assert!(json.get("previousMonth").is_some());
        assert!(json["percentChange"].get("expense").is_some());
        assert!(json.get("current_month").is_none());
    }

    #[test]
    fn january_compares_against_december() {
        let txns = vec![
            txn(300.0, date(2024, 12, 31), TransactionKind::Expense),
            txn(400.0, date(2025, 1, 3), TransactionKind::Expense),
        ];
        let stats = SummaryService::monthly_stats(&txns, date(2025, 1, 10));
        assert_eq!(stats.previous_month.expense, 300.0);
        assert_eq!(stats.percent_change.expense, 33.3);
    }

    #[test]
    fn recent_sorts_newest_first_and_limits() {
        let txns = vec![
            txn(1.0, date(2025, 4, 5), TransactionKind::Expense),
            txn(2.0, date(2025, 4, 15), TransactionKind::Expense),
            txn(3.0, date(2025, 4, 10), TransactionKind::Income),
        ];
        let recent = SummaryService::recent(&txns, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount, 2.0);
        assert_eq!(recent[1].amount, 3.0);
    }

    #[test]
    fn expenses_grouped_by_category_with_fallback_label() {
        let categories = vec![Category::new("Logement", CategoryKind::Expense).with_id("cat-2")];
        let mut rent = txn(800.0, date(2025, 4, 5), TransactionKind::Expense);
        rent.category_id = "cat-2".into();
        let mut orphan = txn(50.0, date(2025, 4, 6), TransactionKind::Expense);
        orphan.category_id = "cat-gone".into();
        let salary = txn(2500.0, date(2025, 4, 10), TransactionKind::Income);

        let rows = SummaryService::expenses_by_category(
            &[rent, orphan, salary],
            &categories,
            date(2025, 4, 1),
            date(2025, 4, 30),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Logement");
        assert_eq!(rows[0].total, 800.0);
        assert_eq!(rows[1].name, zen_domain::UNCATEGORIZED_LABEL);
    }
}
