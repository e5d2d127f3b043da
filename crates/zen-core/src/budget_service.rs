//! Provides budget progress aggregation over transaction snapshots.

use chrono::NaiveDate;
use serde::Serialize;
use zen_domain::{find_by_id, Budget, Transaction};

/// Spending status of a single budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub spent: f64,
    /// Floored at zero.
    pub remaining: f64,
    /// Capped at 100.
    pub percentage: f64,
    /// How far spending exceeds the budget amount, zero when within it.
    pub overspent: f64,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.overspent > 0.0
    }
}

/// Progress paired with the budget it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgressEntry {
    pub budget_id: String,
    pub name: String,
    pub amount: f64,
    pub progress: BudgetProgress,
}

/// Stateless budgeting utilities that operate over transaction slices.
pub struct BudgetService;

impl BudgetService {
    /// Computes spent, remaining and percentage for `budget`.
    ///
    /// Only expense transactions in one of the budget's categories and dated within
    /// `[start_date, end_date.unwrap_or(today)]` (inclusive) count.
    pub fn calculate_progress(
        budget: &Budget,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> BudgetProgress {
        let spent = Self::spent(budget, transactions, today);
        let remaining = (budget.amount - spent).max(0.0);
        let percentage = if budget.amount > 0.0 {
            (spent * 100.0 / budget.amount).min(100.0)
        } else {
            0.0
        };
        BudgetProgress {
            spent,
            remaining,
            percentage,
            overspent: (spent - budget.amount).max(0.0),
        }
    }

    /// Looks the budget up by id; an unknown id yields the zero progress.
    pub fn progress_for(
        budgets: &[Budget],
        budget_id: &str,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> BudgetProgress {
        find_by_id(budgets, budget_id)
            .map(|budget| Self::calculate_progress(budget, transactions, today))
            .unwrap_or_default()
    }

    /// Progress for every active budget, in stored order.
    pub fn active_progress(
        budgets: &[Budget],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<BudgetProgressEntry> {
        budgets
            .iter()
            .filter(|budget| budget.is_active)
            .map(|budget| BudgetProgressEntry {
                budget_id: budget.id.clone(),
                name: budget.name.clone(),
                amount: budget.amount,
                progress: Self::calculate_progress(budget, transactions, today),
            })
            .collect()
    }

    fn spent(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> f64 {
        let (start, end) = budget.window(today);
        transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| budget.covers_category(&txn.category_id))
            .filter(|txn| txn.date >= start && txn.date <= end)
            .map(|txn| txn.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zen_domain::{BudgetKind, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, on: NaiveDate, category: &str) -> Transaction {
        Transaction::new(amount, on, "", category, TransactionKind::Expense)
    }

    fn groceries(amount: f64) -> Budget {
        Budget::new("Budget alimentaire", amount, BudgetKind::Monthly, date(2025, 4, 1))
            .with_categories(["c1"])
    }

    #[test]
    fn filters_by_category_kind_and_window() {
        let today = date(2025, 4, 20);
        let budget = groceries(500.0);
        let txns = vec![
            expense(120.0, date(2025, 4, 10), "c1"),
            expense(30.0, date(2025, 4, 1), "c1"),
            expense(80.0, date(2025, 4, 20), "c1"),
            // outside the window
            expense(45.0, date(2025, 3, 31), "c1"),
            expense(60.0, date(2025, 4, 21), "c1"),
            // other category
            expense(99.0, date(2025, 4, 10), "c2"),
            Transaction::new(1000.0, date(2025, 4, 10), "", "c1", TransactionKind::Income),
        ];

        let progress = BudgetService::calculate_progress(&budget, &txns, today);
        assert_eq!(progress.spent, 230.0);
        assert_eq!(progress.remaining, 270.0);
        assert_eq!(progress.percentage, 46.0);
        assert!(!progress.is_over_budget());
    }

    #[test]
    fn end_date_bounds_the_window_instead_of_today() {
        let budget = groceries(300.0).with_end_date(date(2025, 4, 15));
        let txns = vec![
            expense(100.0, date(2025, 4, 15), "c1"),
            expense(100.0, date(2025, 4, 16), "c1"),
        ];
        let progress = BudgetService::calculate_progress(&budget, &txns, date(2025, 5, 1));
        assert_eq!(progress.spent, 100.0);
    }

    #[test]
    fn overspend_caps_percentage_and_floors_remaining() {
        let budget = groceries(100.0);
        let txns = vec![expense(130.0, date(2025, 4, 3), "c1")];
        let progress = BudgetService::calculate_progress(&budget, &txns, date(2025, 4, 30));
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.overspent, 30.0);
        assert!(progress.is_over_budget());
    }

    #[test]
    fn zero_amount_budget_reports_zero_percentage() {
        let budget = groceries(0.0);
        let txns = vec![expense(25.0, date(2025, 4, 3), "c1")];
        let progress = BudgetService::calculate_progress(&budget, &txns, date(2025, 4, 30));
        assert_eq!(progress.percentage, 0.0);
        assert!(progress.percentage.is_finite());
        assert_eq!(progress.remaining, 0.0);
    }

    #[test]
    fn progress_is_bounded_for_many_shapes() {
        let today = date(2025, 4, 30);
        for amount in [0.0, 1.0, 50.0, 500.0, 10_000.0] {
            let budget = groceries(amount);
            let mut txns = Vec::new();
            for step in 0..12 {
                txns.push(expense(step as f64 * 17.5, date(2025, 4, 1 + step), "c1"));
                let progress = BudgetService::calculate_progress(&budget, &txns, today);
                assert!((0.0..=100.0).contains(&progress.percentage));
                assert!(progress.remaining >= 0.0);
            }
        }
    }

    #[test]
    fn adding_matching_expense_increases_spent_by_its_amount() {
        let today = date(2025, 4, 30);
        let budget = groceries(500.0);
        let mut txns = vec![expense(120.0, date(2025, 4, 10), "c1")];
        let before = BudgetService::calculate_progress(&budget, &txns, today);
        txns.push(expense(42.5, date(2025, 4, 12), "c1"));
        let after = BudgetService::calculate_progress(&budget, &txns, today);
        assert_eq!(after.spent - before.spent, 42.5);
        assert!(after.percentage > before.percentage);
    }

    #[test]
    fn unknown_budget_and_inactive_budgets() {
        let today = date(2025, 4, 30);
        let mut paused = groceries(200.0);
        paused.is_active = false;
        let budgets = vec![groceries(500.0).with_id("b1"), paused];
        let txns = vec![expense(50.0, date(2025, 4, 2), "c1")];

        assert_eq!(
            BudgetService::progress_for(&budgets, "missing", &txns, today),
            BudgetProgress::default()
        );
        let active = BudgetService::active_progress(&budgets, &txns, today);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].budget_id, "b1");
        assert_eq!(active[0].progress.spent, 50.0);
    }
}
