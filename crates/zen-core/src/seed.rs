//! Demonstration data written on first launch.

use chrono::NaiveDate;
use zen_domain::{
    Budget, BudgetKind, Category, CategoryKind, Investment, SavingsGoal, Transaction,
    TransactionKind,
};

/// What to load when a collection has never been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Write the demonstration categories, transactions and budgets.
    #[default]
    Demo,
    /// Start with empty collections.
    Empty,
}

impl SeedPolicy {
    pub fn from_flag(seed_demo_data: bool) -> Self {
        if seed_demo_data {
            SeedPolicy::Demo
        } else {
            SeedPolicy::Empty
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn default_categories() -> Vec<Category> {
    [
        ("cat-1", "Salaire", "#4CAF50", CategoryKind::Income, "dollar-sign"),
        ("cat-2", "Logement", "#2196F3", CategoryKind::Expense, "home"),
        ("cat-3", "Courses", "#FF9800", CategoryKind::Expense, "shopping-cart"),
        ("cat-4", "Transport", "#795548", CategoryKind::Expense, "bus"),
        ("cat-5", "Loisirs", "#9C27B0", CategoryKind::Expense, "music"),
        ("cat-6", "Revenus divers", "#4CAF50", CategoryKind::Income, "plus"),
    ]
    .into_iter()
    .map(|(id, name, color, kind, icon)| {
        Category::new(name, kind)
            .with_id(id)
            .with_style(icon, color)
    })
    .collect()
}

pub fn default_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(
            2500.0,
            date(2025, 4, 10),
            "Salaire",
            "cat-1",
            TransactionKind::Income,
        )
        .with_id("tx-1"),
        Transaction::new(
            800.0,
            date(2025, 4, 5),
            "Loyer",
            "cat-2",
            TransactionKind::Expense,
        )
        .with_id("tx-2"),
        Transaction::new(
            120.0,
            date(2025, 4, 15),
            "Courses hebdomadaires",
            "cat-3",
            TransactionKind::Expense,
        )
        .with_id("tx-3"),
    ]
}

pub fn default_budgets() -> Vec<Budget> {
    vec![
        Budget::new("Budget alimentaire", 500.0, BudgetKind::Monthly, date(2025, 4, 1))
            .with_id("budget-1")
            .with_categories(["cat-3"]),
        Budget::new("Budget loisirs", 200.0, BudgetKind::Monthly, date(2025, 4, 1))
            .with_id("budget-2")
            .with_categories(["cat-5"]),
    ]
}

pub fn default_investments() -> Vec<Investment> {
    Vec::new()
}

pub fn default_savings_goals() -> Vec<SavingsGoal> {
    Vec::new()
}
