use chrono::NaiveDate;

use crate::{
    budget_service::BudgetService, investment_service::InvestmentService,
    savings_goal_service::SavingsGoalService, seed, summary_service::SummaryService,
    transaction_service::TransactionService,
};
use zen_domain::{
    Budget, BudgetKind, FinanceData, Investment, InvestmentKind, SavingsGoal, Transaction,
    TransactionKind, TransactionPatch,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn demo_data() -> FinanceData {
    FinanceData {
        transactions: seed::default_transactions(),
        categories: seed::default_categories(),
        budgets: seed::default_budgets(),
        investments: seed::default_investments(),
        savings_goals: seed::default_savings_goals(),
    }
}

#[test]
fn demo_groceries_budget_reflects_weekly_shopping() {
    let data = demo_data();
    let progress =
        BudgetService::progress_for(&data.budgets, "budget-1", &data.transactions, date(2025, 4, 20));

    assert_eq!(progress.spent, 120.0);
    assert_eq!(progress.remaining, 380.0);
    assert_eq!(progress.percentage, 24.0);
    assert!(!progress.is_over_budget());

    let leisure =
        BudgetService::progress_for(&data.budgets, "budget-2", &data.transactions, date(2025, 4, 20));
    assert_eq!(leisure.spent, 0.0);
    assert_eq!(leisure.remaining, 200.0);
}

#[test]
fn progress_stays_within_bounds_for_any_spending() {
    let start = date(2025, 4, 1);
    for (amount, spent) in [(500.0, 0.0), (500.0, 499.0), (500.0, 500.0), (500.0, 9_000.0)] {
        let budget = Budget::new("b", amount, BudgetKind::Monthly, start).with_categories(["c"]);
        let txns = vec![Transaction::new(
            spent,
            date(2025, 4, 3),
            "",
            "c",
            TransactionKind::Expense,
        )];
        let progress = BudgetService::calculate_progress(&budget, &txns, date(2025, 4, 30));
        assert!((0.0..=100.0).contains(&progress.percentage));
        assert!(progress.remaining >= 0.0);
        assert_eq!(progress.remaining, (amount - progress.spent).max(0.0));
    }
}

#[test]
fn zero_amount_budget_reports_zero_percentage() {
    let budget = Budget::new("vide", 0.0, BudgetKind::Project, date(2025, 1, 1)).with_categories(["c"]);
    let txns = vec![Transaction::new(40.0, date(2025, 2, 1), "", "c", TransactionKind::Expense)];
    let progress = BudgetService::calculate_progress(&budget, &txns, date(2025, 3, 1));
    assert_eq!(progress.spent, 40.0);
    assert_eq!(progress.percentage, 0.0);
    assert_eq!(progress.remaining, 0.0);
}

#[test]
fn monthly_stats_over_demo_data() {
    let data = demo_data();
    let stats = SummaryService::monthly_stats(&data.transactions, date(2025, 4, 20));

    assert_eq!(stats.current_month.income, 2500.0);
    assert_eq!(stats.current_month.expense, 920.0);
    assert_eq!(stats.current_month.balance, 1580.0);
    assert_eq!(stats.previous_month.income, 0.0);
    assert_eq!(stats.percent_change.income, 0.0);
    assert_eq!(stats.percent_change.expense, 0.0);
}

#[test]
fn portfolio_mixes_gains_and_losses() {
    let bought = date(2024, 1, 15);
    let valued = date(2025, 4, 1);
    let holdings = vec![
        Investment::new("BTC", InvestmentKind::Crypto, 1000.0, bought).with_valuation(850.0, valued),
        Investment::new("Studio", InvestmentKind::Immobilier, 2000.0, bought)
            .with_valuation(2300.0, valued),
    ];
    let summary = InvestmentService::portfolio_summary(&holdings);
    assert_eq!(summary.profit_loss, 150.0);
    assert_eq!(summary.profit_loss_percentage, 5.0);
}

#[test]
fn goal_tracks_create_edit_delete_of_linked_transaction() {
    let mut data = demo_data();
    data.savings_goals
        .push(SavingsGoal::new("Vacances", 1000.0, date(2025, 8, 1)).with_id("g1"));

    let created = TransactionService::add(
        &mut data,
        Transaction::new(300.0, date(2025, 4, 18), "Épargne", "cat-5", TransactionKind::Expense)
            .with_savings_goal("g1"),
    )
    .expect("add linked transaction");
    assert_eq!(data.savings_goals[0].current_amount, 300.0);

    TransactionService::update(
        &mut data,
        &created.transaction.id,
        TransactionPatch {
            amount: Some(200.0),
            ..Default::default()
        },
    )
    .expect("edit amount");
    assert_eq!(data.savings_goals[0].current_amount, 200.0);

    TransactionService::remove(&mut data, &created.transaction.id).expect("delete");
    assert_eq!(data.savings_goals[0].current_amount, 0.0);
    assert_eq!(data.transactions.len(), 3);
}

#[test]
fn withdrawal_beyond_balance_floors_at_zero() {
    let mut goals = vec![SavingsGoal::new("Fonds", 500.0, date(2025, 12, 31))
        .with_id("g1")
        .with_current_amount(100.0)];
    let withdrawal = Transaction::new(250.0, date(2025, 4, 2), "", "cat-6", TransactionKind::Income)
        .with_savings_goal("g1");
    SavingsGoalService::apply_created(&mut goals, &withdrawal);
    assert_eq!(goals[0].current_amount, 0.0);
}
