//! Thin command-line front end over the finance store.

use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use zen_config::{Config, ConfigManager};
use zen_core::{
    BudgetProgressEntry, Clock, FinanceStore, MonthlyStats, PortfolioSummary, SeedPolicy,
    SystemClock,
};
use zen_storage_json::{export_path, load_bundle_from_path, save_bundle_to_path, JsonFileStore};

use crate::{
    errors::AppError,
    utils::paths::{app_data_dir, finance_data_dir},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the `summary` command reports, also emitted as JSON with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub currency: String,
    pub stats: MonthlyStats,
    pub budgets: Vec<BudgetProgressEntry>,
    pub recent: Vec<RecentRow>,
    pub goals: Vec<GoalRow>,
    pub portfolio: PortfolioSummary,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub signed_amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRow {
    pub title: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub percentage: f64,
}

/// Parses `args` (without the program name) and runs one command.
pub fn run<I, W>(args: I, out: &mut W) -> Result<(), AppError>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        print_usage(out)?;
        return Err(AppError::Usage("missing command".into()));
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "summary" => {
            let json = rest.iter().any(|arg| arg == "--json");
            let as_of = match rest.iter().find(|arg| !arg.starts_with("--")) {
                Some(raw) => parse_date(raw)?,
                None => SystemClock.today(),
            };
            let (config, store) = open_store()?;
            let report = dashboard(&store, &config, as_of);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                render_dashboard(out, &report)?;
            }
        }
        "export" => {
            let (_, store) = open_store()?;
            let path = match rest.first() {
                Some(raw) => PathBuf::from(raw),
                None => export_path(&env::current_dir()?, SystemClock.today()),
            };
            save_bundle_to_path(&store.export_bundle(), &path)?;
            info!(path = %path.display(), "export written");
            writeln!(out, "Exported data to {}", path.display())?;
        }
        "import" => {
            let raw = rest
                .first()
                .ok_or_else(|| AppError::Usage("import requires a file path".into()))?;
            let bundle = load_bundle_from_path(Path::new(raw))?;
            let (_, mut store) = open_store()?;
            let keys = store.import_bundle(bundle)?;
            let names: Vec<&str> = keys.iter().map(|key| key.as_str()).collect();
            writeln!(out, "Imported {}", names.join(", "))?;
        }
        "clear" => {
            let (_, mut store) = open_store()?;
            store.clear_all()?;
            writeln!(out, "All data cleared.")?;
        }
        "help" | "--help" | "-h" => print_usage(out)?,
        other => {
            print_usage(out)?;
            return Err(AppError::Usage(format!("unknown command `{other}`")));
        }
    }
    Ok(())
}

/// Loads the configuration and the store it points at.
pub fn open_store() -> Result<(Config, FinanceStore<JsonFileStore>), AppError> {
    let manager = ConfigManager::with_base_dir(app_data_dir())?;
    let config = manager.load()?;
    let port = JsonFileStore::new(finance_data_dir(&config))?;
    let store = FinanceStore::load(port, SeedPolicy::from_flag(config.seed_demo_data))?;
    Ok((config, store))
}

pub fn dashboard(
    store: &FinanceStore<JsonFileStore>,
    config: &Config,
    as_of: NaiveDate,
) -> DashboardReport {
    let recent = store
        .recent_transactions(config.recent_limit)
        .into_iter()
        .map(|txn| RecentRow {
            date: txn.date,
            description: txn.description.clone(),
            category: store.category_name(&txn.category_id).to_string(),
            signed_amount: txn.signed_amount(),
        })
        .collect();
    let goals = store
        .savings_goals()
        .iter()
        .map(|goal| GoalRow {
            title: goal.title.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            percentage: goal.progress_percentage(),
        })
        .collect();
    let mut warnings: Vec<String> = store
        .load_warnings()
        .iter()
        .map(|warning| format!("{} could not be read: {}", warning.key, warning.message))
        .collect();
    warnings.extend(store.warnings());

    DashboardReport {
        as_of,
        currency: config.currency.clone(),
        stats: store.monthly_stats(as_of),
        budgets: store.active_budget_progress(as_of),
        recent,
        goals,
        portfolio: store.portfolio_summary(),
        warnings,
    }
}

fn render_dashboard<W: Write>(out: &mut W, report: &DashboardReport) -> Result<(), AppError> {
    let cur = report.currency.as_str();
    let month = &report.stats.current_month;
    let change = &report.stats.percent_change;

    writeln!(out, "Summary as of {}", report.as_of.format(DATE_FORMAT))?;
    writeln!(
        out,
        "  Income:    {} ({:+.1}%)",
        format_amount(month.income, cur),
        change.income
    )?;
    writeln!(
        out,
        "  Expenses:  {} ({:+.1}%)",
        format_amount(month.expense, cur),
        change.expense
    )?;
    writeln!(out, "  Month net: {}", format_amount(month.net, cur))?;
    writeln!(out, "  Balance:   {}", format_amount(month.balance, cur))?;

    writeln!(out, "\nBudgets")?;
    if report.budgets.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for entry in &report.budgets {
        let flag = if entry.progress.is_over_budget() {
            " OVER"
        } else {
            ""
        };
        writeln!(
            out,
            "  {}: {} / {} ({:.1}%){}",
            entry.name,
            format_amount(entry.progress.spent, cur),
            format_amount(entry.amount, cur),
            entry.progress.percentage,
            flag
        )?;
    }

    writeln!(out, "\nRecent transactions")?;
    if report.recent.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for row in &report.recent {
        writeln!(
            out,
            "  {}  {:>14}  {} [{}]",
            row.date.format(DATE_FORMAT),
            format_amount(row.signed_amount, cur),
            row.description,
            row.category
        )?;
    }

    if !report.goals.is_empty() {
        writeln!(out, "\nSavings goals")?;
        for goal in &report.goals {
            writeln!(
                out,
                "  {}: {} / {} ({:.0}%)",
                goal.title,
                format_amount(goal.current_amount, cur),
                format_amount(goal.target_amount, cur),
                goal.percentage
            )?;
        }
    }

    if report.portfolio.invested != 0.0 || report.portfolio.current_value != 0.0 {
        writeln!(out, "\nInvestments")?;
        writeln!(
            out,
            "  {} invested, now {} ({:+.2}%)",
            format_amount(report.portfolio.invested, cur),
            format_amount(report.portfolio.current_value, cur),
            report.portfolio.profit_loss_percentage
        )?;
    }

    if !report.warnings.is_empty() {
        writeln!(out, "\nWarnings")?;
        for warning in &report.warnings {
            writeln!(out, "  {warning}")?;
        }
    }
    Ok(())
}

pub fn format_amount(value: f64, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::Usage(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
}

pub fn print_usage<W: Write>(out: &mut W) -> Result<(), AppError> {
    writeln!(out, "Usage:")?;
    writeln!(out, "  budgetzen_cli summary [YYYY-MM-DD] [--json]")?;
    writeln!(out, "  budgetzen_cli export [file]")?;
    writeln!(out, "  budgetzen_cli import <file>")?;
    writeln!(out, "  budgetzen_cli clear")?;
    writeln!(out)?;
    writeln!(
        out,
        "Data lives under $BUDGETZEN_HOME (default ~/.budgetzen) unless the config sets data_dir."
    )?;
    Ok(())
}
