//! Entity store: the five collections plus the port they persist through.
//!
//! Every mutation is staged on a copy of the touched collections, written
//! through the port, and only then committed to memory. A failed write leaves
//! the in-memory state untouched; when one mutation spans several keys, the
//! keys written before the failure are restored on the port.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use zen_domain::{
    find_by_id, new_id, Amounted, Budget, BudgetPatch, Category, CategoryPatch, Displayable,
    FinanceData, Identifiable, Investment, InvestmentPatch, NamedEntity, SavingsGoal,
    SavingsGoalPatch, Transaction, TransactionPatch, UNCATEGORIZED_LABEL,
};

use crate::{
    budget_service::{BudgetProgress, BudgetProgressEntry, BudgetService},
    investment_service::{InvestmentService, Performance, PortfolioSummary},
    savings_goal_service::GoalSync,
    seed::{self, SeedPolicy},
    storage::{read_collection, reference_warnings, write_collection, EntityKey, KeyValueStore},
    summary_service::{CategoryTotal, MonthlyStats, SummaryService},
    transaction_service::{ensure_finite, TransactionChange, TransactionService},
    transfer::DataBundle,
    CoreError,
};

/// A collection that could not be read at load time and was replaced by an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub key: EntityKey,
    pub message: String,
}

pub struct FinanceStore<S: KeyValueStore> {
    port: S,
    data: FinanceData,
    load_warnings: Vec<LoadWarning>,
}

impl<S: KeyValueStore> FinanceStore<S> {
    /// Reads every collection from `port`.
    ///
    /// Missing keys are seeded according to `policy`; unreadable ones load empty
    /// and are reported through [`FinanceStore::load_warnings`].
    pub fn load(port: S, policy: SeedPolicy) -> Result<Self, CoreError> {
        let mut store = Self {
            port,
            data: FinanceData::new(),
            load_warnings: Vec::new(),
        };
        store.data.transactions =
            store.load_collection(EntityKey::Transactions, policy, seed::default_transactions)?;
        store.data.categories =
            store.load_collection(EntityKey::Categories, policy, seed::default_categories)?;
        store.data.budgets =
            store.load_collection(EntityKey::Budgets, policy, seed::default_budgets)?;
        store.data.investments =
            store.load_collection(EntityKey::Investments, policy, seed::default_investments)?;
        store.data.savings_goals =
            store.load_collection(EntityKey::SavingsGoals, policy, seed::default_savings_goals)?;

        for warning in reference_warnings(&store.data) {
            debug!(%warning, "dangling reference");
        }
        Ok(store)
    }

    fn load_collection<T>(
        &mut self,
        key: EntityKey,
        policy: SeedPolicy,
        defaults: fn() -> Vec<T>,
    ) -> Result<Vec<T>, CoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        match read_collection::<T>(&self.port, key) {
            Ok(Some(items)) => Ok(items),
            Ok(None) => match policy {
                SeedPolicy::Demo => {
                    let items = defaults();
                    self.persist(key, &items)?;
                    Ok(items)
                }
                SeedPolicy::Empty => Ok(Vec::new()),
            },
            Err(err) => {
                warn!(key = %key, error = %err, "unreadable collection; starting empty");
                self.load_warnings.push(LoadWarning {
                    key,
                    message: err.to_string(),
                });
                Ok(Vec::new())
            }
        }
    }

    fn persist<T: Serialize>(&self, key: EntityKey, items: &[T]) -> Result<(), CoreError> {
        write_collection(&self.port, key, items)?;
        debug!(key = %key, count = items.len(), "collection persisted");
        Ok(())
    }

    /// Writes several keys as one unit. When a write fails, the keys already
    /// written are put back to their previous raw values before the error is
    /// returned.
    fn write_all(&self, writes: &[(EntityKey, String)]) -> Result<(), CoreError> {
        let mut previous = Vec::with_capacity(writes.len());
        for (key, _) in writes {
            previous.push(self.port.get(key.as_str())?);
        }
        for (index, (key, json)) in writes.iter().enumerate() {
            if let Err(err) = self.port.set(key.as_str(), json) {
                warn!(key = %key, error = %err, "write failed; restoring earlier keys");
                for ((written, _), prior) in writes[..index].iter().zip(&previous) {
                    self.restore(*written, prior.as_deref());
                }
                return Err(err);
            }
            debug!(key = %key, "collection persisted");
        }
        Ok(())
    }

    fn restore(&self, key: EntityKey, prior: Option<&str>) {
        let result = match prior {
            Some(raw) => self.port.set(key.as_str(), raw),
            None => self.port.remove(key.as_str()),
        };
        if let Err(err) = result {
            warn!(key = %key, error = %err, "could not restore collection");
        }
    }

    pub fn data(&self) -> &FinanceData {
        &self.data
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.data.budgets
    }

    pub fn investments(&self) -> &[Investment] {
        &self.data.investments
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.data.savings_goals
    }

    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }

    /// Dangling category and savings-goal references in the current snapshot.
    pub fn warnings(&self) -> Vec<String> {
        reference_warnings(&self.data)
    }

    pub fn port(&self) -> &S {
        &self.port
    }

    /// Category name, or the uncategorized label when the id is unknown.
    pub fn category_name(&self, id: &str) -> &str {
        self.data
            .category(id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    pub fn goal(&self, id: &str) -> Option<&SavingsGoal> {
        self.data.savings_goal(id)
    }

    // Transactions

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Transaction, CoreError> {
        let mut staged = self.stage_transactions();
        let change = TransactionService::add(&mut staged, transaction)?;
        self.commit_transactions(staged, &change)?;
        Ok(change.transaction)
    }

    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction, CoreError> {
        let mut staged = self.stage_transactions();
        let change = TransactionService::update(&mut staged, id, patch)?;
        self.commit_transactions(staged, &change)?;
        Ok(change.transaction)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, CoreError> {
        let mut staged = self.stage_transactions();
        let change = TransactionService::remove(&mut staged, id)?;
        self.commit_transactions(staged, &change)?;
        Ok(change.transaction)
    }

    fn stage_transactions(&self) -> FinanceData {
        FinanceData {
            transactions: self.data.transactions.clone(),
            savings_goals: self.data.savings_goals.clone(),
            ..FinanceData::default()
        }
    }

    fn commit_transactions(
        &mut self,
        staged: FinanceData,
        change: &TransactionChange,
    ) -> Result<(), CoreError> {
        let GoalSync { adjusted, missing } = &change.goals;
        for goal_id in missing {
            warn!(
                transaction_id = %change.transaction.id,
                goal_id = %goal_id,
                "transaction linked to a missing savings goal"
            );
        }
        let mut writes = vec![(
            EntityKey::Transactions,
            encode(&staged, EntityKey::Transactions)?,
        )];
        if !adjusted.is_empty() {
            writes.push((
                EntityKey::SavingsGoals,
                encode(&staged, EntityKey::SavingsGoals)?,
            ));
        }
        self.write_all(&writes)?;
        if !adjusted.is_empty() {
            self.data.savings_goals = staged.savings_goals;
        }
        self.data.transactions = staged.transactions;
        debug!(transaction = %change.transaction.display_label(), "transaction saved");
        Ok(())
    }

    // Categories

    pub fn add_category(&mut self, mut category: Category) -> Result<Category, CoreError> {
        ensure_named("category name", &category)?;
        category.id = unused_id(&self.data.categories, &category.id);
        let mut staged = self.data.categories.clone();
        staged.push(category.clone());
        self.persist(EntityKey::Categories, &staged)?;
        self.data.categories = staged;
        Ok(category)
    }

    pub fn update_category(
        &mut self,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<Category, CoreError> {
        if let Some(name) = &patch.name {
            ensure_not_blank("category name", name)?;
        }
        let (staged, category) =
            staged_update(&self.data.categories, EntityKey::Categories, id, |category| {
                category.apply(patch)
            })?;
        self.persist(EntityKey::Categories, &staged)?;
        self.data.categories = staged;
        Ok(category)
    }

    /// Transactions and budgets keep pointing at the removed id.
    pub fn delete_category(&mut self, id: &str) -> Result<Category, CoreError> {
        let (staged, removed) = staged_remove(&self.data.categories, EntityKey::Categories, id)?;
        self.persist(EntityKey::Categories, &staged)?;
        self.data.categories = staged;
        debug!(category = %removed.display_label(), "category deleted");
        Ok(removed)
    }

    // Budgets

    pub fn add_budget(&mut self, mut budget: Budget) -> Result<Budget, CoreError> {
        ensure_named("budget name", &budget)?;
        ensure_finite("budget amount", budget.amount())?;
        budget.id = unused_id(&self.data.budgets, &budget.id);
        let mut staged = self.data.budgets.clone();
        staged.push(budget.clone());
        self.persist(EntityKey::Budgets, &staged)?;
        self.data.budgets = staged;
        Ok(budget)
    }

    pub fn update_budget(&mut self, id: &str, patch: BudgetPatch) -> Result<Budget, CoreError> {
        if let Some(amount) = patch.amount {
            ensure_finite("budget amount", amount)?;
        }
        let (staged, budget) =
            staged_update(&self.data.budgets, EntityKey::Budgets, id, |budget| {
                budget.apply(patch)
            })?;
        self.persist(EntityKey::Budgets, &staged)?;
        self.data.budgets = staged;
        Ok(budget)
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<Budget, CoreError> {
        let (staged, removed) = staged_remove(&self.data.budgets, EntityKey::Budgets, id)?;
        self.persist(EntityKey::Budgets, &staged)?;
        self.data.budgets = staged;
        Ok(removed)
    }

    // Investments

    pub fn add_investment(&mut self, mut investment: Investment) -> Result<Investment, CoreError> {
        ensure_named("investment name", &investment)?;
        ensure_finite("investment amount", investment.amount())?;
        ensure_finite("investment current value", investment.current_value)?;
        investment.id = unused_id(&self.data.investments, &investment.id);
        let mut staged = self.data.investments.clone();
        staged.push(investment.clone());
        self.persist(EntityKey::Investments, &staged)?;
        self.data.investments = staged;
        Ok(investment)
    }

    pub fn update_investment(
        &mut self,
        id: &str,
        patch: InvestmentPatch,
    ) -> Result<Investment, CoreError> {
        if let Some(amount) = patch.amount {
            ensure_finite("investment amount", amount)?;
        }
        if let Some(value) = patch.current_value {
            ensure_finite("investment current value", value)?;
        }
        let (staged, investment) =
            staged_update(&self.data.investments, EntityKey::Investments, id, |investment| {
                investment.apply(patch)
            })?;
        self.persist(EntityKey::Investments, &staged)?;
        self.data.investments = staged;
        Ok(investment)
    }

    pub fn delete_investment(&mut self, id: &str) -> Result<Investment, CoreError> {
        let (staged, removed) =
            staged_remove(&self.data.investments, EntityKey::Investments, id)?;
        self.persist(EntityKey::Investments, &staged)?;
        self.data.investments = staged;
        Ok(removed)
    }

    // Savings goals

    pub fn add_savings_goal(&mut self, mut goal: SavingsGoal) -> Result<SavingsGoal, CoreError> {
        ensure_named("savings goal title", &goal)?;
        ensure_finite("savings goal target", goal.target_amount)?;
        ensure_finite("savings goal balance", goal.current_amount)?;
        goal.id = unused_id(&self.data.savings_goals, &goal.id);
        let mut staged = self.data.savings_goals.clone();
        staged.push(goal.clone());
        self.persist(EntityKey::SavingsGoals, &staged)?;
        self.data.savings_goals = staged;
        Ok(goal)
    }

    pub fn update_savings_goal(
        &mut self,
        id: &str,
        patch: SavingsGoalPatch,
    ) -> Result<SavingsGoal, CoreError> {
        if let Some(target) = patch.target_amount {
            ensure_finite("savings goal target", target)?;
        }
        if let Some(current) = patch.current_amount {
            ensure_finite("savings goal balance", current)?;
        }
        let (staged, goal) =
            staged_update(&self.data.savings_goals, EntityKey::SavingsGoals, id, |goal| {
                goal.apply(patch)
            })?;
        self.persist(EntityKey::SavingsGoals, &staged)?;
        self.data.savings_goals = staged;
        Ok(goal)
    }

    /// Linked transactions keep their now stale goal id.
    pub fn delete_savings_goal(&mut self, id: &str) -> Result<SavingsGoal, CoreError> {
        let (staged, removed) =
            staged_remove(&self.data.savings_goals, EntityKey::SavingsGoals, id)?;
        self.persist(EntityKey::SavingsGoals, &staged)?;
        self.data.savings_goals = staged;
        debug!(goal = %removed.display_label(), "savings goal deleted");
        Ok(removed)
    }

    // Calculators

    pub fn budget_progress(&self, budget_id: &str, today: NaiveDate) -> BudgetProgress {
        BudgetService::progress_for(&self.data.budgets, budget_id, &self.data.transactions, today)
    }

    pub fn active_budget_progress(&self, today: NaiveDate) -> Vec<BudgetProgressEntry> {
        BudgetService::active_progress(&self.data.budgets, &self.data.transactions, today)
    }

    pub fn monthly_stats(&self, as_of: NaiveDate) -> MonthlyStats {
        SummaryService::monthly_stats(&self.data.transactions, as_of)
    }

    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        SummaryService::recent(&self.data.transactions, limit)
    }

    pub fn expenses_by_category(&self, start: NaiveDate, end: NaiveDate) -> Vec<CategoryTotal> {
        SummaryService::expenses_by_category(
            &self.data.transactions,
            &self.data.categories,
            start,
            end,
        )
    }

    pub fn investment_performance(&self, investment_id: &str) -> Performance {
        InvestmentService::performance_for(&self.data.investments, investment_id)
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        InvestmentService::portfolio_summary(&self.data.investments)
    }

    // Import / export

    pub fn export_bundle(&self) -> DataBundle {
        info!(
            transactions = self.data.transactions.len(),
            savings_goals = self.data.savings_goals.len(),
            "exporting data"
        );
        DataBundle::from_data(&self.data)
    }

    /// Replaces every collection present in `bundle`. Returns the keys written.
    pub fn import_bundle(&mut self, bundle: DataBundle) -> Result<Vec<EntityKey>, CoreError> {
        let keys = bundle.present_keys();
        if keys.is_empty() {
            return Err(CoreError::Validation(
                "import contains no known collection".into(),
            ));
        }

        let mut staged = self.data.clone();
        bundle.apply_to(&mut staged);
        let mut encoded = Vec::with_capacity(keys.len());
        for key in &keys {
            encoded.push((*key, encode(&staged, *key)?));
        }
        self.write_all(&encoded)?;
        self.data = staged;
        info!(collections = ?keys, "data imported");
        Ok(keys)
    }

    /// Removes every key from the port and empties the collections.
    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        for key in EntityKey::ALL {
            self.port.remove(key.as_str())?;
        }
        self.data = FinanceData::new();
        self.load_warnings.clear();
        info!("all data cleared");
        Ok(())
    }
}

fn encode(data: &FinanceData, key: EntityKey) -> Result<String, CoreError> {
    let json = match key {
        EntityKey::Transactions => serde_json::to_string(&data.transactions)?,
        EntityKey::Categories => serde_json::to_string(&data.categories)?,
        EntityKey::Budgets => serde_json::to_string(&data.budgets)?,
        EntityKey::Investments => serde_json::to_string(&data.investments)?,
        EntityKey::SavingsGoals => serde_json::to_string(&data.savings_goals)?,
    };
    Ok(json)
}

fn ensure_named<T: NamedEntity>(field: &str, item: &T) -> Result<(), CoreError> {
    ensure_not_blank(field, item.name())
}

fn ensure_not_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

fn unused_id<T: Identifiable>(items: &[T], candidate: &str) -> String {
    if candidate.trim().is_empty() || find_by_id(items, candidate).is_some() {
        new_id()
    } else {
        candidate.to_string()
    }
}

fn staged_update<T, F>(
    items: &[T],
    key: EntityKey,
    id: &str,
    apply: F,
) -> Result<(Vec<T>, T), CoreError>
where
    T: Identifiable + Clone,
    F: FnOnce(&mut T),
{
    let mut staged = items.to_vec();
    let item = staged
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| CoreError::not_found(key, id))?;
    apply(item);
    let updated = item.clone();
    Ok((staged, updated))
}

fn staged_remove<T>(items: &[T], key: EntityKey, id: &str) -> Result<(Vec<T>, T), CoreError>
where
    T: Identifiable + Clone,
{
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| CoreError::not_found(key, id))?;
    let mut staged = items.to_vec();
    let removed = staged.remove(index);
    Ok((staged, removed))
}
