//! In-memory snapshot of every entity collection.

use serde::{Deserialize, Serialize};

use crate::{
    budget::Budget, category::Category, common::*, investment::Investment,
    savings_goal::SavingsGoal, transaction::Transaction,
};

/// All collections owned by a single user, one vector per entity type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
}

impl FinanceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn savings_goal(&self, id: &str) -> Option<&SavingsGoal> {
        find_by_id(&self.savings_goals, id)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.categories.is_empty()
            && self.budgets.is_empty()
            && self.investments.is_empty()
            && self.savings_goals.is_empty()
    }
}
