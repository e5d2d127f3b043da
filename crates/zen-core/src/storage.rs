use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, Mutex},
};

use serde::{de::DeserializeOwned, Serialize};
use zen_domain::FinanceData;

use crate::CoreError;

/// Persistence keys, one JSON array per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Transactions,
    Categories,
    Budgets,
    Investments,
    SavingsGoals,
}

impl EntityKey {
    pub const ALL: [EntityKey; 5] = [
        EntityKey::Transactions,
        EntityKey::Categories,
        EntityKey::Budgets,
        EntityKey::Investments,
        EntityKey::SavingsGoals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKey::Transactions => "transactions",
            EntityKey::Categories => "categories",
            EntityKey::Budgets => "budgets",
            EntityKey::Investments => "investments",
            EntityKey::SavingsGoals => "savingsGoals",
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value persistence port. Values are JSON documents.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

/// Volatile in-process store, the test double for browser-style storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with raw values.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let map = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        map.remove(key);
        Ok(())
    }
}

/// Reads and decodes the collection stored under `key`. `Ok(None)` when the key is absent.
pub fn read_collection<T: DeserializeOwned>(
    port: &dyn KeyValueStore,
    key: EntityKey,
) -> Result<Option<Vec<T>>, CoreError> {
    match port.get(key.as_str())? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes and writes a whole collection under `key`.
pub fn write_collection<T: Serialize>(
    port: &dyn KeyValueStore,
    key: EntityKey,
    items: &[T],
) -> Result<(), CoreError> {
    let json = serde_json::to_string(items)?;
    port.set(key.as_str(), &json)
}

/// Detects dangling references within a snapshot. Never fatal.
pub fn reference_warnings(data: &FinanceData) -> Vec<String> {
    let category_ids: HashSet<_> = data.categories.iter().map(|c| c.id.as_str()).collect();
    let goal_ids: HashSet<_> = data.savings_goals.iter().map(|g| g.id.as_str()).collect();
    let mut warnings = Vec::new();

    for txn in &data.transactions {
        if !category_ids.contains(txn.category_id.as_str()) {
            warnings.push(format!(
                "transaction {} references missing category {}",
                txn.id, txn.category_id
            ));
        }
        if let Some(goal) = txn.savings_goal_id.as_deref() {
            if !goal_ids.contains(goal) {
                warnings.push(format!(
                    "transaction {} references missing savings goal {}",
                    txn.id, goal
                ));
            }
        }
    }
    for budget in &data.budgets {
        for category in &budget.categories {
            if !category_ids.contains(category.as_str()) {
                warnings.push(format!(
                    "budget {} references missing category {}",
                    budget.id, category
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use zen_domain::{Budget, BudgetKind, Category, CategoryKind, Transaction, TransactionKind};

    #[test]
    fn memory_store_roundtrips_values() {
        let store = MemoryStore::new();
        assert!(store.get("budgets").unwrap().is_none());
        store.set("budgets", "[]").unwrap();
        assert_eq!(store.get("budgets").unwrap().as_deref(), Some("[]"));
        store.remove("budgets").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn read_collection_reports_corrupt_json() {
        let store = MemoryStore::with_entries([("categories", "{not json")]);
        let result = read_collection::<Category>(&store, EntityKey::Categories);
        assert!(matches!(result, Err(CoreError::Serde(_))));
    }

    #[test]
    fn warnings_list_dangling_references() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let mut data = FinanceData::new();
        data.categories
            .push(Category::new("Courses", CategoryKind::Expense).with_id("cat-3"));
        data.transactions.push(
            Transaction::new(10.0, date, "Pain", "cat-3", TransactionKind::Expense)
                .with_savings_goal("g-gone"),
        );
        data.transactions
            .push(Transaction::new(5.0, date, "Bus", "cat-4", TransactionKind::Expense));
        data.budgets.push(
            Budget::new("Transport", 50.0, BudgetKind::Monthly, date).with_categories(["cat-4"]),
        );

        let warnings = reference_warnings(&data);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("g-gone")));
    }
}
