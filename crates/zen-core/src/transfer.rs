//! Whole-dataset import and export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use zen_domain::{Budget, Category, FinanceData, Investment, SavingsGoal, Transaction};

use crate::{storage::EntityKey, CoreError};

const EXPORT_PREFIX: &str = "budgetzen-export";

/// Export file layout. Absent collections are left untouched on import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<Budget>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investments: Option<Vec<Investment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goals: Option<Vec<SavingsGoal>>,
}

impl DataBundle {
    /// Snapshot of every collection, savings goals included.
    pub fn from_data(data: &FinanceData) -> Self {
        Self {
            transactions: Some(data.transactions.clone()),
            categories: Some(data.categories.clone()),
            budgets: Some(data.budgets.clone()),
            investments: Some(data.investments.clone()),
            savings_goals: Some(data.savings_goals.clone()),
        }
    }

    /// Parses an import file, rejecting documents that carry none of the known collections.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let bundle: DataBundle = serde_json::from_str(raw)
            .map_err(|err| CoreError::Validation(format!("invalid import file: {err}")))?;
        if bundle.is_empty() {
            return Err(CoreError::Validation(
                "invalid import file: no known collection present".into(),
            ));
        }
        Ok(bundle)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.present_keys().is_empty()
    }

    pub fn present_keys(&self) -> Vec<EntityKey> {
        let mut keys = Vec::new();
        if self.transactions.is_some() {
            keys.push(EntityKey::Transactions);
        }
        if self.categories.is_some() {
            keys.push(EntityKey::Categories);
        }
        if self.budgets.is_some() {
            keys.push(EntityKey::Budgets);
        }
        if self.investments.is_some() {
            keys.push(EntityKey::Investments);
        }
        if self.savings_goals.is_some() {
            keys.push(EntityKey::SavingsGoals);
        }
        keys
    }

    /// Overwrites the present collections of `data`; no merging.
    pub fn apply_to(self, data: &mut FinanceData) {
        if let Some(transactions) = self.transactions {
            data.transactions = transactions;
        }
        if let Some(categories) = self.categories {
            data.categories = categories;
        }
        if let Some(budgets) = self.budgets {
            data.budgets = budgets;
        }
        if let Some(investments) = self.investments {
            data.investments = investments;
        }
        if let Some(savings_goals) = self.savings_goals {
            data.savings_goals = savings_goals;
        }
    }

    /// Suggested file name for an export made on `date`.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("{}-{}.json", EXPORT_PREFIX, date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_documents_without_collections() {
        let err = DataBundle::parse(r#"{"settings":{}}"#).expect_err("no known keys");
        assert!(matches!(err, CoreError::Validation(_)));

        let err = DataBundle::parse("not json").expect_err("malformed");
        assert!(matches!(err, CoreError::Validation(ref msg) if msg.contains("invalid import")));
    }

    #[test]
    fn parse_accepts_partial_bundle_without_savings_goals() {
        let raw = r##"{"categories":[{"id":"cat-9","name":"Santé","icon":"heart","type":"expense","color":"#FC8181"}]}"##;
        let bundle = DataBundle::parse(raw).expect("valid bundle");
        assert_eq!(bundle.present_keys(), vec![EntityKey::Categories]);
        assert!(bundle.savings_goals.is_none());
    }

    #[test]
    fn apply_overwrites_only_present_collections() {
        let mut data = FinanceData::new();
        data.categories = crate::seed::default_categories();
        data.transactions = crate::seed::default_transactions();

        let bundle = DataBundle {
            transactions: Some(Vec::new()),
            ..Default::default()
        };
        bundle.apply_to(&mut data);
        assert!(data.transactions.is_empty());
        assert_eq!(data.categories.len(), 6);
    }

    #[test]
    fn export_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 18).unwrap();
        assert_eq!(
            DataBundle::export_file_name(date),
            "budgetzen-export-2025-04-18.json"
        );
    }
}
