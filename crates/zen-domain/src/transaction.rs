//! Income and expense records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single income or expense entry.
///
/// `amount` is always stored non-negative; the sign is carried by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal_id: Option<String>,
}

impl Transaction {
    pub fn new(
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
        category_id: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: new_id(),
            amount: amount.abs(),
            date,
            description: description.into(),
            category_id: category_id.into(),
            kind,
            savings_goal_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_savings_goal(mut self, goal_id: impl Into<String>) -> Self {
        self.savings_goal_id = Some(goal_id.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Shallow-merges the populated fields of `patch` into this transaction.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount.abs();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(goal) = patch.savings_goal_id {
            self.savings_goal_id = goal;
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} {:.2}", self.date, self.description, self.signed_amount())
    }
}

/// Direction of money for a [`Transaction`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// Partial update for a [`Transaction`]. `None` leaves the field untouched.
///
/// `savings_goal_id` is doubly optional: `Some(None)` unlinks the goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub savings_goal_id: Option<Option<String>>,
}
