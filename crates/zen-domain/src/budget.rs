//! Spending ceilings over a set of categories.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(rename = "type")]
    pub kind: BudgetKind,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "Budget::default_is_active")]
    pub is_active: bool,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: BudgetKind,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            amount,
            categories: Vec::new(),
            kind,
            start_date,
            end_date: None,
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn covers_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|id| id == category_id)
    }

    /// Inclusive date range; open-ended budgets run until `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date.unwrap_or(today))
    }

    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    pub fn default_is_active() -> bool {
        true
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Budget {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Budget cadence. `Project` budgets are expected to carry an end date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    #[default]
    Monthly,
    Yearly,
    Project,
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetKind::Monthly => "Monthly",
            BudgetKind::Yearly => "Yearly",
            BudgetKind::Project => "Project",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub kind: Option<BudgetKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
}
