//! Savings targets fed by linked transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: NaiveDate,
}

impl SavingsGoal {
    pub fn new(title: impl Into<String>, target_amount: f64, deadline: NaiveDate) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Share of the target reached, in percent, capped at 100.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }

    pub fn apply(&mut self, patch: SavingsGoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(target_amount) = patch.target_amount {
            self.target_amount = target_amount;
        }
        if let Some(current_amount) = patch.current_amount {
            self.current_amount = current_amount;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!(
            "{} {:.0} / {:.0}",
            self.title, self.current_amount, self.target_amount
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalPatch {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
}
