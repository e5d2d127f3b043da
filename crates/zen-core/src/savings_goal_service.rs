//! Keeps savings-goal balances consistent with the transactions linked to them.
//!
//! Linked expenses are deposits (`+amount`); linked income is a withdrawal
//! (`-amount`). Balances are clamped to `[0, target_amount]`, so a withdrawal
//! larger than the recorded balance, or a deposit past the target, loses the
//! excess and the balance no longer equals the sum of linked contributions.

use tracing::{debug, warn};
use zen_domain::{SavingsGoal, Transaction, TransactionKind};

/// Signed adjustment a transaction applies to its linked goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalEffect {
    pub goal_id: String,
    pub delta: f64,
}

impl GoalEffect {
    pub fn reversed(&self) -> Self {
        Self {
            goal_id: self.goal_id.clone(),
            delta: -self.delta,
        }
    }
}

/// Goals touched by a synchronization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalSync {
    pub adjusted: Vec<String>,
    /// Linked ids with no matching goal; ignored.
    pub missing: Vec<String>,
}

impl GoalSync {
    pub fn changed(&self) -> bool {
        !self.adjusted.is_empty()
    }

    fn record(&mut self, goal_id: &str, found: bool) {
        let bucket = if found {
            &mut self.adjusted
        } else {
            &mut self.missing
        };
        if !bucket.iter().any(|id| id == goal_id) {
            bucket.push(goal_id.to_string());
        }
    }
}

pub struct SavingsGoalService;

impl SavingsGoalService {
    pub fn effect(transaction: &Transaction) -> Option<GoalEffect> {
        let goal_id = transaction.savings_goal_id.as_ref()?;
        let delta = match transaction.kind {
            TransactionKind::Expense => transaction.amount,
            TransactionKind::Income => -transaction.amount,
        };
        Some(GoalEffect {
            goal_id: goal_id.clone(),
            delta,
        })
    }

    /// Moves a goal balance by `delta`, clamped to `[0, target_amount]`.
    ///
    /// Returns `false` without touching anything when the goal does not exist.
    pub fn adjust(goals: &mut [SavingsGoal], goal_id: &str, delta: f64) -> bool {
        let Some(goal) = goals.iter_mut().find(|goal| goal.id == goal_id) else {
            warn!(goal_id, "linked savings goal not found; adjustment skipped");
            return false;
        };
        let upper = goal.target_amount.max(0.0);
        let before = goal.current_amount;
        goal.current_amount = (before + delta).clamp(0.0, upper);
        debug!(
            goal_id,
            delta,
            before,
            after = goal.current_amount,
            "savings goal adjusted"
        );
        true
    }

    pub fn apply_created(goals: &mut [SavingsGoal], created: &Transaction) -> GoalSync {
        let mut sync = GoalSync::default();
        if let Some(effect) = Self::effect(created) {
            Self::apply_effect(goals, &effect, &mut sync);
        }
        sync
    }

    /// Reverses the previous effect, then applies the new one.
    pub fn apply_updated(
        goals: &mut [SavingsGoal],
        previous: &Transaction,
        updated: &Transaction,
    ) -> GoalSync {
        let mut sync = GoalSync::default();
        if let Some(effect) = Self::effect(previous) {
            Self::apply_effect(goals, &effect.reversed(), &mut sync);
        }
        if let Some(effect) = Self::effect(updated) {
            Self::apply_effect(goals, &effect, &mut sync);
        }
        sync
    }

    pub fn apply_deleted(goals: &mut [SavingsGoal], deleted: &Transaction) -> GoalSync {
        let mut sync = GoalSync::default();
        if let Some(effect) = Self::effect(deleted) {
            Self::apply_effect(goals, &effect.reversed(), &mut sync);
        }
        sync
    }

    fn apply_effect(goals: &mut [SavingsGoal], effect: &GoalEffect, sync: &mut GoalSync) {
        let found = Self::adjust(goals, &effect.goal_id, effect.delta);
        sync.record(&effect.goal_id, found);
    }
}
