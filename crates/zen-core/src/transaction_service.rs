//! Transaction mutations that keep linked savings goals in step.

use zen_domain::{new_id, FinanceData, Transaction, TransactionPatch};

use crate::{
    savings_goal_service::{GoalSync, SavingsGoalService},
    storage::EntityKey,
    CoreError,
};

/// Result of a transaction mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionChange {
    pub transaction: Transaction,
    pub goals: GoalSync,
}

pub struct TransactionService;

impl TransactionService {
    /// Appends a transaction and applies its savings-goal effect.
    ///
    /// An empty or already used id is replaced with a fresh one.
    pub fn add(
        data: &mut FinanceData,
        mut transaction: Transaction,
    ) -> Result<TransactionChange, CoreError> {
        ensure_finite("amount", transaction.amount)?;
        transaction.amount = transaction.amount.abs();
        if transaction.id.trim().is_empty() || data.transaction(&transaction.id).is_some() {
            transaction.id = new_id();
        }
        let goals = SavingsGoalService::apply_created(&mut data.savings_goals, &transaction);
        data.transactions.push(transaction.clone());
        Ok(TransactionChange { transaction, goals })
    }

    /// Shallow-merges `patch`, reversing the old goal effect before applying the new one.
    pub fn update(
        data: &mut FinanceData,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<TransactionChange, CoreError> {
        if let Some(amount) = patch.amount {
            ensure_finite("amount", amount)?;
        }
        let stored = data
            .transaction_mut(id)
            .ok_or_else(|| CoreError::not_found(EntityKey::Transactions, id))?;
        let previous = stored.clone();
        stored.apply(patch);
        let updated = stored.clone();
        let goals =
            SavingsGoalService::apply_updated(&mut data.savings_goals, &previous, &updated);
        Ok(TransactionChange {
            transaction: updated,
            goals,
        })
    }

    /// Removes a transaction and reverses its goal effect.
    pub fn remove(data: &mut FinanceData, id: &str) -> Result<TransactionChange, CoreError> {
        let index = data
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKey::Transactions, id))?;
        let removed = data.transactions.remove(index);
        let goals = SavingsGoalService::apply_deleted(&mut data.savings_goals, &removed);
        Ok(TransactionChange {
            transaction: removed,
            goals,
        })
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} must be a finite number")))
    }
}
