//! zen-core
//!
//! Business logic and services for BudgetZen.
//! Depends on zen-domain. No terminal I/O; persistence goes through the
//! [`storage::KeyValueStore`] port.

pub mod budget_service;
pub mod error;
pub mod investment_service;
pub mod savings_goal_service;
pub mod seed;
pub mod storage;
pub mod store;
pub mod summary_service;
pub mod time;
pub mod transaction_service;
pub mod transfer;

pub use budget_service::*;
pub use error::CoreError;
pub use investment_service::*;
pub use savings_goal_service::*;
pub use seed::SeedPolicy;
pub use storage::{EntityKey, KeyValueStore, MemoryStore};
pub use store::{FinanceStore, LoadWarning};
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::*;
pub use transfer::DataBundle;

#[cfg(test)]
mod tests;
