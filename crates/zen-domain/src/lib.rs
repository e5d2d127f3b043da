//! zen-domain
//!
//! Pure domain models (Transaction, Category, Budget, Investment, SavingsGoal)
//! and the `FinanceData` snapshot that groups them.
//! No I/O, no storage. Only data types, patches and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod data;
pub mod investment;
pub mod savings_goal;
pub mod transaction;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use data::*;
pub use investment::*;
pub use savings_goal::*;
pub use transaction::*;
