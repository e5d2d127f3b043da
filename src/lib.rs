#![doc(test(attr(deny(warnings))))]

//! BudgetZen bundles the personal-finance core: entity store, budget
//! progress, monthly statistics, investment performance and savings goals,
//! persisted as JSON documents.

pub mod cli;
pub mod errors;
pub mod utils;

pub use zen_config as config;
pub use zen_core as core;
pub use zen_domain as domain;
pub use zen_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("BudgetZen tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
