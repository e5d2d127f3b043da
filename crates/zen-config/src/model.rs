use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "budgetzen";

/// Stores user preferences and the location of the finance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the entity files. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Seed the demonstration categories, transactions and budgets on first launch.
    #[serde(default = "Config::default_seed_demo_data")]
    pub seed_demo_data: bool,

    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "fr-FR".into(),
            currency: "EUR".into(),
            data_dir: None,
            seed_demo_data: Self::default_seed_demo_data(),
            recent_limit: Self::default_recent_limit(),
        }
    }
}

impl Config {
    pub fn default_seed_demo_data() -> bool {
        true
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR_NAME)
    }
}
