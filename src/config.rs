use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub target_stock_size: usize,
    pub column_options: Vec<usize>,
    pub start_run_options: Vec<usize>,
    pub min_items_per_category: usize,
    pub min_categories: usize,
    pub max_categories: usize,
    pub min_word_category_share: f64,
    pub max_five_word_categories: usize,
    pub four_word_share: f64,
    pub cards_per_category_estimate: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_stock_size: 10,
            column_options: vec![3, 4, 5],
            start_run_options: vec![3, 4, 5],
            min_items_per_category: 8,
            min_categories: 6,
            max_categories: 12,
            min_word_category_share: 0.67,
            max_five_word_categories: 2,
            four_word_share: 0.6,
            cards_per_category_estimate: 4,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_options.is_empty() || self.column_options.contains(&0) {
            return Err(ConfigError::InvalidSettings(
                "column_options must list positive column counts".to_string(),
            ));
        }
        if self.start_run_options.is_empty() {
            return Err(ConfigError::InvalidSettings(
                "start_run_options must not be empty".to_string(),
            ));
        }
        if self.min_categories == 0 || self.min_categories > self.max_categories {
            return Err(ConfigError::InvalidSettings(format!(
                "category range {}..={} is empty",
                self.min_categories, self.max_categories
            )));
        }
        if self.cards_per_category_estimate == 0 {
            return Err(ConfigError::InvalidSettings(
                "cards_per_category_estimate must be positive".to_string(),
            ));
        }
        for (name, share) in [
            ("min_word_category_share", self.min_word_category_share),
            ("four_word_share", self.four_word_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::InvalidSettings(format!(
                    "{name} must be within 0..=1"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub completion_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 200,
            completion_delay_ms: 380,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub session: SessionConfig,
    pub bank_path: Option<PathBuf>,
    pub custom_categories_path: Option<PathBuf>,
    pub save_path: PathBuf,
    pub progression_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            session: SessionConfig::default(),
            bank_path: None,
            custom_categories_path: None,
            save_path: PathBuf::from("solimots-save.json"),
            progression_path: PathBuf::from("solimots-progression.json"),
        }
    }
}

impl AppConfig {
    /// Reads a JSON config. A missing file yields the defaults; a present but
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.generator.validate()?;
        Ok(config)
    }
}
