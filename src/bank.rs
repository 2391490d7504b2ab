//! Category content consumed by the level generator.
//!
//! A bank is two lists: text categories and image (emoji) categories. Both
//! produce ordinary word cards; image cards carry the glyph in `Card::image`.

mod builtin;
mod custom;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use custom::CustomCategories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCategory {
    pub id: String,
    pub label: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCategory {
    pub id: String,
    pub label: String,
    pub images: Vec<String>,
}

/// A category as the generator sees it, with its item pool already
/// trimmed and de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    pub id: String,
    pub label: String,
    pub items: Vec<String>,
    pub is_image: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBank {
    #[serde(default)]
    pub words: Vec<WordCategory>,
    #[serde(default)]
    pub images: Vec<ImageCategory>,
}

impl ContentBank {
    pub fn builtin() -> Self {
        Self {
            words: builtin::word_categories(),
            images: builtin::image_categories(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Appends custom word categories. Id clashes are reported later by
    /// `validate`.
    pub fn with_custom(mut self, custom: &[WordCategory]) -> Self {
        self.words.extend(custom.iter().cloned());
        self
    }

    pub fn category_count(&self) -> usize {
        self.words.len() + self.images.len()
    }

    pub fn word_entries(&self) -> Vec<BankEntry> {
        self.words
            .iter()
            .map(|category| BankEntry {
                id: category.id.clone(),
                label: category.label.clone(),
                items: unique_items(&category.words),
                is_image: false,
            })
            .collect()
    }

    pub fn image_entries(&self) -> Vec<BankEntry> {
        self.images
            .iter()
            .map(|category| BankEntry {
                id: category.id.clone(),
                label: category.label.clone(),
                items: unique_items(&category.images),
                is_image: true,
            })
            .collect()
    }

    /// Checks the generator's startup contract: a non-empty word list, ids
    /// unique across both lists, at least `min_items` unique items per
    /// category and at least `min_categories` categories overall.
    pub fn validate(&self, min_items: usize, min_categories: usize) -> Result<(), ConfigError> {
        if self.words.is_empty() {
            return Err(ConfigError::EmptyBank);
        }

        let mut seen = HashSet::new();
        let mut undersized = Vec::new();
        for entry in self.word_entries().into_iter().chain(self.image_entries()) {
            if !seen.insert(entry.id.clone()) {
                return Err(ConfigError::DuplicateCategoryId(entry.id));
            }
            if entry.items.len() < min_items {
                undersized.push(format!("{} ({}): {}", entry.id, entry.label, entry.items.len()));
            }
        }

        if !undersized.is_empty() {
            return Err(ConfigError::UndersizedCategories {
                min: min_items,
                details: undersized.join(", "),
            });
        }

        let total = self.category_count();
        if total < min_categories {
            return Err(ConfigError::NotEnoughCategories {
                need: min_categories,
                got: total,
            });
        }
        Ok(())
    }
}

/// Trims every item, drops empties and keeps the first occurrence of each.
pub fn unique_items(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
