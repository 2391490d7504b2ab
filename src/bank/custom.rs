use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{unique_items, WordCategory};

/// User-authored word categories, merged into the word list before a level
/// is generated once they hold enough unique words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategories {
    categories: Vec<WordCategory>,
}

impl CustomCategories {
    /// A missing or unreadable file is an empty store.
    pub fn load_from_path(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save_to_path(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)
    }

    pub fn categories(&self) -> &[WordCategory] {
        &self.categories
    }

    pub fn add_category(&mut self, label: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(7)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect();
        let id = format!("custom_{millis}_{suffix}");
        self.categories.push(WordCategory {
            id: id.clone(),
            label: label.trim().to_string(),
            words: Vec::new(),
        });
        id
    }

    pub fn remove_category(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        self.categories.len() != before
    }

    /// Adds a trimmed word. Empty words and case-insensitive duplicates are
    /// refused.
    pub fn add_word(&mut self, id: &str, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        let lowered = word.to_lowercase();
        if category
            .words
            .iter()
            .any(|existing| existing.to_lowercase() == lowered)
        {
            return false;
        }
        category.words.push(word.to_string());
        true
    }

    pub fn remove_word(&mut self, id: &str, index: usize) -> bool {
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        if index >= category.words.len() {
            return false;
        }
        category.words.remove(index);
        true
    }

    pub fn update_label(&mut self, id: &str, label: &str) -> bool {
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        category.label = label.trim().to_string();
        true
    }

    /// Categories playable under the bank contract.
    pub fn valid_categories(&self, min_items: usize) -> Vec<WordCategory> {
        self.categories
            .iter()
            .filter(|category| unique_items(&category.words).len() >= min_items)
            .cloned()
            .collect()
    }

    fn category_mut(&mut self, id: &str) -> Option<&mut WordCategory> {
        self.categories.iter_mut().find(|category| category.id == id)
    }
}
