use std::path::Path;

use serde::{Deserialize, Serialize};

pub const POINTS_PER_CARD: u64 = 10;
pub const POINTS_PER_LEVEL: u64 = 100;

const TITLES: [(u32, &str); 10] = [
    (0, "Débutant"),
    (10, "Amateur"),
    (20, "Confirmé"),
    (30, "Expert"),
    (40, "Super fort"),
    (50, "Champion"),
    (60, "Maître"),
    (70, "Légende"),
    (80, "Mythique"),
    (90, "Divin"),
];

pub fn title_for_level(level: u32) -> &'static str {
    TITLES
        .iter()
        .take_while(|(min_level, _)| level >= *min_level)
        .last()
        .map(|(_, name)| *name)
        .unwrap_or(TITLES[0].1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub levels_gained: u32,
    pub new_level: u32,
    /// Set only when the award crossed into a new title.
    pub new_title: Option<String>,
}

/// Player-wide points and level, kept across games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progression {
    pub total_points: u64,
    pub current_level: u32,
    pub points_in_current_level: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_level: 1,
            points_in_current_level: 0,
        }
    }
}

impl Progression {
    pub fn load_from_path(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save_to_path(&self, path: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, raw)
    }

    pub fn title(&self) -> &'static str {
        title_for_level(self.current_level)
    }

    pub fn award_points(&mut self, card_count: usize) -> LevelUp {
        let points = (card_count as u64).saturating_mul(POINTS_PER_CARD);
        let old_title = self.title();

        self.total_points = self.total_points.saturating_add(points);
        let pool = self.points_in_current_level.saturating_add(points);
        self.points_in_current_level = pool % POINTS_PER_LEVEL;
        let gained = u32::try_from(pool / POINTS_PER_LEVEL).unwrap_or(u32::MAX);
        let old_level = self.current_level;
        self.current_level = self.current_level.saturating_add(gained);
        let levels_gained = self.current_level - old_level;

        let new_title = self.title();
        LevelUp {
            levels_gained,
            new_level: self.current_level,
            new_title: (new_title != old_title).then(|| new_title.to_string()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
