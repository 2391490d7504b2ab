use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use super::*;
use crate::bank::{BankEntry, ContentBank};
use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::trace;

/// Column count, per-column face-down run lengths and stock target for one
/// deal. These are the first values drawn from a level's RNG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealLayout {
    pub columns: usize,
    pub pattern: Vec<usize>,
    pub target_stock: usize,
}

impl DealLayout {
    pub fn plan(rng: &mut Mulberry32, config: &GeneratorConfig) -> Self {
        let columns = rng.pick(&config.column_options).copied().unwrap_or(3);
        let start = rng.pick(&config.start_run_options).copied().unwrap_or(3);
        let pattern: Vec<usize> = (0..columns).map(|col| start + col).collect();
        let in_tableau: usize = pattern.iter().sum();
        Self {
            columns,
            pattern,
            target_stock: config.target_stock_size.max(in_tableau + 1),
        }
    }

    pub fn tableau_cards(&self) -> usize {
        self.pattern.iter().sum()
    }

    pub fn total_cards_needed(&self) -> usize {
        self.tableau_cards() + self.target_stock
    }
}

/// Wall-clock seed for fresh games; the only non-deterministic input.
pub fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(0)
}

pub fn generate_level(
    bank: &ContentBank,
    seed: Option<u32>,
    config: &GeneratorConfig,
) -> Result<Level, ConfigError> {
    Level::generate(bank, seed.unwrap_or_else(seed_from_clock), config)
}

impl Level {
    pub fn generate(
        bank: &ContentBank,
        seed: u32,
        config: &GeneratorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        bank.validate(config.min_items_per_category, config.min_categories)?;

        let mut rng = Mulberry32::new(seed);
        let layout = DealLayout::plan(&mut rng, config);
        let selected = select_categories(&mut rng, bank, &layout, config);
        let word_counts = distribute_word_counts(&mut rng, selected.len(), config);

        let mut cards: Vec<Card> = Vec::new();
        let mut required_words = BTreeMap::new();
        for (entry, wanted) in selected.iter().zip(word_counts) {
            let required = wanted.min(entry.items.len());
            required_words.insert(entry.id.clone(), required);

            cards.push(Card {
                id: CardId(cards.len() as u32),
                word: entry.label.clone(),
                kind: CardKind::Category {
                    category_id: entry.id.clone(),
                },
                face_up: false,
                image: None,
            });
            for item in rng.pick_n(&entry.items, required) {
                cards.push(Card {
                    id: CardId(cards.len() as u32),
                    image: entry.is_image.then(|| item.clone()),
                    word: item,
                    kind: CardKind::Word {
                        category_id: entry.id.clone(),
                    },
                    face_up: false,
                });
            }
        }

        let ids: Vec<CardId> = cards.iter().map(|card| card.id).collect();
        let order = rng.shuffle(&ids);

        // Short decks keep the stock target and thin out the tableau instead.
        let deal_count = layout
            .tableau_cards()
            .min(order.len().saturating_sub(layout.target_stock));
        let mut tableau: Vec<Vec<CardId>> = vec![Vec::new(); layout.columns];
        let mut dealt = 0;
        for (column, run) in tableau.iter_mut().zip(&layout.pattern) {
            while column.len() < *run && dealt < deal_count {
                column.push(order[dealt]);
                dealt += 1;
            }
        }
        let stock = order[dealt..].to_vec();

        for column in &tableau {
            if let Some(top) = column.last() {
                cards[top.index()].face_up = true;
            }
        }

        let level = Self {
            seed,
            categories: selected
                .iter()
                .map(|entry| CategoryDef {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                })
                .collect(),
            cards,
            required_words,
            tableau,
            stock,
            waste: Vec::new(),
            slots: vec![Slot::default(); layout.columns],
        };

        trace::event(
            "level:generated",
            format!(
                "seed={seed} columns={} categories={} cards={} tableau={} stock={}",
                layout.columns,
                level.categories.len(),
                level.cards.len(),
                level.tableau_card_count(),
                level.stock.len()
            ),
        );
        Ok(level)
    }
}

/// At least `min_word_category_share` of the picks come from the word list.
/// A random share of the remainder, from none to all of it, comes from the
/// image list; word categories fill whatever is left.
fn select_categories(
    rng: &mut Mulberry32,
    bank: &ContentBank,
    layout: &DealLayout,
    config: &GeneratorConfig,
) -> Vec<BankEntry> {
    let estimated = layout
        .total_cards_needed()
        .div_ceil(config.cards_per_category_estimate)
        .clamp(config.min_categories, config.max_categories);

    let word_pool = rng.shuffle(&bank.word_entries());
    let image_pool = rng.shuffle(&bank.image_entries());

    let min_words =
        ((estimated as f64 * config.min_word_category_share).ceil() as usize).min(estimated);
    let max_images = (estimated - min_words).min(image_pool.len());
    let image_count = rng.random_int_inclusive(0, max_images);
    let word_count = (estimated - image_count).min(word_pool.len());

    let mut picked: Vec<BankEntry> = word_pool.into_iter().take(word_count).collect();
    picked.extend(image_pool.into_iter().take(image_count));
    rng.shuffle(&picked)
}

/// Up to `max_five_word_categories` get five words; of the rest a
/// `four_word_share` (rounded up) get four and the remainder three. The
/// counts are shuffled so position says nothing about size.
fn distribute_word_counts(
    rng: &mut Mulberry32,
    category_count: usize,
    config: &GeneratorConfig,
) -> Vec<usize> {
    let max_five = config.max_five_word_categories.min(category_count);
    let five = rng.random_int_inclusive(0, max_five);
    let rest = category_count - five;
    let four = ((rest as f64 * config.four_word_share).ceil() as usize).min(rest);
    let three = rest - four;

    let mut counts = vec![5; five];
    counts.extend(std::iter::repeat(4).take(four));
    counts.extend(std::iter::repeat(3).take(three));
    rng.shuffle(&counts)
}
