use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::bank::ContentBank;
use crate::config::GeneratorConfig;
use crate::error::MoveError;

fn category(id: u32, category_id: &str, face_up: bool) -> Card {
    Card {
        id: CardId(id),
        word: category_id.to_uppercase(),
        kind: CardKind::Category {
            category_id: category_id.to_string(),
        },
        face_up,
        image: None,
    }
}

fn word(id: u32, category_id: &str, face_up: bool) -> Card {
    Card {
        id: CardId(id),
        word: format!("{category_id}-{id}"),
        kind: CardKind::Word {
            category_id: category_id.to_string(),
        },
        face_up,
        image: None,
    }
}

fn ids(raw: &[u32]) -> Vec<CardId> {
    raw.iter().copied().map(CardId).collect()
}

fn empty_level(columns: usize) -> Level {
    Level {
        seed: 0,
        categories: Vec::new(),
        cards: Vec::new(),
        required_words: Default::default(),
        tableau: vec![Vec::new(); columns],
        stock: Vec::new(),
        waste: Vec::new(),
        slots: vec![Slot::default(); columns],
    }
}

fn level_with(cards: Vec<Card>, required: &[(&str, usize)], tableau: &[&[u32]]) -> Level {
    let mut level = empty_level(tableau.len());
    level.categories = required
        .iter()
        .map(|(id, _)| CategoryDef {
            id: id.to_string(),
            label: id.to_uppercase(),
        })
        .collect();
    level.required_words = required
        .iter()
        .map(|(id, count)| (id.to_string(), *count))
        .collect();
    level.cards = cards;
    level.tableau = tableau.iter().map(|column| ids(column)).collect();
    level
}

fn generate(seed: u32) -> Level {
    Level::generate(&ContentBank::builtin(), seed, &GeneratorConfig::default()).expect("generate")
}

/// `fruit` needs two words, `arbre` one. Column 0 holds fruit cards, column
/// 1 the arbre category on top of a face-down arbre word.
fn two_category_level() -> Level {
    level_with(
        vec![
            category(0, "fruit", true),
            word(1, "fruit", true),
            word(2, "fruit", true),
            word(3, "fruit", true),
            category(4, "arbre", true),
            word(5, "arbre", false),
        ],
        &[("fruit", 2), ("arbre", 1)],
        &[&[0], &[5, 4], &[1, 2, 3]],
    )
}

#[test]
fn same_seed_generates_identical_levels() {
    for seed in [0, 1, 42, 2024, u32::MAX] {
        assert_eq!(generate(seed), generate(seed));
    }
    assert_ne!(generate(1), generate(2));
}

#[test]
fn generated_levels_hold_every_card_once_and_deal_face_state() {
    for seed in 0..200 {
        let level = generate(seed);
        assert!(level.is_consistent(), "seed {seed}");
        assert_eq!(level.slots.len(), level.column_count());
        assert!(level.waste.is_empty());
        assert!(level.stock.len() > level.tableau_card_count(), "seed {seed}");

        for column in &level.tableau {
            for (depth, id) in column.iter().enumerate() {
                let card = level.card(*id).expect("card");
                assert_eq!(card.face_up, depth + 1 == column.len(), "seed {seed}");
            }
        }
        for id in &level.stock {
            assert!(!level.card(*id).expect("card").face_up);
        }
    }
}

#[test]
fn generated_categories_match_their_cards() {
    let config = GeneratorConfig::default();
    for seed in 0..100 {
        let level = generate(seed);
        let count = level.categories.len();
        assert!((config.min_categories..=config.max_categories).contains(&count));

        let mut fives = 0;
        for def in &level.categories {
            let required = level.required_for(&def.id);
            assert!((3..=5).contains(&required), "seed {seed}");
            fives += usize::from(required == 5);

            let members: Vec<&Card> = level
                .cards
                .iter()
                .filter(|card| card.category_id() == def.id)
                .collect();
            assert_eq!(members.iter().filter(|card| card.is_category()).count(), 1);
            assert_eq!(members.iter().filter(|card| card.is_word()).count(), required);
            let words: BTreeSet<&str> = members
                .iter()
                .filter(|card| card.is_word())
                .map(|card| card.word.as_str())
                .collect();
            assert_eq!(words.len(), required, "words in a category are distinct");
        }
        assert!(fives <= config.max_five_word_categories);

        let image_categories = level
            .categories
            .iter()
            .filter(|def| {
                level
                    .cards
                    .iter()
                    .any(|card| card.category_id() == def.id && card.image.is_some())
            })
            .count();
        let min_words = (count as f64 * config.min_word_category_share).ceil() as usize;
        assert!(count - image_categories >= min_words, "seed {seed}");
    }
}

#[test]
fn small_layout_deals_a_full_three_four_five_tableau() {
    let config = GeneratorConfig::default();
    let seed = (0..10_000u32)
        .find(|seed| {
            let layout = DealLayout::plan(&mut Mulberry32::new(*seed), &config);
            layout.pattern == [3, 4, 5]
        })
        .expect("some seed plans a 3/4/5 layout");

    let level = generate(seed);
    let lengths: Vec<usize> = level.tableau.iter().map(Vec::len).collect();
    assert_eq!(lengths, [3, 4, 5]);
    assert_eq!(level.tableau_card_count(), 12);
    assert_eq!(level.stock.len() + level.waste.len(), level.cards.len() - 12);
    assert!(level.stock.len() >= 13);
    assert!(level.categories.len() >= 6);
}

#[test]
fn layout_stock_target_exceeds_tableau() {
    let config = GeneratorConfig::default();
    for seed in 0..50 {
        let layout = DealLayout::plan(&mut Mulberry32::new(seed), &config);
        assert!(config.column_options.contains(&layout.columns));
        assert_eq!(layout.pattern.len(), layout.columns);
        assert!(layout.target_stock > layout.tableau_cards());
        assert!(layout.target_stock >= config.target_stock_size);
        assert!(layout.pattern.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }
}

#[test]
fn generation_rejects_a_bad_bank() {
    let config = GeneratorConfig::default();
    assert!(Level::generate(&ContentBank::default(), 1, &config).is_err());

    let mut bank = ContentBank::builtin();
    bank.words.truncate(2);
    bank.images.truncate(2);
    assert!(Level::generate(&bank, 1, &config).is_err());
}

#[test]
fn tableau_rule_floats_categories_and_matches_words() {
    let level = two_category_level();
    // Empty column takes anything.
    assert!(level.can_place_on_tableau(CardId(1), None));
    // Category cards go anywhere.
    assert!(level.can_place_on_tableau(CardId(4), Some(CardId(3))));
    assert!(level.can_place_on_tableau(CardId(0), Some(CardId(4))));
    // Words need a top of their own category.
    assert!(level.can_place_on_tableau(CardId(1), Some(CardId(0))));
    assert!(level.can_place_on_tableau(CardId(1), Some(CardId(2))));
    assert!(!level.can_place_on_tableau(CardId(1), Some(CardId(4))));
    assert!(!level.can_place_on_tableau(CardId(5), Some(CardId(3))));
}

#[test]
fn draw_moves_stock_top_and_recycle_restores_order() {
    let mut level = level_with(
        vec![word(0, "fruit", false), word(1, "fruit", false), word(2, "fruit", false)],
        &[("fruit", 3)],
        &[&[]],
    );
    level.stock = ids(&[0, 1, 2]);

    assert_eq!(level.draw_or_recycle(), DrawResult::DrewFromStock);
    assert_eq!(level.waste, ids(&[2]));
    assert!(level.cards[2].face_up);
    level.draw_or_recycle();
    level.draw_or_recycle();
    assert_eq!(level.waste, ids(&[2, 1, 0]));
    assert!(level.stock.is_empty());

    assert_eq!(level.draw_or_recycle(), DrawResult::RecycledWaste);
    assert_eq!(level.stock, ids(&[0, 1, 2]));
    assert!(level.waste.is_empty());
    assert!(level.cards.iter().all(|card| !card.face_up));

    assert_eq!(level.draw_or_recycle(), DrawResult::DrewFromStock);
    assert_eq!(level.waste, ids(&[2]));

    let mut bare = empty_level(1);
    assert_eq!(bare.draw_or_recycle(), DrawResult::NoOp);
}

#[test]
fn moving_a_top_card_reveals_the_one_below() {
    let mut level = two_category_level();
    let outcome = level
        .move_card(
            MoveSource::Tableau { column: 1 },
            MoveTarget::Tableau { column: 2 },
        )
        .expect("category floats");
    assert_eq!(outcome.moved, ids(&[4]));
    assert_eq!(outcome.slot_event, None);
    assert_eq!(level.tableau[1], ids(&[5]));
    assert!(level.cards[5].face_up);
    assert!(level.is_consistent());
}

#[test]
fn slot_rejects_foreign_words_even_when_full() {
    let mut level = two_category_level();
    level
        .move_card(MoveSource::Tableau { column: 1 }, MoveTarget::Slot { slot_index: 0 })
        .expect("arbre opens slot 0");

    // fruit word on the arbre slot: rejected while the slot is not full.
    let before = level.clone();
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 0 }),
        Err(MoveError::Rejected(CardId(3)))
    );
    assert_eq!(level, before);

    // Category mismatch is reported before fullness.
    level.required_words.insert("arbre".to_string(), 0);
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 0 }),
        Err(MoveError::Rejected(CardId(3)))
    );
}

#[test]
fn slot_rejects_the_word_past_required() {
    let mut level = two_category_level();
    level
        .move_card(MoveSource::Tableau { column: 0 }, MoveTarget::Slot { slot_index: 1 })
        .expect("fruit opens slot 1");
    level
        .move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 1 })
        .expect("first word");

    // A run of two would overshoot the requirement of two.
    let before = level.clone();
    assert_eq!(
        level.move_run(
            MoveSource::Tableau { column: 2 },
            MoveTarget::Slot { slot_index: 1 },
            &ids(&[1, 2]),
        ),
        Err(MoveError::SlotFull(1))
    );
    assert_eq!(level, before);

    let outcome = level
        .move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 1 })
        .expect("second word completes");
    assert_eq!(outcome.completed_slot(), Some(1));
    assert!(level.slots[1].is_completing);

    // Completing slots take nothing, even a matching word.
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 1 }),
        Err(MoveError::SlotCompleting(1))
    );

    assert_eq!(level.finalize_slot(1), Some(3));
    assert!(level.slots[1].is_empty());
    assert_eq!(level.finalize_slot(1), None);
}

#[test]
fn empty_slot_needs_a_lone_category_card() {
    let mut level = two_category_level();
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 0 }),
        Err(MoveError::SlotNeedsCategory(CardId(3)))
    );

    let mut stacked = level_with(
        vec![category(0, "fruit", true), word(1, "fruit", true)],
        &[("fruit", 1)],
        &[&[0, 1], &[]],
    );
    let before = stacked.clone();
    assert_eq!(
        stacked.move_run(
            MoveSource::Tableau { column: 0 },
            MoveTarget::Slot { slot_index: 0 },
            &ids(&[0, 1]),
        ),
        Err(MoveError::SlotNeedsCategory(CardId(0)))
    );
    assert_eq!(stacked, before);
}

#[test]
fn zero_word_category_completes_on_placement() {
    let mut level = level_with(vec![category(0, "vide", true)], &[("vide", 0)], &[&[0]]);
    let outcome = level
        .move_card(MoveSource::Tableau { column: 0 }, MoveTarget::Slot { slot_index: 0 })
        .expect("category placed");
    assert_eq!(
        outcome.slot_event,
        Some(SlotEvent::Completed {
            slot_index: 0,
            category_id: "vide".to_string()
        })
    );
    assert!(level.slots[0].is_completing);
}

#[test]
fn bad_sources_are_refused_without_mutation() {
    let mut level = two_category_level();
    level.stock = Vec::new();
    let before = level.clone();

    assert_eq!(
        level.move_card(MoveSource::Waste, MoveTarget::Tableau { column: 0 }),
        Err(MoveError::EmptySource)
    );
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 9 }, MoveTarget::Tableau { column: 0 }),
        Err(MoveError::NoSuchColumn(9))
    );
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Slot { slot_index: 7 }),
        Err(MoveError::NoSuchSlot(7))
    );
    assert_eq!(
        level.move_card(MoveSource::Tableau { column: 2 }, MoveTarget::Tableau { column: 2 }),
        Err(MoveError::SameColumn)
    );
    assert_eq!(
        level.move_run(
            MoveSource::Tableau { column: 1 },
            MoveTarget::Tableau { column: 0 },
            &ids(&[5, 4]),
        ),
        Err(MoveError::FaceDown(CardId(5)))
    );
    assert_eq!(
        level.move_run(
            MoveSource::Tableau { column: 2 },
            MoveTarget::Tableau { column: 0 },
            &ids(&[1, 3]),
        ),
        Err(MoveError::RunMismatch)
    );
    assert_eq!(level, before);
}

#[test]
fn waste_moves_only_its_top_card() {
    let mut level = two_category_level();
    level.waste = level.tableau[2].split_off(1);
    let before = level.clone();

    assert_eq!(
        level.move_run(
            MoveSource::Waste,
            MoveTarget::Tableau { column: 0 },
            &ids(&[2, 3]),
        ),
        Err(MoveError::RunMismatch)
    );
    assert_eq!(level, before);

    level
        .move_card(MoveSource::Waste, MoveTarget::Tableau { column: 0 })
        .expect("fruit word on fruit category");
    assert_eq!(level.waste, ids(&[2]));
    assert_eq!(level.tableau[0], ids(&[0, 3]));
}

#[test]
fn rejected_moves_never_change_a_generated_level() {
    let mut rng = Mulberry32::new(77);
    for seed in 0..40 {
        let mut level = generate(seed);
        for _ in 0..60 {
            let columns = level.column_count();
            let from = if rng.index(4) == 0 {
                MoveSource::Waste
            } else {
                MoveSource::Tableau {
                    column: rng.index(columns),
                }
            };
            let to = if rng.index(2) == 0 {
                MoveTarget::Slot {
                    slot_index: rng.index(columns),
                }
            } else {
                MoveTarget::Tableau {
                    column: rng.index(columns),
                }
            };
            let before = level.clone();
            match level.move_card(from, to) {
                Ok(outcome) => {
                    if let Some(slot_index) = outcome.completed_slot() {
                        level.finalize_slot(slot_index);
                    }
                }
                Err(_) => assert_eq!(level, before),
            }
            if rng.index(3) == 0 {
                level.draw_or_recycle();
            }
            assert!(level.is_consistent(), "seed {seed}");
        }
    }
}

#[test]
fn win_needs_every_card_gone() {
    let cleared = level_with(
        vec![category(0, "fruit", false)],
        &[("fruit", 0)],
        &[&[], &[]],
    );
    assert!(cleared.is_won());
    assert_eq!(GameStatus::status_for(&cleared), GameStatus::Won);

    let places: [fn(&mut Level); 5] = [
        |level| level.tableau[1].push(CardId(0)),
        |level| level.stock.push(CardId(0)),
        |level| level.waste.push(CardId(0)),
        |level| level.slots[0].category_card_id = Some(CardId(0)),
        |level| level.slots[1].pile.push(CardId(0)),
    ];
    for place in places {
        let mut one_left = cleared.clone();
        place(&mut one_left);
        assert_eq!(one_left.remaining_cards(), 1);
        assert_eq!(GameStatus::status_for(&one_left), GameStatus::InProgress);
    }
}

#[test]
fn persisted_game_round_trips_and_rejects_junk() {
    let level = generate(42);
    let raw = encode_persisted_game(&level, GameStatus::InProgress).expect("encode");
    let game = decode_persisted_game(&raw).expect("decode");
    assert_eq!(game.level, level);
    assert_eq!(game.status, GameStatus::InProgress);

    assert!(decode_persisted_game("").is_none());
    assert!(decode_persisted_game("not json").is_none());
    assert!(decode_persisted_game(&raw.replacen("\"version\":1", "\"version\":9", 1)).is_none());

    let idle = encode_persisted_game(&level, GameStatus::Idle).expect("encode");
    assert!(decode_persisted_game(&idle).is_none());

    let mut short = level.clone();
    short.slots.pop();
    let raw = encode_persisted_game(&short, GameStatus::InProgress).expect("encode");
    assert!(decode_persisted_game(&raw).is_none());
}

#[test]
fn persisted_game_with_unlisted_category_data_is_rejected() {
    let level = generate(42);
    let raw = encode_persisted_game(&level, GameStatus::InProgress).expect("encode");
    let category_id = level.categories[0].id.clone();

    let mut game = decode_persisted_game(&raw).expect("decode");
    game.level.required_words.remove(&category_id);
    let tampered = serde_json::to_string(&game).expect("encode");
    assert!(decode_persisted_game(&tampered).is_none());

    let mut game = decode_persisted_game(&raw).expect("decode");
    game.level.categories.retain(|def| def.id != category_id);
    let tampered = serde_json::to_string(&game).expect("encode");
    assert!(decode_persisted_game(&tampered).is_none());
}

#[test]
fn image_share_varies_across_seeds_for_the_same_category_count() {
    let mut by_count: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for seed in 0..300 {
        let level = generate(seed);
        let images = level
            .categories
            .iter()
            .filter(|def| {
                level
                    .cards
                    .iter()
                    .any(|card| card.category_id() == def.id && card.image.is_some())
            })
            .count();
        by_count
            .entry(level.categories.len())
            .or_default()
            .insert(images);
    }
    assert!(by_count.values().any(|seen| seen.len() > 1), "{by_count:?}");
}

#[test]
fn card_kind_serializes_as_a_tagged_object() {
    let value = serde_json::to_value(category(3, "fruit", true)).expect("json");
    assert_eq!(value["kind"], "category");
    assert_eq!(value["categoryId"], "fruit");
    assert_eq!(value["faceUp"], true);
    assert!(value.get("image").is_none());

    let card: Card = serde_json::from_value(serde_json::json!({
        "id": 7,
        "word": "🍎",
        "kind": "word",
        "categoryId": "img_fruits",
        "faceUp": false,
        "image": "🍎"
    }))
    .expect("parse");
    assert!(card.is_word());
    assert_eq!(card.label(), "🍎");
}
