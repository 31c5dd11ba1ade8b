//! Shoe construction, shuffling, and persistence tests.

use std::collections::HashMap;

use pitboss::card::{Card, Rank, Suit};
use pitboss::config::{CUT_CARD_PENETRATION, NUM_DECKS};
use pitboss::error::ShoeError;
use pitboss::shoe::{ShoeManager, create_shoe, cut_card_position};

fn rank_counts(cards: &[Card]) -> HashMap<Card, usize> {
    let mut counts = HashMap::new();
    for &card in cards {
        *counts.entry(card).or_insert(0) += 1;
    }
    counts
}

#[test]
fn six_deck_shoe_composition() {
    let shoe = create_shoe(NUM_DECKS);
    assert_eq!(shoe.len(), 312);

    let aces = shoe.iter().filter(|c| c.rank == Rank::Ace).count();
    assert_eq!(aces, 24);

    let hearts = shoe.iter().filter(|c| c.suit == Suit::Hearts).count();
    assert_eq!(hearts, 78);

    // Each distinct card appears once per deck.
    let counts = rank_counts(&shoe);
    assert_eq!(counts.len(), 52);
    assert!(counts.values().all(|&n| n == NUM_DECKS));
}

#[test]
fn shuffle_preserves_the_multiset() {
    let reference = rank_counts(&create_shoe(NUM_DECKS));
    let manager = ShoeManager::with_seed(NUM_DECKS, 7);
    assert_eq!(rank_counts(&manager.shoe()), reference);
}

#[test]
fn same_seed_deals_the_same_sequence() {
    let mut a = ShoeManager::with_seed(NUM_DECKS, 42);
    let mut b = ShoeManager::with_seed(NUM_DECKS, 42);
    for _ in 0..20 {
        assert_eq!(a.deal().unwrap(), b.deal().unwrap());
    }
}

#[test]
fn cut_card_sits_at_three_quarters() {
    assert_eq!(cut_card_position(312, CUT_CARD_PENETRATION), 234);

    let manager = ShoeManager::with_seed(NUM_DECKS, 1);
    assert_eq!(manager.cut_card_position(), 234);
}

#[test]
fn reshuffle_flag_flips_exactly_at_the_cut() {
    let mut manager = ShoeManager::with_seed(NUM_DECKS, 1);
    for _ in 0..233 {
        manager.deal().unwrap();
    }
    assert!(!manager.needs_reshuffle());

    manager.deal().unwrap();
    assert!(manager.needs_reshuffle());

    manager.reshuffle(NUM_DECKS);
    assert!(!manager.needs_reshuffle());
    assert_eq!(manager.remaining(), 312);
    assert_eq!(manager.cards_dealt(), 0);
}

#[test]
fn restore_recomputes_cut_from_the_original_size() {
    let mut manager = ShoeManager::with_seed(NUM_DECKS, 9);
    for _ in 0..100 {
        manager.deal().unwrap();
    }

    let snapshot = manager.shoe();
    let next_card = *snapshot.last().unwrap();

    let mut restored = ShoeManager::from_state(snapshot, manager.cards_dealt());
    assert_eq!(restored.remaining(), 212);
    assert_eq!(restored.cards_dealt(), 100);
    // 212 remaining + 100 dealt = 312 original, so the cut stays at 234.
    assert_eq!(restored.cut_card_position(), 234);
    assert_eq!(restored.deal().unwrap(), next_card);
}

#[test]
fn snapshot_is_a_defensive_copy() {
    let manager = ShoeManager::with_seed(NUM_DECKS, 3);
    let mut snapshot = manager.shoe();
    snapshot.clear();
    assert_eq!(manager.remaining(), 312);
}

#[test]
fn dealing_from_an_empty_shoe_fails() {
    let mut manager = ShoeManager::from_state(Vec::new(), 312);
    assert!(manager.needs_reshuffle());
    assert_eq!(manager.deal(), Err(ShoeError::Empty));
}
