//! Shoe construction, shuffling, and dealing.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::card::{Card, DECK_SIZE, RANKS, SUITS};
use crate::config::CUT_CARD_PENETRATION;
use crate::error::ShoeError;

/// Creates an unshuffled shoe of `num_decks` full 52-card decks.
#[must_use]
pub fn create_shoe(num_decks: usize) -> Vec<Card> {
    let mut shoe = Vec::with_capacity(num_decks * DECK_SIZE);
    for _ in 0..num_decks {
        for suit in SUITS {
            for rank in RANKS {
                shoe.push(Card::new(suit, rank));
            }
        }
    }
    shoe
}

/// Draws a uniform index in `[0, bound)` by rejection sampling.
///
/// Raw draws in the biased tail of the `u32` range are discarded so the
/// modulo cannot skew the distribution.
fn uniform_index<R: RngCore>(rng: &mut R, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    let limit = u32::MAX - (u32::MAX % bound);
    loop {
        let draw = rng.next_u32();
        if draw < limit {
            return draw % bound;
        }
    }
}

/// Shuffles cards in place with a Fisher-Yates pass over the given source.
pub fn shuffle<R: RngCore>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = uniform_index(rng, (i + 1) as u32) as usize;
        cards.swap(i, j);
    }
}

/// Number of cards dealt before a reshuffle is required.
#[must_use]
pub fn cut_card_position(shoe_size: usize, penetration: f64) -> usize {
    (shoe_size as f64 * penetration).floor() as usize
}

/// Manages a multi-deck shoe: shuffling, dealing, and reshuffle detection.
///
/// The shoe is a stack; dealing pops from the back. The manager tracks the
/// cut-card position and a cumulative cards-dealt counter so callers can
/// reshuffle between rounds once penetration is reached.
#[derive(Debug)]
pub struct ShoeManager {
    shoe: Vec<Card>,
    cut_card_position: usize,
    cards_dealt: usize,
    rng: ChaCha20Rng,
}

impl ShoeManager {
    /// Creates a freshly shuffled shoe seeded from the operating system.
    #[must_use]
    pub fn new(num_decks: usize) -> Self {
        Self::with_rng(num_decks, ChaCha20Rng::from_os_rng())
    }

    /// Creates a freshly shuffled shoe from a fixed seed.
    ///
    /// Deterministic; intended for replays and tests.
    #[must_use]
    pub fn with_seed(num_decks: usize, seed: u64) -> Self {
        Self::with_rng(num_decks, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Creates a manager directly from persisted state.
    ///
    /// The cut-card position is recomputed from the full original shoe
    /// size, as in [`Self::restore_state`].
    #[must_use]
    pub fn from_state(shoe: Vec<Card>, cards_dealt: usize) -> Self {
        let mut manager = Self {
            shoe: Vec::new(),
            cut_card_position: 0,
            cards_dealt: 0,
            rng: ChaCha20Rng::from_os_rng(),
        };
        manager.restore_state(shoe, cards_dealt);
        manager
    }

    fn with_rng(num_decks: usize, mut rng: ChaCha20Rng) -> Self {
        let mut shoe = create_shoe(num_decks);
        shuffle(&mut shoe, &mut rng);
        let cut = cut_card_position(shoe.len(), CUT_CARD_PENETRATION);
        Self {
            shoe,
            cut_card_position: cut,
            cards_dealt: 0,
            rng,
        }
    }

    /// Deals the top card from the shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if no cards remain. A correctly operated
    /// caller checks [`Self::needs_reshuffle`] between rounds, so an empty
    /// shoe indicates a caller bug.
    pub fn deal(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.pop().ok_or(ShoeError::Empty)?;
        self.cards_dealt += 1;
        Ok(card)
    }

    /// Returns whether the cut card has been passed.
    #[must_use]
    pub const fn needs_reshuffle(&self) -> bool {
        self.cards_dealt >= self.cut_card_position
    }

    /// Discards the current shoe and builds a freshly shuffled one.
    pub fn reshuffle(&mut self, num_decks: usize) {
        let mut shoe = create_shoe(num_decks);
        shuffle(&mut shoe, &mut self.rng);
        debug!(cards = shoe.len(), "reshuffled shoe");
        self.cut_card_position = cut_card_position(shoe.len(), CUT_CARD_PENETRATION);
        self.shoe = shoe;
        self.cards_dealt = 0;
    }

    /// Rehydrates the shoe from persisted state.
    ///
    /// The cut-card position is recomputed from the full original shoe size
    /// (`shoe.len() + cards_dealt`), not just what remains.
    pub fn restore_state(&mut self, shoe: Vec<Card>, cards_dealt: usize) {
        self.cut_card_position = cut_card_position(shoe.len() + cards_dealt, CUT_CARD_PENETRATION);
        self.shoe = shoe;
        self.cards_dealt = cards_dealt;
    }

    /// Returns a defensive copy of the remaining shoe, for persistence.
    #[must_use]
    pub fn shoe(&self) -> Vec<Card> {
        self.shoe.clone()
    }

    /// Returns the number of cards dealt since the last shuffle.
    #[must_use]
    pub const fn cards_dealt(&self) -> usize {
        self.cards_dealt
    }

    /// Returns the cut-card position.
    #[must_use]
    pub const fn cut_card_position(&self) -> usize {
        self.cut_card_position
    }

    /// Returns the number of cards remaining in the shoe.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.shoe.len()
    }
}
