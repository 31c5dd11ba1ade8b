//! Fixed table configuration.

/// Number of decks in the shoe.
pub const NUM_DECKS: usize = 6;

/// Fraction of the shoe dealt before a reshuffle is required.
pub const CUT_CARD_PENETRATION: f64 = 0.75;

/// Minimum bet per hand, in dollars.
pub const MIN_BET: f64 = 1.0;

/// Minimum session buy-in, in dollars.
pub const MIN_BUY_IN: f64 = 100.0;

/// Maximum session buy-in, in dollars.
pub const MAX_BUY_IN: f64 = 10_000.0;

/// Buy-ins must be a multiple of this increment.
pub const BUY_IN_INCREMENT: f64 = 100.0;

/// Maximum number of simultaneous hands a solo player may play.
pub const MAX_HANDS: usize = 6;

/// Maximum total hands reachable through splitting (original plus splits).
pub const MAX_SPLIT_HANDS: usize = 4;

/// Blackjack pays 3:2.
pub const BLACKJACK_PAYOUT: f64 = 1.5;
