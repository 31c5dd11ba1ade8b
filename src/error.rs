//! Error types for engine operations.

use thiserror::Error;

/// Errors that can occur when dealing from the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// The shoe has no cards left.
    ///
    /// A correctly operated caller reshuffles before this can happen, so
    /// reaching it indicates a caller bug rather than a recoverable game
    /// condition.
    #[error("shoe is empty; reshuffle required")]
    Empty,
}

/// Errors that can occur when validating a bet.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BetError {
    /// Bet is below the table minimum.
    #[error("minimum bet is ${0}")]
    BelowMinimum(f64),
    /// Bet is not a whole dollar amount.
    #[error("bet must be a whole number")]
    NotWholeNumber,
    /// Bet exceeds the chips available after existing bets.
    #[error("insufficient chips")]
    InsufficientChips,
    /// Number of bets does not match the hand configuration.
    #[error("expected {expected} bets, got {got}")]
    WrongBetCount {
        /// Bets required by the hand configuration.
        expected: usize,
        /// Bets actually supplied.
        got: usize,
    },
    /// A specific hand's bet is below the table minimum.
    #[error("hand {0} must have at least the minimum bet")]
    HandBelowMinimum(usize),
    /// The sum of all bets exceeds available chips.
    #[error("total bets exceed available chips")]
    TotalExceedsChips,
}

/// Errors that can occur when validating a buy-in.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BuyInError {
    /// Buy-in is below the minimum.
    #[error("minimum buy-in is ${0}")]
    BelowMinimum(f64),
    /// Buy-in is above the maximum.
    #[error("maximum buy-in is ${0}")]
    AboveMaximum(f64),
    /// Buy-in is not a multiple of the required increment.
    #[error("buy-in must be in ${0} increments")]
    NotMultipleOfIncrement(f64),
}

/// Errors returned by multiplayer table operations.
///
/// Unlike the single-player reducer, which silently ignores illegal input,
/// table operations answer discrete network requests and must carry a
/// human-readable reason for the host to surface.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TableError {
    /// The round is not accepting bets.
    #[error("not in betting phase")]
    NotBetting,
    /// The round is not in the player action phase.
    #[error("not in player action phase")]
    NotPlayerAction,
    /// The round is not in the dealer play phase.
    #[error("not in dealer play phase")]
    NotDealerPlay,
    /// The round is not in the resolution phase.
    #[error("not in resolution phase")]
    NotResolution,
    /// No seat has placed a bet.
    #[error("no players have placed bets")]
    NoBets,
    /// The caller does not own the hand that is currently acting.
    #[error("not your turn")]
    NotYourTurn,
    /// Bet is outside the table limits.
    #[error("bet must be between ${min} and ${max}")]
    BetOutOfRange {
        /// Table minimum bet.
        min: f64,
        /// Table maximum bet.
        max: f64,
    },
    /// The seat's table stack cannot cover the bet.
    #[error("insufficient chips")]
    InsufficientChips,
    /// Doubling is only allowed on the first two cards.
    #[error("can only double on first two cards")]
    CannotDouble,
    /// The seat's table stack cannot cover the double.
    #[error("insufficient chips to double")]
    InsufficientChipsToDouble,
    /// The hand is not a splittable pair.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The seat's table stack cannot cover the split.
    #[error("insufficient chips to split")]
    InsufficientChipsToSplit,
    /// The shoe ran out of cards mid-operation.
    #[error(transparent)]
    Shoe(#[from] ShoeError),
}
