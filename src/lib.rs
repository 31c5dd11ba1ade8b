//! A casino blackjack engine for single-player sessions and multiplayer
//! tables.
//!
//! The [`game`] module is a pure reducer over [`GameState`]: six-deck shoe,
//! dealer hits soft 17, blackjack pays 3:2, late surrender, split up to
//! four hands, even money against a dealer Ace. The [`table`] module
//! re-expresses the same rules as independent operations over a persisted
//! [`RoundState`], for a host serving concurrent players.
//!
//! # Example
//!
//! ```no_run
//! use pitboss::{GameAction, game};
//!
//! let (state, mut shoe) = game::new_session(1000.0, 1, None);
//! let state = game::apply(&state, &GameAction::PlaceBet { hand_index: 0, amount: 100.0 }, &mut shoe);
//! let state = game::apply(&state, &GameAction::Deal, &mut shoe);
//! let _ = state;
//! ```

pub mod betting;
pub mod card;
pub mod config;
pub mod error;
pub mod game;
pub mod hand;
pub mod shoe;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{BetError, BuyInError, ShoeError, TableError};
pub use game::{GameAction, GamePhase, GameState, available_actions};
pub use hand::{DealerHand, HandOutcome, HandTotal, PlayerAction, PlayerHand};
pub use shoe::ShoeManager;
pub use table::{ChipReturn, RoundState, SeatHand, TablePhase};
