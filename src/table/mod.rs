//! Multiplayer round engine.
//!
//! The same rule set as the single-player reducer, re-expressed as
//! independent operations suitable for concurrent network requests against
//! a persisted round row. Every operation takes the current [`RoundState`]
//! and returns either the complete successor state for the host to persist,
//! or a [`TableError`] whose message is surfaced to the requester.
//!
//! The engine holds no mutable cross-call state: operations that deal cards
//! restore a [`ShoeManager`] from the supplied snapshot and write the
//! advanced snapshot back, and the host must persist it atomically with the
//! rest of the row so no two concurrent deals draw the same card twice.
//! Turn ownership checks make each operation safe to reject against a stale
//! read; true serialization is the host's job.

use tracing::debug;

use crate::card::Card;
use crate::config::NUM_DECKS;
use crate::error::TableError;
use crate::hand::{PlayerHand, dealer_shows_ace, dealer_shows_ten, evaluate};
use crate::shoe::ShoeManager;

mod actions;
mod dealer;

pub use dealer::{ChipReturn, play_dealer, resolve_round};

/// Phase of a multiplayer round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TablePhase {
    /// Seats are placing bets.
    Betting,
    /// Waiting for the active seat to act.
    PlayerAction,
    /// Dealer plays out their hand.
    DealerPlay,
    /// Outcomes are ready to be settled.
    Resolution,
    /// Round finished.
    RoundOver,
}

/// A seat's hand within a multiplayer round.
///
/// Seats own their hands explicitly (rather than by array position) so
/// split hands can sit adjacently under one seat.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatHand {
    /// Seat number at the table.
    pub seat_number: u8,
    /// Identity of the player occupying the seat.
    pub user_id: String,
    /// The hand itself.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub hand: PlayerHand,
}

/// The persisted state of a multiplayer round.
///
/// The host must round-trip every field verbatim between calls; all
/// continuity comes from what it persists and re-supplies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// Room this round belongs to.
    pub room_id: String,
    /// Round counter within the room.
    pub round_number: u32,
    /// Current phase.
    pub phase: TablePhase,
    /// Seat whose hand is currently acting.
    pub active_seat: Option<u8>,
    /// Index into `player_hands` of the hand currently acting.
    pub active_hand_index: Option<usize>,
    /// Remaining cards in the shoe.
    pub shoe: Vec<Card>,
    /// Cards dealt since the last shuffle.
    pub cards_dealt: usize,
    /// Cut-card position for the current shoe.
    pub cut_card_position: usize,
    /// Whether the cut card was passed during this round.
    pub needs_reshuffle: bool,
    /// Hands in seat order (split hands adjacent under their seat).
    pub player_hands: Vec<SeatHand>,
    /// The dealer's cards; the first is the up card.
    pub dealer_cards: Vec<Card>,
    /// Whether the dealer's hole card has been revealed.
    pub hole_card_revealed: bool,
}

/// Creates a fresh betting-phase round for a room.
///
/// Supplying the previous round's shoe snapshot carries the shoe across
/// rounds; it is reshuffled up front if the cut card was passed. The host
/// passes `round_number` (the previous round's counter plus one).
#[must_use]
pub fn create_round(
    room_id: &str,
    round_number: u32,
    existing_shoe: Option<(Vec<Card>, usize)>,
) -> RoundState {
    let mut shoe = match existing_shoe {
        Some((cards, cards_dealt)) => ShoeManager::from_state(cards, cards_dealt),
        None => ShoeManager::new(NUM_DECKS),
    };

    if shoe.needs_reshuffle() {
        shoe.reshuffle(NUM_DECKS);
    }

    RoundState {
        room_id: room_id.to_owned(),
        round_number,
        phase: TablePhase::Betting,
        active_seat: None,
        active_hand_index: None,
        shoe: shoe.shoe(),
        cards_dealt: shoe.cards_dealt(),
        cut_card_position: shoe.cut_card_position(),
        needs_reshuffle: false,
        player_hands: Vec::new(),
        dealer_cards: Vec::new(),
        hole_card_revealed: false,
    }
}

impl RoundState {
    /// Rehydrates a shoe manager from this state's snapshot.
    fn restore_shoe(&self) -> ShoeManager {
        ShoeManager::from_state(self.shoe.clone(), self.cards_dealt)
    }

    /// Writes a shoe manager's snapshot back for persistence.
    fn sync_shoe(&mut self, shoe: &ShoeManager) {
        self.shoe = shoe.shoe();
        self.cards_dealt = shoe.cards_dealt();
        self.cut_card_position = shoe.cut_card_position();
        self.needs_reshuffle = shoe.needs_reshuffle();
    }
}

/// Places (or replaces) a seat's bet during the betting phase.
///
/// An amount of zero clears the seat's pending hand. Hands are kept in
/// seat order.
///
/// # Errors
///
/// Fails outside the betting phase, for amounts outside `[min_bet,
/// max_bet]`, or when the seat's table stack cannot cover the amount.
pub fn place_bet(
    state: &RoundState,
    seat_number: u8,
    user_id: &str,
    amount: f64,
    chips_at_table: f64,
    min_bet: f64,
    max_bet: f64,
) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::Betting {
        return Err(TableError::NotBetting);
    }

    let mut next = state.clone();

    if amount == 0.0 {
        next.player_hands
            .retain(|h| !(h.seat_number == seat_number && h.user_id == user_id));
        return Ok(next);
    }

    if amount < min_bet || amount > max_bet {
        return Err(TableError::BetOutOfRange {
            min: min_bet,
            max: max_bet,
        });
    }
    if amount > chips_at_table {
        return Err(TableError::InsufficientChips);
    }

    let seat_hand = SeatHand {
        seat_number,
        user_id: user_id.to_owned(),
        hand: PlayerHand::new(amount),
    };

    match next
        .player_hands
        .iter_mut()
        .find(|h| h.seat_number == seat_number)
    {
        Some(existing) => *existing = seat_hand,
        None => next.player_hands.push(seat_hand),
    }
    next.player_hands.sort_by_key(|h| h.seat_number);

    Ok(next)
}

/// Deals the initial two rounds of cards to every betting seat.
///
/// Dealer blackjack (showing an Ace or ten-value) short-circuits to
/// resolution with the hole card revealed. If every seat was dealt a
/// natural, control passes straight to dealer play; otherwise the first
/// playable hand becomes active.
///
/// # Errors
///
/// Fails outside the betting phase, when no seat has bet, or if the shoe
/// runs out of cards.
pub fn deal_cards(state: &RoundState) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::Betting {
        return Err(TableError::NotBetting);
    }
    if state.player_hands.is_empty() {
        return Err(TableError::NoBets);
    }

    let mut shoe = state.restore_shoe();
    if shoe.needs_reshuffle() {
        shoe.reshuffle(NUM_DECKS);
    }

    let mut next = state.clone();
    for seat_hand in &mut next.player_hands {
        seat_hand.hand.cards.clear();
    }
    next.dealer_cards.clear();

    // Two passes of one card each: every seat in order, then the dealer.
    for _ in 0..2 {
        for seat_hand in &mut next.player_hands {
            seat_hand.hand.cards.push(shoe.deal()?);
        }
        next.dealer_cards.push(shoe.deal()?);
    }

    debug!(
        room = %next.room_id,
        round = next.round_number,
        seats = next.player_hands.len(),
        "dealt initial cards"
    );

    next.sync_shoe(&shoe);

    // Dealer peeks for blackjack when showing an Ace or a ten-value.
    if (dealer_shows_ace(&next.dealer_cards) || dealer_shows_ten(&next.dealer_cards))
        && evaluate(&next.dealer_cards, false).is_blackjack
    {
        next.phase = TablePhase::Resolution;
        next.hole_card_revealed = true;
        next.active_seat = None;
        next.active_hand_index = None;
        return Ok(next);
    }

    match actions::find_first_playable(&next.player_hands) {
        Some(index) => {
            next.phase = TablePhase::PlayerAction;
            next.active_seat = Some(next.player_hands[index].seat_number);
            next.active_hand_index = Some(index);
        }
        None => {
            // Every seat holds a natural; the dealer just reveals.
            next.phase = TablePhase::DealerPlay;
            next.active_seat = None;
            next.active_hand_index = None;
        }
    }

    Ok(next)
}

/// Re-exported player actions.
pub use actions::{player_double, player_hit, player_split, player_stand};
