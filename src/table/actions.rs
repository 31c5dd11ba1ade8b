//! Seat action handlers for the multiplayer engine.

use crate::error::TableError;
use crate::hand::{PlayerAction, PlayerHand, can_split};

use super::{RoundState, SeatHand, TablePhase};

/// Finds the active hand index, validating it belongs to the given user.
///
/// Prefers the explicit active hand index; falls back to the active seat
/// for rows persisted before split support.
fn active_hand_for(state: &RoundState, user_id: &str) -> Option<usize> {
    if let Some(index) = state.active_hand_index {
        return match state.player_hands.get(index) {
            Some(hand) if hand.user_id == user_id => Some(index),
            _ => None,
        };
    }

    state
        .player_hands
        .iter()
        .position(|h| Some(h.seat_number) == state.active_seat && h.user_id == user_id)
}

/// Finds the first hand that is playable: not a natural, not bust, not
/// stood.
pub(super) fn find_first_playable(hands: &[SeatHand]) -> Option<usize> {
    hands.iter().position(|seat_hand| {
        let total = seat_hand.hand.total();
        !total.is_blackjack && !total.is_bust && !seat_hand.hand.is_stood
    })
}

/// Finds the next playable hand at or after `from`.
fn find_next_playable(hands: &[SeatHand], from: usize) -> Option<usize> {
    hands.iter().enumerate().skip(from).find_map(|(i, seat_hand)| {
        if seat_hand.hand.is_stood || seat_hand.hand.is_surrendered {
            return None;
        }
        let total = seat_hand.hand.total();
        if total.is_bust || total.is_blackjack {
            return None;
        }
        Some(i)
    })
}

/// Applies turn advancement after a hand action: either the same hand
/// continues, the next playable hand becomes active, or control passes to
/// the dealer.
fn advance_to_next_hand(state: &mut RoundState, current_index: usize, current_hand_done: bool) {
    if !current_hand_done {
        state.active_hand_index = Some(current_index);
        state.active_seat = Some(state.player_hands[current_index].seat_number);
        state.phase = TablePhase::PlayerAction;
        return;
    }

    match find_next_playable(&state.player_hands, current_index + 1) {
        Some(next_index) => {
            state.active_hand_index = Some(next_index);
            state.active_seat = Some(state.player_hands[next_index].seat_number);
            state.phase = TablePhase::PlayerAction;
        }
        None => {
            state.active_hand_index = None;
            state.active_seat = None;
            state.phase = TablePhase::DealerPlay;
        }
    }
}

/// Draws one card on the caller's active hand.
///
/// Busting or reaching exactly 21 auto-stands the hand and advances the
/// turn.
///
/// # Errors
///
/// Fails outside the player action phase, when it is not the caller's
/// turn, or if the shoe runs out of cards.
pub fn player_hit(state: &RoundState, user_id: &str) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::PlayerAction {
        return Err(TableError::NotPlayerAction);
    }
    let index = active_hand_for(state, user_id).ok_or(TableError::NotYourTurn)?;

    let mut shoe = state.restore_shoe();

    let mut next = state.clone();
    let hand = &mut next.player_hands[index].hand;
    hand.cards.push(shoe.deal()?);
    hand.actions.push(PlayerAction::Hit);

    let total = hand.total();
    if total.is_bust || total.best == 21 {
        hand.is_stood = true;
    }
    let done = hand.is_stood;

    advance_to_next_hand(&mut next, index, done);
    next.sync_shoe(&shoe);

    Ok(next)
}

/// Stands on the caller's active hand and advances the turn.
///
/// # Errors
///
/// Fails outside the player action phase or when it is not the caller's
/// turn.
pub fn player_stand(state: &RoundState, user_id: &str) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::PlayerAction {
        return Err(TableError::NotPlayerAction);
    }
    let index = active_hand_for(state, user_id).ok_or(TableError::NotYourTurn)?;

    let mut next = state.clone();
    let hand = &mut next.player_hands[index].hand;
    hand.is_stood = true;
    hand.actions.push(PlayerAction::Stand);

    advance_to_next_hand(&mut next, index, true);

    Ok(next)
}

/// Doubles the caller's bet, draws exactly one card, and stands.
///
/// # Errors
///
/// Fails outside the player action phase, when it is not the caller's
/// turn, on a hand that is not exactly two cards, when the seat's table
/// stack cannot cover the additional bet, or if the shoe runs out.
pub fn player_double(
    state: &RoundState,
    user_id: &str,
    chips_at_table: f64,
) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::PlayerAction {
        return Err(TableError::NotPlayerAction);
    }
    let index = active_hand_for(state, user_id).ok_or(TableError::NotYourTurn)?;

    let bet = state.player_hands[index].hand.bet;
    if state.player_hands[index].hand.cards.len() != 2 {
        return Err(TableError::CannotDouble);
    }
    if chips_at_table < bet {
        return Err(TableError::InsufficientChipsToDouble);
    }

    let mut shoe = state.restore_shoe();

    let mut next = state.clone();
    let hand = &mut next.player_hands[index].hand;
    hand.bet *= 2.0;
    hand.cards.push(shoe.deal()?);
    hand.actions.push(PlayerAction::Double);
    hand.is_doubled = true;
    hand.is_stood = true;

    advance_to_next_hand(&mut next, index, true);
    next.sync_shoe(&shoe);

    Ok(next)
}

/// Splits the caller's pair into two adjacent hands under the same seat.
///
/// Each new hand receives one card immediately. Split aces receive only
/// that one card and auto-stand; any other split leaves the first hand
/// active.
///
/// # Errors
///
/// Fails outside the player action phase, when it is not the caller's
/// turn, on a hand that is not a two-card pair of equal value, when the
/// seat's table stack cannot cover the second bet, or if the shoe runs
/// out.
pub fn player_split(
    state: &RoundState,
    user_id: &str,
    chips_at_table: f64,
) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::PlayerAction {
        return Err(TableError::NotPlayerAction);
    }
    let index = active_hand_for(state, user_id).ok_or(TableError::NotYourTurn)?;

    let seat_hand = &state.player_hands[index];
    let original = &seat_hand.hand;
    if original.cards.len() != 2 || !can_split(&original.cards) {
        return Err(TableError::CannotSplit);
    }
    if chips_at_table < original.bet {
        return Err(TableError::InsufficientChipsToSplit);
    }

    let mut shoe = state.restore_shoe();

    // Split aces receive one card each and auto-stand.
    let is_ace_split = original.cards[0].rank.is_ace();

    let mut build = |card_index: usize| -> Result<SeatHand, TableError> {
        let mut hand = PlayerHand::new(original.bet);
        hand.cards = vec![original.cards[card_index], shoe.deal()?];
        hand.actions.push(PlayerAction::Split);
        hand.is_split = true;
        hand.is_stood = is_ace_split;
        Ok(SeatHand {
            seat_number: seat_hand.seat_number,
            user_id: seat_hand.user_id.clone(),
            hand,
        })
    };
    let first = build(0)?;
    let second = build(1)?;

    let mut next = state.clone();
    next.player_hands.splice(index..=index, [first, second]);

    if is_ace_split {
        // Both hands are stood; look past them for the next turn.
        match find_next_playable(&next.player_hands, index + 1) {
            Some(next_index) => {
                next.active_hand_index = Some(next_index);
                next.active_seat = Some(next.player_hands[next_index].seat_number);
                next.phase = TablePhase::PlayerAction;
            }
            None => {
                next.active_hand_index = None;
                next.active_seat = None;
                next.phase = TablePhase::DealerPlay;
            }
        }
    } else {
        // Play the first split hand.
        next.active_hand_index = Some(index);
        next.active_seat = Some(next.player_hands[index].seat_number);
        next.phase = TablePhase::PlayerAction;
    }

    next.sync_shoe(&shoe);

    Ok(next)
}
