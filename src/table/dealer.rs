//! Dealer play and settlement for the multiplayer engine.

use tracing::debug;

use crate::betting::calculate_payout;
use crate::error::TableError;
use crate::hand::{determine_outcome, evaluate, should_dealer_hit};

use super::{RoundState, TablePhase};

/// Chips owed back to a seat after settlement.
///
/// Bets are charged from the seat's table stack when placed (and again on
/// a double or split), so the return is the original bet plus the net
/// payout. The host applies these to its own balances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChipReturn {
    /// Player the chips belong to.
    pub user_id: String,
    /// Seat the hand was played at.
    pub seat_number: u8,
    /// Bet plus net payout for one hand. Zero for a lost hand.
    pub net_return: f64,
}

/// Plays the dealer's hand to completion.
///
/// The dealer hits soft 17. If every seat busted the dealer does not draw
/// at all; the hole card is still revealed for display.
///
/// # Errors
///
/// Fails outside the dealer play phase, or if the shoe runs out of cards.
pub fn play_dealer(state: &RoundState) -> Result<RoundState, TableError> {
    if state.phase != TablePhase::DealerPlay {
        return Err(TableError::NotDealerPlay);
    }

    let mut next = state.clone();

    let all_bust = next
        .player_hands
        .iter()
        .all(|seat_hand| seat_hand.hand.total().is_bust);

    if all_bust {
        next.phase = TablePhase::Resolution;
        next.hole_card_revealed = true;
        return Ok(next);
    }

    let mut shoe = state.restore_shoe();
    while should_dealer_hit(&next.dealer_cards) {
        next.dealer_cards.push(shoe.deal()?);
    }

    debug!(
        room = %next.room_id,
        round = next.round_number,
        dealer_total = evaluate(&next.dealer_cards, false).best,
        "dealer played out"
    );

    next.phase = TablePhase::Resolution;
    next.hole_card_revealed = true;
    next.sync_shoe(&shoe);

    Ok(next)
}

/// Settles every unresolved hand against the dealer.
///
/// Hands that already carry an outcome are skipped, so a retried call
/// cannot credit a seat twice; it fails on the phase check instead once
/// the first call has moved the round on. Returns the finished round and
/// one [`ChipReturn`] per settled hand.
///
/// # Errors
///
/// Fails outside the resolution phase.
pub fn resolve_round(state: &RoundState) -> Result<(RoundState, Vec<ChipReturn>), TableError> {
    if state.phase != TablePhase::Resolution {
        return Err(TableError::NotResolution);
    }

    let dealer_total = evaluate(&state.dealer_cards, false);

    let mut next = state.clone();
    let mut returns = Vec::with_capacity(next.player_hands.len());

    for seat_hand in &mut next.player_hands {
        if seat_hand.hand.is_resolved() {
            continue;
        }

        let player_total = seat_hand.hand.total();
        let outcome = determine_outcome(&player_total, &dealer_total, seat_hand.hand.is_surrendered);
        let payout = calculate_payout(seat_hand.hand.bet, outcome);

        seat_hand.hand.outcome = Some(outcome);
        seat_hand.hand.payout = payout;

        returns.push(ChipReturn {
            user_id: seat_hand.user_id.clone(),
            seat_number: seat_hand.seat_number,
            net_return: seat_hand.hand.bet + payout,
        });
    }

    debug!(
        room = %next.room_id,
        round = next.round_number,
        settled = returns.len(),
        "round resolved"
    );

    next.phase = TablePhase::RoundOver;
    next.hole_card_revealed = true;
    next.active_seat = None;
    next.active_hand_index = None;

    Ok((next, returns))
}
