//! Dealer play, resolution, and round turnover for the single-player
//! reducer.

use tracing::debug;

use crate::betting::calculate_payout;
use crate::config::NUM_DECKS;
use crate::hand::{DealerHand, determine_outcome, should_dealer_hit};
use crate::shoe::ShoeManager;

use super::{GamePhase, GameState, draw};

/// Plays the dealer's hand to completion in one transition and resolves.
///
/// The dealer hits soft 17. Animation pacing is a UI concern; the reducer
/// never steps incrementally.
pub(super) fn dealer_play(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.phase != GamePhase::DealerPlay {
        return state.clone();
    }

    let mut next = state.clone();
    while should_dealer_hit(&next.dealer_hand.cards) {
        next.dealer_hand.cards.push(draw(shoe));
    }

    debug!(
        dealer_total = next.dealer_hand.total().best,
        "dealer played out"
    );

    next.phase = GamePhase::Resolution;
    next.dealer_hand.reveal_hole();
    next.needs_reshuffle = shoe.needs_reshuffle();
    resolve(&next)
}

/// Resolves every unresolved hand against the dealer and settles chips.
///
/// Hands that already carry an outcome (an accepted even-money offer) are
/// left untouched, which guards against double-crediting. For each freshly
/// resolved hand the original bet plus the net payout is credited back.
pub(super) fn resolve(state: &GameState) -> GameState {
    let dealer_total = state.dealer_hand.total();

    let mut next = state.clone();
    for hand in &mut next.player_hands {
        if hand.is_resolved() {
            continue;
        }

        let player_total = hand.total();
        let outcome = determine_outcome(&player_total, &dealer_total, hand.is_surrendered);
        let payout = calculate_payout(hand.bet, outcome);

        // The bet was deducted at deal (and double/split) time, so the
        // player's return is bet + payout: 0 on a loss, bet on a push,
        // 2x on a win, 2.5x on a blackjack, half on a surrender.
        next.chips += hand.bet + payout;
        hand.outcome = Some(outcome);
        hand.payout = payout;
    }

    debug!(chips = next.chips, "round resolved");

    next.phase = GamePhase::RoundOver;
    next.dealer_hand.reveal_hole();
    next.even_money_offered = false;
    next.even_money_hand_index = None;
    next
}

/// Clears the table for the next round, reshuffling if flagged.
///
/// A bankrupt session (zero chips) is left unchanged; ending it is the
/// host's call.
pub(super) fn new_round(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.chips <= 0.0 {
        return state.clone();
    }

    if state.needs_reshuffle || shoe.needs_reshuffle() {
        shoe.reshuffle(NUM_DECKS);
    }

    let mut next = state.clone();
    next.phase = GamePhase::Betting;
    next.player_hands = Vec::new();
    next.dealer_hand = DealerHand::new();
    next.active_hand_index = 0;
    next.bets = vec![0.0; state.hands_configuration];
    next.needs_reshuffle = false;
    next.even_money_offered = false;
    next.even_money_hand_index = None;
    next
}

/// Advances to the next hand needing a decision, or hands control to the
/// dealer, or resolves outright.
///
/// Scans forward from the active index, skipping hands that are done
/// (stood, bust, blackjack, surrendered, or doubled). When no playable
/// hand remains: if any unresolved, non-surrendered hand is still alive the
/// dealer plays; if every hand is bust or surrendered the round resolves
/// without dealer action, though the hole card is still revealed for
/// display consistency.
pub(super) fn advance_to_next_playable_hand(state: &GameState) -> GameState {
    let mut index = state.active_hand_index;

    while index < state.player_hands.len() {
        let hand = &state.player_hands[index];
        let total = hand.total();

        if hand.is_stood || total.is_bust || total.is_blackjack || hand.is_surrendered
            || hand.is_doubled
        {
            index += 1;
            continue;
        }

        let mut next = state.clone();
        next.active_hand_index = index;
        return next;
    }

    let any_hand_alive = state.player_hands.iter().any(|hand| {
        !hand.is_resolved() && !hand.is_surrendered && !hand.total().is_bust
    });

    if any_hand_alive {
        let mut next = state.clone();
        next.phase = GamePhase::DealerPlay;
        next.active_hand_index = index;
        return next;
    }

    // Everything is bust or surrendered: skip the dealer entirely.
    let mut next = state.clone();
    next.dealer_hand.reveal_hole();
    resolve(&next)
}
