//! Player decision handlers for the single-player reducer.

use crate::betting::calculate_even_money;
use crate::hand::{HandOutcome, PlayerAction, PlayerHand, evaluate};
use crate::shoe::ShoeManager;

use super::dealer::{advance_to_next_playable_hand, resolve};
use super::state::available_actions;
use super::{GamePhase, GameState, draw};

pub(super) fn hit(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.phase != GamePhase::PlayerAction || state.active_hand().is_none() {
        return state.clone();
    }
    if !available_actions(state).contains(&PlayerAction::Hit) {
        return state.clone();
    }

    let mut next = state.clone();
    let hand = &mut next.player_hands[state.active_hand_index];
    hand.cards.push(draw(shoe));
    hand.actions.push(PlayerAction::Hit);
    next.needs_reshuffle = shoe.needs_reshuffle();

    // Bust or exactly 21 auto-stands and passes control on.
    let total = hand.total();
    if total.is_bust || total.best == 21 {
        hand.is_stood = true;
        return advance_to_next_playable_hand(&next);
    }

    next
}

pub(super) fn stand(state: &GameState) -> GameState {
    if state.phase != GamePhase::PlayerAction || state.active_hand().is_none() {
        return state.clone();
    }
    if !available_actions(state).contains(&PlayerAction::Stand) {
        return state.clone();
    }

    let mut next = state.clone();
    let hand = &mut next.player_hands[state.active_hand_index];
    hand.is_stood = true;
    hand.actions.push(PlayerAction::Stand);

    advance_to_next_playable_hand(&next)
}

pub(super) fn double_down(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.phase != GamePhase::PlayerAction || state.active_hand().is_none() {
        return state.clone();
    }
    if !available_actions(state).contains(&PlayerAction::Double) {
        return state.clone();
    }

    let mut next = state.clone();
    let original_bet = next.player_hands[state.active_hand_index].bet;
    let hand = &mut next.player_hands[state.active_hand_index];
    hand.cards.push(draw(shoe));
    hand.bet *= 2.0;
    hand.is_doubled = true;
    hand.is_stood = true;
    hand.actions.push(PlayerAction::Double);

    // The additional bet is charged immediately.
    next.chips -= original_bet;
    next.needs_reshuffle = shoe.needs_reshuffle();

    advance_to_next_playable_hand(&next)
}

pub(super) fn split(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.phase != GamePhase::PlayerAction || state.active_hand().is_none() {
        return state.clone();
    }
    if !available_actions(state).contains(&PlayerAction::Split) {
        return state.clone();
    }

    let index = state.active_hand_index;
    let original = &state.player_hands[index];

    let mut first = PlayerHand::new(original.bet);
    first.cards = vec![original.cards[0], draw(shoe)];
    first.is_split = true;
    first.actions.push(PlayerAction::Split);

    let mut second = PlayerHand::new(original.bet);
    second.cards = vec![original.cards[1], draw(shoe)];
    second.is_split = true;
    second.actions.push(PlayerAction::Split);

    let mut next = state.clone();
    // The second hand's bet is charged immediately.
    next.chips -= original.bet;
    next.needs_reshuffle = shoe.needs_reshuffle();
    next.player_hands.splice(index..=index, [first, second]);

    // A split hand that lands on 21 is not blackjack, but it still
    // auto-stands.
    let first_total = evaluate(&next.player_hands[index].cards, true);
    if first_total.best == 21 {
        next.player_hands[index].is_stood = true;
        return advance_to_next_playable_hand(&next);
    }

    next
}

pub(super) fn surrender(state: &GameState) -> GameState {
    if state.phase != GamePhase::PlayerAction || state.active_hand().is_none() {
        return state.clone();
    }
    if !available_actions(state).contains(&PlayerAction::Surrender) {
        return state.clone();
    }

    let mut next = state.clone();
    let hand = &mut next.player_hands[state.active_hand_index];
    hand.is_surrendered = true;
    hand.is_stood = true;
    hand.actions.push(PlayerAction::Surrender);

    // Settled as a surrender outcome at resolution time.
    advance_to_next_playable_hand(&next)
}

pub(super) fn accept_even_money(state: &GameState) -> GameState {
    let (true, Some(index)) = (state.even_money_offered, state.even_money_hand_index) else {
        return state.clone();
    };
    let Some(hand) = state.player_hands.get(index) else {
        return state.clone();
    };
    // A settled hand keeps its outcome and payout.
    if hand.is_resolved() {
        return state.clone();
    }

    let payout = calculate_even_money(hand.bet);

    let mut next = state.clone();
    let hand = &mut next.player_hands[index];
    hand.is_stood = true;
    hand.outcome = Some(HandOutcome::Win);
    hand.payout = payout;

    // The bet was deducted at deal time; credit it back with the payout now.
    next.chips += next.player_hands[index].bet + payout;
    next.even_money_offered = false;
    next.even_money_hand_index = None;

    // If the dealer actually holds blackjack, the remaining hands resolve
    // immediately; the accepted hand keeps its even-money settlement.
    if next.dealer_hand.total().is_blackjack {
        next.phase = GamePhase::Resolution;
        next.dealer_hand.reveal_hole();
        return resolve(&next);
    }

    advance_to_next_playable_hand(&next)
}

pub(super) fn decline_even_money(state: &GameState) -> GameState {
    let (true, Some(index)) = (state.even_money_offered, state.even_money_hand_index) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.even_money_offered = false;
    next.even_money_hand_index = None;

    // Dealer blackjack: the declining hand pushes (both are blackjack) and
    // everything resolves now.
    if next.dealer_hand.total().is_blackjack {
        next.phase = GamePhase::Resolution;
        next.dealer_hand.reveal_hole();
        return resolve(&next);
    }

    // No dealer blackjack: the natural stands, pending its 3:2 payout.
    if let Some(hand) = next.player_hands.get_mut(index) {
        hand.is_stood = true;
    }
    advance_to_next_playable_hand(&next)
}
