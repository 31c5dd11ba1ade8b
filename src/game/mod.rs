//! Single-player round state machine.
//!
//! The engine is a pure reducer: [`apply`] maps `(state, action)` to a new
//! state, mutating only the injected [`ShoeManager`]. Illegal actions are
//! silently ignored and return the input state unchanged, so hosts can
//! dispatch optimistically; [`available_actions`] reports what is legal on
//! the active hand.

use tracing::debug;

use crate::betting::{validate_all_bets, validate_bet};
use crate::card::Card;
use crate::config::NUM_DECKS;
use crate::hand::{DealerHand, PlayerHand, dealer_shows_ace, dealer_shows_ten, evaluate};
use crate::shoe::ShoeManager;

mod actions;
mod dealer;
pub mod state;

pub use state::{GameAction, GamePhase, GameState, available_actions};

/// Creates a session: an initial `Betting`-phase state plus its shoe.
///
/// Supplying `existing_shoe` (remaining cards and the cards-dealt counter)
/// resumes a persisted session; the cut-card position is recomputed from
/// the original shoe size.
#[must_use]
pub fn new_session(
    chips: f64,
    hands_configuration: usize,
    existing_shoe: Option<(Vec<Card>, usize)>,
) -> (GameState, ShoeManager) {
    let mut shoe = ShoeManager::new(NUM_DECKS);
    if let Some((cards, cards_dealt)) = existing_shoe {
        shoe.restore_state(cards, cards_dealt);
    }
    (GameState::new(chips, hands_configuration), shoe)
}

/// Applies an action to the state, returning the successor state.
///
/// Pure apart from the shoe: the input state is never mutated, and illegal
/// actions (wrong phase, invalid bet, action not in the legal set) return
/// an unchanged copy.
///
/// # Panics
///
/// Panics if the shoe runs empty mid-deal. The reshuffle-before-deal
/// invariant makes this unreachable for a correctly operated session; an
/// empty shoe here is a caller bug, not a game condition.
#[must_use]
pub fn apply(state: &GameState, action: &GameAction, shoe: &mut ShoeManager) -> GameState {
    match action {
        GameAction::PlaceBet { hand_index, amount } => place_bet(state, *hand_index, *amount),
        GameAction::ClearBet { hand_index } => clear_bet(state, *hand_index),
        GameAction::ClearAllBets => clear_all_bets(state),
        GameAction::SameBet { previous_bets } => same_bet(state, previous_bets),
        GameAction::DoublePreviousBet { previous_bets } => double_previous_bet(state, previous_bets),
        GameAction::Deal => deal(state, shoe),
        GameAction::Hit => actions::hit(state, shoe),
        GameAction::Stand => actions::stand(state),
        GameAction::DoubleDown => actions::double_down(state, shoe),
        GameAction::Split => actions::split(state, shoe),
        GameAction::Surrender => actions::surrender(state),
        GameAction::AcceptEvenMoney => actions::accept_even_money(state),
        GameAction::DeclineEvenMoney => actions::decline_even_money(state),
        GameAction::DealerPlay => dealer::dealer_play(state, shoe),
        GameAction::NewRound => dealer::new_round(state, shoe),
    }
}

fn draw(shoe: &mut ShoeManager) -> Card {
    shoe.deal()
        .expect("shoe exhausted: reshuffle-before-deal invariant violated")
}

fn place_bet(state: &GameState, hand_index: usize, amount: f64) -> GameState {
    if state.phase != GamePhase::Betting || hand_index >= state.hands_configuration {
        return state.clone();
    }

    let other_bets: f64 = state
        .bets
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != hand_index)
        .map(|(_, b)| b)
        .sum();

    if validate_bet(amount, state.chips, other_bets).is_err() {
        return state.clone();
    }

    let mut next = state.clone();
    next.bets[hand_index] = amount;
    next
}

fn clear_bet(state: &GameState, hand_index: usize) -> GameState {
    if state.phase != GamePhase::Betting || hand_index >= state.bets.len() {
        return state.clone();
    }
    let mut next = state.clone();
    next.bets[hand_index] = 0.0;
    next
}

fn clear_all_bets(state: &GameState) -> GameState {
    if state.phase != GamePhase::Betting {
        return state.clone();
    }
    let mut next = state.clone();
    next.bets = vec![0.0; state.hands_configuration];
    next
}

fn same_bet(state: &GameState, previous_bets: &[f64]) -> GameState {
    if state.phase != GamePhase::Betting {
        return state.clone();
    }
    let total: f64 = previous_bets.iter().sum();
    if total > state.chips {
        return state.clone();
    }

    let mut bets: Vec<f64> = previous_bets
        .iter()
        .copied()
        .take(state.hands_configuration)
        .collect();
    bets.resize(state.hands_configuration, 0.0);

    let mut next = state.clone();
    next.bets = bets;
    next
}

fn double_previous_bet(state: &GameState, previous_bets: &[f64]) -> GameState {
    let doubled: Vec<f64> = previous_bets.iter().map(|b| b * 2.0).collect();
    same_bet(state, &doubled)
}

/// Deals the initial two rounds of cards and routes to the right phase:
/// an even-money offer, an immediate dealer-blackjack resolution, or the
/// first playable hand.
fn deal(state: &GameState, shoe: &mut ShoeManager) -> GameState {
    if state.phase != GamePhase::Betting {
        return state.clone();
    }
    if validate_all_bets(&state.bets, state.hands_configuration, state.chips).is_err() {
        return state.clone();
    }

    // Reshuffle before dealing if the cut card was passed last round.
    if shoe.needs_reshuffle() {
        shoe.reshuffle(NUM_DECKS);
    }

    let total_bets: f64 = state.bets.iter().sum();
    let mut player_hands: Vec<PlayerHand> =
        state.bets.iter().map(|&bet| PlayerHand::new(bet)).collect();
    let mut dealer_hand = DealerHand::new();

    // Two passes of one card each: every player hand, then the dealer.
    for _ in 0..2 {
        for hand in &mut player_hands {
            hand.cards.push(draw(shoe));
        }
        dealer_hand.cards.push(draw(shoe));
    }

    debug!(
        hands = player_hands.len(),
        hand_number = state.hand_number + 1,
        "dealt initial cards"
    );

    let mut next = state.clone();
    next.phase = GamePhase::Dealing;
    next.chips = state.chips - total_bets;
    next.player_hands = player_hands;
    next.dealer_hand = dealer_hand;
    next.active_hand_index = 0;
    next.hand_number = state.hand_number + 1;
    next.needs_reshuffle = shoe.needs_reshuffle();
    next.even_money_offered = false;
    next.even_money_hand_index = None;

    let shows_ace = dealer_shows_ace(&next.dealer_hand.cards);
    let shows_ten = dealer_shows_ten(&next.dealer_hand.cards);
    let dealer_total = next.dealer_hand.total();

    // Dealer shows an Ace: offer even money on the first natural found,
    // one offer per deal.
    if shows_ace {
        for (i, hand) in next.player_hands.iter().enumerate() {
            if evaluate(&hand.cards, false).is_blackjack {
                next.phase = GamePhase::PlayerAction;
                next.even_money_offered = true;
                next.even_money_hand_index = Some(i);
                return next;
            }
        }
    }

    // Dealer peeks for blackjack when showing an Ace or a ten-value.
    if (shows_ace || shows_ten) && dealer_total.is_blackjack {
        next.phase = GamePhase::Resolution;
        next.dealer_hand.reveal_hole();
        return dealer::resolve(&next);
    }

    next.phase = GamePhase::PlayerAction;
    dealer::advance_to_next_playable_hand(&next)
}
