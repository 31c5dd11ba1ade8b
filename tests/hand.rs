//! Hand evaluation, outcome, and betting-rule tests.

#![allow(clippy::float_cmp)]

use pitboss::betting::{
    calculate_even_money, calculate_payout, validate_all_bets, validate_bet, validate_buy_in,
};
use pitboss::card::{Card, RANKS, Rank, Suit};
use pitboss::error::{BetError, BuyInError};
use pitboss::hand::{
    HandOutcome, HandTotal, can_split, dealer_shows_ace, dealer_shows_ten, determine_outcome,
    evaluate, should_dealer_hit,
};
use proptest::prelude::*;

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Hearts, rank)
}

fn total(best: u8) -> HandTotal {
    HandTotal {
        hard: best,
        soft: best,
        best,
        is_soft: false,
        is_bust: best > 21,
        is_blackjack: false,
    }
}

fn blackjack_total() -> HandTotal {
    HandTotal {
        hard: 21,
        soft: 21,
        best: 21,
        is_soft: true,
        is_bust: false,
        is_blackjack: true,
    }
}

#[test]
fn ace_demotion() {
    let soft = evaluate(&[card(Rank::Ace), card(Rank::Six)], false);
    assert_eq!(soft.best, 17);
    assert!(soft.is_soft);
    assert!(!soft.is_bust);

    let demoted = evaluate(&[card(Rank::Ace), card(Rank::Six), card(Rank::Eight)], false);
    assert_eq!(demoted.best, 15);
    assert!(!demoted.is_soft);

    // Three aces demote; the fourth stays at 11.
    let four_aces = evaluate(&[card(Rank::Ace); 4], false);
    assert_eq!(four_aces.best, 14);
    assert!(four_aces.is_soft);
}

#[test]
fn bust_detection() {
    let bust = evaluate(&[card(Rank::Ten), card(Rank::Nine), card(Rank::Five)], false);
    assert_eq!(bust.best, 24);
    assert!(bust.is_bust);
}

#[test]
fn blackjack_requires_two_cards_and_no_split() {
    let natural = evaluate(&[card(Rank::Ace), card(Rank::King)], false);
    assert!(natural.is_blackjack);

    let three_card = evaluate(&[card(Rank::Seven); 3], false);
    assert_eq!(three_card.best, 21);
    assert!(!three_card.is_blackjack);

    let from_split = evaluate(&[card(Rank::Ace), card(Rank::King)], true);
    assert_eq!(from_split.best, 21);
    assert!(!from_split.is_blackjack);
}

#[test]
fn split_is_by_value_not_rank() {
    assert!(can_split(&[card(Rank::Ten), card(Rank::King)]));
    assert!(can_split(&[card(Rank::Ace), card(Rank::Ace)]));
    assert!(!can_split(&[card(Rank::Ten), card(Rank::Nine)]));
    assert!(!can_split(&[card(Rank::Eight); 3]));
}

#[test]
fn dealer_up_card_checks() {
    assert!(dealer_shows_ace(&[card(Rank::Ace), card(Rank::Five)]));
    assert!(!dealer_shows_ace(&[card(Rank::Five), card(Rank::Ace)]));
    assert!(dealer_shows_ten(&[card(Rank::Queen), card(Rank::Two)]));
    assert!(!dealer_shows_ten(&[card(Rank::Nine), card(Rank::Ten)]));
}

#[test]
fn dealer_hits_soft_seventeen() {
    assert!(should_dealer_hit(&[card(Rank::Ten), card(Rank::Six)]));
    assert!(should_dealer_hit(&[card(Rank::Ace), card(Rank::Six)]));
    assert!(!should_dealer_hit(&[card(Rank::Ten), card(Rank::Seven)]));
    assert!(!should_dealer_hit(&[card(Rank::Ace), card(Rank::Seven)]));
    assert!(!should_dealer_hit(&[
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Five)
    ]));
}

#[test]
fn outcome_precedence() {
    // Surrender beats everything, including a bust on either side.
    assert_eq!(
        determine_outcome(&total(23), &total(17), true),
        HandOutcome::Surrender
    );
    // Player bust loses even against a dealer bust.
    assert_eq!(
        determine_outcome(&total(22), &total(25), false),
        HandOutcome::Loss
    );
    assert_eq!(
        determine_outcome(&blackjack_total(), &blackjack_total(), false),
        HandOutcome::Push
    );
    // Blackjack beats a non-natural dealer 21.
    assert_eq!(
        determine_outcome(&blackjack_total(), &total(21), false),
        HandOutcome::Blackjack
    );
    assert_eq!(
        determine_outcome(&total(12), &total(22), false),
        HandOutcome::Win
    );
    assert_eq!(
        determine_outcome(&total(18), &total(17), false),
        HandOutcome::Win
    );
    assert_eq!(
        determine_outcome(&total(17), &total(17), false),
        HandOutcome::Push
    );
    assert_eq!(
        determine_outcome(&total(16), &total(17), false),
        HandOutcome::Loss
    );
}

#[test]
fn payouts_are_net_of_the_bet() {
    assert_eq!(calculate_payout(100.0, HandOutcome::Blackjack), 150.0);
    assert_eq!(calculate_payout(100.0, HandOutcome::Win), 100.0);
    assert_eq!(calculate_payout(100.0, HandOutcome::Push), 0.0);
    assert_eq!(calculate_payout(100.0, HandOutcome::Loss), -100.0);
    assert_eq!(calculate_payout(100.0, HandOutcome::Surrender), -50.0);

    // The bet is charged up front, so the player's return is bet + payout.
    assert_eq!(100.0 + calculate_payout(100.0, HandOutcome::Blackjack), 250.0);
    assert_eq!(100.0 + calculate_payout(100.0, HandOutcome::Surrender), 50.0);

    assert_eq!(calculate_even_money(100.0), 100.0);
}

#[test]
fn bet_validation() {
    assert_eq!(
        validate_bet(0.5, 1000.0, 0.0),
        Err(BetError::BelowMinimum(1.0))
    );
    assert_eq!(validate_bet(10.25, 1000.0, 0.0), Err(BetError::NotWholeNumber));
    assert_eq!(
        validate_bet(600.0, 1000.0, 500.0),
        Err(BetError::InsufficientChips)
    );
    assert_eq!(validate_bet(500.0, 1000.0, 500.0), Ok(()));
}

#[test]
fn all_bets_validation() {
    assert_eq!(
        validate_all_bets(&[100.0], 2, 1000.0),
        Err(BetError::WrongBetCount {
            expected: 2,
            got: 1
        })
    );
    assert_eq!(
        validate_all_bets(&[100.0, 0.0], 2, 1000.0),
        Err(BetError::HandBelowMinimum(2))
    );
    assert_eq!(
        validate_all_bets(&[600.0, 600.0], 2, 1000.0),
        Err(BetError::TotalExceedsChips)
    );
    assert_eq!(validate_all_bets(&[500.0, 500.0], 2, 1000.0), Ok(()));
}

proptest! {
    /// For any dealer hand: hit everything below 17 and exactly soft 17,
    /// stand on every other 17-or-better, and never hit a bust.
    #[test]
    fn dealer_stands_on_seventeen_except_soft(
        ranks in proptest::collection::vec(0usize..13, 2..8),
    ) {
        let cards: Vec<Card> = ranks.iter().map(|&i| card(RANKS[i])).collect();
        let total = evaluate(&cards, false);

        if total.is_bust {
            prop_assert!(!should_dealer_hit(&cards));
        } else if total.best > 17 || (total.best == 17 && !total.is_soft) {
            prop_assert!(!should_dealer_hit(&cards));
        } else if total.best < 17 {
            prop_assert!(should_dealer_hit(&cards));
        } else {
            // Exactly soft 17.
            prop_assert!(should_dealer_hit(&cards));
        }
    }
}

#[test]
fn buy_in_validation() {
    assert_eq!(validate_buy_in(50.0), Err(BuyInError::BelowMinimum(100.0)));
    assert_eq!(
        validate_buy_in(20_000.0),
        Err(BuyInError::AboveMaximum(10_000.0))
    );
    assert_eq!(
        validate_buy_in(150.0),
        Err(BuyInError::NotMultipleOfIncrement(100.0))
    );
    assert_eq!(validate_buy_in(500.0), Ok(()));
    assert_eq!(validate_buy_in(100.0), Ok(()));
    assert_eq!(validate_buy_in(10_000.0), Ok(()));
}
