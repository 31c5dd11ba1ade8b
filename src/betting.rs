//! Bet validation and payout rules.

use crate::config::{BUY_IN_INCREMENT, MAX_BUY_IN, MIN_BET, MIN_BUY_IN};
use crate::error::{BetError, BuyInError};
use crate::hand::HandOutcome;

/// Validates a single bet against the chip stack and table minimum.
///
/// `existing_bets_total` is the sum of the player's other pending bets;
/// the new bet must fit in what remains.
///
/// # Errors
///
/// Returns an error if the amount is below the minimum, not a whole number,
/// or exceeds the chips left after existing bets.
pub fn validate_bet(
    amount: f64,
    available_chips: f64,
    existing_bets_total: f64,
) -> Result<(), BetError> {
    if amount < MIN_BET {
        return Err(BetError::BelowMinimum(MIN_BET));
    }
    if amount.fract() != 0.0 {
        return Err(BetError::NotWholeNumber);
    }
    if amount > available_chips - existing_bets_total {
        return Err(BetError::InsufficientChips);
    }
    Ok(())
}

/// Validates that every configured hand has a bet before dealing.
///
/// # Errors
///
/// Returns an error if the bet count mismatches the hand configuration, any
/// bet is below the minimum, or the total exceeds available chips.
pub fn validate_all_bets(
    bets: &[f64],
    hands_configuration: usize,
    available_chips: f64,
) -> Result<(), BetError> {
    if bets.len() != hands_configuration {
        return Err(BetError::WrongBetCount {
            expected: hands_configuration,
            got: bets.len(),
        });
    }

    let mut total = 0.0;
    for (i, &bet) in bets.iter().enumerate() {
        if bet < MIN_BET {
            return Err(BetError::HandBelowMinimum(i + 1));
        }
        total += bet;
    }

    if total > available_chips {
        return Err(BetError::TotalExceedsChips);
    }
    Ok(())
}

/// Calculates the net payout for a resolved hand.
///
/// Net, not gross: blackjack pays 1.5x the bet, a win pays the bet, a push
/// pays nothing, a loss costs the bet, and a surrender costs half the bet.
/// The caller returns `bet + payout` to the player to reconstruct the
/// balance, since the bet was charged at deal time.
#[must_use]
pub fn calculate_payout(bet: f64, outcome: HandOutcome) -> f64 {
    match outcome {
        HandOutcome::Blackjack => bet * crate::config::BLACKJACK_PAYOUT,
        HandOutcome::Win => bet,
        HandOutcome::Push => 0.0,
        HandOutcome::Loss => -bet,
        HandOutcome::Surrender => -(bet / 2.0),
    }
}

/// Calculates the even-money payout: flat 1:1 instead of 3:2.
///
/// Offered only when the player has blackjack and the dealer shows an Ace.
#[must_use]
pub const fn calculate_even_money(bet: f64) -> f64 {
    bet
}

/// Validates a session buy-in amount.
///
/// # Errors
///
/// Returns an error if the amount is outside the buy-in range or not a
/// multiple of the increment.
pub fn validate_buy_in(amount: f64) -> Result<(), BuyInError> {
    if amount < MIN_BUY_IN {
        return Err(BuyInError::BelowMinimum(MIN_BUY_IN));
    }
    if amount > MAX_BUY_IN {
        return Err(BuyInError::AboveMaximum(MAX_BUY_IN));
    }
    if amount % BUY_IN_INCREMENT != 0.0 {
        return Err(BuyInError::NotMultipleOfIncrement(BUY_IN_INCREMENT));
    }
    Ok(())
}

/// Returns whether the player can afford to double down.
#[must_use]
pub fn can_afford_double(original_bet: f64, available_chips: f64) -> bool {
    available_chips >= original_bet
}

/// Returns whether the player can afford to split.
#[must_use]
pub fn can_afford_split(original_bet: f64, available_chips: f64) -> bool {
    available_chips >= original_bet
}
