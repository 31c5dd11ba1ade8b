//! Hand evaluation, outcomes, and player/dealer hand representations.

use crate::card::Card;

/// The evaluated totals of a hand.
///
/// Derived from a card list on demand; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandTotal {
    /// Total after demoting Aces from 11 to 1 as needed to avoid busting.
    pub hard: u8,
    /// Total with every Ace counted as 11.
    pub soft: u8,
    /// Best valid total. Demotion always minimizes bust risk, so this equals
    /// `hard`; if even that exceeds 21 the hand is bust.
    pub best: u8,
    /// Whether at least one Ace still counts as 11 after demotion.
    pub is_soft: bool,
    /// Whether the best total exceeds 21.
    pub is_bust: bool,
    /// Natural 21: exactly two cards and not the product of a split.
    pub is_blackjack: bool,
}

/// Evaluates a hand of cards.
///
/// Aces start at 11 and are demoted to 1 one at a time while the total
/// exceeds 21. A two-card 21 is a blackjack unless the hand came from a
/// split.
#[must_use]
pub fn evaluate(cards: &[Card], from_split: bool) -> HandTotal {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.rank.value());
    }

    let soft = total;
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    let hard = total;
    let is_soft = aces > 0;
    let is_bust = hard > 21;
    let is_blackjack = cards.len() == 2 && hard == 21 && !from_split;

    HandTotal {
        hard,
        soft,
        best: hard,
        is_soft,
        is_bust,
        is_blackjack,
    }
}

/// Returns whether a hand can be split: exactly two cards of equal value.
///
/// Value equality, not rank equality; a Ten and a King qualify.
#[must_use]
pub fn can_split(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].rank.value() == cards[1].rank.value()
}

/// Returns whether the dealer's up card (first card) is an Ace.
#[must_use]
pub fn dealer_shows_ace(dealer_cards: &[Card]) -> bool {
    dealer_cards.first().is_some_and(|c| c.rank.is_ace())
}

/// Returns whether the dealer's up card (first card) is a ten-value.
#[must_use]
pub fn dealer_shows_ten(dealer_cards: &[Card]) -> bool {
    dealer_cards.first().is_some_and(|c| c.rank.value() == 10)
}

/// Returns whether the dealer must hit: below 17, or exactly soft 17.
///
/// Never hits a busted hand.
#[must_use]
pub fn should_dealer_hit(dealer_cards: &[Card]) -> bool {
    let total = evaluate(dealer_cards, false);
    if total.is_bust {
        return false;
    }
    total.best < 17 || (total.best == 17 && total.is_soft)
}

/// Result of a hand at resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Player wins, paid 1:1.
    Win,
    /// Player loses the bet.
    Loss,
    /// Tie; the bet is returned.
    Push,
    /// Natural blackjack, paid 3:2.
    Blackjack,
    /// Player surrendered; half the bet is returned.
    Surrender,
}

/// Determines the outcome of a player hand against the dealer.
///
/// Precedence: surrender, player bust, mutual blackjack push, player
/// blackjack, dealer bust, then total comparison.
#[must_use]
pub fn determine_outcome(
    player: &HandTotal,
    dealer: &HandTotal,
    is_surrendered: bool,
) -> HandOutcome {
    if is_surrendered {
        return HandOutcome::Surrender;
    }
    if player.is_bust {
        return HandOutcome::Loss;
    }
    if player.is_blackjack && dealer.is_blackjack {
        return HandOutcome::Push;
    }
    if player.is_blackjack {
        return HandOutcome::Blackjack;
    }
    if dealer.is_bust || player.best > dealer.best {
        return HandOutcome::Win;
    }
    if player.best == dealer.best {
        return HandOutcome::Push;
    }
    HandOutcome::Loss
}

/// An action a player may take on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Draw one card.
    Hit,
    /// End the turn on this hand.
    Stand,
    /// Double the bet, draw exactly one card, and stand.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Forfeit half the bet and end the hand.
    Surrender,
}

/// A single player hand within a round.
///
/// Created empty with a bet at deal time and updated copy-on-write by the
/// engines. `outcome` and `payout` are set exactly once, at resolution, and
/// never overwritten.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerHand {
    /// Cards in the hand, in dealt order.
    pub cards: Vec<Card>,
    /// Bet riding on this hand (doubled in place by a double down).
    pub bet: f64,
    /// Log of actions taken on this hand.
    pub actions: Vec<PlayerAction>,
    /// Whether the hand was doubled down.
    pub is_doubled: bool,
    /// Whether the hand was created by a split.
    pub is_split: bool,
    /// Whether the hand was surrendered.
    pub is_surrendered: bool,
    /// Whether the player has stood on this hand.
    pub is_stood: bool,
    /// Resolution outcome; `None` until resolved.
    pub outcome: Option<HandOutcome>,
    /// Net chip change set at resolution (positive = profit).
    pub payout: f64,
}

impl PlayerHand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: f64) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            actions: Vec::new(),
            is_doubled: false,
            is_split: false,
            is_surrendered: false,
            is_stood: false,
            outcome: None,
            payout: 0.0,
        }
    }

    /// Evaluates the hand, honoring its split origin.
    #[must_use]
    pub fn total(&self) -> HandTotal {
        evaluate(&self.cards, self.is_split)
    }

    /// Returns whether the hand has a recorded outcome.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }
}

/// The dealer's hand.
///
/// The second card is conceptually face-down until the hole card is
/// revealed by a blackjack check, even-money settlement, or dealer play.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealerHand {
    /// Cards in the hand; the first card is the up card.
    pub cards: Vec<Card>,
    /// Whether the hole card has been revealed.
    pub hole_card_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_card_revealed: false,
        }
    }

    /// Returns the up card, if dealt.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Evaluates the dealer's full hand.
    #[must_use]
    pub fn total(&self) -> HandTotal {
        evaluate(&self.cards, false)
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_card_revealed = true;
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_card_revealed = false;
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
