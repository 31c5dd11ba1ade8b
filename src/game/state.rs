//! Single-player session state types.

use crate::betting::{can_afford_double, can_afford_split};
use crate::config::{MAX_HANDS, MAX_SPLIT_HANDS};
use crate::hand::{DealerHand, PlayerAction, PlayerHand, can_split};

/// Phase of the single-player round state machine.
///
/// `Dealing` and `Resolution` are transient: the reducer passes through them
/// within the transition that triggered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Accepting bets for the next hand.
    Betting,
    /// Initial cards are being dealt.
    Dealing,
    /// Waiting for a decision on the active hand.
    PlayerAction,
    /// Dealer plays out their hand.
    DealerPlay,
    /// Outcomes and payouts are being recorded.
    Resolution,
    /// Round finished; awaiting a new round.
    RoundOver,
}

/// An action dispatched against the single-player reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Places a bet on one betting spot.
    PlaceBet {
        /// Betting spot to set.
        hand_index: usize,
        /// Bet amount in dollars.
        amount: f64,
    },
    /// Clears the bet on one betting spot.
    ClearBet {
        /// Betting spot to clear.
        hand_index: usize,
    },
    /// Clears every pending bet.
    ClearAllBets,
    /// Re-places the previous round's bets.
    SameBet {
        /// Bets from the previous round.
        previous_bets: Vec<f64>,
    },
    /// Re-places the previous round's bets, doubled.
    DoublePreviousBet {
        /// Bets from the previous round.
        previous_bets: Vec<f64>,
    },
    /// Deals the initial two rounds of cards.
    Deal,
    /// Draws one card on the active hand.
    Hit,
    /// Stands on the active hand.
    Stand,
    /// Doubles the active hand's bet, draws one card, and stands.
    DoubleDown,
    /// Splits the active hand's pair into two hands.
    Split,
    /// Surrenders the active hand for half the bet.
    Surrender,
    /// Accepts the pending even-money offer.
    AcceptEvenMoney,
    /// Declines the pending even-money offer.
    DeclineEvenMoney,
    /// Plays out the dealer's hand and resolves the round.
    DealerPlay,
    /// Clears the table for the next round.
    NewRound,
}

/// The authoritative state of a single-player session round.
///
/// Exactly one state value is authoritative at a time; every transition
/// replaces it wholesale. Shoe continuity lives in
/// [`ShoeManager`](crate::shoe::ShoeManager), which the host snapshots
/// alongside this state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Current phase.
    pub phase: GamePhase,
    /// Player hands for the round, in table order.
    pub player_hands: Vec<PlayerHand>,
    /// The dealer's hand.
    pub dealer_hand: DealerHand,
    /// Index of the hand currently acting.
    pub active_hand_index: usize,
    /// Chips not currently riding on a bet.
    pub chips: f64,
    /// Pending bets per betting spot (during `Betting`).
    pub bets: Vec<f64>,
    /// Number of simultaneous hands the player plays (1-6).
    pub hands_configuration: usize,
    /// Hands dealt this session.
    pub hand_number: u32,
    /// Whether the cut card was passed and the shoe must be reshuffled
    /// before the next deal.
    pub needs_reshuffle: bool,
    /// Whether an even-money offer is pending.
    pub even_money_offered: bool,
    /// Which hand the even-money offer applies to.
    pub even_money_hand_index: Option<usize>,
}

impl GameState {
    /// Creates an initial `Betting`-phase state.
    ///
    /// `hands_configuration` is clamped to 1 through [`MAX_HANDS`].
    #[must_use]
    pub fn new(chips: f64, hands_configuration: usize) -> Self {
        let hands_configuration = hands_configuration.clamp(1, MAX_HANDS);
        Self {
            phase: GamePhase::Betting,
            player_hands: Vec::new(),
            dealer_hand: DealerHand::new(),
            active_hand_index: 0,
            chips,
            bets: vec![0.0; hands_configuration],
            hands_configuration,
            hand_number: 0,
            needs_reshuffle: false,
            even_money_offered: false,
            even_money_hand_index: None,
        }
    }

    /// Returns the active hand, if any.
    #[must_use]
    pub fn active_hand(&self) -> Option<&PlayerHand> {
        self.player_hands.get(self.active_hand_index)
    }
}

/// Returns the set of player actions legal on the active hand.
///
/// Empty outside `PlayerAction`, and for hands that are already done
/// (stood, bust, blackjack, surrendered, or doubled). Hosts use this to
/// gate UI and validate requests; the reducer silently ignores anything
/// not in this set.
#[must_use]
pub fn available_actions(state: &GameState) -> Vec<PlayerAction> {
    if state.phase != GamePhase::PlayerAction {
        return Vec::new();
    }

    let Some(hand) = state.active_hand() else {
        return Vec::new();
    };

    let total = hand.total();
    if total.is_bust || total.is_blackjack || hand.is_stood || hand.is_surrendered {
        return Vec::new();
    }

    // A doubled hand already received its one card and stands.
    if hand.is_doubled {
        return Vec::new();
    }

    let mut actions = vec![PlayerAction::Hit, PlayerAction::Stand];

    if hand.cards.len() == 2 && can_afford_double(hand.bet, state.chips) {
        actions.push(PlayerAction::Double);
    }

    if hand.cards.len() == 2
        && can_split(&hand.cards)
        && state.player_hands.len() < MAX_SPLIT_HANDS
        && can_afford_split(hand.bet, state.chips)
    {
        actions.push(PlayerAction::Split);
    }

    // Surrender only on the first decision of a non-split hand.
    if hand.cards.len() == 2 && hand.actions.is_empty() && !hand.is_split {
        actions.push(PlayerAction::Surrender);
    }

    actions
}
