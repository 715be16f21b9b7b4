//! Trick-taking rules shared by the dispatcher, the strategies and the search.
//!
//! `legal_moves` and `trick_winner` depend only on their arguments, so they can be
//! evaluated for hypothetical hands during search.

use std::{fmt::Display, str::FromStr};

use smallvec::SmallVec;

use crate::types::{
    card::{Card, Suit},
    game_state::{GameState, Phase, PlayerId},
};

pub type CardList = SmallVec<[Card; 8]>;

/// Which side of a trick takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrickWinner {
    Leader,
    Follower,
}

impl TrickWinner {
    #[inline]
    pub fn player(self, leader: PlayerId) -> PlayerId {
        match self {
            TrickWinner::Leader => leader,
            TrickWinner::Follower => leader.opposite(),
        }
    }
}

/// Decide a trick between the `leader` card and the `follower` card.
///
/// A trump beats any non-trump. A follower card that neither follows suit nor trumps
/// loses. Otherwise the higher card point value wins and equal values go to the leader.
pub fn trick_winner(leader: Card, follower: Card, trump: Suit) -> TrickWinner {
    let leader_trump = leader.is_trump(trump);
    let follower_trump = follower.is_trump(trump);
    if leader_trump != follower_trump {
        return if follower_trump {
            TrickWinner::Follower
        } else {
            TrickWinner::Leader
        };
    }
    if !leader_trump && follower.suit != leader.suit {
        return TrickWinner::Leader;
    }
    if follower.points() > leader.points() {
        TrickWinner::Follower
    } else {
        TrickWinner::Leader
    }
}

/// Returns true if `follower` takes a trick led by `leader`.
#[inline]
pub fn beats(follower: Card, leader: Card, trump: Suit) -> bool {
    trick_winner(leader, follower, trump) == TrickWinner::Follower
}

/// Cards in `hand` that may be played, in hand order.
///
/// When leading (`led_suit` is `None`) the whole hand is legal. When following, a card
/// of the led suit must be played if there is one, otherwise a trump if there is one,
/// otherwise any card.
pub fn legal_moves(hand: &[Card], led_suit: Option<Suit>, trump: Suit) -> CardList {
    let Some(led) = led_suit else {
        return hand.iter().copied().collect();
    };
    let same_suit: CardList = hand.iter().copied().filter(|c| c.suit == led).collect();
    if !same_suit.is_empty() {
        return same_suit;
    }
    let trumps: CardList = hand.iter().copied().filter(|c| c.suit == trump).collect();
    if !trumps.is_empty() {
        return trumps;
    }
    hand.iter().copied().collect()
}

/// Whether following suit is enforced while the stock is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegalityMode {
    /// Always apply the follow-suit rule.
    #[default]
    Strict,
    /// Any card may be played while the stock is open.
    PhaseAware,
}

impl Display for LegalityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegalityMode::Strict => f.write_str("strict"),
            LegalityMode::PhaseAware => f.write_str("phase-aware"),
        }
    }
}

impl FromStr for LegalityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(LegalityMode::Strict),
            "phase-aware" | "phase_aware" | "phaseaware" | "relaxed" => Ok(LegalityMode::PhaseAware),
            _ => Err(format!("Invalid legality mode: {s}")),
        }
    }
}

pub fn legal_moves_in_phase(
    hand: &[Card],
    led_suit: Option<Suit>,
    trump: Suit,
    phase: Phase,
    mode: LegalityMode,
) -> CardList {
    match mode {
        LegalityMode::PhaseAware if phase.is_open() => hand.iter().copied().collect(),
        _ => legal_moves(hand, led_suit, trump),
    }
}

impl GameState {
    /// Legal cards for `player_id` in the current trick. Empty if it is not their turn to play.
    pub fn legal_cards(&self, player_id: PlayerId, mode: LegalityMode) -> CardList {
        let player = self.player(player_id);
        if player.played.is_some() {
            return CardList::new();
        }
        let led_suit = if player_id == self.leader {
            None
        } else {
            match self.led_suit() {
                Some(s) => Some(s),
                None => return CardList::new(),
            }
        };
        legal_moves_in_phase(player.hand.as_slice(), led_suit, self.trump_suit, self.phase, mode)
    }

    /// Whether `card` may be played by `player_id` under the rules of the current phase.
    #[inline]
    pub fn is_legal(&self, player_id: PlayerId, card: Card) -> bool {
        self.legal_cards(player_id, LegalityMode::PhaseAware).contains(&card)
    }
}
