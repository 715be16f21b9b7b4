use std::cmp::Reverse;

use log::warn;

use super::{led_suit_for_actor, Strategy, StrategyError};
use crate::{
    rules::{beats, legal_moves},
    types::{card::{Card, Suit}, game_state::GameState, hand::Hand},
};

/// Plays each trick on its own merits.
///
/// When following, takes the trick with the highest-valued winning card, or throws the
/// lowest-valued card if no card wins. When leading, plays the median card by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrickBasedGreedy;

impl TrickBasedGreedy {
    pub fn choose_follow(leader_card: Card, moves: &[Card], trump: Suit) -> Option<Card> {
        let winning = moves
            .iter()
            .copied()
            .filter(|&c| beats(c, leader_card, trump))
            .min_by_key(|c| Reverse(c.points()));
        winning.or_else(|| moves.iter().copied().min_by_key(|c| c.points()))
    }

    pub fn choose_lead(hand: &[Card]) -> Option<Card> {
        let mut sorted = hand.to_vec();
        sorted.sort_by_key(|c| c.points());
        sorted.get(sorted.len() / 2).copied()
    }
}

impl Strategy for TrickBasedGreedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError> {
        if hand.is_empty() {
            return Err(StrategyError::EmptyHand);
        }
        let chosen = match (led_suit_for_actor(state), state.leader_card()) {
            (Some(led), Some(leader_card)) => {
                let moves = legal_moves(hand.as_slice(), Some(led), state.trump_suit);
                if moves.is_empty() {
                    warn!("TrickBasedGreedy: no legal moves, choosing from the whole hand");
                    Self::choose_follow(leader_card, hand.as_slice(), state.trump_suit)
                } else {
                    Self::choose_follow(leader_card, &moves, state.trump_suit)
                }
            }
            _ => Self::choose_lead(hand.as_slice()),
        };
        chosen.ok_or(StrategyError::EmptyHand)
    }
}
