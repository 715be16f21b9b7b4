#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

pub use santase_sim::game_tree_search::*;

/// Implementation for Expectiminimax search with sampled opponent hands
pub mod expectiminimax;

/// Implementation for Monte-Carlo Tree Search
pub mod mcts;

/// Adapter from game tree search to a card-playing strategy
pub mod strategy;

pub use expectiminimax::{Expectiminimax, ExpectiminimaxConfig};
pub use mcts::{MCTSConfig, MCTS};
pub use strategy::SearchStrategy;

#[cfg(test)]
pub(crate) mod test_positions {
    use santase_sim::prelude::*;

    pub const P1: PlayerId = PlayerId::PlayerFirst;

    pub fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    /// Two tricks left, stock exhausted, trumps are spades, and the cards of the second side are revealed.
    ///
    /// Leading AH wins the round 22 to 21. Leading 10H loses it 21 to 22.
    pub fn two_trick_endgame() -> GameState {
        let second_hand: Hand = [c("KH"), c("AS")].into();
        let revealed = ByPlayer::new(CardSet::new(), second_hand.to_card_set());
        GameStateBuilder::default()
            .with_hands([c("10H"), c("AH")], second_hand)
            .with_trump_suit(Suit::Spades)
            .with_points(ByPlayer::new(7, 0))
            .with_revealed(revealed)
            .build()
    }

    pub fn dealt(seed: u64) -> GameState {
        use santase_sim::rand::{rngs::SmallRng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(seed);
        GameStateBuilder::new_dealt(P1, &mut rng).build()
    }

    pub fn play_card(card: &str) -> Input {
        Input::FromPlayer(P1, PlayerAction::PlayCard(c(card)))
    }
}
