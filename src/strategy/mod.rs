//! Move-selection strategies and the interface the round driver uses to consult them.

use crate::types::{card::Card, game_state::GameState, hand::Hand, logging::Event};

mod greedy;
mod memory;
mod random;

pub use greedy::*;
pub use memory::*;
pub use random::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("cannot choose a card from an empty hand")]
    EmptyHand,
}

/// A computer player.
///
/// `play` is called when the acting side (`state.to_move_player()`) must play a card
/// holding `hand`. Implementations return a card of `hand` and never mutate it.
pub trait Strategy: Send {
    fn name(&self) -> &'static str;

    fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError>;

    /// Whether to close the game before leading.
    ///
    /// Not implemented by any strategy: always returns false.
    fn should_close_game(&mut self, _state: &GameState, _hand: &Hand) -> bool {
        false
    }

    /// Receive a public event of the round, such as a marriage or trump exchange.
    fn observe(&mut self, _event: &Event) {}
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError> {
        (**self).play(state, hand)
    }

    fn should_close_game(&mut self, state: &GameState, hand: &Hand) -> bool {
        (**self).should_close_game(state, hand)
    }

    fn observe(&mut self, event: &Event) {
        (**self).observe(event)
    }
}

/// Led suit as seen by the acting side: `None` when it is leading.
pub(crate) fn led_suit_for_actor(state: &GameState) -> Option<crate::types::card::Suit> {
    match state.to_move_player() {
        Some(p) if p == state.leader => None,
        _ => state.led_suit(),
    }
}
