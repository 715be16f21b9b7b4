use log::warn;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use super::{led_suit_for_actor, CardMemory, Strategy, StrategyError};
use crate::{
    rules::legal_moves,
    types::{card::Card, game_state::GameState, hand::Hand, logging::Event},
};

/// Plays a uniformly random legal card. Keeps a memory of revealed cards that it does not use.
#[derive(Debug, Clone)]
pub struct JustRandom {
    rng: SmallRng,
    pub memory: Option<CardMemory>,
}

impl JustRandom {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng, memory: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn with_memory(self) -> Self {
        Self {
            memory: Some(CardMemory::new()),
            ..self
        }
    }
}

impl Strategy for JustRandom {
    fn name(&self) -> &'static str {
        "random"
    }

    fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError> {
        if hand.is_empty() {
            return Err(StrategyError::EmptyHand);
        }
        let moves = legal_moves(hand.as_slice(), led_suit_for_actor(state), state.trump_suit);
        let choices = if moves.is_empty() {
            warn!("JustRandom: no legal moves, choosing from the whole hand");
            hand.as_slice()
        } else {
            &moves[..]
        };
        choices.choose(&mut self.rng).copied().ok_or(StrategyError::EmptyHand)
    }

    fn observe(&mut self, event: &Event) {
        if let Some(memory) = &mut self.memory {
            memory.observe(event);
        }
    }
}
