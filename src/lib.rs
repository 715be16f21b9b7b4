#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Cards, hands, the round state and the event log.
pub mod types;

/// Trick-taking rules: legal moves and trick winners.
pub mod rules;

pub(crate) mod dispatcher;
pub mod dispatcher_ops;

/// Builder for `GameState`s
pub mod builder;

/// Round and match scoring
pub mod scoring;

/// Sampling of hidden opponent hands
pub mod sampling;

/// Generic interfaces between the search engines and the game
pub mod game_tree_search;

pub mod strategy;

pub mod driver;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` create
pub use rand;

/// Re-exports the `enum_map` crate
pub use enum_map;

/// Re-exports the `thiserror` crate
pub use thiserror;

/// Re-exports the `enumset` crate
pub use enumset;

/// Re-exports the `log` crate
pub use log;

pub mod prelude {
    pub use crate::builder::*;
    pub use crate::dispatcher::ActionList;
    pub use crate::dispatcher_ops::{DispatchError, DispatchResult, NondetRequest};
    pub use crate::driver::{play_round, RoundError};
    pub use crate::game_tree_search::{Game, GameStateWrapper, GameTreeSearch, SearchCounter, SearchResult};
    pub use crate::rules::{legal_moves, legal_moves_in_phase, trick_winner, LegalityMode, TrickWinner};
    pub use crate::sampling::sample_possible_hand;
    pub use crate::scoring::{MatchScore, RoundOutcome};
    pub use crate::strategy::{CardMemory, JustRandom, Strategy, StrategyError, TrickBasedGreedy};
    pub use crate::types::by_player::ByPlayer;
    pub use crate::types::card::{Card, CardSet, Rank, Suit};
    pub use crate::types::game_state::{GameState, Phase, PlayerId, PlayerState, Step, Stock};
    pub use crate::types::hand::Hand;
    pub use crate::types::input::{Input, NondetResult, PlayerAction};
    pub use crate::types::logging::{Event, EventLog};

    // Modules
    pub use crate::types::logging;
}

#[cfg(test)]
mod tests;
