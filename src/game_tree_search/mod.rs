use std::ops::Add;

use rand::rngs::SmallRng;

mod game_trait;

pub use game_trait::*;

mod game_state_wrapper;
pub use game_state_wrapper::*;

use crate::types::game_state::PlayerId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of states visited through game state advancements.
    pub states_visited: u64,
    /// Number of times a position was statically evaluated (zero depth or game over).
    pub evals: u64,
    /// Number of chance nodes expanded.
    pub chance_nodes: u64,
    /// Number of opponent hands sampled.
    pub opponent_samples: u64,
    /// Number of completed MCTS simulations.
    pub simulations: u64,
}

impl SearchCounter {
    pub const ZERO: SearchCounter = SearchCounter {
        states_visited: 0,
        evals: 0,
        chance_nodes: 0,
        opponent_samples: 0,
        simulations: 0,
    };

    pub const EVAL: SearchCounter = SearchCounter {
        states_visited: 1,
        evals: 1,
        ..Self::ZERO
    };

    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.chance_nodes += c.chance_nodes;
        self.opponent_samples += c.opponent_samples;
        self.simulations += c.simulations;
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = if dt_ns == 0 {
            0.0
        } else {
            1e3_f64 * (self.states_visited as f64) / (dt_ns as f64)
        };
        format!(
            "dt={dt_ms:.2}ms rate={rate:.4} Mstates/s states={} evals={} chance={} samples={}",
            self.states_visited, self.evals, self.chance_nodes, self.opponent_samples
        )
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult<G: Game> {
    /// Best action found. `None` if the root has no player to move.
    pub action: Option<G::Action>,
    pub eval: f32,
    /// Value of each root action, in the order they were generated.
    pub action_values: Vec<(G::Action, f32)>,
    pub counter: SearchCounter,
}

impl<G: Game> Default for SearchResult<G> {
    fn default() -> Self {
        SearchResult::new(None, f32::NEG_INFINITY, Default::default())
    }
}

impl<G: Game> SearchResult<G> {
    #[inline]
    pub fn new(action: Option<G::Action>, eval: f32, counter: SearchCounter) -> Self {
        SearchResult {
            action,
            eval,
            action_values: vec![],
            counter,
        }
    }
}

pub trait GameTreeSearch<G: Game> {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> SearchResult<G>;

    /// Random source used to sample hidden information.
    fn rng(&mut self) -> &mut SmallRng;

    /// Perform search on the position with hidden information taken into account.
    fn search_hidden(&mut self, position: &G, maximize_player: PlayerId) -> SearchResult<G> {
        let mut position1 = position.clone();
        position1.hide_private_information(maximize_player.opposite(), self.rng());
        self.search(&position1, maximize_player)
    }
}
