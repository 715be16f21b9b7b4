use santase_sim::rand::{rngs::SmallRng, SeedableRng};

use crate::{Game, GameTreeSearch, SearchResult};
use santase_sim::prelude::PlayerId;

pub mod search;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectiminimaxConfig {
    /// Ply budget. Chance steps count as one ply.
    pub max_depth: u8,
    /// Opponent hands sampled at each opponent decision.
    pub samples_per_opponent_decision: u32,
    /// Evaluate the top-level candidates in parallel.
    pub parallel: bool,
    pub seed: u64,
}

impl ExpectiminimaxConfig {
    pub const DEFAULT: Self = Self {
        max_depth: 40,
        samples_per_opponent_decision: 100,
        parallel: false,
        seed: 0,
    };

    pub fn new(max_depth: u8, samples_per_opponent_decision: u32) -> Self {
        Self {
            max_depth,
            samples_per_opponent_decision,
            ..Self::DEFAULT
        }
    }
}

impl Default for ExpectiminimaxConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Expectiminimax over card plays with chance nodes for the draw and
/// sampled hands at the opponent's decisions.
#[derive(Debug, Clone)]
pub struct Expectiminimax {
    pub config: ExpectiminimaxConfig,
    rng: SmallRng,
}

impl Expectiminimax {
    pub fn new(config: ExpectiminimaxConfig) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }
}

impl Default for Expectiminimax {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<G: Game> GameTreeSearch<G> for Expectiminimax {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> SearchResult<G> {
        search::search_root(position, maximize_player, &self.config, &mut self.rng)
    }

    #[inline]
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
