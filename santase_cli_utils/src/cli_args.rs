use std::{fmt::Display, str::FromStr};
use structopt::StructOpt;

use santase_search::{Expectiminimax, ExpectiminimaxConfig, MCTSConfig, SearchStrategy, MCTS};
use santase_sim::{
    game_tree_search::GameStateWrapper,
    rules::LegalityMode,
    strategy::{JustRandom, Strategy, TrickBasedGreedy},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Random,
    Greedy,
    Expectiminimax,
    MCTS,
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "greedy" => Ok(Self::Greedy),
            "expectiminimax" | "minimax" => Ok(Self::Expectiminimax),
            "mcts" => Ok(Self::MCTS),
            _ => Err(format!("unknown algorithm: {s} (expected random|greedy|expectiminimax|mcts)")),
        }
    }
}

impl Display for SearchAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
            Self::Expectiminimax => "expectiminimax",
            Self::MCTS => "mcts",
        })
    }
}

#[derive(Debug, StructOpt, Clone, Default)]
pub struct SearchConfig {
    #[structopt(
        short = "A",
        long = "--algorithm",
        help = "random|greedy|expectiminimax|mcts: strategy used to choose cards."
    )]
    pub algorithm: Option<SearchAlgorithm>,

    #[structopt(short = "d", long = "--depth", help = "Expectiminimax: search depth in plies")]
    pub search_depth: Option<u8>,

    #[structopt(short = "n", long = "--samples", help = "Expectiminimax: opponent hands sampled per decision")]
    pub samples: Option<u32>,

    #[structopt(short = "I", long = "--mcts-simulations", help = "MCTS: simulations per move")]
    pub mcts_simulations: Option<u32>,

    #[structopt(long = "--mcts-rollout-depth", help = "MCTS: max card plays per rollout")]
    pub mcts_rollout_depth: Option<u32>,

    #[structopt(
        short = "C",
        long = "--mcts-c",
        help = "MCTS: exploration constant. Higher value promotes wider search."
    )]
    pub mcts_c: Option<f32>,

    #[structopt(
        long = "--legality",
        help = "strict|phase-aware: following rule assumed inside the search"
    )]
    pub legality: Option<LegalityMode>,

    #[structopt(long = "--parallel", help = "Expectiminimax: evaluate the candidate moves in parallel")]
    pub parallel: bool,

    #[structopt(short = "D", long = "--debug", help = "Print debug info")]
    pub debug: bool,
}

impl SearchConfig {
    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm.unwrap_or(SearchAlgorithm::Expectiminimax)
    }

    pub fn expectiminimax_config(&self, seed: u64) -> ExpectiminimaxConfig {
        let default = ExpectiminimaxConfig::DEFAULT;
        ExpectiminimaxConfig {
            max_depth: self.search_depth.unwrap_or(default.max_depth),
            samples_per_opponent_decision: self.samples.unwrap_or(default.samples_per_opponent_decision),
            parallel: self.parallel,
            seed,
        }
    }

    pub fn mcts_config(&self, seed: u64) -> MCTSConfig {
        let default = MCTSConfig::DEFAULT;
        MCTSConfig {
            num_simulations: self.mcts_simulations.unwrap_or(default.num_simulations),
            rollout_depth: self.mcts_rollout_depth.unwrap_or(default.rollout_depth),
            exploration: self.mcts_c.unwrap_or(default.exploration),
            seed,
            debug: self.debug,
        }
    }

    /// The strategy for these options. `seed` seeds every random choice it makes.
    pub fn make_strategy(&self, seed: u64) -> Box<dyn Strategy> {
        let legality = self.legality.unwrap_or_default();
        match self.algorithm() {
            SearchAlgorithm::Random => Box::new(JustRandom::seeded(seed).with_memory()),
            SearchAlgorithm::Greedy => Box::new(TrickBasedGreedy),
            SearchAlgorithm::Expectiminimax => Box::new(SearchStrategy::new(
                "expectiminimax",
                Expectiminimax::new(self.expectiminimax_config(seed)),
                legality,
            )),
            SearchAlgorithm::MCTS => Box::new(SearchStrategy::new(
                "mcts",
                MCTS::<GameStateWrapper>::new(self.mcts_config(seed)),
                legality,
            )),
        }
    }

    /// The same parameters with another algorithm.
    pub fn with_algorithm(&self, algorithm: SearchAlgorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SearchConfig {
        SearchConfig::from_iter_safe(std::iter::once("test").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_expectiminimax_options() {
        let config = parse(&["-A", "expectiminimax", "-d", "6", "-n", "8", "--legality", "phase-aware"]);
        assert_eq!(SearchAlgorithm::Expectiminimax, config.algorithm());
        let emm = config.expectiminimax_config(3);
        assert_eq!(6, emm.max_depth);
        assert_eq!(8, emm.samples_per_opponent_decision);
        assert_eq!(3, emm.seed);
        assert!(!emm.parallel);
        assert_eq!(Some(LegalityMode::PhaseAware), config.legality);
    }

    #[test]
    fn test_mcts_defaults() {
        let config = parse(&["--algorithm", "MCTS", "--mcts-simulations", "50"]);
        let mcts = config.mcts_config(0);
        assert_eq!(50, mcts.num_simulations);
        assert_eq!(MCTSConfig::DEFAULT.rollout_depth, mcts.rollout_depth);
        assert_eq!(std::f32::consts::SQRT_2, mcts.exploration);
        assert_eq!("mcts", config.make_strategy(0).name());
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!("alphabeta".parse::<SearchAlgorithm>().is_err());
        assert!(SearchConfig::from_iter_safe(["test", "-A", "alphabeta"]).is_err());
    }

    #[test]
    fn test_make_strategy_names() {
        let config = SearchConfig::default();
        for algorithm in [
            SearchAlgorithm::Random,
            SearchAlgorithm::Greedy,
            SearchAlgorithm::Expectiminimax,
            SearchAlgorithm::MCTS,
        ] {
            let strategy = config.with_algorithm(algorithm).make_strategy(1);
            assert_eq!(algorithm.to_string(), strategy.name());
        }
    }
}
