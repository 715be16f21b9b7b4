use instant::Instant;
use log::info;
use structopt::StructOpt;

use santase_cli_utils::{
    cli_args::{SearchAlgorithm, SearchConfig},
    logging::init_logging,
};
use santase_search::{Expectiminimax, GameTreeSearch, SearchResult, MCTS};
use santase_sim::{
    prelude::*,
    rand::{rngs::SmallRng, SeedableRng},
    scoring::MATCH_TARGET,
};

mod match_round;
use match_round::*;

#[derive(Debug, StructOpt, Clone)]
pub struct SearchOpts {
    #[structopt(short = "S", long = "--seed", help = "Random seed for the deals and the strategies")]
    pub seed: Option<u64>,

    #[structopt(flatten)]
    pub search: SearchConfig,
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Santase (66) strategy benchmark")]
pub enum BenchmarkOpts {
    #[structopt(help = "Measure the score of a strategy against an opponent strategy.")]
    Match {
        #[structopt(long = "--parallel-games", short = "-P", help = "Play the games in parallel")]
        parallel_games: bool,

        #[structopt(long, help = "Number of single rounds to play")]
        rounds: Option<u32>,

        #[structopt(long, help = "Play this many matches to 11 game points instead of single rounds")]
        matches: Option<u32>,

        #[structopt(long, help = "Algorithm of the opponent, greedy by default")]
        opponent: Option<SearchAlgorithm>,

        #[structopt(flatten)]
        search: SearchOpts,
    },
    #[structopt(help = "Play one round against the opponent and print its event log.")]
    Trace {
        #[structopt(long, help = "Algorithm of the opponent, greedy by default")]
        opponent: Option<SearchAlgorithm>,

        #[structopt(flatten)]
        search: SearchOpts,
    },
    #[structopt(help = "Evaluate the first move of a dealt position.")]
    Evaluate {
        #[structopt(long, help = "Print the position as JSON")]
        json: bool,

        #[structopt(flatten)]
        search: SearchOpts,
    },
}

impl BenchmarkOpts {
    fn search(&self) -> &SearchOpts {
        match self {
            BenchmarkOpts::Match { search, .. } => search,
            BenchmarkOpts::Trace { search, .. } => search,
            BenchmarkOpts::Evaluate { search, .. } => search,
        }
    }
}

/// Seat `PlayerFirst` is the tested strategy, `PlayerSecond` the opponent.
fn strategy_factory(tested: SearchConfig, opponent: SearchConfig) -> Box<StrategyFactory> {
    Box::new(move |role: PlayerId, seed: u64| match role {
        PlayerId::PlayerFirst => tested.make_strategy(seed),
        PlayerId::PlayerSecond => opponent.make_strategy(seed ^ 0x5eed),
    })
}

fn evaluate(opts: &SearchOpts, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let seed = opts.seed.unwrap_or_default();
    let mut rng = SmallRng::seed_from_u64(seed);
    let state = GameStateBuilder::new_dealt(PlayerId::PlayerFirst, &mut rng).build();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    let legality = opts.search.legality.unwrap_or_default();
    let position = GameStateWrapper::new(state.clone(), legality);
    let p = PlayerId::PlayerFirst;
    let t0 = Instant::now();
    let res: SearchResult<GameStateWrapper> = match opts.search.algorithm() {
        SearchAlgorithm::Expectiminimax => {
            Expectiminimax::new(opts.search.expectiminimax_config(seed)).search_hidden(&position, p)
        }
        SearchAlgorithm::MCTS => MCTS::<GameStateWrapper>::new(opts.search.mcts_config(seed)).search_hidden(&position, p),
        SearchAlgorithm::Random | SearchAlgorithm::Greedy => {
            let card = opts.search.make_strategy(seed).play(&state, state.hand(p))?;
            let action = Input::FromPlayer(p, PlayerAction::PlayCard(card));
            SearchResult::new(Some(action), 0.0, Default::default())
        }
    };
    let dt_ns = t0.elapsed().as_nanos();
    println!("hand: {:?}, trump: {:?}", state.hand(p), state.trump_card);
    for (action, value) in res.action_values.iter() {
        println!(" - {action:?}: {value:.3}");
    }
    println!("best: {:?} eval={:.3} | {}", res.action, res.eval, res.counter.summary(dt_ns));
    Ok(())
}

fn trace(opts: &SearchOpts, opponent: SearchAlgorithm) -> Result<(), Box<dyn std::error::Error>> {
    let seed = opts.seed.unwrap_or_default();
    let factory = strategy_factory(opts.search.clone(), opts.search.with_algorithm(opponent));
    let mut strategies = ByPlayer::from_fn(|p| factory(p, seed));
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut traced = GameStateBuilder::new_dealt(PlayerId::PlayerFirst, &mut rng)
        .with_enable_log(true)
        .build();
    let outcome = play_round(&mut traced, &mut strategies)?;
    if let Some(log) = &traced.log {
        log.print();
    }
    println!(
        "{} vs {}: {outcome:?}, points {}:{}",
        strategies.0.name(),
        strategies.1.name(),
        traced.round_points(PlayerId::PlayerFirst),
        traced.round_points(PlayerId::PlayerSecond)
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = BenchmarkOpts::from_args();
    init_logging(opts.search().search.debug)?;
    match &opts {
        BenchmarkOpts::Match {
            parallel_games,
            rounds,
            matches,
            opponent,
            search,
        } => {
            let opponent = opponent.unwrap_or(SearchAlgorithm::Greedy);
            let factory = strategy_factory(search.search.clone(), search.search.with_algorithm(opponent));
            let t0 = Instant::now();
            let iterate_opts = IterateOpts {
                count: matches.or(*rounds).unwrap_or(100),
                random_seed: search.seed.unwrap_or_default(),
                parallel: *parallel_games,
            };
            let tally = if matches.is_some() {
                iterate_matches(factory.as_ref(), iterate_opts, MATCH_TARGET)?
            } else {
                iterate_rounds(factory.as_ref(), iterate_opts)?
            };
            info!("{tally:?}");
            println!(
                "{} vs {opponent}: score={:.3} won={} lost={} game points {}:{}, {:.2}ms",
                search.search.algorithm(),
                tally.score(),
                tally.won,
                tally.lost,
                tally.game_points_won,
                tally.game_points_lost,
                t0.elapsed().as_secs_f64() * 1e3
            );
        }
        BenchmarkOpts::Trace { opponent, search } => trace(search, opponent.unwrap_or(SearchAlgorithm::Greedy))?,
        BenchmarkOpts::Evaluate { json, search } => evaluate(search, *json)?,
    }
    Ok(())
}
