use instant::{Duration, Instant};
use log::{info, warn};
use rayon::prelude::*;
use santase_sim::{
    prelude::*,
    rand::{rngs::SmallRng, SeedableRng},
};

/// Rounds after which a match without a winner is abandoned.
const MAX_MATCH_ROUNDS: u32 = 200;

pub type StrategyFactory = dyn Fn(PlayerId, u64) -> Box<dyn Strategy> + Send + Sync;

#[derive(Debug, Clone)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    pub points: ByPlayer<u16>,
    pub dt: Duration,
}

pub fn match_round(
    mut state: GameState,
    strategies: &mut ByPlayer<Box<dyn Strategy>>,
) -> Result<RoundReport, RoundError> {
    let t0 = Instant::now();
    let outcome = play_round(&mut state, strategies)?;
    Ok(RoundReport {
        outcome,
        points: ByPlayer::from_fn(|p| state.round_points(p)),
        dt: t0.elapsed(),
    })
}

/// Play rounds until one side reaches `target` game points. The round winner leads next.
pub fn play_match(make_strategy: &StrategyFactory, seed: u64, target: u8) -> Result<MatchScore, RoundError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut strategies = ByPlayer::from_fn(|p| make_strategy(p, seed));
    let mut score = MatchScore::new(target);
    let mut leader = PlayerId::PlayerFirst;
    while score.winner().is_none() {
        if score.rounds >= MAX_MATCH_ROUNDS {
            warn!("play_match: no winner after {} rounds", score.rounds);
            break;
        }
        let state = GameStateBuilder::new_dealt(leader, &mut rng).build();
        let report = match_round(state, &mut strategies)?;
        score.record(&report.outcome);
        leader = MatchScore::next_leader(&report.outcome, leader);
    }
    Ok(score)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IterateOpts {
    pub count: u32,
    pub random_seed: u64,
    pub parallel: bool,
}

/// Totals from the point of view of the tested strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub game_points_won: u32,
    pub game_points_lost: u32,
}

impl Tally {
    fn add(self, other: Tally) -> Tally {
        Tally {
            played: self.played + other.played,
            won: self.won + other.won,
            lost: self.lost + other.lost,
            game_points_won: self.game_points_won + other.game_points_won,
            game_points_lost: self.game_points_lost + other.game_points_lost,
        }
    }

    fn single(winner: Option<PlayerId>, game_points: ByPlayer<u32>, tested: PlayerId) -> Tally {
        Tally {
            played: 1,
            won: (winner == Some(tested)) as u32,
            lost: (winner == Some(tested.opposite())) as u32,
            game_points_won: game_points[tested],
            game_points_lost: game_points[tested.opposite()],
        }
    }

    /// Share of decided games won by the tested strategy, draws counting half.
    pub fn score(&self) -> f32 {
        if self.played == 0 {
            return 0.0;
        }
        let draws = self.played - self.won - self.lost;
        (2 * self.won + draws) as f32 / (2 * self.played) as f32
    }
}

fn game_seed(random_seed: u64, i: u32) -> u64 {
    random_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(i as u64)
}

/// Run `opts.count` games. Game `i` gives the tested strategy the second seat when `i` is odd.
fn iterate<F: Fn(u32, u64, bool) -> Result<Tally, RoundError> + Send + Sync>(
    opts: IterateOpts,
    play_one: F,
) -> Result<Tally, RoundError> {
    let run = |i: u32| {
        let flip = i % 2 == 1;
        play_one(i, game_seed(opts.random_seed, i), flip)
    };
    if opts.parallel {
        (0..opts.count)
            .into_par_iter()
            .map(run)
            .try_reduce(Tally::default, |a, b| Ok(a.add(b)))
    } else {
        (0..opts.count).map(run).try_fold(Tally::default(), |a, b| Ok(a.add(b?)))
    }
}

fn seat(flip: bool) -> PlayerId {
    if flip {
        PlayerId::PlayerSecond
    } else {
        PlayerId::PlayerFirst
    }
}

/// Single rounds between the tested strategy and the opponent, alternating seats.
pub fn iterate_rounds(make_strategy: &StrategyFactory, opts: IterateOpts) -> Result<Tally, RoundError> {
    iterate(opts, |i, seed, flip| {
        let tested = seat(flip);
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = GameStateBuilder::new_dealt(PlayerId::PlayerFirst, &mut rng).build();
        let mut strategies = ByPlayer::from_fn(|p| make_strategy(if flip { p.opposite() } else { p }, seed));
        let report = match_round(state, &mut strategies)?;
        let RoundOutcome { winner, game_points, .. } = report.outcome;
        info!(
            "- Round {:3} ... winner={} game_points={game_points} points={}:{} dt={:.2}ms",
            i + 1,
            winner.map_or("-".to_string(), |w| (if w == tested { "tested" } else { "opponent" }).to_string()),
            report.points[tested],
            report.points[tested.opposite()],
            report.dt.as_secs_f64() * 1e3,
        );
        let gp = ByPlayer::from_fn(|p| if winner == Some(p) { game_points as u32 } else { 0 });
        Ok(Tally::single(winner, gp, tested))
    })
}

/// Full matches to `target` game points, alternating seats.
pub fn iterate_matches(make_strategy: &StrategyFactory, opts: IterateOpts, target: u8) -> Result<Tally, RoundError> {
    iterate(opts, |i, seed, flip| {
        let tested = seat(flip);
        let seated = move |p: PlayerId, seed: u64| make_strategy(if flip { p.opposite() } else { p }, seed);
        let score = play_match(&seated, seed, target)?;
        info!(
            "- Match {:3} ... {}:{} after {} rounds",
            i + 1,
            score.game_points[tested],
            score.game_points[tested.opposite()],
            score.rounds
        );
        let gp = score.game_points.map(u32::from);
        Ok(Tally::single(score.winner(), gp, tested))
    })
}
