use instant::Instant;
use itertools::Itertools;
use log::{debug, warn};
#[cfg(not(feature = "no_parallel"))]
use rayon::prelude::*;
use santase_sim::{
    prelude::PlayerId,
    rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng},
    smallvec::SmallVec,
};

use super::ExpectiminimaxConfig;
use crate::{Game, SearchCounter, SearchResult};

struct SearchContext<'a> {
    config: &'a ExpectiminimaxConfig,
    maximize_player: PlayerId,
    rng: SmallRng,
    counter: SearchCounter,
}

impl<'a> SearchContext<'a> {
    fn new(config: &'a ExpectiminimaxConfig, maximize_player: PlayerId, seed: u64) -> Self {
        Self {
            config,
            maximize_player,
            rng: SmallRng::seed_from_u64(seed),
            counter: SearchCounter::ZERO,
        }
    }

    #[inline]
    fn evaluate<G: Game>(&mut self, game: &G) -> f32 {
        self.counter.add_in_place(&SearchCounter::EVAL);
        game.eval(self.maximize_player)
    }
}

fn expectiminimax<G: Game>(game: &G, depth: u8, ctx: &mut SearchContext) -> f32 {
    if depth == 0 || game.is_terminal() {
        return ctx.evaluate(game);
    }
    match game.to_move() {
        None => chance_node(game, depth, ctx),
        Some(player_id) if player_id == ctx.maximize_player => max_node(game, depth, ctx),
        Some(player_id) => opponent_node(game, player_id, depth, ctx),
    }
}

fn max_node<G: Game>(game: &G, depth: u8, ctx: &mut SearchContext) -> f32 {
    let mut best: Option<f32> = None;
    for action in game.actions() {
        let mut child = game.clone();
        if let Err(err) = child.advance(action) {
            debug!("max_node: skipping {action:?}: {err:?}");
            continue;
        }
        ctx.counter.states_visited += 1;
        let value = expectiminimax(&child, depth - 1, ctx);
        if best.map_or(true, |b| value > b) {
            best = Some(value);
        }
    }
    match best {
        Some(value) => value,
        None => ctx.evaluate(game),
    }
}

/// Average over sampled opponent hands of the opponent's best reply in each sample.
fn opponent_node<G: Game>(game: &G, player_id: PlayerId, depth: u8, ctx: &mut SearchContext) -> f32 {
    let samples = ctx.config.samples_per_opponent_decision;
    if samples == 0 {
        return ctx.evaluate(game);
    }
    let mut total = 0.0;
    for _ in 0..samples {
        let sample = game.determinize(player_id, &mut ctx.rng);
        ctx.counter.opponent_samples += 1;
        let mut worst: Option<f32> = None;
        for action in sample.actions() {
            let mut child = sample.clone();
            if child.advance(action).is_err() {
                continue;
            }
            ctx.counter.states_visited += 1;
            let value = expectiminimax(&child, depth - 1, ctx);
            if worst.map_or(true, |w| value < w) {
                worst = Some(value);
            }
        }
        total += match worst {
            Some(value) => value,
            None => ctx.evaluate(game),
        };
    }
    total / samples as f32
}

fn chance_node<G: Game>(game: &G, depth: u8, ctx: &mut SearchContext) -> f32 {
    let outcomes = game.chance_outcomes();
    if outcomes.is_empty() {
        return ctx.evaluate(game);
    }
    ctx.counter.chance_nodes += 1;
    let n = outcomes.len() as f32;
    let mut total = 0.0;
    for outcome in outcomes.iter() {
        ctx.counter.states_visited += 1;
        total += expectiminimax(outcome, depth - 1, ctx);
    }
    total / n
}

/// Value of playing `action` at the root. A move that completes a trick goes straight
/// to the chance node at full depth.
fn evaluate_candidate<G: Game>(
    position: &G,
    action: G::Action,
    seed: u64,
    maximize_player: PlayerId,
    config: &ExpectiminimaxConfig,
) -> (Option<f32>, SearchCounter) {
    let mut child = position.clone();
    if let Err(err) = child.advance(action) {
        debug!("expectiminimax: root action {action:?} failed: {err:?}");
        return (None, SearchCounter::ZERO);
    }
    let mut ctx = SearchContext::new(config, maximize_player, seed);
    ctx.counter.states_visited += 1;
    let depth = if child.to_move().is_some() {
        config.max_depth.saturating_sub(1)
    } else {
        config.max_depth
    };
    let value = expectiminimax(&child, depth, &mut ctx);
    (Some(value), ctx.counter)
}

fn evaluate_candidates<G: Game>(
    position: &G,
    candidates: &[(G::Action, u64)],
    maximize_player: PlayerId,
    config: &ExpectiminimaxConfig,
) -> Vec<(Option<f32>, SearchCounter)> {
    #[cfg(not(feature = "no_parallel"))]
    if config.parallel {
        return candidates
            .par_iter()
            .map(|&(action, seed)| evaluate_candidate(position, action, seed, maximize_player, config))
            .collect();
    }
    candidates
        .iter()
        .map(|&(action, seed)| evaluate_candidate(position, action, seed, maximize_player, config))
        .collect()
}

pub(crate) fn search_root<G: Game>(
    position: &G,
    maximize_player: PlayerId,
    config: &ExpectiminimaxConfig,
    rng: &mut SmallRng,
) -> SearchResult<G> {
    if position.to_move() != Some(maximize_player) {
        return Default::default();
    }
    let t0 = Instant::now();
    // Seeds are drawn up front so the result does not depend on evaluation order.
    let candidates: SmallVec<[(G::Action, u64); 16]> = position.actions().into_iter().map(|a| (a, rng.gen())).collect();
    let evaluated = evaluate_candidates(position, &candidates, maximize_player, config);

    let mut counter = SearchCounter::ZERO;
    let mut best: Option<(G::Action, f32)> = None;
    let mut action_values = Vec::with_capacity(candidates.len());
    for (&(action, _), (value, c)) in candidates.iter().zip(evaluated) {
        counter.add_in_place(&c);
        let Some(value) = value else { continue };
        action_values.push((action, value));
        if value > best.map_or(f32::NEG_INFINITY, |(_, v)| v) {
            best = Some((action, value));
        }
    }

    let (action, eval) = match best {
        Some((action, value)) => (Some(action), value),
        None => {
            let fallback = candidates.choose(rng).map(|&(action, _)| action);
            if fallback.is_some() {
                warn!("expectiminimax: no move scored above negative infinity, choosing at random");
            }
            (fallback, f32::NEG_INFINITY)
        }
    };
    debug!(
        "expectiminimax: {maximize_player} action={action:?} eval={eval:.2} values=[{}] {}",
        action_values.iter().map(|(a, v)| format!("{a:?}: {v:.2}")).join(", "),
        counter.summary(t0.elapsed().as_nanos())
    );
    SearchResult {
        action,
        eval,
        action_values,
        counter,
    }
}

#[cfg(test)]
mod tests {
    use santase_sim::prelude::*;

    use super::super::*;
    use crate::{test_positions::*, Game};
    use santase_sim::rand::{rngs::SmallRng, Rng};

    fn search(gs: &GameState, config: ExpectiminimaxConfig) -> SearchResult<GameStateWrapper> {
        let mut search = Expectiminimax::new(config);
        let player_id = gs.to_move_player().unwrap();
        search.search(&GameStateWrapper::new(gs.clone(), LegalityMode::Strict), player_id)
    }

    #[test]
    fn test_endgame_prefers_winning_lead() {
        let res = search(&two_trick_endgame(), ExpectiminimaxConfig::new(40, 4));
        assert_eq!(Some(play_card("AH")), res.action);
        assert_eq!(1.0, res.eval);
        assert_eq!(vec![(play_card("10H"), -1.0), (play_card("AH"), 1.0)], res.action_values);
    }

    #[test]
    fn test_zero_depth_evaluates_current_points() {
        let res = search(&two_trick_endgame(), ExpectiminimaxConfig::new(1, 4));
        assert_eq!(Some(play_card("10H")), res.action);
        assert_eq!(7.0, res.eval);
    }

    #[test]
    fn test_search_is_deterministic_for_seed() {
        let gs = dealt(3);
        let config = ExpectiminimaxConfig {
            seed: 17,
            ..ExpectiminimaxConfig::new(3, 3)
        };
        let a = search(&gs, config);
        let b = search(&gs, config);
        assert_eq!(a.action, b.action);
        assert_eq!(a.action_values, b.action_values);
        assert_eq!(a.counter, b.counter);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let gs = dealt(5);
        let config = ExpectiminimaxConfig {
            seed: 9,
            ..ExpectiminimaxConfig::new(3, 2)
        };
        let sequential = search(&gs, config);
        let parallel = search(&gs, ExpectiminimaxConfig { parallel: true, ..config });
        assert_eq!(sequential.action, parallel.action);
        assert_eq!(sequential.action_values, parallel.action_values);
    }

    /// One move for the first side, then a draw with two equally likely endings.
    #[derive(Debug, Clone)]
    enum TwoDraws {
        Root([f32; 2]),
        Drawing([f32; 2]),
        Done(f32),
    }

    impl Game for TwoDraws {
        type Action = u8;
        type Actions = Vec<u8>;
        type Error = ();

        fn to_move(&self) -> Option<PlayerId> {
            match self {
                TwoDraws::Root(..) => Some(P1),
                _ => None,
            }
        }

        fn is_terminal(&self) -> bool {
            matches!(self, TwoDraws::Done(..))
        }

        fn actions(&self) -> Vec<u8> {
            match self {
                TwoDraws::Root(..) => vec![0],
                _ => vec![],
            }
        }

        fn advance(&mut self, _action: u8) -> Result<(), ()> {
            let TwoDraws::Root(values) = *self else {
                return Err(());
            };
            *self = TwoDraws::Drawing(values);
            Ok(())
        }

        fn chance_outcomes(&self) -> Vec<Self> {
            match self {
                TwoDraws::Drawing(values) => values.iter().map(|&v| TwoDraws::Done(v)).collect(),
                _ => vec![],
            }
        }

        fn sample_chance(&mut self, rng: &mut SmallRng) {
            if let TwoDraws::Drawing(values) = *self {
                *self = TwoDraws::Done(values[rng.gen_range(0..2)]);
            }
        }

        fn hide_private_information<R: Rng + ?Sized>(&mut self, _player_to_hide: PlayerId, _rng: &mut R) {}

        fn eval(&self, player_id: PlayerId) -> f32 {
            let value = match self {
                TwoDraws::Done(v) => *v,
                _ => 0.0,
            };
            if player_id == P1 {
                value
            } else {
                -value
            }
        }
    }

    #[test]
    fn test_chance_node_weights_draws_equally() {
        let mut search = Expectiminimax::new(ExpectiminimaxConfig::new(2, 1));
        let res = search.search(&TwoDraws::Root([-4.0, 10.0]), P1);
        assert_eq!(Some(0), res.action);
        assert_eq!(3.0, res.eval);
        assert_eq!(1, res.counter.chance_nodes);
        assert_eq!(2, res.counter.evals);

        let res = search.search(&TwoDraws::Root([-4.0, 10.0]), PlayerId::PlayerSecond);
        assert_eq!(None, res.action);
    }

    #[test]
    fn test_completing_a_trick_enters_chance_node() {
        let mut gs = dealt(11);
        let lead = gs.legal_cards(P1, LegalityMode::PhaseAware)[0];
        gs.advance(Input::FromPlayer(P1, PlayerAction::PlayCard(lead))).unwrap();
        let res = search(&gs, ExpectiminimaxConfig::new(2, 2));
        assert!(res.action.is_some());
        assert_eq!(res.action_values.len() as u64, res.counter.chance_nodes);
    }
}
