use std::ops::Range;

use enum_map::Enum;

use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::builder::GameStateBuilder;
use crate::types::{
    card::{Card, Rank, Suit},
    game_state::*,
    input::{Input, PlayerAction},
};

pub fn arb_enum<E: std::fmt::Debug + Enum>() -> impl Strategy<Value = E> {
    (0..E::LENGTH).prop_map(E::from_usize)
}

pub fn arb_suit() -> impl Strategy<Value = Suit> {
    arb_enum()
}

pub fn arb_player_id() -> impl Strategy<Value = PlayerId> {
    arb_enum()
}

prop_compose! {
    pub fn arb_card()(rank in arb_enum::<Rank>(), suit in arb_suit()) -> Card {
        Card::new(rank, suit)
    }
}

pub fn arb_distinct_cards() -> impl Strategy<Value = (Card, Card)> {
    (arb_card(), arb_card()).prop_filter("cards must be distinct", |(a, b)| a != b)
}

pub fn arb_player_action() -> impl Strategy<Value = PlayerAction> {
    prop_oneof![
        arb_card().prop_map(PlayerAction::PlayCard),
        Just(PlayerAction::ExchangeTrump),
        arb_suit().prop_map(PlayerAction::AnnounceMarriage),
        Just(PlayerAction::CloseGame),
    ]
}

prop_compose! {
    pub fn arb_dealt_game_state()(seed in any::<u64>(), leader in arb_player_id()) -> GameState {
        GameStateBuilder::new_dealt(leader, &mut SmallRng::seed_from_u64(seed)).build()
    }
}

/// Advance `gs` with a random available input, or a random draw. Returns false if nothing can be done.
pub fn random_step<R: Rng>(gs: &mut GameState, rng: &mut R) -> bool {
    if gs.is_round_over() {
        return false;
    }
    let input = match gs.nondet_request() {
        Some(..) => match gs.sample_draw(rng) {
            Some(draw) => Input::NondetResult(draw),
            None => return false,
        },
        None => {
            let acts = gs.available_actions();
            if acts.is_empty() {
                return false;
            }
            acts[rng.gen_range(0..acts.len())]
        }
    };
    if let Err(e) = gs.advance(input) {
        dbg!(&gs);
        dbg!(&input);
        panic!("{e:?}");
    }
    true
}

pub struct ArbReachableGameState<T: Strategy<Value = GameState>> {
    pub steps: Range<usize>,
    pub arb_init_game_state: T,
    pub arb_seed: <u64 as Arbitrary>::Strategy,
}

/// Enough steps to finish any round.
pub const MAX_STEPS: usize = 120usize;

impl<T: Strategy<Value = GameState>> ArbReachableGameState<T> {
    pub fn new(arb_init_game_state: T) -> Self {
        Self {
            steps: 0..MAX_STEPS,
            arb_init_game_state,
            arb_seed: u64::arbitrary(),
        }
    }

    pub fn with_steps(self, steps: Range<usize>) -> Self {
        Self { steps, ..self }
    }

    pub fn arb(self) -> impl Strategy<Value = GameState> {
        (self.steps, self.arb_seed, self.arb_init_game_state).prop_map(|(steps, seed, mut gs)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            for _ in 0usize..steps {
                if !random_step(&mut gs, &mut rng) {
                    break;
                }
            }
            gs
        })
    }
}

pub fn arb_reachable_game_state() -> impl Strategy<Value = GameState> {
    ArbReachableGameState::new(arb_dealt_game_state()).arb()
}

/// Reachable states where a player has to play a card.
pub fn arb_reachable_game_state_to_move() -> impl Strategy<Value = GameState> {
    arb_reachable_game_state().prop_filter("a player must be to move", |gs| {
        gs.to_move_player().is_some() && !gs.hand(gs.to_move_player().unwrap_or_default()).is_empty()
    })
}

pub fn arb_finished_game_state() -> impl Strategy<Value = GameState> {
    ArbReachableGameState::new(arb_dealt_game_state())
        .with_steps(MAX_STEPS..MAX_STEPS + 1)
        .arb()
}
