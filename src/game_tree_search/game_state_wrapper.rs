use log::debug;
use rand::{rngs::SmallRng, Rng};

use super::Game;
use crate::{
    dispatcher::ActionList,
    dispatcher_ops::DispatchError,
    rules::LegalityMode,
    types::{game_state::*, input::*},
};

/// Adapts a round `GameState` to the `Game` trait.
///
/// Actions are card plays only. Trick resolution and the draw are chance steps.
#[derive(Debug, Clone)]
pub struct GameStateWrapper {
    pub game_state: GameState,
    pub legality: LegalityMode,
}

impl GameStateWrapper {
    pub fn new(game_state: GameState, legality: LegalityMode) -> Self {
        Self { game_state, legality }
    }

    /// Resolve the trick on the table, if any. Returns false if a draw or player input is pending.
    fn resolve_pending_trick(&mut self) -> bool {
        if self.game_state.step != Step::ResolveTrick {
            return false;
        }
        self.game_state.advance(Input::NoAction).is_ok()
    }
}

impl Game for GameStateWrapper {
    type Action = Input;

    type Actions = ActionList<Input>;

    type Error = DispatchError;

    #[inline]
    fn to_move(&self) -> Option<PlayerId> {
        self.game_state.to_move_player()
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.game_state.is_round_over()
    }

    fn actions(&self) -> Self::Actions {
        let Some(player_id) = self.to_move() else {
            return ActionList::new();
        };
        self.game_state
            .legal_cards(player_id, self.legality)
            .into_iter()
            .map(|c| Input::FromPlayer(player_id, PlayerAction::PlayCard(c)))
            .collect()
    }

    #[inline]
    fn advance(&mut self, action: Input) -> Result<(), Self::Error> {
        self.game_state.advance(action)?;
        Ok(())
    }

    fn chance_outcomes(&self) -> Vec<Self> {
        if self.to_move().is_some() || self.is_terminal() {
            return vec![];
        }
        let mut resolved = self.clone();
        resolved.resolve_pending_trick();
        let draws = resolved.game_state.draw_outcomes();
        if draws.is_empty() {
            return vec![resolved];
        }
        draws
            .into_iter()
            .filter_map(|draw| {
                let mut g = resolved.clone();
                g.game_state.advance(Input::NondetResult(draw)).ok()?;
                Some(g)
            })
            .collect()
    }

    fn sample_chance(&mut self, rng: &mut SmallRng) {
        if self.to_move().is_some() {
            return;
        }
        self.resolve_pending_trick();
        if let Some(draw) = self.game_state.sample_draw(rng) {
            if let Err(err) = self.game_state.advance(Input::NondetResult(draw)) {
                debug!("sample_chance: draw {draw:?} rejected: {err:?}");
            }
        }
    }

    fn hide_private_information<R: Rng + ?Sized>(&mut self, player_to_hide: PlayerId, rng: &mut R) {
        self.game_state.log = None;
        self.game_state.resample_hand(player_to_hide, rng);
    }

    #[inline]
    fn eval(&self, player_id: PlayerId) -> f32 {
        let own = self.game_state.round_points(player_id);
        let other = self.game_state.round_points(player_id.opposite());
        f32::from(own) - f32::from(other)
    }
}
