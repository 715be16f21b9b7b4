use std::fmt::Debug;

use rand::{rngs::SmallRng, Rng};

use crate::types::game_state::PlayerId;

/// A two-player game with hidden information and chance steps, as seen by the search engines.
pub trait Game: Debug + Clone + Send + Sync {
    type Action: Copy + Clone + Send + Sync + Debug + PartialEq + Eq;
    type Actions: IntoIterator<Item = Self::Action>;
    type Error: Debug;

    /// The player to choose the next action. `None` when the game is over or a chance step is pending.
    fn to_move(&self) -> Option<PlayerId>;

    fn is_terminal(&self) -> bool;

    fn actions(&self) -> Self::Actions;

    fn advance(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    /// Successor states of the pending non-player step, each equally likely.
    /// Empty when a player is to move or the game is over.
    fn chance_outcomes(&self) -> Vec<Self>;

    /// Advance through the pending non-player steps with uniformly random outcomes.
    fn sample_chance(&mut self, rng: &mut SmallRng);

    /// Called before the game state is sent to the search algorithm.
    /// Modify the game state so the search algorithm cannot assume anything about the hidden information.
    fn hide_private_information<R: Rng + ?Sized>(&mut self, player_to_hide: PlayerId, rng: &mut R);

    /// A copy of this position with the hidden cards of `player` resampled.
    fn determinize<R: Rng + ?Sized>(&self, player: PlayerId, rng: &mut R) -> Self {
        let mut g = self.clone();
        g.hide_private_information(player, rng);
        g
    }

    /// Static evaluation from the perspective of `player_id`. Higher is better.
    fn eval(&self, player_id: PlayerId) -> f32;
}
