use crate::builder::*;
use crate::dispatcher_ops::*;
use crate::types::{by_player::ByPlayer, card::*, game_state::*, hand::Hand, input::*};

pub mod rules;


pub mod scoring;




pub mod prop_tests;

pub const NO_ACTION: Input = Input::NoAction;

/// Panics: If the text is not a card.
pub fn c(s: &str) -> Card {
    s.parse().unwrap()
}

/// Panics: If any text is not a card.
pub fn cards<const N: usize>(s: [&str; N]) -> [Card; N] {
    s.map(c)
}

pub fn play(player_id: PlayerId, card: &str) -> Input {
    Input::FromPlayer(player_id, PlayerAction::PlayCard(c(card)))
}

pub const P1: PlayerId = PlayerId::PlayerFirst;
pub const P2: PlayerId = PlayerId::PlayerSecond;

impl GameState {
    /// Panics: If `advance` causes an error.
    fn advance_multiple<T: IntoIterator<Item = Input>>(self: &mut GameState, inputs: T) {
        for input in inputs.into_iter() {
            self.advance(input).unwrap();
        }
    }

    /// Total points of the cards both sides have won.
    fn won_points(&self) -> u16 {
        self.players.0.won.points() + self.players.1.won.points()
    }
}

/// Every card of the round, wherever it is.
fn all_cards_of(gs: &GameState) -> Vec<Card> {
    let mut v: Vec<Card> = vec![];
    for (_, p) in gs.players.iter() {
        v.extend(p.hand.iter());
        v.extend(p.played);
        v.extend(p.won.iter());
    }
    v.extend(gs.stock.iter().copied());
    v.extend(gs.trump_card);
    v
}
