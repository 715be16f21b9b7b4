use crate::types::{
    by_player::ByPlayer,
    card::{Card, CardSet, Rank},
    game_state::PlayerId,
    logging::Event,
};

/// Cards a side has seen during the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMemory {
    /// Every card seen played or revealed.
    pub seen: CardSet,
    /// Cards known to be in each side's hand.
    pub known: ByPlayer<CardSet>,
}

impl CardMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Cards known to be held by `player_id`.
    #[inline]
    pub fn known_in_hand(&self, player_id: PlayerId) -> CardSet {
        self.known[player_id]
    }

    pub fn observe(&mut self, event: &Event) {
        match *event {
            Event::RoundStarted { trump_card, .. } => {
                self.reset();
                self.seen.extend(trump_card);
            }
            Event::CardPlayed(p, card) => {
                self.seen.insert(card);
                self.known[p].remove(card);
            }
            Event::MarriageAnnounced { player, suit, .. } => {
                for rank in [Rank::King, Rank::Queen] {
                    let card = Card::new(rank, suit);
                    self.seen.insert(card);
                    self.known[player].insert(card);
                }
            }
            Event::TrumpExchanged { player, taken, nine } => {
                self.seen.insert(nine);
                self.known[player].remove(nine);
                self.known[player].insert(taken);
            }
            Event::StockExhausted { bonus_to, trump_card } => {
                self.known[bonus_to.opposite()].insert(trump_card);
            }
            Event::TrickWon { .. } | Event::CardsDrawn { .. } | Event::GameClosed(..) | Event::RoundOver(..) => {}
        }
    }
}
