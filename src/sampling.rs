//! Sampling of hidden opponent hands.

use log::warn;
use rand::{seq::IteratorRandom, Rng};

use crate::types::{
    card::{Card, CardSet},
    game_state::{GameState, PlayerId},
    hand::Hand,
};

impl GameState {
    /// Cards whose location `observer` knows: its own hand, the face-up trump card,
    /// the cards on the table, the stock and the revealed cards of the other side.
    pub fn known_cards(&self, observer: PlayerId) -> CardSet {
        let hidden = observer.opposite();
        let mut known = self.hand(observer).to_card_set();
        known.extend(self.trump_card);
        known.extend(self.cards_on_table());
        known.extend(self.stock.iter().copied());
        known.union(self.player(hidden).revealed)
    }

    /// Cards that may be in the hidden hand, in deck order.
    pub fn unknown_cards(&self, observer: PlayerId) -> Vec<Card> {
        let known = self.known_cards(observer);
        Card::all().filter(|c| !known.contains(*c)).collect()
    }
}

/// Sample a hand for `target` consistent with what `observer` knows.
///
/// The revealed cards of `target` are always kept. The rest of the hand is filled with
/// cards chosen uniformly without replacement from the unknown pool. If the pool is
/// too small the whole pool is used.
pub fn sample_possible_hand<R: Rng + ?Sized>(state: &GameState, observer: PlayerId, target: PlayerId, rng: &mut R) -> Hand {
    let target_state = state.player(target);
    let hand_size = target_state.hand.len();
    let mut hand: Hand = target_state
        .revealed
        .iter()
        .filter(|&c| target_state.hand.contains(c))
        .collect();
    let needed = hand_size.saturating_sub(hand.len());
    if needed == 0 {
        return hand;
    }
    let pool = state.unknown_cards(observer);
    if pool.len() < needed {
        warn!(
            "sample_possible_hand: {} unknown cards for {} slots of {}",
            pool.len(),
            needed,
            target
        );
        hand.extend(pool);
        return hand;
    }
    hand.extend(pool.into_iter().choose_multiple(rng, needed));
    hand
}

impl GameState {
    /// Replace the hand of `player_id` with a sample consistent with the other side's view.
    pub fn resample_hand<R: Rng + ?Sized>(&mut self, player_id: PlayerId, rng: &mut R) {
        let hand = sample_possible_hand(self, player_id.opposite(), player_id, rng);
        self.player_mut(player_id).hand = hand;
    }
}
