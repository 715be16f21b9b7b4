use rand::{seq::SliceRandom, Rng};

use crate::types::{
    by_player::ByPlayer,
    card::{Card, CardSet, Suit},
    game_state::*,
    hand::{Hand, HAND_SIZE},
    logging::{Event, EventLog},
};

/// Builds a `GameState` from a fresh deal or from an explicit position.
#[derive(Debug, Clone, Default)]
pub struct GameStateBuilder {
    pub hands: ByPlayer<Hand>,
    pub stock: Stock,
    pub trump_card: Option<Card>,
    /// Overrides the suit of `trump_card`, needed when the trump card has already been drawn.
    pub trump_suit: Option<Suit>,
    pub leader: PlayerId,
    pub phase: Phase,
    pub points: ByPlayer<u16>,
    pub played: Option<Card>,
    pub revealed: ByPlayer<CardSet>,
    pub enable_log: bool,
}

impl GameStateBuilder {
    /// Shuffle a full deck and deal a new round.
    ///
    /// Three cards to each player twice, the leader first, then the trump card is turned
    /// up. The remaining 11 cards form the stock.
    pub fn new_dealt<R: Rng + ?Sized>(leader: PlayerId, rng: &mut R) -> Self {
        let mut deck: Vec<Card> = Card::all().collect();
        deck.shuffle(rng);
        let mut hands: ByPlayer<Hand> = Default::default();
        for _ in 0..2 {
            for player_id in [leader, leader.opposite()] {
                for _ in 0..HAND_SIZE / 2 {
                    if let Some(c) = deck.pop() {
                        hands[player_id].push(c);
                    }
                }
            }
        }
        let trump_card = deck.pop();
        Self {
            hands,
            stock: deck.into_iter().collect(),
            trump_card,
            leader,
            ..Default::default()
        }
    }

    pub fn with_hands<A: Into<Hand>, B: Into<Hand>>(self, first: A, second: B) -> Self {
        Self {
            hands: ByPlayer::new(first.into(), second.into()),
            ..self
        }
    }

    /// A dealt round always has an odd stock under the trump card. With an even stock the
    /// last draw takes two stock cards and the trump card is never drawn.
    pub fn with_stock<T: IntoIterator<Item = Card>>(self, stock: T) -> Self {
        Self {
            stock: stock.into_iter().collect(),
            ..self
        }
    }

    pub fn with_trump_card(self, trump_card: Option<Card>) -> Self {
        Self { trump_card, ..self }
    }

    pub fn with_trump_suit(self, trump_suit: Suit) -> Self {
        Self {
            trump_suit: Some(trump_suit),
            ..self
        }
    }

    pub fn with_leader(self, leader: PlayerId) -> Self {
        Self { leader, ..self }
    }

    pub fn with_phase(self, phase: Phase) -> Self {
        Self { phase, ..self }
    }

    pub fn with_points(self, points: ByPlayer<u16>) -> Self {
        Self { points, ..self }
    }

    /// The card the leader has already played to the current trick.
    pub fn with_played(self, played: Option<Card>) -> Self {
        Self { played, ..self }
    }

    pub fn with_revealed(self, revealed: ByPlayer<CardSet>) -> Self {
        Self { revealed, ..self }
    }

    pub fn with_enable_log(self, enable_log: bool) -> Self {
        Self { enable_log, ..self }
    }

    pub fn build(self) -> GameState {
        let trump_suit = self
            .trump_suit
            .or(self.trump_card.map(|c| c.suit))
            .unwrap_or(Suit::Hearts);
        let phase = match self.phase {
            Phase::Open if self.stock.is_empty() && self.trump_card.is_none() => Phase::Exhausted,
            p => p,
        };
        let players = self.hands.zip(self.revealed).zip(self.points).map(|((hand, revealed), points)| {
            PlayerState {
                hand,
                revealed,
                points,
                bonus_points: points,
                ..Default::default()
            }
        });
        let mut game_state = GameState {
            players,
            stock: self.stock,
            trump_card: self.trump_card,
            trump_suit,
            leader: self.leader,
            phase,
            step: Step::Play,
            log: self.enable_log.then(|| Box::new(EventLog::new())),
        };
        if let Some(card) = self.played {
            game_state.players[self.leader].played = Some(card);
        }
        game_state.log_event(Event::RoundStarted {
            leader: self.leader,
            trump_card: self.trump_card,
        });
        game_state
    }
}
