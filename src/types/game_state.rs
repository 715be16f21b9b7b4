use std::fmt::Display;

use enum_map::Enum;
use enumset::EnumSet;
use smallvec::SmallVec;

use super::{
    by_player::ByPlayer,
    card::{Card, CardSet, Rank, Suit},
    hand::Hand,
    logging::{Event, EventLog},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    PlayerFirst = 0,
    PlayerSecond = 1,
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::PlayerFirst => f.write_str("P1"),
            PlayerId::PlayerSecond => f.write_str("P2"),
        }
    }
}

impl PlayerId {
    pub const VALUES: [PlayerId; 2] = [PlayerId::PlayerFirst, PlayerId::PlayerSecond];

    #[inline]
    pub fn opposite(self) -> PlayerId {
        match self {
            PlayerId::PlayerFirst => PlayerId::PlayerSecond,
            PlayerId::PlayerSecond => PlayerId::PlayerFirst,
        }
    }

    #[inline]
    pub fn select<T>(self, tuple: (T, T)) -> T {
        match self {
            PlayerId::PlayerFirst => tuple.0,
            PlayerId::PlayerSecond => tuple.1,
        }
    }
}

/// Drawing phase of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Cards are drawn after each trick and following suit is not required.
    #[default]
    Open,
    /// Stock and trump card have been drawn. Following suit is required.
    Exhausted,
    /// A side closed the game. No more drawing and following suit is required.
    Closed { by: PlayerId },
}

impl Phase {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Phase::Open)
    }

    #[inline]
    pub fn requires_following(self) -> bool {
        !self.is_open()
    }

    #[inline]
    pub fn closed_by(self) -> Option<PlayerId> {
        match self {
            Phase::Closed { by } => Some(by),
            _ => None,
        }
    }
}

/// What the round is waiting for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Waiting for a player input (or the round is over).
    #[default]
    Play,
    /// Both cards are on the table. Resolved by `Input::NoAction`.
    ResolveTrick,
    /// Waiting for the cards drawn after a trick.
    Draw { winner: PlayerId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub hand: Hand,
    /// Card played to the current trick.
    pub played: Option<Card>,
    /// Round points, including bonuses.
    pub points: u16,
    /// Marriage and last-stock bonuses included in `points`.
    pub bonus_points: u16,
    pub tricks_won: u8,
    pub won: CardSet,
    /// Cards in this side's hand that the other side has seen.
    pub revealed: CardSet,
    pub marriages: EnumSet<Suit>,
}

impl PlayerState {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            ..Default::default()
        }
    }

    /// Returns true if both the King and Queen of `suit` are in hand.
    #[inline]
    pub fn has_marriage(&self, suit: Suit) -> bool {
        self.hand.contains(Card::new(Rank::King, suit)) && self.hand.contains(Card::new(Rank::Queen, suit))
    }
}

pub type Stock = SmallVec<[Card; 12]>;

/// Complete state of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub players: ByPlayer<PlayerState>,
    /// Undrawn cards. The last element is the top of the stock.
    pub stock: Stock,
    /// Face-up card under the stock. `None` after it has been drawn.
    pub trump_card: Option<Card>,
    pub trump_suit: Suit,
    /// Player leading the current trick.
    pub leader: PlayerId,
    pub phase: Phase,
    pub step: Step,
    pub log: Option<Box<EventLog>>,
}

impl GameState {
    #[inline]
    pub fn player(&self, player_id: PlayerId) -> &PlayerState {
        &self.players[player_id]
    }

    #[inline]
    pub fn player_mut(&mut self, player_id: PlayerId) -> &mut PlayerState {
        &mut self.players[player_id]
    }

    #[inline]
    pub fn hand(&self, player_id: PlayerId) -> &Hand {
        &self.players[player_id].hand
    }

    #[inline]
    pub fn round_points(&self, player_id: PlayerId) -> u16 {
        self.players[player_id].points
    }

    #[inline]
    pub fn follower(&self) -> PlayerId {
        self.leader.opposite()
    }

    /// Card led to the current trick.
    #[inline]
    pub fn leader_card(&self) -> Option<Card> {
        self.players[self.leader].played
    }

    /// Suit of the card led to the current trick. `None` until the leader has played.
    #[inline]
    pub fn led_suit(&self) -> Option<Suit> {
        self.leader_card().map(|c| c.suit)
    }

    /// Cards played to the current trick, leader's card first.
    #[inline]
    pub fn cards_on_table(&self) -> impl Iterator<Item = Card> + '_ {
        [self.leader, self.follower()]
            .into_iter()
            .filter_map(|p| self.players[p].played)
    }

    #[inline]
    pub fn trump_nine(&self) -> Card {
        Card::new(Rank::Nine, self.trump_suit)
    }

    /// The round is over once both hands are empty and the last trick has been resolved.
    pub fn is_round_over(&self) -> bool {
        self.step == Step::Play
            && self.players.0.played.is_none()
            && self.players.1.played.is_none()
            && self.players.0.hand.is_empty()
            && self.players.1.hand.is_empty()
    }

    pub fn log_event(&mut self, event: Event) {
        if let Some(log) = &mut self.log {
            log.log(event);
        }
    }
}
