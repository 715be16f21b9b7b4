use std::fmt::Display;

use super::card::{Card, Suit};
use super::game_state::PlayerId;
use crate::scoring::RoundOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    RoundStarted {
        leader: PlayerId,
        trump_card: Option<Card>,
    },
    CardPlayed(PlayerId, Card),
    TrickWon {
        winner: PlayerId,
        cards: (Card, Card),
        points: u8,
    },
    CardsDrawn {
        winner: PlayerId,
    },
    TrumpExchanged {
        player: PlayerId,
        taken: Card,
        nine: Card,
    },
    MarriageAnnounced {
        player: PlayerId,
        suit: Suit,
        points: u16,
    },
    GameClosed(PlayerId),
    /// The last stock card was drawn. `trump_card` went to the loser of the trick.
    StockExhausted {
        bonus_to: PlayerId,
        trump_card: Card,
    },
    RoundOver(RoundOutcome),
}

impl Event {
    pub fn indent_level(&self) -> u8 {
        match self {
            Event::RoundStarted { .. } => 0,
            Event::RoundOver(..) => 0,
            Event::CardPlayed(..) => 1,
            Event::TrumpExchanged { .. } => 1,
            Event::MarriageAnnounced { .. } => 1,
            Event::GameClosed(..) => 1,
            Event::TrickWon { .. } => 2,
            Event::CardsDrawn { .. } => 2,
            Event::StockExhausted { .. } => 2,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::RoundStarted { leader, trump_card } => match trump_card {
                Some(c) => f.write_fmt(format_args!("Round started: {leader} leads, trump card {c}")),
                None => f.write_fmt(format_args!("Round started: {leader} leads")),
            },
            Event::CardPlayed(p, c) => f.write_fmt(format_args!("{p} played {c}")),
            Event::TrickWon {
                winner,
                cards: (a, b),
                points,
            } => f.write_fmt(format_args!("{winner} won the trick {a} {b} for {points}")),
            Event::CardsDrawn { winner } => f.write_fmt(format_args!("Cards drawn, {winner} first")),
            Event::TrumpExchanged { player, taken, nine } => {
                f.write_fmt(format_args!("{player} exchanged {nine} for {taken}"))
            }
            Event::MarriageAnnounced { player, suit, points } => {
                f.write_fmt(format_args!("{player} announced marriage in {} for {points}", suit.symbol()))
            }
            Event::GameClosed(p) => f.write_fmt(format_args!("{p} closed the game")),
            Event::StockExhausted { bonus_to, trump_card } => {
                f.write_fmt(format_args!("Stock exhausted: {bonus_to} gets the last card bonus, trump card {trump_card} drawn"))
            }
            Event::RoundOver(outcome) => match outcome.winner {
                Some(w) => f.write_fmt(format_args!("Round over: {w} wins {} game points", outcome.game_points)),
                None => f.write_str("Round over: no winner"),
            },
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").field("len", &self.events.len()).finish()
    }
}

impl EventLog {
    pub fn new() -> EventLog {
        Self::default()
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events logged after the first `n`.
    pub fn since(&self, n: usize) -> &[Event] {
        self.events.get(n..).unwrap_or(&[])
    }

    pub fn print(&self) {
        for event in &self.events {
            let prefix = " ".repeat(2 * usize::from(event.indent_level()));
            println!("{prefix}{event}");
        }
    }

    pub fn filter<T, F: Fn(&Event) -> Option<T>>(&self, f: F) -> Vec<T> {
        self.events.iter().filter_map(f).collect()
    }
}
