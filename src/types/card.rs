use std::{
    fmt::{Debug, Display},
    iter::FromIterator,
    str::FromStr,
};

use enum_map::{Enum, EnumMap};
use enumset::{EnumSet, EnumSetType};

/// Number of cards in a Santase deck.
pub const DECK_SIZE: usize = 24;

/// Sum of the point values of all cards in the deck.
pub const TOTAL_CARD_POINTS: u16 = 120;

#[derive(Debug, PartialOrd, Ord, Hash, Enum, EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u8")]
pub enum Rank {
    Nine,
    Jack,
    Queen,
    King,
    Ten,
    Ace,
}

impl Rank {
    /// Ranks in ascending order of point value.
    pub const VALUES: [Rank; 6] = [Rank::Nine, Rank::Jack, Rank::Queen, Rank::King, Rank::Ten, Rank::Ace];

    #[inline]
    pub const fn points(self) -> u8 {
        match self {
            Rank::Nine => 0,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Nine => "9",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ten => "10",
            Rank::Ace => "A",
        }
    }

    fn from_symbol(s: &str) -> Option<Rank> {
        match s {
            "9" => Some(Rank::Nine),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "10" | "T" => Some(Rank::Ten),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }
}

#[derive(Debug, PartialOrd, Ord, Hash, Enum, EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u8")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const VALUES: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A playing card. Two cards with the same rank and suit are the same card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[inline]
    pub const fn points(self) -> u8 {
        self.rank.points()
    }

    #[inline]
    pub fn is_trump(self, trump_suit: Suit) -> bool {
        self.suit == trump_suit
    }

    /// All 24 cards, grouped by suit and ordered by rank within a suit.
    pub fn all() -> impl Iterator<Item = Card> {
        Suit::VALUES
            .into_iter()
            .flat_map(|suit| Rank::VALUES.into_iter().map(move |rank| Card::new(rank, suit)))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardParseError {
    #[error("empty card string")]
    Empty,
    #[error("invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("invalid suit: {0:?}")]
    InvalidSuit(char),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses the rank followed by the suit letter, e.g. `10S` or `qh`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s.chars().last().ok_or(CardParseError::Empty)?;
        let suit = Suit::from_symbol(suit_char).ok_or(CardParseError::InvalidSuit(suit_char))?;
        let rank_part = s[..s.len() - suit_char.len_utf8()].to_ascii_uppercase();
        let rank = Rank::from_symbol(&rank_part).ok_or(CardParseError::InvalidRank(rank_part))?;
        Ok(Card::new(rank, suit))
    }
}

/// A set of distinct cards, stored as one rank set per suit.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSet(EnumMap<Suit, EnumSet<Rank>>);

impl CardSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Card::all().collect()
    }

    /// Returns `true` if the card was not already present.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        self.0[card.suit].insert(card.rank)
    }

    /// Returns `true` if the card was present.
    #[inline]
    pub fn remove(&mut self, card: Card) -> bool {
        self.0[card.suit].remove(card.rank)
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0[card.suit].contains(card.rank)
    }

    #[inline]
    pub fn ranks(&self, suit: Suit) -> EnumSet<Rank> {
        self.0[suit]
    }

    pub fn len(&self) -> usize {
        self.0.values().map(|ranks| ranks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|ranks| ranks.is_empty())
    }

    pub fn union(mut self, other: CardSet) -> CardSet {
        for (suit, ranks) in self.0.iter_mut() {
            *ranks |= other.0[suit];
        }
        self
    }

    pub fn difference(mut self, other: CardSet) -> CardSet {
        for (suit, ranks) in self.0.iter_mut() {
            *ranks -= other.0[suit];
        }
        self
    }

    pub fn is_disjoint(&self, other: &CardSet) -> bool {
        self.0.iter().all(|(suit, ranks)| ranks.is_disjoint(other.0[suit]))
    }

    /// Total point value of the cards in this set.
    pub fn points(&self) -> u16 {
        self.iter().map(|c| c.points() as u16).sum()
    }

    /// Iterates in the same order as `Card::all`.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.0
            .iter()
            .flat_map(|(suit, ranks)| ranks.iter().map(move |rank| Card::new(rank, suit)))
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = CardSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Card> for CardSet {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl Debug for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for card in Card::all() {
            let s = card.to_string();
            assert_eq!(Ok(card), s.parse::<Card>());
        }
        assert_eq!(Ok(Card::new(Rank::Ten, Suit::Spades)), "10s".parse());
        assert_eq!(Err(CardParseError::InvalidSuit('X')), "KX".parse::<Card>());
        assert_eq!(Err(CardParseError::InvalidRank("8".to_string())), "8H".parse::<Card>());
        assert_eq!(Err(CardParseError::Empty), "".parse::<Card>());
    }

    #[test]
    fn test_deck_points_sum_to_120() {
        assert_eq!(DECK_SIZE, Card::all().count());
        let total: u16 = Card::all().map(|c| c.points() as u16).sum();
        assert_eq!(TOTAL_CARD_POINTS, total);
        assert_eq!(TOTAL_CARD_POINTS, CardSet::full().points());
    }

    #[test]
    fn test_card_set_operations() {
        let kh = Card::new(Rank::King, Suit::Hearts);
        let qh = Card::new(Rank::Queen, Suit::Hearts);
        let mut set = CardSet::new();
        assert!(set.is_empty());
        assert!(set.insert(kh));
        assert!(!set.insert(kh));
        set.insert(qh);
        assert_eq!(2, set.len());
        assert_eq!(vec![qh, kh], set.iter().collect::<Vec<_>>());
        assert_eq!(22, CardSet::full().difference(set).len());
        assert!(CardSet::full().difference(set).is_disjoint(&set));
        assert!(set.remove(qh));
        assert!(!set.contains(qh));
    }
}
