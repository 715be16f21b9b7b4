use std::{fmt::Debug, iter::FromIterator};

use smallvec::SmallVec;

use super::card::{Card, CardSet, Suit};

/// Number of cards dealt to each side.
pub const HAND_SIZE: usize = 6;

/// The cards held by one side. Order is kept as dealt and drawn.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand(SmallVec<[Card; 8]>);

impl Hand {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.0.iter().copied()
    }

    pub fn of_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.iter().filter(move |c| c.suit == suit)
    }

    #[inline]
    pub fn push(&mut self, card: Card) {
        self.0.push(card)
    }

    /// Removes the card while keeping the order of the remaining cards.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.0.iter().position(|&c| c == card) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    /// Replaces `old` with `new` at the same position.
    pub fn replace(&mut self, old: Card, new: Card) -> bool {
        match self.0.iter_mut().find(|c| **c == old) {
            Some(c) => {
                *c = new;
                true
            }
            None => false,
        }
    }

    pub fn to_card_set(&self) -> CardSet {
        self.iter().collect()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl From<&[Card]> for Hand {
    fn from(value: &[Card]) -> Self {
        value.iter().copied().collect()
    }
}

impl<const N: usize> From<[Card; N]> for Hand {
    fn from(value: [Card; N]) -> Self {
        value.into_iter().collect()
    }
}

impl Debug for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
