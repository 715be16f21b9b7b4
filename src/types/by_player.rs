use std::ops::{Index, IndexMut};

use super::game_state::PlayerId;

/// One value per side: `.0` for `PlayerFirst`, `.1` for `PlayerSecond`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByPlayer<T>(pub T, pub T);

impl<T> ByPlayer<T> {
    #[inline]
    pub const fn new(first: T, second: T) -> Self {
        Self(first, second)
    }

    #[inline]
    pub fn from_fn(mut f: impl FnMut(PlayerId) -> T) -> Self {
        let [first, second] = PlayerId::VALUES;
        Self(f(first), f(second))
    }

    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ByPlayer<U> {
        ByPlayer(f(self.0), f(self.1))
    }

    #[inline]
    pub fn each_ref(&self) -> ByPlayer<&T> {
        ByPlayer(&self.0, &self.1)
    }

    #[inline]
    pub fn zip<U>(self, other: ByPlayer<U>) -> ByPlayer<(T, U)> {
        ByPlayer((self.0, other.0), (self.1, other.1))
    }

    /// Sides in seating order together with their values.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::VALUES.into_iter().map(move |p| (p, &self[p]))
    }
}

impl<T> From<(T, T)> for ByPlayer<T> {
    #[inline]
    fn from((first, second): (T, T)) -> Self {
        Self(first, second)
    }
}

impl<T> Index<PlayerId> for ByPlayer<T> {
    type Output = T;

    #[inline]
    fn index(&self, player_id: PlayerId) -> &T {
        match player_id {
            PlayerId::PlayerFirst => &self.0,
            PlayerId::PlayerSecond => &self.1,
        }
    }
}

impl<T> IndexMut<PlayerId> for ByPlayer<T> {
    #[inline]
    fn index_mut(&mut self, player_id: PlayerId) -> &mut T {
        match player_id {
            PlayerId::PlayerFirst => &mut self.0,
            PlayerId::PlayerSecond => &mut self.1,
        }
    }
}
