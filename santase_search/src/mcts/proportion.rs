use std::{
    fmt::Display,
    ops::{Add, AddAssign},
};

/// Accumulated reward over `n` playouts, in half points: a win scores 2, a draw 1, a loss 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proportion {
    pub q: u32,
    pub n: u32,
}

impl Display for Proportion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", 0.5 * self.q as f32, self.n))
    }
}

impl Proportion {
    pub const WIN: Proportion = Proportion { q: 2, n: 1 };
    pub const DRAW: Proportion = Proportion { q: 1, n: 1 };
    pub const LOSS: Proportion = Proportion { q: 0, n: 1 };

    #[inline]
    pub fn new(q: u32, n: u32) -> Self {
        Self { q, n }
    }

    /// A single playout with static evaluation `eval`.
    #[inline]
    pub fn from_eval(eval: f32) -> Self {
        if eval > 0.0 {
            Self::WIN
        } else if eval == 0.0 {
            Self::DRAW
        } else {
            Self::LOSS
        }
    }

    /// Mean reward in `[0, 1]`. An unvisited node counts as even.
    #[inline]
    pub fn ratio(self) -> f32 {
        if self.n == 0 {
            return 0.5;
        }
        (self.q as f32) / ((2 * self.n) as f32)
    }

    pub fn sd(self) -> f32 {
        let r = self.ratio();
        f32::sqrt(r * (1.0 - r) / ((self.n + 1) as f32))
    }

    /// The same playouts seen from the other side.
    #[inline]
    pub fn complement(self) -> Self {
        Self::new(2 * self.n - self.q, self.n)
    }
}

impl Add for Proportion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.q + rhs.q, self.n + rhs.n)
    }
}

impl AddAssign for Proportion {
    fn add_assign(&mut self, rhs: Self) {
        self.q += rhs.q;
        self.n += rhs.n;
    }
}

impl From<(u32, u32)> for Proportion {
    #[inline]
    fn from(value: (u32, u32)) -> Self {
        Self::new(value.0, value.1)
    }
}
