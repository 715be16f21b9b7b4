use rand::Rng;
use smallvec::SmallVec;

use crate::types::{
    card::Card,
    game_state::{GameState, Step},
    input::NondetResult,
};

use super::NondetRequest;

impl GameState {
    pub fn nondet_request(&self) -> Option<NondetRequest> {
        match self.step {
            Step::Draw { winner } => Some(NondetRequest::DrawCards { winner }),
            _ => None,
        }
    }

    /// Every possible draw for the pending request, each equally likely.
    ///
    /// With two or more stock cards, any ordered pair of distinct stock cards. With a
    /// single stock card, the winner takes it and the loser takes the trump card.
    pub fn draw_outcomes(&self) -> SmallVec<[NondetResult; 16]> {
        let mut res = SmallVec::new();
        if self.nondet_request().is_none() {
            return res;
        }
        match self.stock.len() {
            0 => {}
            1 => {
                if let Some(trump_card) = self.trump_card {
                    res.push(NondetResult::ProvideCards {
                        winner: self.stock[0],
                        loser: trump_card,
                    });
                }
            }
            _ => {
                for (i, &winner) in self.stock.iter().enumerate() {
                    for (j, &loser) in self.stock.iter().enumerate() {
                        if i != j {
                            res.push(NondetResult::ProvideCards { winner, loser });
                        }
                    }
                }
            }
        }
        res
    }

    /// The draw taken from the top of the stock.
    pub fn draw_from_stock(&self) -> Option<NondetResult> {
        self.nondet_request()?;
        match self.stock.len() {
            0 => None,
            1 => Some(NondetResult::ProvideCards {
                winner: self.stock[0],
                loser: self.trump_card?,
            }),
            n => Some(NondetResult::ProvideCards {
                winner: self.stock[n - 1],
                loser: self.stock[n - 2],
            }),
        }
    }

    /// A uniformly random draw for the pending request.
    pub fn sample_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NondetResult> {
        let outcomes = self.draw_outcomes();
        if outcomes.is_empty() {
            return None;
        }
        Some(outcomes[rng.gen_range(0..outcomes.len())])
    }

    /// The last stock card, if exactly one remains.
    #[inline]
    pub fn last_stock_card(&self) -> Option<Card> {
        match self.stock.as_slice() {
            [c] => Some(*c),
            _ => None,
        }
    }
}
