use crate::types::{
    by_player::ByPlayer,
    game_state::{GameState, PlayerId},
};

/// Round points needed to win a round.
pub const WINNING_POINTS: u16 = 66;
/// Below this many round points the loser is "schneider".
pub const SCHNEIDER_POINTS: u16 = 33;
pub const MARRIAGE_POINTS: u16 = 20;
pub const TRUMP_MARRIAGE_POINTS: u16 = 40;
/// Bonus for winning the trick that empties the stock.
pub const LAST_STOCK_BONUS: u16 = 10;
/// Game points needed to win a match.
pub const MATCH_TARGET: u8 = 11;

/// Result of a finished round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub winner: Option<PlayerId>,
    pub game_points: u8,
    /// The side that closed the game failed to reach the winning threshold.
    pub closer_penalized: bool,
}

impl RoundOutcome {
    pub fn evaluate(points: ByPlayer<u16>, tricks: ByPlayer<u8>, closed_by: Option<PlayerId>) -> RoundOutcome {
        if let Some(closer) = closed_by {
            if points[closer] < WINNING_POINTS {
                return RoundOutcome {
                    winner: Some(closer.opposite()),
                    game_points: 1,
                    closer_penalized: true,
                };
            }
        }

        let (p1, p2) = (points.0, points.1);
        let winner = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => PlayerId::PlayerFirst,
            std::cmp::Ordering::Less => PlayerId::PlayerSecond,
            std::cmp::Ordering::Equal => return RoundOutcome::default(),
        };
        let loser = winner.opposite();
        let game_points = if points[winner] < WINNING_POINTS {
            1
        } else if tricks[loser] == 0 {
            3
        } else if points[loser] < SCHNEIDER_POINTS {
            2
        } else {
            1
        };
        RoundOutcome {
            winner: Some(winner),
            game_points,
            closer_penalized: false,
        }
    }
}

impl GameState {
    /// Outcome of the round from the current points. Meaningful once the round is over.
    pub fn round_outcome(&self) -> RoundOutcome {
        RoundOutcome::evaluate(
            self.players.each_ref().map(|p| p.points),
            self.players.each_ref().map(|p| p.tricks_won),
            self.phase.closed_by(),
        )
    }
}

/// Running score of a match made of several rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchScore {
    pub game_points: ByPlayer<u8>,
    pub rounds: u32,
    pub target: u8,
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new(MATCH_TARGET)
    }
}

impl MatchScore {
    pub fn new(target: u8) -> Self {
        Self {
            game_points: ByPlayer(0, 0),
            rounds: 0,
            target,
        }
    }

    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        if let Some(w) = outcome.winner {
            self.game_points[w] = self.game_points[w].saturating_add(outcome.game_points);
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        PlayerId::VALUES
            .into_iter()
            .find(|&p| self.game_points[p] >= self.target)
    }

    /// The round winner leads the next round. Without a winner the leader stays.
    pub fn next_leader(outcome: &RoundOutcome, previous_leader: PlayerId) -> PlayerId {
        outcome.winner.unwrap_or(previous_leader)
    }
}
