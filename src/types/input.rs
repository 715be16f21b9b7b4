use super::card::{Card, Suit};
use super::game_state::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    PlayCard(Card),
    /// Swap the trump nine in hand for the face-up trump card.
    ExchangeTrump,
    AnnounceMarriage(Suit),
    CloseGame,
}

/// A non-deterministic action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NondetResult {
    /// Cards drawn after a trick. The trick winner draws first.
    ProvideCards { winner: Card, loser: Card },
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    NoAction,
    NondetResult(NondetResult),
    FromPlayer(PlayerId, PlayerAction),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FromPlayer(PlayerId::PlayerFirst, arg1) => f.debug_tuple("P1").field(arg1).finish(),
            Self::FromPlayer(PlayerId::PlayerSecond, arg1) => f.debug_tuple("P2").field(arg1).finish(),
            Self::NoAction => write!(f, "NoAction"),
            Self::NondetResult(arg0) => f.debug_tuple("NondetResult").field(arg0).finish(),
        }
    }
}

impl Input {
    #[inline]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Input::NoAction => None,
            Input::NondetResult(..) => None,
            Input::FromPlayer(p, _) => Some(*p),
        }
    }

    #[inline]
    pub fn player_input(&self) -> Option<PlayerAction> {
        match self {
            Input::NoAction => None,
            Input::NondetResult(..) => None,
            Input::FromPlayer(_, i) => Some(*i),
        }
    }

    /// The card played by this input, if any.
    #[inline]
    pub fn played_card(&self) -> Option<Card> {
        match self {
            Input::FromPlayer(_, PlayerAction::PlayCard(c)) => Some(*c),
            _ => None,
        }
    }
}
