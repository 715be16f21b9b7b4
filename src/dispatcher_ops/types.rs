use crate::{
    scoring::RoundOutcome,
    types::{
        card::{Card, Suit},
        game_state::PlayerId,
    },
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NondetRequest {
    /// Both players draw one card, the trick winner first.
    DrawCards { winner: PlayerId },
}

/// Indicates game state advancement succeeds.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchResult {
    RoundOver(RoundOutcome),
    NoInput,
    NondetRequest(NondetRequest),
    PlayerInput(PlayerId),
}

/// Indicates game state advancement fails due to input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} is not expected to move")]
    InvalidPlayer(PlayerId),
    #[error("card not on hand: {0}")]
    CardNotOnHand(Card),
    #[error("card cannot be played: {0}")]
    UnableToPlayCard(Card),
    #[error("trump card cannot be exchanged")]
    CannotExchangeTrump,
    #[error("marriage cannot be announced in {0:?}")]
    CannotAnnounceMarriage(Suit),
    #[error("game cannot be closed")]
    CannotCloseGame,
    #[error("player input required")]
    PlayerInputRequired,
    #[error("non-deterministic result required")]
    NondetResultRequired,
    #[error("non-deterministic result not allowed")]
    NondetResultNotAllowed,
    #[error("invalid non-deterministic result")]
    NondetResultInvalid,
    #[error("input not expected")]
    InputNotExpected,
}
