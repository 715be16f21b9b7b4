//! Non-interactive round loop between two strategies.

use log::{debug, info, warn};

use crate::{
    dispatcher_ops::{DispatchError, DispatchResult},
    scoring::RoundOutcome,
    strategy::{Strategy, StrategyError},
    types::{
        by_player::ByPlayer,
        card::Suit,
        game_state::{GameState, PlayerId, Step},
        input::{Input, PlayerAction},
        logging::{Event, EventLog},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("{0} strategy failed: {1}")]
    Strategy(PlayerId, StrategyError),
    #[error("no draw available for the pending request")]
    NoDraw,
}

/// Forward events logged since `seen` to both strategies.
fn forward_events<S: Strategy>(state: &GameState, seen: &mut usize, strategies: &mut ByPlayer<S>) {
    let Some(log) = &state.log else {
        return;
    };
    for event in log.since(*seen) {
        strategies.0.observe(event);
        strategies.1.observe(event);
    }
    *seen = log.len();
}

/// Announce the first marriage available to the leader before it leads.
fn announce_marriage(state: &mut GameState, player_id: PlayerId) -> Result<(), DispatchError> {
    if let Some(suit) = Suit::VALUES
        .into_iter()
        .find(|&suit| state.can_announce_marriage(player_id, suit))
    {
        state.advance(Input::FromPlayer(player_id, PlayerAction::AnnounceMarriage(suit)))?;
    }
    Ok(())
}

/// Play `state` to the end of the round, asking `strategies` for every card.
///
/// Draws are taken from the top of the stock. A marriage is announced automatically for
/// the leader. The state's event log is enabled if it was not, and every event is
/// forwarded to both strategies.
pub fn play_round<S: Strategy>(state: &mut GameState, strategies: &mut ByPlayer<S>) -> Result<RoundOutcome, RoundError> {
    let mut seen = 0;
    if state.log.is_none() {
        let mut log = EventLog::new();
        log.log(Event::RoundStarted {
            leader: state.leader,
            trump_card: state.trump_card,
        });
        state.log = Some(Box::new(log));
    }
    loop {
        forward_events(state, &mut seen, strategies);
        if state.is_round_over() {
            let outcome = state.round_outcome();
            info!("{}", Event::RoundOver(outcome));
            return Ok(outcome);
        }
        let res = match state.step {
            Step::ResolveTrick => state.advance(Input::NoAction)?,
            Step::Draw { .. } => {
                let draw = state.draw_from_stock().ok_or(RoundError::NoDraw)?;
                state.advance(Input::NondetResult(draw))?
            }
            Step::Play => {
                let Some(player_id) = state.to_move_player() else {
                    return Err(DispatchError::InputNotExpected.into());
                };
                if player_id == state.leader && state.leader_card().is_none() {
                    announce_marriage(state, player_id)?;
                    forward_events(state, &mut seen, strategies);
                    if strategies[player_id].should_close_game(state, state.hand(player_id)) && state.can_close_game(player_id) {
                        state.advance(Input::FromPlayer(player_id, PlayerAction::CloseGame))?;
                        forward_events(state, &mut seen, strategies);
                    }
                }
                let hand = state.hand(player_id).clone();
                let card = strategies[player_id]
                    .play(state, &hand)
                    .map_err(|e| RoundError::Strategy(player_id, e))?;
                debug!("{player_id} ({}) plays {card}", strategies[player_id].name());
                match state.advance(Input::FromPlayer(player_id, PlayerAction::PlayCard(card))) {
                    Ok(res) => res,
                    Err(e) => {
                        warn!("{player_id} chose {card} which was rejected: {e}");
                        return Err(e.into());
                    }
                }
            }
        };
        if let DispatchResult::RoundOver(outcome) = res {
            forward_events(state, &mut seen, strategies);
            info!("{}", Event::RoundOver(outcome));
            return Ok(outcome);
        }
    }
}
