use instant::Instant;
use log::{info, warn};
use santase_sim::{
    prelude::*,
    rand::seq::SliceRandom,
    strategy::{CardMemory, Strategy, StrategyError},
};

/// Plays the card chosen by a game tree search over the round.
///
/// The search sees the acting side's hand and the cards it has seen revealed.
/// The other hand is hidden by `GameTreeSearch::search_hidden`.
#[derive(Debug)]
pub struct SearchStrategy<S> {
    name: &'static str,
    pub search: S,
    pub legality: LegalityMode,
    pub memory: CardMemory,
}

impl<S: GameTreeSearch<GameStateWrapper> + Send> SearchStrategy<S> {
    pub fn new(name: &'static str, search: S, legality: LegalityMode) -> Self {
        Self {
            name,
            search,
            legality,
            memory: CardMemory::new(),
        }
    }

    /// The position the search starts from, as seen by `player_id`.
    fn position(&self, state: &GameState, player_id: PlayerId, hand: &Hand) -> GameStateWrapper {
        let mut game_state = state.clone();
        game_state.log = None;
        game_state.player_mut(player_id).hand = hand.clone();
        let other = player_id.opposite();
        let known = self.memory.known_in_hand(other);
        let other_state = game_state.player_mut(other);
        other_state.revealed = other_state.revealed.union(known);
        GameStateWrapper::new(game_state, self.legality)
    }

    /// A uniformly random legal card, or any card of the hand if none is legal.
    fn fallback(&mut self, state: &GameState, player_id: PlayerId, hand: &Hand) -> Result<Card, StrategyError> {
        let moves = legal_moves_in_phase(
            hand.as_slice(),
            state.led_suit(),
            state.trump_suit,
            state.phase,
            self.legality,
        );
        let rng = self.search.rng();
        let card = moves
            .choose(rng)
            .or_else(|| hand.as_slice().choose(rng))
            .copied()
            .ok_or(StrategyError::EmptyHand)?;
        warn!("{}: no card found by search for {player_id}, playing {card}", self.name);
        Ok(card)
    }
}

impl<S: GameTreeSearch<GameStateWrapper> + Send> Strategy for SearchStrategy<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError> {
        if hand.is_empty() {
            return Err(StrategyError::EmptyHand);
        }
        let Some(player_id) = state.to_move_player() else {
            return self.fallback(state, state.leader, hand);
        };
        let position = self.position(state, player_id, hand);
        let t0 = Instant::now();
        let res = self.search.search_hidden(&position, player_id);
        match res.action.and_then(|a| a.played_card()) {
            Some(card) if hand.contains(card) => {
                info!(
                    "{}: {player_id} plays {card} (eval={:.2}, {})",
                    self.name,
                    res.eval,
                    res.counter.summary(t0.elapsed().as_nanos())
                );
                Ok(card)
            }
            _ => self.fallback(state, player_id, hand),
        }
    }

    fn observe(&mut self, event: &Event) {
        self.memory.observe(event);
    }
}

#[cfg(test)]
mod tests {
    use santase_sim::prelude::*;

    use super::*;
    use crate::{test_positions::*, Expectiminimax, ExpectiminimaxConfig, MCTSConfig, MCTS};

    #[test]
    fn test_expectiminimax_strategy_plays_winning_lead() {
        let gs = two_trick_endgame();
        let mut strategy = SearchStrategy::new(
            "expectiminimax",
            Expectiminimax::new(ExpectiminimaxConfig::new(40, 8)),
            LegalityMode::Strict,
        );
        assert_eq!(Ok(c("AH")), strategy.play(&gs, &gs.hand(P1).clone()));
        assert_eq!("expectiminimax", strategy.name());
        assert!(!strategy.should_close_game(&gs, gs.hand(P1)));
    }

    #[test]
    fn test_mcts_strategy_plays_winning_lead() {
        let gs = two_trick_endgame();
        let mut strategy = SearchStrategy::new(
            "mcts",
            MCTS::<GameStateWrapper>::new(MCTSConfig::new(200, 24)),
            LegalityMode::Strict,
        );
        assert_eq!(Ok(c("AH")), strategy.play(&gs, &gs.hand(P1).clone()));
    }

    /// Checks every card played by `inner` against the position it was asked about.
    struct Checked {
        inner: Box<dyn Strategy>,
        legality: LegalityMode,
        plays: usize,
    }

    impl Strategy for Checked {
        fn name(&self) -> &'static str {
            self.inner.name()
        }

        fn play(&mut self, state: &GameState, hand: &Hand) -> Result<Card, StrategyError> {
            let player_id = state.to_move_player().unwrap();
            let before = hand.clone();
            let card = self.inner.play(state, hand)?;
            assert_eq!(&before, hand);
            assert_eq!(state.hand(player_id), hand);
            assert!(
                state.legal_cards(player_id, self.legality).contains(&card),
                "{} played {card} from {hand:?}",
                self.inner.name()
            );
            self.plays += 1;
            Ok(card)
        }

        fn observe(&mut self, event: &Event) {
            self.inner.observe(event)
        }
    }

    fn expectiminimax_player() -> Checked {
        Checked {
            inner: Box::new(SearchStrategy::new(
                "expectiminimax",
                Expectiminimax::new(ExpectiminimaxConfig::new(3, 2)),
                LegalityMode::Strict,
            )),
            legality: LegalityMode::Strict,
            plays: 0,
        }
    }

    fn mcts_player() -> Checked {
        Checked {
            inner: Box::new(SearchStrategy::new(
                "mcts",
                MCTS::<GameStateWrapper>::new(MCTSConfig::new(60, 10)),
                LegalityMode::PhaseAware,
            )),
            legality: LegalityMode::PhaseAware,
            plays: 0,
        }
    }

    #[test]
    fn test_search_strategies_play_dealt_rounds_legally() {
        for seed in 0..6 {
            let mut gs = dealt(seed);
            let mut strategies = if seed % 2 == 0 {
                ByPlayer::new(expectiminimax_player(), mcts_player())
            } else {
                ByPlayer::new(mcts_player(), expectiminimax_player())
            };
            let outcome = santase_sim::driver::play_round(&mut gs, &mut strategies);
            assert!(outcome.is_ok(), "seed {seed}: {outcome:?}");
            assert!(gs.is_round_over());
            assert_eq!(12, gs.player(P1).tricks_won + gs.player(PlayerId::PlayerSecond).tricks_won);
            assert_eq!(24, strategies.0.plays + strategies.1.plays);
        }
    }

    #[test]
    fn test_fallback_chooses_random_legal_card() {
        let gs = dealt(2);
        let hand = gs.hand(P1).clone();
        let mut strategy = SearchStrategy::new(
            "expectiminimax",
            Expectiminimax::new(ExpectiminimaxConfig::new(1, 1)),
            LegalityMode::Strict,
        );
        let mut chosen = CardSet::new();
        for _ in 0..30 {
            let card = strategy.fallback(&gs, P1, &hand).unwrap();
            assert!(hand.contains(card));
            chosen.insert(card);
        }
        assert!(chosen.iter().count() > 1);
    }

    #[test]
    fn test_empty_hand_is_an_error() {
        let gs = two_trick_endgame();
        let mut strategy = SearchStrategy::new("expectiminimax", Expectiminimax::default(), LegalityMode::Strict);
        assert_eq!(Err(StrategyError::EmptyHand), strategy.play(&gs, &Hand::new()));
    }

    #[test]
    fn test_observed_marriage_is_revealed_to_search() {
        let gs = dealt(1);
        let mut strategy = SearchStrategy::new("expectiminimax", Expectiminimax::default(), LegalityMode::Strict);
        strategy.observe(&Event::MarriageAnnounced {
            player: PlayerId::PlayerSecond,
            suit: Suit::Hearts,
            points: 20,
        });
        let position = strategy.position(&gs, P1, gs.hand(P1));
        let revealed = position.game_state.player(PlayerId::PlayerSecond).revealed;
        assert!(revealed.contains(c("KH")));
        assert!(revealed.contains(c("QH")));
        assert!(position.game_state.log.is_none());
    }
}
