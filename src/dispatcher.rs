use smallvec::SmallVec;

use crate::{
    dispatcher_ops::*,
    rules::{trick_winner, LegalityMode},
    scoring::{LAST_STOCK_BONUS, MARRIAGE_POINTS, TRUMP_MARRIAGE_POINTS},
    types::{
        card::{Card, Rank, Suit},
        game_state::*,
        input::*,
        logging::Event,
    },
};

pub type ActionList<T> = SmallVec<[T; 16]>;

impl GameState {
    /// The player expected to provide the next input, if any.
    pub fn to_move_player(&self) -> Option<PlayerId> {
        if self.is_round_over() {
            return None;
        }
        match self.step {
            Step::Play => {
                if self.players[self.leader].played.is_none() {
                    Some(self.leader)
                } else {
                    Some(self.follower())
                }
            }
            Step::ResolveTrick | Step::Draw { .. } => None,
        }
    }

    fn ensure_leader_before_play(&self, player_id: PlayerId) -> bool {
        player_id == self.leader && self.players.0.played.is_none() && self.players.1.played.is_none()
    }

    pub fn can_exchange_trump(&self, player_id: PlayerId) -> bool {
        self.ensure_leader_before_play(player_id)
            && self.phase.is_open()
            && self.stock.len() >= 2
            && self.trump_card.is_some()
            && self.hand(player_id).contains(self.trump_nine())
    }

    pub fn can_announce_marriage(&self, player_id: PlayerId, suit: Suit) -> bool {
        let player = self.player(player_id);
        self.ensure_leader_before_play(player_id) && !player.marriages.contains(suit) && player.has_marriage(suit)
    }

    pub fn can_close_game(&self, player_id: PlayerId) -> bool {
        self.ensure_leader_before_play(player_id) && self.phase.is_open() && !self.stock.is_empty()
    }

    fn play_card(&mut self, player_id: PlayerId, card: Card) -> Result<DispatchResult, DispatchError> {
        if !self.hand(player_id).contains(card) {
            return Err(DispatchError::CardNotOnHand(card));
        }
        if !self.is_legal(player_id, card) {
            return Err(DispatchError::UnableToPlayCard(card));
        }
        let player = self.player_mut(player_id);
        player.hand.remove(card);
        player.revealed.remove(card);
        player.played = Some(card);
        self.log_event(Event::CardPlayed(player_id, card));
        if player_id == self.leader {
            Ok(DispatchResult::PlayerInput(self.follower()))
        } else {
            self.step = Step::ResolveTrick;
            Ok(DispatchResult::NoInput)
        }
    }

    fn exchange_trump(&mut self, player_id: PlayerId) -> Result<DispatchResult, DispatchError> {
        if !self.can_exchange_trump(player_id) {
            return Err(DispatchError::CannotExchangeTrump);
        }
        let Some(taken) = self.trump_card else {
            return Err(DispatchError::CannotExchangeTrump);
        };
        let nine = self.trump_nine();
        let player = self.player_mut(player_id);
        player.hand.replace(nine, taken);
        player.revealed.remove(nine);
        player.revealed.insert(taken);
        self.trump_card = Some(nine);
        self.log_event(Event::TrumpExchanged {
            player: player_id,
            taken,
            nine,
        });
        Ok(DispatchResult::PlayerInput(player_id))
    }

    fn announce_marriage(&mut self, player_id: PlayerId, suit: Suit) -> Result<DispatchResult, DispatchError> {
        if !self.can_announce_marriage(player_id, suit) {
            return Err(DispatchError::CannotAnnounceMarriage(suit));
        }
        let points = if suit == self.trump_suit {
            TRUMP_MARRIAGE_POINTS
        } else {
            MARRIAGE_POINTS
        };
        let player = self.player_mut(player_id);
        player.marriages.insert(suit);
        player.points += points;
        player.bonus_points += points;
        player.revealed.insert(Card::new(Rank::King, suit));
        player.revealed.insert(Card::new(Rank::Queen, suit));
        self.log_event(Event::MarriageAnnounced {
            player: player_id,
            suit,
            points,
        });
        Ok(DispatchResult::PlayerInput(player_id))
    }

    fn close_game(&mut self, player_id: PlayerId) -> Result<DispatchResult, DispatchError> {
        if !self.can_close_game(player_id) {
            return Err(DispatchError::CannotCloseGame);
        }
        self.phase = Phase::Closed { by: player_id };
        self.log_event(Event::GameClosed(player_id));
        Ok(DispatchResult::PlayerInput(player_id))
    }

    fn after_trick(&mut self) -> DispatchResult {
        if self.is_round_over() {
            let outcome = self.round_outcome();
            self.log_event(Event::RoundOver(outcome));
            return DispatchResult::RoundOver(outcome);
        }
        DispatchResult::PlayerInput(self.leader)
    }

    fn resolve_trick(&mut self) -> Result<DispatchResult, DispatchError> {
        let leader = self.leader;
        let (Some(leader_card), Some(follower_card)) = (self.players[leader].played, self.players[leader.opposite()].played)
        else {
            return Err(DispatchError::PlayerInputRequired);
        };
        let winner = trick_winner(leader_card, follower_card, self.trump_suit).player(leader);
        let points = leader_card.points() + follower_card.points();
        for player_id in PlayerId::VALUES {
            self.player_mut(player_id).played = None;
        }
        let w = self.player_mut(winner);
        w.points += u16::from(points);
        w.tricks_won += 1;
        w.won.insert(leader_card);
        w.won.insert(follower_card);
        self.leader = winner;
        self.log_event(Event::TrickWon {
            winner,
            cards: (leader_card, follower_card),
            points,
        });

        if self.phase.is_open() {
            if !self.stock.is_empty() {
                self.step = Step::Draw { winner };
                return Ok(DispatchResult::NondetRequest(NondetRequest::DrawCards { winner }));
            }
            self.phase = Phase::Exhausted;
        }
        self.step = Step::Play;
        Ok(self.after_trick())
    }

    fn take_from_stock(&mut self, card: Card) -> bool {
        match self.stock.iter().position(|&c| c == card) {
            Some(i) => {
                self.stock.remove(i);
                true
            }
            None => false,
        }
    }

    fn draw_cards(&mut self, winner: PlayerId, winner_card: Card, loser_card: Card) -> Result<DispatchResult, DispatchError> {
        let loser = winner.opposite();
        if let Some(last) = self.last_stock_card() {
            if winner_card != last || Some(loser_card) != self.trump_card {
                return Err(DispatchError::NondetResultInvalid);
            }
            self.stock.clear();
            self.trump_card = None;
            self.player_mut(winner).hand.push(winner_card);
            let w = self.player_mut(winner);
            w.points += LAST_STOCK_BONUS;
            w.bonus_points += LAST_STOCK_BONUS;
            let l = self.player_mut(loser);
            l.hand.push(loser_card);
            l.revealed.insert(loser_card);
            self.phase = Phase::Exhausted;
            self.log_event(Event::CardsDrawn { winner });
            self.log_event(Event::StockExhausted {
                bonus_to: winner,
                trump_card: loser_card,
            });
        } else {
            if winner_card == loser_card || !self.stock.contains(&winner_card) || !self.stock.contains(&loser_card) {
                return Err(DispatchError::NondetResultInvalid);
            }
            self.take_from_stock(winner_card);
            self.take_from_stock(loser_card);
            self.player_mut(winner).hand.push(winner_card);
            self.player_mut(loser).hand.push(loser_card);
            self.log_event(Event::CardsDrawn { winner });
            // An even stock empties without reaching the trump card. It stays face up and out of
            // play for the rest of the round, known to both sides.
            if self.stock.is_empty() {
                self.phase = Phase::Exhausted;
            }
        }
        self.step = Step::Play;
        Ok(DispatchResult::PlayerInput(winner))
    }

    /// Dispatch an input and update the game state accordingly.
    /// Postcondition: If the result is Err, then the game state is unchanged.
    pub fn advance(&mut self, input: Input) -> Result<DispatchResult, DispatchError> {
        if self.is_round_over() {
            return match input {
                Input::NoAction => Ok(DispatchResult::RoundOver(self.round_outcome())),
                _ => Err(DispatchError::InputNotExpected),
            };
        }
        match self.step {
            Step::Play => {
                let Input::FromPlayer(player_id, action) = input else {
                    return Err(match input {
                        Input::NondetResult(..) => DispatchError::NondetResultNotAllowed,
                        _ => DispatchError::PlayerInputRequired,
                    });
                };
                match self.to_move_player() {
                    Some(p) if p == player_id => {}
                    _ => return Err(DispatchError::InvalidPlayer(player_id)),
                }
                match action {
                    PlayerAction::PlayCard(card) => self.play_card(player_id, card),
                    PlayerAction::ExchangeTrump => self.exchange_trump(player_id),
                    PlayerAction::AnnounceMarriage(suit) => self.announce_marriage(player_id, suit),
                    PlayerAction::CloseGame => self.close_game(player_id),
                }
            }
            Step::ResolveTrick => match input {
                Input::NoAction => self.resolve_trick(),
                Input::NondetResult(..) => Err(DispatchError::NondetResultNotAllowed),
                Input::FromPlayer(..) => Err(DispatchError::InputNotExpected),
            },
            Step::Draw { winner } => match input {
                Input::NondetResult(NondetResult::ProvideCards {
                    winner: winner_card,
                    loser: loser_card,
                }) => self.draw_cards(winner, winner_card, loser_card),
                Input::NoAction | Input::FromPlayer(..) => Err(DispatchError::NondetResultRequired),
            },
        }
    }

    /// Get the available game state advancement actions.
    pub fn available_actions(&self) -> ActionList<Input> {
        let mut acts = ActionList::new();
        match self.step {
            Step::Play => {
                let Some(player_id) = self.to_move_player() else {
                    return acts;
                };
                for card in self.legal_cards(player_id, LegalityMode::PhaseAware) {
                    acts.push(Input::FromPlayer(player_id, PlayerAction::PlayCard(card)));
                }
                if self.can_exchange_trump(player_id) {
                    acts.push(Input::FromPlayer(player_id, PlayerAction::ExchangeTrump));
                }
                for suit in Suit::VALUES {
                    if self.can_announce_marriage(player_id, suit) {
                        acts.push(Input::FromPlayer(player_id, PlayerAction::AnnounceMarriage(suit)));
                    }
                }
                if self.can_close_game(player_id) {
                    acts.push(Input::FromPlayer(player_id, PlayerAction::CloseGame));
                }
            }
            Step::ResolveTrick => acts.push(Input::NoAction),
            Step::Draw { .. } => {}
        }
        acts
    }
}
