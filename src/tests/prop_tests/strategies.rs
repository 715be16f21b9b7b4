use crate::rules::legal_moves;
use crate::strategy::{JustRandom, Strategy as CardStrategy, TrickBasedGreedy};
use crate::types::game_state::GameState;

use super::*;

/// The strict legal set for the side to move.
fn strict_legal(gs: &GameState) -> crate::rules::CardList {
    let player_id = gs.to_move_player().unwrap();
    let led = if player_id == gs.leader { None } else { gs.led_suit() };
    legal_moves(gs.hand(player_id).as_slice(), led, gs.trump_suit)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        max_local_rejects: 4 * CASES,
        max_global_rejects: 4 * CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn greedy_plays_legal_card(gs in arb_reachable_game_state_to_move()) {
        let hand = gs.hand(gs.to_move_player().unwrap()).clone();
        let card = TrickBasedGreedy.play(&gs, &hand).unwrap();
        assert!(strict_legal(&gs).contains(&card));
    }

    #[test]
    fn random_plays_legal_card(gs in arb_reachable_game_state_to_move(), seed in any::<u64>()) {
        let hand = gs.hand(gs.to_move_player().unwrap()).clone();
        let card = JustRandom::seeded(seed).play(&gs, &hand).unwrap();
        assert!(strict_legal(&gs).contains(&card));
    }

    #[test]
    fn strategy_output_is_accepted_by_dispatcher(gs in arb_reachable_game_state_to_move()) {
        let player_id = gs.to_move_player().unwrap();
        let hand = gs.hand(player_id).clone();
        let card = TrickBasedGreedy.play(&gs, &hand).unwrap();
        let mut gs1 = gs;
        let input = Input::FromPlayer(player_id, crate::types::input::PlayerAction::PlayCard(card));
        assert!(gs1.advance(input).is_ok());
    }
}
