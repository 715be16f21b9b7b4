use rand::{rngs::SmallRng, SeedableRng};

use crate::rules::{trick_winner, TrickWinner};
use crate::sampling::sample_possible_hand;
use crate::types::{card::TOTAL_CARD_POINTS, game_state::PlayerId};

use super::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        max_local_rejects: 4 * CASES,
        max_global_rejects: 4 * CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn available_actions_should_be_performable_with_ok_result(gs in arb_reachable_game_state()) {
        for action in gs.available_actions() {
            let mut gs1 = gs.clone();
            if let Err(e) = gs1.advance(action) {
                dbg!(&gs);
                dbg!(&action);
                dbg!(&e);
                panic!("Action is not performable.");
            }
        }
    }

    #[test]
    fn can_perform_exactly_the_available_player_inputs(gs in arb_reachable_game_state(), action in arb_player_action(), player_id in arb_player_id()) {
        let input = Input::FromPlayer(player_id, action);
        let aa = gs.available_actions();
        let mut gs1 = gs;
        assert_eq!(aa.contains(&input), gs1.advance(input).is_ok())
    }

    #[test]
    fn failed_advance_leaves_state_unchanged(gs in arb_reachable_game_state(), action in arb_player_action(), player_id in arb_player_id()) {
        let mut gs1 = gs.clone();
        if gs1.advance(Input::FromPlayer(player_id, action)).is_err() {
            assert_eq!(gs, gs1);
        }
    }

    #[test]
    fn every_card_is_in_exactly_one_place(gs in arb_reachable_game_state()) {
        let mut all = super::super::all_cards_of(&gs);
        assert_eq!(24, all.len());
        all.sort();
        all.dedup();
        assert_eq!(24, all.len());
    }

    #[test]
    fn points_are_won_cards_plus_bonuses(gs in arb_reachable_game_state()) {
        for (_, p) in gs.players.iter() {
            assert_eq!(p.points, p.won.points() + p.bonus_points);
            assert!(p.revealed.iter().all(|c| p.hand.contains(c)));
        }
    }

    #[test]
    fn hands_are_even_between_tricks(gs in arb_reachable_game_state()) {
        if gs.step == crate::types::game_state::Step::Play && gs.leader_card().is_none() {
            assert_eq!(gs.hand(PlayerId::PlayerFirst).len(), gs.hand(PlayerId::PlayerSecond).len());
        }
    }

    #[test]
    fn completed_round_accounts_for_all_card_points(gs in arb_finished_game_state()) {
        assert!(gs.is_round_over());
        let won: u16 = gs.players.iter().map(|(_, p)| p.won.points()).sum();
        assert_eq!(TOTAL_CARD_POINTS, won);
        let points: u16 = gs.players.iter().map(|(_, p)| p.points).sum();
        let bonus: u16 = gs.players.iter().map(|(_, p)| p.bonus_points).sum();
        assert_eq!(TOTAL_CARD_POINTS + bonus, points);
        let outcome = gs.round_outcome();
        assert_eq!(outcome.winner.is_none(), outcome.game_points == 0);
    }

    #[test]
    fn trick_winner_is_independent_of_roles((a, b) in arb_distinct_cards(), trump in arb_suit()) {
        let comparable = a.suit == b.suit || (a.suit == trump) != (b.suit == trump);
        prop_assume!(comparable);
        let winner_ab = match trick_winner(a, b, trump) {
            TrickWinner::Leader => a,
            TrickWinner::Follower => b,
        };
        let winner_ba = match trick_winner(b, a, trump) {
            TrickWinner::Leader => b,
            TrickWinner::Follower => a,
        };
        assert_eq!(winner_ab, winner_ba);
    }

    #[test]
    fn trump_always_wins_against_non_trump((a, b) in arb_distinct_cards(), trump in arb_suit()) {
        prop_assume!((a.suit == trump) != (b.suit == trump));
        let trump_card = if a.suit == trump { a } else { b };
        let winner = match trick_winner(a, b, trump) {
            TrickWinner::Leader => a,
            TrickWinner::Follower => b,
        };
        assert_eq!(trump_card, winner);
    }

    #[test]
    fn leader_wins_when_follower_neither_follows_nor_trumps((a, b) in arb_distinct_cards(), trump in arb_suit()) {
        prop_assume!(b.suit != a.suit && b.suit != trump);
        assert_eq!(TrickWinner::Leader, trick_winner(a, b, trump));
    }

    #[test]
    fn sampled_hands_avoid_known_cards(gs in arb_reachable_game_state_to_move(), seed in any::<u64>()) {
        let observer = gs.to_move_player().unwrap();
        let target = observer.opposite();
        let mut rng = SmallRng::seed_from_u64(seed);
        let hand = sample_possible_hand(&gs, observer, target, &mut rng);
        assert_eq!(gs.hand(target).len(), hand.len());
        for card in hand.iter() {
            assert!(!gs.hand(observer).contains(card));
            assert_ne!(Some(card), gs.trump_card);
            assert!(!gs.cards_on_table().any(|c| c == card));
            assert!(!gs.stock.contains(&card));
        }
        assert!(gs.player(target).revealed.iter().all(|c| hand.contains(c)));
    }

    #[test]
    fn round_over_state_reports_outcome(gs in arb_finished_game_state()) {
        let mut gs1 = gs.clone();
        assert_eq!(Ok(DispatchResult::RoundOver(gs.round_outcome())), gs1.advance(Input::NoAction));
    }
}
