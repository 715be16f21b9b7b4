use crate::scoring::*;

use super::*;

#[test]
fn test_round_outcome_from_state() {
    let gs = GameStateBuilder::default()
        .with_trump_suit(Suit::Clubs)
        .with_points(ByPlayer(40, 70))
        .build();
    assert!(gs.is_round_over());
    let outcome = gs.round_outcome();
    assert_eq!(Some(P2), outcome.winner);
    // P1 has no trick recorded
    assert_eq!(3, outcome.game_points);
}

#[test]
fn test_closer_reaching_threshold_scores_normally() {
    let gs = GameStateBuilder::default()
        .with_trump_suit(Suit::Clubs)
        .with_phase(Phase::Closed { by: P1 })
        .with_points(ByPlayer(70, 50))
        .build();
    let outcome = gs.round_outcome();
    assert_eq!(Some(P1), outcome.winner);
    assert!(!outcome.closer_penalized);
}

#[test]
fn test_closer_missing_threshold_is_penalized() {
    let gs = GameStateBuilder::default()
        .with_trump_suit(Suit::Clubs)
        .with_phase(Phase::Closed { by: P2 })
        .with_points(ByPlayer(30, 65))
        .build();
    let outcome = gs.round_outcome();
    assert_eq!(Some(P1), outcome.winner);
    assert_eq!(1, outcome.game_points);
    assert!(outcome.closer_penalized);
}

#[test]
fn test_below_threshold_higher_points_win_one() {
    let outcome = RoundOutcome::evaluate(ByPlayer(50, 62), ByPlayer(0, 6), None);
    assert_eq!(Some(P2), outcome.winner);
    assert_eq!(1, outcome.game_points);
}
