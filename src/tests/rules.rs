use crate::rules::*;

use super::*;

#[test]
fn test_card_points_sum_to_120() {
    assert_eq!(120u16, Card::all().map(|c| u16::from(c.points())).sum());
    assert_eq!(24, Card::all().count());
}

#[test]
fn test_following_must_follow_suit_when_possible() {
    let hand = cards(["KH", "9S", "JC"]);
    assert_eq!(&[c("KH")][..], &legal_moves(&hand, Some(Suit::Hearts), Suit::Spades)[..]);
}

#[test]
fn test_following_must_trump_without_led_suit() {
    let hand = cards(["KD", "9S", "JS", "AC"]);
    assert_eq!(
        &cards(["9S", "JS"])[..],
        &legal_moves(&hand, Some(Suit::Hearts), Suit::Spades)[..]
    );
}

#[test]
fn test_trick_winner_by_points_within_suit() {
    assert_eq!(TrickWinner::Leader, trick_winner(c("AH"), c("KH"), Suit::Spades));
    assert_eq!(TrickWinner::Follower, trick_winner(c("9D"), c("JD"), Suit::Spades));
    assert_eq!(TrickWinner::Follower, trick_winner(c("10S"), c("AS"), Suit::Spades));
}

#[test]
fn test_trick_winner_player() {
    assert_eq!(P2, TrickWinner::Follower.player(P1));
    assert_eq!(P1, TrickWinner::Leader.player(P1));
    assert_eq!(P1, TrickWinner::Follower.player(P2));
}

#[test]
fn test_legal_cards_of_state() {
    let gs = GameStateBuilder::default()
        .with_hands(cards(["AH", "9C"]), cards(["10H", "JD"]))
        .with_trump_suit(Suit::Spades)
        .with_leader(P1)
        .with_played(None)
        .build();
    assert_eq!(Phase::Exhausted, gs.phase);
    assert_eq!(2, gs.legal_cards(P1, LegalityMode::Strict).len());
    assert!(gs.legal_cards(P2, LegalityMode::Strict).is_empty());

    let mut gs = gs;
    gs.advance(play(P1, "AH")).unwrap();
    assert_eq!(&[c("10H")][..], &gs.legal_cards(P2, LegalityMode::PhaseAware)[..]);
    assert!(gs.is_legal(P2, c("10H")));
    assert!(!gs.is_legal(P2, c("JD")));
}

#[test]
fn test_open_phase_allows_any_card_when_phase_aware() {
    let mut gs = GameStateBuilder::default()
        .with_hands(cards(["AH", "9C"]), cards(["10H", "JD"]))
        .with_stock(cards(["QS", "KD", "JC"]))
        .with_trump_card(Some(c("9S")))
        .build();
    gs.advance(play(P1, "AH")).unwrap();
    assert_eq!(2, gs.legal_cards(P2, LegalityMode::PhaseAware).len());
    assert_eq!(1, gs.legal_cards(P2, LegalityMode::Strict).len());
    assert!(gs.is_legal(P2, c("JD")));
}
