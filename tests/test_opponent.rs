use holdem_sim::betting::{Street, MAX_RAISES};
use holdem_sim::cards::*;
use holdem_sim::opponent::*;
use holdem_sim::random::RngSource;

fn cards(tokens: &[&str]) -> Vec<Card> {
    parse_cards(tokens).unwrap()
}

fn facing<'a>(hole: &'a [Card], current_bet: u32, pot: u32, raise_count: u8) -> OpponentView<'a> {
    OpponentView {
        current_bet,
        pot,
        street: Street::PreFlop,
        hole_cards: hole,
        community: &[],
        opponent_stack: 500,
        raise_count,
        player_stack: 500,
    }
}

#[test]
fn test_never_raises_at_cap() {
    let hole = cards(&["AH", "AS"]);
    let view = facing(&hole, 10, 50, MAX_RAISES);
    for seed in 0..500 {
        let decision = decide(&view, &mut RngSource::seeded(seed));
        assert_ne!(decision.action, OpponentAction::Raise, "seed {}", seed);
        assert_eq!(decision, OpponentDecision::call(10));
    }
}

#[test]
fn test_medium_hand_at_cap_never_raises() {
    let hole = cards(&["QH", "5S"]);
    let view = facing(&hole, 8, 30, MAX_RAISES);
    for seed in 0..500 {
        let decision = decide(&view, &mut RngSource::seeded(seed));
        assert!(
            matches!(decision.action, OpponentAction::Call | OpponentAction::Fold),
            "seed {} gave {}",
            seed,
            decision
        );
    }
}

#[test]
fn test_amounts_within_stacks() {
    let hole = cards(&["KD", "KC"]);
    for seed in 0..300 {
        let mut view = facing(&hole, 40, 120, 0);
        view.opponent_stack = 60;
        view.player_stack = 55;
        let decision = decide(&view, &mut RngSource::seeded(seed));
        assert!(decision.amount <= view.opponent_stack.min(view.player_stack));
    }
}

#[test]
fn test_call_clamped_to_stack() {
    let hole = cards(&["QH", "JH"]);
    let mut view = facing(&hole, 80, 100, MAX_RAISES);
    view.opponent_stack = 30;
    let decision = decide(&view, &mut RngSource::seeded(1));
    assert_eq!(decision, OpponentDecision::call(30));
}

#[test]
fn test_raise_target_too_small_becomes_call() {
    // The effective stack is no bigger than the bet, so a raise is impossible.
    let hole = cards(&["AH", "AS"]);
    let mut view = facing(&hole, 20, 60, 0);
    view.player_stack = 20;
    let decision = decide(&view, &mut RngSource::seeded(5));
    assert_eq!(decision, OpponentDecision::call(20));
}

#[test]
fn test_same_seed_same_decisions() {
    let hole = cards(&["9C", "8C"]);
    let view = facing(&hole, 4, 6, 1);
    let mut a = RngSource::seeded(42);
    let mut b = RngSource::seeded(42);
    for _ in 0..50 {
        assert_eq!(decide(&view, &mut a), decide(&view, &mut b));
    }
}

#[test]
fn test_postflop_strength_follows_made_hand() {
    let hole = cards(&["7C", "2D"]);
    let board = cards(&["7H", "7S", "2C"]);
    assert_eq!(hand_strength(Street::Flop, &hole, &board), 7.0);
    assert!(hand_strength(Street::PreFlop, &hole, &[]) < 3.0);
}

#[test]
fn test_decision_display() {
    assert_eq!(OpponentDecision::raise(12).to_string(), "raise 12");
    assert_eq!(OpponentDecision::check().to_string(), "check");
}
