use std::collections::VecDeque;

use holdem_sim::betting::{PlayerAction, RoundState, Street};
use holdem_sim::cards::*;
use holdem_sim::engine::*;
use holdem_sim::error::SimError;
use holdem_sim::hand_evaluator::HandRank;
use holdem_sim::opponent::OpponentDecision;
use holdem_sim::random::RandomSource;
use holdem_sim::showdown::Contender;

fn cards(tokens: &[&str]) -> Vec<Card> {
    parse_cards(tokens).unwrap()
}

/// Plays a fixed list of actions, then finishes.
struct ScriptedSeat {
    actions: VecDeque<PlayerAction>,
    seen: Vec<RoundState>,
    rejections: Vec<String>,
    events: Vec<RoundEvent>,
}

impl ScriptedSeat {
    fn new(actions: &[PlayerAction]) -> Self {
        ScriptedSeat {
            actions: actions.iter().copied().collect(),
            seen: Vec::new(),
            rejections: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl PlayerSeat for ScriptedSeat {
    fn choose(&mut self, view: &SeatView<'_>) -> PlayerAction {
        assert_eq!(
            view.state.pot,
            view.state.player_contribution + view.state.opponent_contribution
        );
        assert_eq!(view.community.len(), view.state.street.community_count());
        self.seen.push(*view.state);
        self.actions.pop_front().unwrap_or(PlayerAction::Finish)
    }

    fn rejected(&mut self, error: &SimError) {
        self.rejections.push(format!("{:?}", error));
    }

    fn notify(&mut self, event: &RoundEvent) {
        self.events.push(event.clone());
    }
}

struct Roll(f64);

impl RandomSource for Roll {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

fn royal_deal(opponent: &[&str]) -> HandDeal {
    HandDeal::new(
        cards(&["AH", "KH"]),
        cards(opponent),
        cards(&["10H", "JH", "QH", "3S", "4D"]),
    )
    .unwrap()
}

#[test]
fn test_from_deck_deals_nine_distinct_cards() {
    let mut deck = Deck::new();
    let deal = HandDeal::from_deck(&mut deck).unwrap();
    assert_eq!(deal.player_hole.len(), 2);
    assert_eq!(deal.opponent_hole.len(), 2);
    assert_eq!(deal.board.len(), 5);
    assert_eq!(deck.remaining(), 43);
}

#[test]
fn test_from_short_deck_fails_without_dealing() {
    let mut deck = Deck::new();
    deck.deal(45).unwrap();
    assert!(matches!(
        HandDeal::from_deck(&mut deck),
        Err(SimError::InsufficientCards { requested: 9, available: 7 })
    ));
    assert_eq!(deck.remaining(), 7);
}

#[test]
fn test_new_rejects_wrong_sizes() {
    assert!(HandDeal::new(cards(&["AH"]), cards(&["2C", "3D"]), cards(&["4S", "5S", "6S", "7S", "8S"])).is_err());
    assert!(HandDeal::new(cards(&["AH", "KH"]), cards(&["2C", "3D"]), cards(&["4S", "5S", "6S"])).is_err());
}

#[test]
fn test_finish_terminates_with_no_change() {
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[PlayerAction::Finish]);
    let outcome = BettingRound::new(&deal, 100, 100, 2)
        .play(&mut seat, &mut Roll(0.5))
        .unwrap();
    assert_eq!(outcome.ending, Ending::Terminated);
    assert_eq!(outcome.winner, None);
    assert_eq!(outcome.net, 0);
}

#[test]
fn test_player_fold_loses_contribution() {
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[PlayerAction::Fold]);
    let outcome = BettingRound::new(&deal, 100, 100, 2)
        .play(&mut seat, &mut Roll(0.5))
        .unwrap();
    assert_eq!(outcome.ending, Ending::PlayerFolded);
    assert_eq!(outcome.winner, Some(Contender::Opponent));
    assert_eq!(outcome.net, 0);
    assert_eq!(outcome.state.pot, 2);
}

#[test]
fn test_opponent_fold_awards_pot() {
    // Weak opponent hand and a low roll: it folds to the flop bet.
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[PlayerAction::Call, PlayerAction::Bet(10)]);
    let outcome = BettingRound::new(&deal, 100, 100, 2)
        .play(&mut seat, &mut Roll(0.05))
        .unwrap();
    assert_eq!(outcome.ending, Ending::OpponentFolded);
    assert_eq!(outcome.winner, Some(Contender::Player));
    assert_eq!(outcome.state.pot, 14);
    assert_eq!(outcome.net, 14);
    assert_eq!(outcome.community.len(), 3);
}

#[test]
fn test_checked_down_hand_reaches_showdown() {
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[
        PlayerAction::Call,
        PlayerAction::Check,
        PlayerAction::Check,
        PlayerAction::Check,
    ]);
    let outcome = BettingRound::new(&deal, 100, 100, 2)
        .play(&mut seat, &mut Roll(0.99))
        .unwrap();

    assert_eq!(outcome.ending, Ending::Showdown);
    assert_eq!(outcome.winner, Some(Contender::Player));
    assert_eq!(outcome.rank, Some(HandRank::RoyalFlush));
    assert_eq!(outcome.net, 4);
    assert_eq!(outcome.community, deal.board);
    assert_eq!(outcome.state.street, Street::Showdown);

    let streets: Vec<Street> = seat
        .events
        .iter()
        .filter_map(|e| match e {
            RoundEvent::StreetDealt { street, .. } => Some(*street),
            _ => None,
        })
        .collect();
    assert_eq!(streets, vec![Street::PreFlop, Street::Flop, Street::Turn, Street::River]);
    assert!(matches!(seat.events.last(), Some(RoundEvent::Showdown { .. })));
}

#[test]
fn test_all_in_runs_out_full_board() {
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[PlayerAction::AllIn]);
    let outcome = BettingRound::new(&deal, 50, 100, 2)
        .play(&mut seat, &mut Roll(0.5))
        .unwrap();

    assert_eq!(outcome.ending, Ending::Showdown);
    assert_eq!(outcome.community.len(), 5);
    assert_eq!(outcome.state.pot, 52);
    assert_eq!(outcome.state.player_stack, 0);
    assert_eq!(outcome.net, 52);
    assert!(seat.events.contains(&RoundEvent::AllInRunout));
    // Only the all-in itself was asked for.
    assert_eq!(seat.seen.len(), 1);
    assert!(!seat.events.iter().any(|e| matches!(e, RoundEvent::OpponentActed(_))));
}

#[test]
fn test_fifth_raise_rejected_without_change() {
    // Pocket aces re-raise whenever the cap allows.
    let deal = royal_deal(&["AS", "AD"]);
    let mut seat = ScriptedSeat::new(&[
        PlayerAction::Raise(4),
        PlayerAction::Raise(4),
        PlayerAction::Raise(20),
        PlayerAction::Call,
        PlayerAction::Finish,
    ]);
    let outcome = BettingRound::new(&deal, 1000, 1000, 2)
        .play(&mut seat, &mut Roll(0.5))
        .unwrap();

    assert_eq!(seat.rejections.len(), 1);
    assert_eq!(seat.rejections[0], "RaiseCapExceeded(4)");
    // The state offered after the rejection is the one the raise was tried on.
    assert_eq!(seat.seen[2], seat.seen[3]);
    assert_eq!(seat.seen[2].raise_count, 4);
    assert_eq!(seat.seen[2].current_bet, 5);

    assert_eq!(outcome.ending, Ending::Terminated);
    assert_eq!(outcome.state.pot, 26);
    assert_eq!(outcome.state.street, Street::Ended);
}

#[test]
fn test_invalid_action_reprompts() {
    let deal = royal_deal(&["7C", "2D"]);
    let mut seat = ScriptedSeat::new(&[PlayerAction::Check, PlayerAction::Bet(5), PlayerAction::Fold]);
    let outcome = BettingRound::new(&deal, 100, 100, 2)
        .play(&mut seat, &mut Roll(0.5))
        .unwrap();
    assert_eq!(seat.rejections.len(), 2);
    assert!(seat.rejections.iter().all(|e| e.starts_with("InvalidAction")));
    assert_eq!(outcome.ending, Ending::PlayerFolded);
    assert_eq!(outcome.state.pot, 2);
}

#[test]
fn test_opponent_shove_ends_betting() {
    // Trip aces on the flop and a low roll: the short opponent raises its last chips.
    let deal = HandDeal::new(
        cards(&["7C", "2D"]),
        cards(&["AS", "AD"]),
        cards(&["AH", "KH", "3S", "9D", "JC"]),
    )
    .unwrap();
    let mut seat = ScriptedSeat::new(&[PlayerAction::Call, PlayerAction::Bet(5)]);
    let outcome = BettingRound::new(&deal, 100, 10, 2)
        .play(&mut seat, &mut Roll(0.1))
        .unwrap();

    assert_eq!(seat.seen.len(), 2);
    assert!(seat.events.contains(&RoundEvent::OpponentActed(OpponentDecision::raise(8))));
    assert!(seat.events.contains(&RoundEvent::AllInRunout));
    assert_eq!(outcome.ending, Ending::Showdown);
    assert_eq!(outcome.community.len(), 5);

    let state = outcome.state;
    assert_eq!(state.opponent_stack, 0);
    assert_eq!(state.pot, state.player_contribution + state.opponent_contribution);
    assert_eq!(state.pot, 17);
    assert_eq!(outcome.winner, Some(Contender::Opponent));
    assert_eq!(outcome.net, -(state.player_contribution as i64));
    assert_eq!(outcome.net, -7);
}
