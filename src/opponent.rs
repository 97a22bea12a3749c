use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::best_hand::best_hand;
use crate::betting::{Street, MAX_RAISES};
use crate::cards::Card;
use crate::random::RandomSource;

/// Weak hands fold outright this often, whatever the bet.
pub const SCARE_FOLD_CHANCE: f64 = 0.10;
/// Medium hands raise (or open) this often.
pub const AGGRESSION_CHANCE: f64 = 0.30;
/// Weak hands still call a bet this often.
pub const LOOSE_CALL_CHANCE: f64 = 0.50;

const WEAK: f64 = 3.0;
const BET_STRENGTH: f64 = 5.0;
const RAISE_STRENGTH: f64 = 6.0;
const MAX_STRENGTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for OpponentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpponentAction::Fold => "fold",
            OpponentAction::Check => "check",
            OpponentAction::Call => "call",
            OpponentAction::Bet => "bet",
            OpponentAction::Raise => "raise",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentDecision {
    pub action: OpponentAction,
    pub amount: u32,
}

impl OpponentDecision {
    pub fn fold() -> Self {
        OpponentDecision { action: OpponentAction::Fold, amount: 0 }
    }

    pub fn check() -> Self {
        OpponentDecision { action: OpponentAction::Check, amount: 0 }
    }

    pub fn call(amount: u32) -> Self {
        OpponentDecision { action: OpponentAction::Call, amount }
    }

    pub fn bet(amount: u32) -> Self {
        OpponentDecision { action: OpponentAction::Bet, amount }
    }

    pub fn raise(amount: u32) -> Self {
        OpponentDecision { action: OpponentAction::Raise, amount }
    }
}

impl fmt::Display for OpponentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            OpponentAction::Fold | OpponentAction::Check => write!(f, "{}", self.action),
            _ => write!(f, "{} {}", self.action, self.amount),
        }
    }
}

/// Everything the opponent is allowed to see when it acts.
#[derive(Debug, Clone, Copy)]
pub struct OpponentView<'a> {
    pub current_bet: u32,
    pub pot: u32,
    pub street: Street,
    pub hole_cards: &'a [Card],
    pub community: &'a [Card],
    pub opponent_stack: u32,
    pub raise_count: u8,
    pub player_stack: u32,
}

/// Heuristic starting-hand score in `[0, 10]`.
pub fn pocket_strength(hole_cards: &[Card]) -> f64 {
    let (first, second) = match hole_cards {
        [a, b] => (a, b),
        _ => return 0.0,
    };
    let (v1, v2) = (first.value() as f64, second.value() as f64);
    let mut score = 0.0;

    if first.rank == second.rank {
        score += v1 / 2.0;
    }
    if first.suit == second.suit {
        score += 2.0;
    }
    let gap = (v1 - v2).abs();
    if gap >= 1.0 && gap <= 3.0 {
        score += 2.0 / gap;
    }
    score += 0.3 * v1.max(v2);

    score.min(MAX_STRENGTH)
}

/// Pocket score pre-flop, best-hand rank ordinal afterwards.
pub fn hand_strength(street: Street, hole_cards: &[Card], community: &[Card]) -> f64 {
    if street == Street::PreFlop || community.is_empty() {
        return pocket_strength(hole_cards);
    }
    match best_hand(hole_cards, community) {
        Ok(evaluation) => evaluation.rank.value() as f64,
        Err(e) => {
            debug!("falling back to pocket strength: {}", e);
            pocket_strength(hole_cards)
        }
    }
}

/// Chooses the opponent's action. One draw from `chance` drives every
/// probabilistic branch of a single decision.
pub fn decide(view: &OpponentView<'_>, chance: &mut dyn RandomSource) -> OpponentDecision {
    let strength = hand_strength(view.street, view.hole_cards, view.community);
    let roll = chance.next_unit();
    let effective = view.opponent_stack.min(view.player_stack);

    let decision = if strength < WEAK && roll < SCARE_FOLD_CHANCE {
        OpponentDecision::fold()
    } else if view.current_bet > 0 {
        facing_bet(view, strength, roll, effective)
    } else {
        opening(view, strength, roll, effective)
    };

    debug!(
        "opponent {} on {} (strength {:.1}, roll {:.2}, to call {})",
        decision, view.street, strength, roll, view.current_bet
    );
    decision
}

fn facing_bet(view: &OpponentView<'_>, strength: f64, roll: f64, effective: u32) -> OpponentDecision {
    let wants_raise =
        strength >= RAISE_STRENGTH || (strength >= WEAK && roll < AGGRESSION_CHANCE);
    if wants_raise && view.raise_count < MAX_RAISES {
        let target = (view.current_bet * 2)
            .max((view.pot / 2).min(effective))
            .min(effective);
        if target > view.current_bet {
            return OpponentDecision::raise(target);
        }
    }
    if strength >= WEAK || roll < LOOSE_CALL_CHANCE {
        OpponentDecision::call(view.current_bet.min(view.opponent_stack))
    } else {
        OpponentDecision::fold()
    }
}

fn opening(view: &OpponentView<'_>, strength: f64, roll: f64, effective: u32) -> OpponentDecision {
    let wants_bet = strength >= BET_STRENGTH || (strength >= WEAK && roll < AGGRESSION_CHANCE);
    if wants_bet && effective > 0 {
        OpponentDecision::bet((view.pot / 5).min(effective).max(1).min(effective))
    } else {
        OpponentDecision::check()
    }
}
