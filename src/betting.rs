use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::opponent::{OpponentAction, OpponentDecision};

pub const MAX_RAISES: u8 = 4;
pub const DEFAULT_BIG_BLIND: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Ended,
}

impl Street {
    /// Community cards visible once this street has been dealt.
    pub fn community_count(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
            Street::Ended => 0,
        }
    }

    pub fn next(self) -> Street {
        match self {
            Street::PreFlop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown | Street::Ended => Street::Ended,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::PreFlop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
            Street::Ended => "Ended",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Player,
    Opponent,
}

/// What the human-facing side may do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Check,
    Call,
    Bet(u32),
    Raise(u32),
    AllIn,
    Fold,
    Finish,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Check => write!(f, "check"),
            PlayerAction::Call => write!(f, "call"),
            PlayerAction::Bet(n) => write!(f, "bet {}", n),
            PlayerAction::Raise(n) => write!(f, "raise {}", n),
            PlayerAction::AllIn => write!(f, "all-in"),
            PlayerAction::Fold => write!(f, "fold"),
            PlayerAction::Finish => write!(f, "finish"),
        }
    }
}

/// Where the betting goes after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitOpponent,
    AwaitPlayer,
    StreetComplete,
    AllIn,
    Folded(Party),
    Terminated,
}

/// Money and betting position of one hand.
///
/// `pot` always equals the two contributions and every contribution is capped
/// at the contributor's stack. Transitions never mutate in place: they return
/// the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub street: Street,
    pub pot: u32,
    /// Amount the party to act must put in to call.
    pub current_bet: u32,
    pub raise_count: u8,
    pub player_stack: u32,
    pub opponent_stack: u32,
    pub player_contribution: u32,
    pub opponent_contribution: u32,
}

impl RoundState {
    pub fn new(player_stack: u32, opponent_stack: u32) -> Self {
        RoundState {
            street: Street::PreFlop,
            pot: 0,
            current_bet: 0,
            raise_count: 0,
            player_stack,
            opponent_stack,
            player_contribution: 0,
            opponent_contribution: 0,
        }
    }

    /// The opponent posts the big blind, leaving the player that much to call.
    pub fn post_big_blind(&self, big_blind: u32) -> Self {
        let mut next = self.contribute(Party::Opponent, big_blind);
        next.current_bet = next.opponent_contribution;
        next
    }

    pub fn stack(&self, party: Party) -> u32 {
        match party {
            Party::Player => self.player_stack,
            Party::Opponent => self.opponent_stack,
        }
    }

    pub fn is_all_in(&self) -> bool {
        self.player_stack == 0 || self.opponent_stack == 0
    }

    fn contribute(&self, party: Party, amount: u32) -> Self {
        let mut next = *self;
        let paid = amount.min(self.stack(party));
        match party {
            Party::Player => {
                next.player_stack -= paid;
                next.player_contribution += paid;
            }
            Party::Opponent => {
                next.opponent_stack -= paid;
                next.opponent_contribution += paid;
            }
        }
        next.pot += paid;
        next
    }

    fn after_wager(next: RoundState, waiting: Step) -> (RoundState, Step) {
        if next.is_all_in() {
            (next, Step::AllIn)
        } else {
            (next, waiting)
        }
    }

    fn ended(&self, step: Step) -> (RoundState, Step) {
        let mut next = *self;
        next.street = Street::Ended;
        (next, step)
    }

    /// Validates and applies the player's action. Errors leave `self` untouched.
    pub fn apply_player(&self, action: PlayerAction) -> SimResult<(RoundState, Step)> {
        let to_call = self.current_bet;
        let stack = self.player_stack;
        match action {
            PlayerAction::Check => {
                if to_call > 0 {
                    return Err(SimError::InvalidAction(format!(
                        "cannot check facing a bet of {}",
                        to_call
                    )));
                }
                Ok((*self, Step::AwaitOpponent))
            }
            PlayerAction::Call => {
                if to_call == 0 {
                    return Err(SimError::InvalidAction("there is no bet to call".to_string()));
                }
                let mut next = self.contribute(Party::Player, to_call);
                next.current_bet = 0;
                Ok(Self::after_wager(next, Step::StreetComplete))
            }
            PlayerAction::Bet(amount) => {
                if to_call > 0 {
                    return Err(SimError::InvalidAction(format!(
                        "facing a bet of {}, call, raise or fold",
                        to_call
                    )));
                }
                if amount == 0 {
                    return Err(SimError::InvalidAmount("a bet must be positive".to_string()));
                }
                if amount > stack {
                    return Err(SimError::InvalidAmount(format!(
                        "{} exceeds your stack of {}",
                        amount, stack
                    )));
                }
                let mut next = self.contribute(Party::Player, amount);
                next.current_bet = amount;
                Ok(Self::after_wager(next, Step::AwaitOpponent))
            }
            PlayerAction::Raise(amount) => {
                if to_call == 0 {
                    return Err(SimError::InvalidAction(
                        "there is no bet to raise, use bet".to_string(),
                    ));
                }
                if self.raise_count >= MAX_RAISES {
                    return Err(SimError::RaiseCapExceeded(MAX_RAISES));
                }
                if amount <= to_call {
                    return Err(SimError::InvalidAmount(format!(
                        "a raise must be more than the {} to call",
                        to_call
                    )));
                }
                if amount > stack {
                    return Err(SimError::InvalidAmount(format!(
                        "{} exceeds your stack of {}",
                        amount, stack
                    )));
                }
                let mut next = self.contribute(Party::Player, amount);
                next.current_bet = amount - to_call;
                next.raise_count += 1;
                Ok(Self::after_wager(next, Step::AwaitOpponent))
            }
            PlayerAction::AllIn => {
                if stack == 0 {
                    return Err(SimError::InvalidAction("you have no chips left".to_string()));
                }
                let raises = to_call > 0 && stack > to_call;
                if raises && self.raise_count >= MAX_RAISES {
                    return Err(SimError::RaiseCapExceeded(MAX_RAISES));
                }
                let mut next = self.contribute(Party::Player, stack);
                next.current_bet = stack.saturating_sub(to_call);
                if raises {
                    next.raise_count += 1;
                }
                Ok((next, Step::AllIn))
            }
            PlayerAction::Fold => Ok(self.ended(Step::Folded(Party::Player))),
            PlayerAction::Finish => Ok(self.ended(Step::Terminated)),
        }
    }

    /// Applies the opponent's decision, clamping amounts to its stack.
    pub fn apply_opponent(&self, decision: OpponentDecision) -> (RoundState, Step) {
        let to_call = self.current_bet;
        match decision.action {
            OpponentAction::Fold => self.ended(Step::Folded(Party::Opponent)),
            OpponentAction::Check if to_call == 0 => (*self, Step::StreetComplete),
            OpponentAction::Check | OpponentAction::Call => {
                let mut next = self.contribute(Party::Opponent, to_call);
                next.current_bet = 0;
                Self::after_wager(next, Step::StreetComplete)
            }
            OpponentAction::Bet => {
                let mut next = self.contribute(Party::Opponent, decision.amount);
                next.current_bet = next.opponent_contribution - self.opponent_contribution;
                Self::after_wager(next, Step::AwaitPlayer)
            }
            OpponentAction::Raise => {
                let mut next = self.contribute(Party::Opponent, decision.amount);
                let paid = next.opponent_contribution - self.opponent_contribution;
                next.current_bet = paid.saturating_sub(to_call);
                next.raise_count = (next.raise_count + 1).min(MAX_RAISES);
                Self::after_wager(next, Step::AwaitPlayer)
            }
        }
    }

    /// Moves to the next street with a fresh betting round.
    pub fn advance_street(&self) -> Self {
        let mut next = *self;
        next.street = self.street.next();
        next.current_bet = 0;
        next.raise_count = 0;
        next
    }

    pub fn to_showdown(&self) -> Self {
        let mut next = *self;
        next.street = Street::Showdown;
        next.current_bet = 0;
        next
    }
}
