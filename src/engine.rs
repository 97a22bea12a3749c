// Betting round orchestration. The engine owns one hand from the big blind to
// showdown: it asks the seat for player actions, lets the opponent policy
// respond, reveals community cards street by street and settles the pot.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::betting::{Party, PlayerAction, RoundState, Step, Street};
use crate::cards::{Card, Deck};
use crate::error::{SimError, SimResult};
use crate::hand_evaluator::HandRank;
use crate::opponent::{self, OpponentDecision, OpponentView};
use crate::random::RandomSource;
use crate::showdown::{resolve, Contender, ShowdownResult};

pub const HOLE_CARDS: usize = 2;
pub const BOARD_CARDS: usize = 5;

/// Cards for one hand, all dealt up front and revealed as the streets advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandDeal {
    pub player_hole: Vec<Card>,
    pub opponent_hole: Vec<Card>,
    pub board: Vec<Card>,
}

impl HandDeal {
    /// Deals both hands and the full board. Fails before anything is dealt when
    /// the deck is short.
    pub fn from_deck(deck: &mut Deck) -> SimResult<Self> {
        let mut cards = deck.deal(2 * HOLE_CARDS + BOARD_CARDS)?;
        let board = cards.split_off(2 * HOLE_CARDS);
        let opponent_hole = cards.split_off(HOLE_CARDS);
        Ok(HandDeal {
            player_hole: cards,
            opponent_hole,
            board,
        })
    }

    pub fn new(player_hole: Vec<Card>, opponent_hole: Vec<Card>, board: Vec<Card>) -> SimResult<Self> {
        if player_hole.len() != HOLE_CARDS {
            return Err(SimError::InvalidHandSize { need: HOLE_CARDS, got: player_hole.len() });
        }
        if opponent_hole.len() != HOLE_CARDS {
            return Err(SimError::InvalidHandSize { need: HOLE_CARDS, got: opponent_hole.len() });
        }
        if board.len() != BOARD_CARDS {
            return Err(SimError::InvalidHandSize { need: BOARD_CARDS, got: board.len() });
        }
        Ok(HandDeal { player_hole, opponent_hole, board })
    }
}

/// What the player's seat sees when asked to act.
#[derive(Debug, Clone, Copy)]
pub struct SeatView<'a> {
    pub state: &'a RoundState,
    pub hole_cards: &'a [Card],
    pub community: &'a [Card],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    StreetDealt { street: Street, community: Vec<Card> },
    OpponentActed(OpponentDecision),
    AllInRunout,
    Showdown { opponent_hole: Vec<Card>, result: ShowdownResult },
}

/// The human-facing side of the table.
pub trait PlayerSeat {
    fn choose(&mut self, view: &SeatView<'_>) -> PlayerAction;

    /// The last action was not accepted; the state is unchanged.
    fn rejected(&mut self, error: &SimError);

    fn notify(&mut self, _event: &RoundEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    Showdown,
    PlayerFolded,
    OpponentFolded,
    Terminated,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ending::Showdown => write!(f, "showdown"),
            Ending::PlayerFolded => write!(f, "player folded"),
            Ending::OpponentFolded => write!(f, "opponent folded"),
            Ending::Terminated => write!(f, "terminated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub ending: Ending,
    /// `None` when the round was terminated.
    pub winner: Option<Contender>,
    pub rank: Option<HandRank>,
    /// The player's signed result for the hand.
    pub net: i64,
    pub state: RoundState,
    pub community: Vec<Card>,
    pub showdown: Option<ShowdownResult>,
}

enum StreetEnd {
    Complete,
    AllIn,
    Folded(Party),
    Terminated,
}

pub struct BettingRound<'a> {
    deal: &'a HandDeal,
    state: RoundState,
    revealed: usize,
}

impl<'a> BettingRound<'a> {
    pub fn new(deal: &'a HandDeal, player_stack: u32, opponent_stack: u32, big_blind: u32) -> Self {
        BettingRound {
            deal,
            state: RoundState::new(player_stack, opponent_stack).post_big_blind(big_blind),
            revealed: 0,
        }
    }

    pub fn community(&self) -> &[Card] {
        &self.deal.board[..self.revealed]
    }

    pub fn play(
        mut self,
        seat: &mut dyn PlayerSeat,
        chance: &mut dyn RandomSource,
    ) -> SimResult<RoundOutcome> {
        info!(
            "new hand: stacks {}/{}, blind {}",
            self.state.player_stack, self.state.opponent_stack, self.state.pot
        );
        seat.notify(&RoundEvent::StreetDealt {
            street: Street::PreFlop,
            community: Vec::new(),
        });

        loop {
            let end = if self.state.is_all_in() {
                StreetEnd::AllIn
            } else {
                self.bet_street(seat, chance)?
            };
            match end {
                StreetEnd::Complete if self.state.street == Street::River => {
                    return self.showdown(seat);
                }
                StreetEnd::Complete => self.deal_next_street(seat),
                StreetEnd::AllIn => {
                    self.run_out(seat);
                    return self.showdown(seat);
                }
                StreetEnd::Folded(party) => return Ok(self.folded(party)),
                StreetEnd::Terminated => return Ok(self.terminated()),
            }
        }
    }

    fn bet_street(
        &mut self,
        seat: &mut dyn PlayerSeat,
        chance: &mut dyn RandomSource,
    ) -> SimResult<StreetEnd> {
        loop {
            let action = seat.choose(&SeatView {
                state: &self.state,
                hole_cards: &self.deal.player_hole,
                community: self.community(),
            });
            let (next, step) = match self.state.apply_player(action) {
                Ok(transition) => transition,
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => {
                    debug!("rejected {}: {}", action, e);
                    seat.rejected(&e);
                    continue;
                }
            };
            debug!("player {} on {}", action, self.state.street);
            self.state = next;

            let step = if step == Step::AwaitOpponent {
                let decision = opponent::decide(&self.opponent_view(), chance);
                seat.notify(&RoundEvent::OpponentActed(decision));
                let (next, step) = self.state.apply_opponent(decision);
                self.state = next;
                step
            } else {
                step
            };

            match step {
                Step::AwaitPlayer | Step::AwaitOpponent => continue,
                Step::StreetComplete => return Ok(StreetEnd::Complete),
                Step::AllIn => return Ok(StreetEnd::AllIn),
                Step::Folded(party) => return Ok(StreetEnd::Folded(party)),
                Step::Terminated => return Ok(StreetEnd::Terminated),
            }
        }
    }

    fn opponent_view(&self) -> OpponentView<'_> {
        OpponentView {
            current_bet: self.state.current_bet,
            pot: self.state.pot,
            street: self.state.street,
            hole_cards: &self.deal.opponent_hole,
            community: self.community(),
            opponent_stack: self.state.opponent_stack,
            raise_count: self.state.raise_count,
            player_stack: self.state.player_stack,
        }
    }

    fn deal_next_street(&mut self, seat: &mut dyn PlayerSeat) {
        self.state = self.state.advance_street();
        self.revealed = self.state.street.community_count();
        debug!("dealt {} ({} cards showing)", self.state.street, self.revealed);
        seat.notify(&RoundEvent::StreetDealt {
            street: self.state.street,
            community: self.community().to_vec(),
        });
    }

    // No more betting once a stack is empty, but every card still comes out.
    fn run_out(&mut self, seat: &mut dyn PlayerSeat) {
        info!("all-in on {}, running out the board", self.state.street);
        seat.notify(&RoundEvent::AllInRunout);
        while self.state.street < Street::River {
            self.deal_next_street(seat);
        }
    }

    fn showdown(mut self, seat: &mut dyn PlayerSeat) -> SimResult<RoundOutcome> {
        self.state = self.state.to_showdown();
        let result = resolve(
            &self.deal.player_hole,
            &self.deal.opponent_hole,
            self.community(),
            self.state.pot,
            self.state.player_contribution,
        )?;
        info!("showdown: {} with {} ({:+})", result.winner, result.rank, result.pot);
        seat.notify(&RoundEvent::Showdown {
            opponent_hole: self.deal.opponent_hole.clone(),
            result: result.clone(),
        });
        Ok(RoundOutcome {
            ending: Ending::Showdown,
            winner: Some(result.winner),
            rank: Some(result.rank),
            net: result.pot,
            state: self.state,
            community: self.community().to_vec(),
            showdown: Some(result),
        })
    }

    fn folded(self, party: Party) -> RoundOutcome {
        let (ending, winner, net) = match party {
            Party::Player => (
                Ending::PlayerFolded,
                Contender::Opponent,
                -(self.state.player_contribution as i64),
            ),
            Party::Opponent => (Ending::OpponentFolded, Contender::Player, self.state.pot as i64),
        };
        info!("{}: {} takes {}", ending, winner, self.state.pot);
        RoundOutcome {
            ending,
            winner: Some(winner),
            rank: None,
            net,
            state: self.state,
            community: self.community().to_vec(),
            showdown: None,
        }
    }

    fn terminated(self) -> RoundOutcome {
        info!("hand terminated with {} in the pot", self.state.pot);
        RoundOutcome {
            ending: Ending::Terminated,
            winner: None,
            rank: None,
            net: 0,
            state: self.state,
            community: self.community().to_vec(),
            showdown: None,
        }
    }
}
