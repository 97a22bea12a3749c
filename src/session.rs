use std::path::PathBuf;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::betting::DEFAULT_BIG_BLIND;
use crate::cards::Deck;
use crate::engine::{BettingRound, Ending, HandDeal, PlayerSeat, RoundOutcome};
use crate::equity::{win_probability, EquityResult, DEFAULT_SIMULATIONS};
use crate::error::{SimError, SimResult};
use crate::history::SessionHistory;
use crate::random::RngSource;

pub const DEFAULT_MONEY: u32 = 100;
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub name: String,
    pub rounds: u32,
    pub money: u32,
    /// Opponent stack at the start of every hand; the player's starting money when unset.
    pub opponent_money: Option<u32>,
    pub big_blind: u32,
    pub seed: Option<u64>,
    pub simulations: usize,
    pub history_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            name: "Player".to_string(),
            rounds: 1,
            money: DEFAULT_MONEY,
            opponent_money: None,
            big_blind: DEFAULT_BIG_BLIND,
            seed: None,
            simulations: DEFAULT_SIMULATIONS,
            history_path: Some(PathBuf::from(DEFAULT_HISTORY_FILE)),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.rounds == 0 {
            return Err(SimError::InvalidValue("rounds must be at least 1".to_string()));
        }
        if self.money == 0 {
            return Err(SimError::InvalidValue("starting money must be positive".to_string()));
        }
        if self.big_blind == 0 {
            return Err(SimError::InvalidValue("big blind must be positive".to_string()));
        }
        if self.simulations == 0 {
            return Err(SimError::InvalidValue("simulations must be positive".to_string()));
        }
        Ok(())
    }

    fn opponent_stack(&self) -> u32 {
        self.opponent_money.unwrap_or(self.money)
    }
}

/// Snapshot handed to the seat before a hand's betting starts.
#[derive(Debug, Clone)]
pub struct RoundStart<'a> {
    pub round: u32,
    pub money: u32,
    pub deal: &'a HandDeal,
    pub equity: EquityResult,
}

/// A seat that also hears about session-level progress.
pub trait SessionSeat: PlayerSeat {
    fn round_started(&mut self, _start: &RoundStart<'_>) {}

    fn round_finished(&mut self, _round: u32, _outcome: &RoundOutcome, _money: u32) {}
}

/// Plays up to `config.rounds` hands and returns the session record.
///
/// Stops early when the seat finishes the session or the player's money runs
/// out.
pub fn run_session<S: SessionSeat>(config: &SessionConfig, seat: &mut S) -> SimResult<SessionHistory> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut deck_rng = StdRng::seed_from_u64(seed);
    let mut chance = RngSource::seeded(seed.wrapping_add(1));
    let mut deck = Deck::new();
    let mut history = SessionHistory::new(&config.name, config.money);
    let mut money = config.money;

    info!("session for {} with {} over {} rounds", config.name, money, config.rounds);

    for round in 1..=config.rounds {
        if money == 0 {
            warn!("{} is out of money after {} rounds", config.name, round - 1);
            break;
        }

        deck.reset();
        deck.shuffle(&mut deck_rng);
        let deal = HandDeal::from_deck(&mut deck)?;
        let equity = win_probability(&deal.player_hole, &[], config.simulations, deck_rng.gen())?;

        seat.round_started(&RoundStart {
            round,
            money,
            deal: &deal,
            equity,
        });

        let outcome = BettingRound::new(&deal, money, config.opponent_stack(), config.big_blind)
            .play(seat, &mut chance)?;

        money = (money as i64 + outcome.net).max(0) as u32;
        history.record(round, &deal, &outcome, equity.equity(), money);
        seat.round_finished(round, &outcome, money);

        if outcome.ending == Ending::Terminated {
            info!("session finished by {} in round {}", config.name, round);
            break;
        }
    }

    Ok(history)
}
