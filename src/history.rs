use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::{Ending, HandDeal, RoundOutcome};
use crate::error::SimResult;
use crate::hand_evaluator::HandRank;
use crate::showdown::Contender;

/// Full detail of one played hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player_hole: Vec<Card>,
    pub opponent_hole: Vec<Card>,
    pub community: Vec<Card>,
    pub ending: Ending,
    pub winner: Option<Contender>,
    pub rank: Option<HandRank>,
    pub pot: u32,
    pub net: i64,
    pub money_after: u32,
}

/// Everything an interactive session produced, keyed by `round<N>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    pub player: String,
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub money: u32,
    pub bets: BTreeMap<String, u32>,
    pub probabilities: BTreeMap<String, f64>,
    #[serde(default)]
    pub hands: BTreeMap<String, RoundRecord>,
}

pub fn round_key(round: u32) -> String {
    format!("round{}", round)
}

impl SessionHistory {
    pub fn new(player: &str, money: u32) -> Self {
        SessionHistory {
            player: player.to_string(),
            rounds: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            money,
            bets: BTreeMap::new(),
            probabilities: BTreeMap::new(),
            hands: BTreeMap::new(),
        }
    }

    /// Folds a finished hand into the totals. Terminated hands count as a
    /// played round but neither a win, a loss nor a tie.
    pub fn record(
        &mut self,
        round: u32,
        deal: &HandDeal,
        outcome: &RoundOutcome,
        win_probability: f64,
        money_after: u32,
    ) {
        let key = round_key(round);
        self.rounds += 1;
        match outcome.winner {
            Some(Contender::Player) => self.wins += 1,
            Some(Contender::Opponent) => self.losses += 1,
            Some(Contender::Tie) => self.ties += 1,
            None => {}
        }
        self.money = money_after;
        self.bets.insert(key.clone(), outcome.state.player_contribution);
        self.probabilities.insert(key.clone(), win_probability);
        self.hands.insert(
            key,
            RoundRecord {
                player_hole: deal.player_hole.clone(),
                opponent_hole: deal.opponent_hole.clone(),
                community: outcome.community.clone(),
                ending: outcome.ending,
                winner: outcome.winner,
                rank: outcome.rank,
                pot: outcome.state.pot,
                net: outcome.net,
                money_after,
            },
        );
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> SimResult<()> {
        fs::write(path, self.to_json()?)?;
        info!("session history written to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}
