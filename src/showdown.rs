use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::best_hand::{best_hand, combined_cards};
use crate::cards::Card;
use crate::error::SimResult;
use crate::hand_evaluator::{Evaluation, HandRank, HAND_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contender {
    Player,
    Opponent,
    Tie,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contender::Player => write!(f, "Player"),
            Contender::Opponent => write!(f, "Opponent"),
            Contender::Tie => write!(f, "Tie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub winner: Contender,
    /// Winning rank; the shared rank on a tie.
    pub rank: HandRank,
    /// The player's net change: `+pot`, `-contribution` or `0`.
    pub pot: i64,
    pub player_hand: Evaluation,
    pub opponent_hand: Evaluation,
}

/// Top five card values, highest first, across hole and community cards.
pub fn kicker_values(hole_cards: &[Card], community: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = combined_cards(hole_cards, community)
        .iter()
        .map(|c| c.value())
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.truncate(HAND_SIZE);
    values
}

/// Orders the player's holding against the opponent's on a shared board.
pub fn compare_holdings(
    player_hole: &[Card],
    opponent_hole: &[Card],
    community: &[Card],
) -> SimResult<(Ordering, Evaluation, Evaluation)> {
    let player_hand = best_hand(player_hole, community)?;
    let opponent_hand = best_hand(opponent_hole, community)?;
    let ordering = player_hand.rank.cmp(&opponent_hand.rank).then_with(|| {
        kicker_values(player_hole, community).cmp(&kicker_values(opponent_hole, community))
    });
    Ok((ordering, player_hand, opponent_hand))
}

pub fn resolve(
    player_hole: &[Card],
    opponent_hole: &[Card],
    community: &[Card],
    pot: u32,
    player_contribution: u32,
) -> SimResult<ShowdownResult> {
    let (ordering, player_hand, opponent_hand) =
        compare_holdings(player_hole, opponent_hole, community)?;

    let (winner, rank, net) = match ordering {
        Ordering::Greater => (Contender::Player, player_hand.rank, pot as i64),
        Ordering::Less => (
            Contender::Opponent,
            opponent_hand.rank,
            -(player_contribution as i64),
        ),
        Ordering::Equal => (Contender::Tie, player_hand.rank, 0),
    };

    Ok(ShowdownResult {
        winner,
        rank,
        pot: net,
        player_hand,
        opponent_hand,
    })
}
