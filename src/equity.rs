use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::cards::{remaining_cards, Card};
use crate::engine::{BOARD_CARDS, HOLE_CARDS};
use crate::error::{SimError, SimResult};
use crate::showdown::compare_holdings;

pub const DEFAULT_SIMULATIONS: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityResult {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub simulations: usize,
}

impl EquityResult {
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%)",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0,
            self.equity() * 100.0,
        )
    }
}

/// Monte Carlo odds of the hole cards against one random opponent hand.
///
/// Sample `i` shuffles with its own generator seeded from `seed + i`, so the
/// estimate is the same for a given seed however rayon splits the work.
pub fn win_probability(
    hole_cards: &[Card],
    board: &[Card],
    simulations: usize,
    seed: u64,
) -> SimResult<EquityResult> {
    if hole_cards.len() != HOLE_CARDS {
        return Err(SimError::InvalidHandSize {
            need: HOLE_CARDS,
            got: hole_cards.len(),
        });
    }
    if board.len() > BOARD_CARDS {
        return Err(SimError::InvalidValue(format!(
            "a board has at most {} cards, got {}",
            BOARD_CARDS,
            board.len()
        )));
    }
    if simulations == 0 {
        return Err(SimError::InvalidValue("simulations must be positive".to_string()));
    }

    if hole_cards[0] == hole_cards[1] {
        return Err(SimError::DuplicateCard(hole_cards[0].to_string()));
    }
    let mut dead: Vec<Card> = hole_cards.to_vec();
    for card in board {
        if dead.contains(card) {
            return Err(SimError::DuplicateCard(card.to_string()));
        }
        dead.push(*card);
    }
    let remaining = remaining_cards(&dead);
    let cards_needed = BOARD_CARDS - board.len();

    let results: Vec<(u64, u64, u64)> = (0..simulations)
        .into_par_iter()
        .map(|i| -> SimResult<(u64, u64, u64)> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut deck = remaining.clone();
            deck.shuffle(&mut rng);
            let opponent_hole = &deck[..HOLE_CARDS];
            let mut full_board = board.to_vec();
            full_board.extend_from_slice(&deck[HOLE_CARDS..HOLE_CARDS + cards_needed]);

            let (ordering, _, _) = compare_holdings(hole_cards, opponent_hole, &full_board)?;
            Ok(match ordering {
                Ordering::Greater => (1, 0, 0),
                Ordering::Equal => (0, 1, 0),
                Ordering::Less => (0, 0, 1),
            })
        })
        .collect::<SimResult<Vec<_>>>()?;

    let (wins, ties, losses) = results
        .iter()
        .fold((0u64, 0u64, 0u64), |acc, &(w, t, l)| {
            (acc.0 + w, acc.1 + t, acc.2 + l)
        });

    let total = simulations as f64;
    Ok(EquityResult {
        win: wins as f64 / total,
        tie: ties as f64 / total,
        lose: losses as f64 / total,
        simulations,
    })
}
