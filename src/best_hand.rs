use itertools::Itertools;

use crate::cards::{card_values, Card};
use crate::error::SimResult;
use crate::hand_evaluator::{evaluate, Evaluation, HandRank, HAND_SIZE};

/// Hole and community cards as one set, first occurrence kept.
pub fn combined_cards(hole_cards: &[Card], community: &[Card]) -> Vec<Card> {
    hole_cards
        .iter()
        .chain(community.iter())
        .copied()
        .unique()
        .collect()
}

/// Best five-card hand available from the hole cards plus the community cards.
///
/// With fewer than five cards available nothing is evaluated: the result is
/// High Card over the raw hole-card values, which is what the opponent reads
/// pre-flop.
///
/// On equal rank a subset only replaces the current best when its highest card
/// is strictly higher. This is an approximation of a full kicker comparison and
/// can keep a weaker subset when two candidates share the same top card.
pub fn best_hand(hole_cards: &[Card], community: &[Card]) -> SimResult<Evaluation> {
    let cards = combined_cards(hole_cards, community);
    if cards.len() < HAND_SIZE {
        return Ok(Evaluation::new(HandRank::HighCard, card_values(hole_cards)));
    }

    let mut best: Option<Evaluation> = None;
    for combo in cards.iter().copied().combinations(HAND_SIZE) {
        let candidate = evaluate(&combo)?;
        let better = match &best {
            None => true,
            Some(b) => {
                candidate.rank > b.rank
                    || (candidate.rank == b.rank && candidate.high_value() > b.high_value())
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    Ok(best.unwrap_or_else(|| Evaluation::new(HandRank::HighCard, card_values(hole_cards))))
}
