use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::{SimError, SimResult};

pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    #[serde(rename = "High Card")]
    HighCard = 1,
    #[serde(rename = "One Pair")]
    OnePair = 2,
    #[serde(rename = "Two Pair")]
    TwoPair = 3,
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind = 4,
    #[serde(rename = "Straight")]
    Straight = 5,
    #[serde(rename = "Flush")]
    Flush = 6,
    #[serde(rename = "Full House")]
    FullHouse = 7,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind = 8,
    #[serde(rename = "Straight Flush")]
    StraightFlush = 9,
    #[serde(rename = "Royal Flush")]
    RoyalFlush = 10,
}

/// Strongest first, the order the `info` command lists them in.
pub const ALL_HAND_RANKS: [HandRank; 10] = [
    HandRank::RoyalFlush,
    HandRank::StraightFlush,
    HandRank::FourOfAKind,
    HandRank::FullHouse,
    HandRank::Flush,
    HandRank::Straight,
    HandRank::ThreeOfAKind,
    HandRank::TwoPair,
    HandRank::OnePair,
    HandRank::HighCard,
];

impl HandRank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }

    pub fn from_name(name: &str) -> Option<HandRank> {
        ALL_HAND_RANKS
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified hand: its rank plus the ascending card values used for tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rank: HandRank,
    pub values: Vec<u8>,
}

impl Evaluation {
    pub fn new(rank: HandRank, values: Vec<u8>) -> Self {
        Evaluation { rank, values }
    }

    pub fn high_value(&self) -> u8 {
        self.values.last().copied().unwrap_or(0)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.values.iter().rev().cmp(other.values.iter().rev()))
    }
}

fn is_flush(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

// No wheel: A-2-3-4-5 does not count.
fn is_straight(values: &[u8]) -> bool {
    let unique: HashSet<u8> = values.iter().copied().collect();
    unique.len() == HAND_SIZE && values[HAND_SIZE - 1] - values[0] == 4
}

/// Classifies exactly five distinct cards.
pub fn evaluate(cards: &[Card]) -> SimResult<Evaluation> {
    if cards.len() != HAND_SIZE {
        return Err(SimError::InvalidHandSize {
            need: HAND_SIZE,
            got: cards.len(),
        });
    }
    let mut seen = HashSet::with_capacity(HAND_SIZE);
    for card in cards {
        if !seen.insert(*card) {
            return Err(SimError::DuplicateCard(card.to_string()));
        }
    }

    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable();

    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }
    let mut groups: Vec<u8> = counts.iter().copied().filter(|&n| n > 0).collect();
    groups.sort_unstable();

    let flush = is_flush(cards);
    let straight = is_straight(&values);

    let rank = if flush && straight && values[0] == 10 {
        HandRank::RoyalFlush
    } else if flush && straight {
        HandRank::StraightFlush
    } else if groups.contains(&4) {
        HandRank::FourOfAKind
    } else if groups == [2, 3] {
        HandRank::FullHouse
    } else if flush {
        HandRank::Flush
    } else if straight {
        HandRank::Straight
    } else if groups.contains(&3) {
        HandRank::ThreeOfAKind
    } else if groups == [1, 2, 2] {
        HandRank::TwoPair
    } else if groups.contains(&2) {
        HandRank::OnePair
    } else {
        HandRank::HighCard
    };

    Ok(Evaluation::new(rank, values))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "Hand 1")]
    HandOne,
    #[serde(rename = "Hand 2")]
    HandTwo,
    Tie,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::HandOne => write!(f, "Hand 1"),
            Winner::HandTwo => write!(f, "Hand 2"),
            Winner::Tie => write!(f, "Tie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandComparison {
    pub winner: Winner,
    /// Rank of the winning hand; the first hand's rank on a tie.
    pub rank: HandRank,
    pub first: Evaluation,
    pub second: Evaluation,
}

/// Compares two five-card hands: rank first, then values from the highest card down.
pub fn compare_hands(hand1: &[Card], hand2: &[Card]) -> SimResult<HandComparison> {
    let first = evaluate(hand1)?;
    let second = evaluate(hand2)?;
    let (winner, rank) = match first.cmp(&second) {
        Ordering::Greater => (Winner::HandOne, first.rank),
        Ordering::Less => (Winner::HandTwo, second.rank),
        Ordering::Equal => (Winner::Tie, first.rank),
    };
    Ok(HandComparison {
        winner,
        rank,
        first,
        second,
    })
}
