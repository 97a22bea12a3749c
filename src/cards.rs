use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// Parses the rank part of a card token. Accepts `10` and `T` for ten.
    pub fn from_token(token: &str) -> SimResult<Rank> {
        match token.to_ascii_uppercase().as_str() {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" | "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(SimError::InvalidRank(token.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> SimResult<Suit> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Suit::Hearts),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            'S' => Ok(Suit::Spades),
            _ => Err(SimError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.as_str(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Card> {
        parse_card(s)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = SimError;

    fn try_from(token: String) -> SimResult<Card> {
        parse_card(&token)
    }
}

/// Parses a card token such as `AH`, `10d` or `Ts`.
pub fn parse_card(token: &str) -> SimResult<Card> {
    let token = token.trim();
    let suit_char = match token.chars().last() {
        Some(c) if token.len() >= 2 => c,
        _ => return Err(SimError::InvalidCardNotation(token.to_string())),
    };
    let rank_part = &token[..token.len() - suit_char.len_utf8()];
    let rank = Rank::from_token(rank_part)
        .map_err(|_| SimError::InvalidCardNotation(token.to_string()))?;
    let suit = Suit::from_char(suit_char)?;
    Ok(Card::new(rank, suit))
}

/// Parses a list of tokens, e.g. `["10H", "JH", "QH"]`.
pub fn parse_cards<S: AsRef<str>>(tokens: &[S]) -> SimResult<Vec<Card>> {
    tokens.iter().map(|t| parse_card(t.as_ref())).collect()
}

pub fn card_values(cards: &[Card]) -> Vec<u8> {
    cards.iter().map(|c| c.value()).collect()
}

pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh, ordered 52-card deck.
    pub fn new() -> Deck {
        let mut deck = Deck { cards: Vec::with_capacity(DECK_SIZE) };
        deck.reset();
        deck
    }

    /// Restores all 52 cards in suit-major order.
    pub fn reset(&mut self) {
        self.cards = ALL_SUITS
            .iter()
            .flat_map(|&s| ALL_RANKS.iter().map(move |&r| Card::new(r, s)))
            .collect();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.cards.shuffle(rng);
        self
    }

    /// Removes and returns the first `n` cards.
    pub fn deal(&mut self, n: usize) -> SimResult<Vec<Card>> {
        if n > self.cards.len() {
            return Err(SimError::InsufficientCards {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

/// Every card not in `dead`, in deck order.
pub fn remaining_cards(dead: &[Card]) -> Vec<Card> {
    let dead: std::collections::HashSet<Card> = dead.iter().copied().collect();
    ALL_SUITS
        .iter()
        .flat_map(|&s| ALL_RANKS.iter().map(move |&r| Card::new(r, s)))
        .filter(|c| !dead.contains(c))
        .collect()
}
