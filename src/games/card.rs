//! Card and deck primitives shared by the poker variants.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank values. Ranks are their face value so hand strengths can sum them
/// directly (2-10, then J=11 through A=14).
pub const RANK_T: u8 = 10;
pub const RANK_J: u8 = 11;
pub const RANK_Q: u8 = 12;
pub const RANK_K: u8 = 13;
pub const RANK_A: u8 = 14;

/// Suit values (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single immutable playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Rank, 2-14.
    pub rank: u8,
    /// Suit, 0-3.
    pub suit: u8,
}

impl Card {
    /// Create a new card.
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!((2..=14).contains(&rank), "rank must be 2-14");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { rank, suit }
    }

    /// Rank character for display.
    pub fn rank_char(&self) -> char {
        match self.rank {
            2..=9 => (b'0' + self.rank) as char,
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            14 => 'A',
            _ => '?',
        }
    }

    /// Suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A deck over an arbitrary card set, dealt front to back after a shuffle.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Create a deck from a fixed card set.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, next: 0 }
    }

    /// The reduced 20-card deck used by the simplified hold'em: ranks T-A in
    /// all four suits.
    pub fn reduced() -> Self {
        let mut cards = Vec::with_capacity(20);
        for rank in RANK_T..=RANK_A {
            for suit in 0..4 {
                cards.push(Card::new(rank, suit));
            }
        }
        Self::from_cards(cards)
    }

    /// Shuffle the undealt portion of the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Deal the next card.
    ///
    /// # Panics
    /// Panics if the deck is exhausted; the toy games never deal that deep.
    pub fn deal(&mut self) -> Card {
        assert!(self.next < self.cards.len(), "deck exhausted");
        let card = self.cards[self.next];
        self.next += 1;
        card
    }

    /// Deal `n` cards.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.deal()).collect()
    }

    /// Number of undealt cards.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}
