use crate::card::Card;
use crate::error::ScoreError;
use rand::prelude::SliceRandom;
use rand::rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 40;

/// The 40-card Italian deck, suits in `Suit` order and ranks ascending.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Hand {
    pub cards: Vec<Card>,
}

/// Cards already drawn by anyone at the table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UsedCardSet {
    cards: HashSet<Card>,
}

/// Turn schedule for a table of 4 or 5 players.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Table {
    players: usize,
}

impl Deck {
    pub fn new() -> Deck {
        Deck {
            cards: Card::all().collect(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The deck minus every used card, in deck order.
    pub fn remaining(&self, used: &UsedCardSet) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| !used.contains(card))
            .collect()
    }

    /// All 40 cards in random order.
    pub fn shuffled(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.shuffle(&mut rng());
        cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

impl UsedCardSet {
    pub fn new() -> UsedCardSet {
        UsedCardSet::default()
    }

    /// Returns `false` if the card was already marked used.
    pub fn insert(&mut self, card: Card) -> bool {
        self.cards.insert(card)
    }

    /// Marks every card used, failing on the first one seen before.
    pub fn extend_unique<I>(&mut self, cards: I) -> Result<(), ScoreError>
    where
        I: IntoIterator<Item = Card>,
    {
        for card in cards {
            if !self.insert(card) {
                return Err(ScoreError::DuplicateCard(card));
            }
        }
        Ok(())
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Table {
    pub fn new(players: usize) -> Result<Table, ScoreError> {
        match players {
            4 | 5 => Ok(Table { players }),
            n => Err(ScoreError::InvalidArgument(format!(
                "a table seats 4 or 5 players, not {n}"
            ))),
        }
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn max_turns(&self) -> usize {
        if self.players == 4 { 5 } else { 4 }
    }

    fn schedule(&self) -> &'static [usize] {
        if self.players == 4 {
            &[3, 3, 3, 1, 3]
        } else {
            &[3, 3, 2, 3]
        }
    }

    /// Cards each player draws on `turn` (1-based).
    pub fn draw_size(&self, turn: usize) -> Result<usize, ScoreError> {
        self.check_turn(turn)?;
        Ok(self.schedule()[turn - 1])
    }

    pub fn is_final(&self, turn: usize) -> bool {
        turn == self.max_turns()
    }

    /// Hand size once `turn` turns have been dealt.
    pub fn cards_dealt_through(&self, turn: usize) -> Result<usize, ScoreError> {
        self.check_turn(turn)?;
        Ok(self.schedule()[..turn].iter().sum())
    }

    /// Draw sizes of `turn` and every turn after it.
    pub fn draws_from(&self, turn: usize) -> Result<Vec<usize>, ScoreError> {
        self.check_turn(turn)?;
        Ok(self.schedule()[turn - 1..].to_vec())
    }

    fn check_turn(&self, turn: usize) -> Result<(), ScoreError> {
        if turn == 0 || turn > self.max_turns() {
            return Err(ScoreError::InvalidArgument(format!(
                "turn {turn} is outside 1..={}",
                self.max_turns()
            )));
        }
        Ok(())
    }
}
