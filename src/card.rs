use crate::error::ScoreError;
use crate::scoring::STRENGTH;
use std::cmp::Ordering;
use std::str::FromStr;

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

/// The four suits of the Italian deck, in deck order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Denari,
    Spade,
    Coppe,
    Bastoni,
}

pub trait ToSuit {
    fn to_suit(&self) -> Result<Suit, ScoreError>;
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Denari, Suit::Spade, Suit::Coppe, Suit::Bastoni];

    pub fn to_char(&self) -> char {
        match self {
            Suit::Denari => 'd',
            Suit::Spade => 's',
            Suit::Coppe => 'c',
            Suit::Bastoni => 'b',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Denari => "Denari",
            Suit::Spade => "Spade",
            Suit::Coppe => "Coppe",
            Suit::Bastoni => "Bastoni",
        }
    }
}

impl ToSuit for char {
    fn to_suit(&self) -> Result<Suit, ScoreError> {
        match self.to_ascii_lowercase() {
            'd' => Ok(Suit::Denari),
            's' => Ok(Suit::Spade),
            'c' => Ok(Suit::Coppe),
            'b' => Ok(Suit::Bastoni),
            _ => Err(ScoreError::InvalidCard(format!("unknown suit {self:?}"))),
        }
    }
}

impl Card {
    /// Builds a card, refusing ranks outside 1..=10.
    pub fn new(rank: u8, suit: Suit) -> Result<Card, ScoreError> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(ScoreError::InvalidRank(rank.into()));
        }
        Ok(Card { rank, suit })
    }

    /// Every card of the deck, in deck order.
    pub fn all() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| (MIN_RANK..=MAX_RANK).map(move |rank| Card { rank, suit }))
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// 8, 9 and 10 are the face cards.
    pub fn is_face(&self) -> bool {
        self.rank >= 8
    }

    /// Game strength of this card's rank. Infallible because a `Card`
    /// never holds an out-of-range rank.
    pub fn strength(&self) -> u32 {
        STRENGTH[usize::from(self.rank - MIN_RANK)]
    }

    /// Parses a list such as `"7d, 6d 1s"`; commas and whitespace both separate.
    pub fn parse_list(input: &str) -> Result<Vec<Card>, ScoreError> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse::<Card>)
            .collect()
    }
}

impl FromStr for Card {
    type Err = ScoreError;

    /// Reads `<rank><suit>`, e.g. `7d` or `10b`.
    fn from_str(input: &str) -> Result<Card, ScoreError> {
        let input = input.trim();

        let char_count = input.chars().count();
        if !(2..=3).contains(&char_count) {
            return Err(ScoreError::InvalidCard(input.to_string()));
        }

        let mut chars = input.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| ScoreError::InvalidCard(input.to_string()))?;
        let rank_string = chars.as_str();
        if !rank_string.chars().all(|c| c.is_ascii_digit()) {
            return Err(ScoreError::InvalidCard(input.to_string()));
        }

        let rank: i64 = rank_string
            .parse()
            .map_err(|_| ScoreError::InvalidCard(input.to_string()))?;
        let rank = u8::try_from(rank).map_err(|_| ScoreError::InvalidRank(rank))?;
        let suit = suit_char.to_suit()?;

        Card::new(rank, suit)
    }
}

/// Deck order: by suit, then by rank.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.suit, self.rank).cmp(&(other.suit, other.rank))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        let all_ranks: Vec<u8> = (MIN_RANK..=MAX_RANK).collect();

        let rank = *g.choose(&all_ranks).unwrap();
        let suit = *g.choose(&Suit::ALL).unwrap();

        Card { rank, suit }
    }
}

#[cfg(test)]
impl Arbitrary for Suit {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Suit::ALL).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_ranks() {
        assert_eq!("7d".parse::<Card>(), Card::new(7, Suit::Denari));
        assert_eq!("10b".parse::<Card>(), Card::new(10, Suit::Bastoni));
        assert_eq!(" 1S ".parse::<Card>(), Card::new(1, Suit::Spade));
    }

    #[test]
    fn rejects_bad_cards() {
        assert_eq!("11c".parse::<Card>(), Err(ScoreError::InvalidRank(11)));
        assert_eq!("0c".parse::<Card>(), Err(ScoreError::InvalidRank(0)));
        assert!(matches!("7x".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
        assert!(matches!("d".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
        assert!(matches!("Ad".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
        assert!(matches!("100d".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
        assert!(matches!("+7d".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
        assert!(matches!("-1d".parse::<Card>(), Err(ScoreError::InvalidCard(_))));
    }

    #[test]
    fn constructor_guards_rank() {
        assert_eq!(Card::new(0, Suit::Coppe), Err(ScoreError::InvalidRank(0)));
        assert_eq!(Card::new(11, Suit::Coppe), Err(ScoreError::InvalidRank(11)));
        assert!(Card::new(10, Suit::Coppe).unwrap().is_face());
        assert!(!Card::new(7, Suit::Coppe).unwrap().is_face());
    }

    #[test]
    fn parse_list_accepts_mixed_separators() {
        let cards = Card::parse_list("7d, 6d 1s,,").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(7, Suit::Denari).unwrap(),
                Card::new(6, Suit::Denari).unwrap(),
                Card::new(1, Suit::Spade).unwrap(),
            ]
        );
        assert!(Card::parse_list("").unwrap().is_empty());
        assert!(Card::parse_list("7d 12s").is_err());
    }

    #[test]
    fn deck_order_is_suit_then_rank() {
        let mut cards = Card::parse_list("1s 10d 2d 1b").unwrap();
        cards.sort();
        assert_eq!(cards, Card::parse_list("2d 10d 1s 1b").unwrap());
    }
}
