use crate::card::{Card, MAX_RANK, MIN_RANK, Suit};
use crate::error::ScoreError;
use smallvec::SmallVec;

/// Strength of ranks 1..=10, indexed by `rank - 1`.
#[rustfmt::skip]
pub const STRENGTH: [u32; 10] = [
    16, // 1
    12, // 2
    13, // 3
    14, // 4
    15, // 5
    18, // 6
    21, // 7
    10, 10, 10, // 8, 9, 10
];

/// The strongest same-suit cluster of a hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Group {
    pub suit: Option<Suit>,
    pub card_count: usize,
    pub total_points: u32,
}

impl Group {
    /// The group of an empty hand.
    pub fn empty() -> Group {
        Group {
            suit: None,
            card_count: 0,
            total_points: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.card_count == 0
    }

    /// Comparison key: more cards wins outright, points break ties.
    pub fn key(&self) -> (usize, u32) {
        (self.card_count, self.total_points)
    }

    /// True when `self` is strictly stronger than `other`.
    pub fn beats(&self, other: &Group) -> bool {
        self.key() > other.key()
    }
}

impl Default for Group {
    fn default() -> Self {
        Group::empty()
    }
}

/// Maps a rank to its game strength.
pub fn valuation(rank: u8) -> Result<u32, ScoreError> {
    if !(MIN_RANK..=MAX_RANK).contains(&rank) {
        return Err(ScoreError::InvalidRank(rank.into()));
    }
    Ok(STRENGTH[usize::from(rank - MIN_RANK)])
}

/// Sum of strengths of the given cards.
pub fn points(cards: &[Card]) -> u32 {
    cards.iter().map(Card::strength).sum()
}

/// Partitions a hand by suit, in the order each suit first appears.
pub fn groups(hand: &[Card]) -> Vec<Group> {
    let mut partition: SmallVec<[Group; 4]> = SmallVec::new();

    for card in hand {
        match partition.iter_mut().find(|g| g.suit == Some(card.suit())) {
            Some(group) => {
                group.card_count += 1;
                group.total_points += card.strength();
            }
            None => partition.push(Group {
                suit: Some(card.suit()),
                card_count: 1,
                total_points: card.strength(),
            }),
        }
    }

    partition.into_vec()
}

/// Picks the strongest suit group of a hand.
///
/// Groups are compared by card count, then by total points. When two suits
/// tie on both, the suit that appears first in `hand` is kept. An empty
/// hand yields [`Group::empty`].
pub fn best_group(hand: &[Card]) -> Group {
    groups(hand)
        .into_iter()
        .fold(Group::empty(), |best, group| {
            if group.beats(&best) { group } else { best }
        })
}
