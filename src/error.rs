use crate::card::Card;
use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreError {
    /// A rank outside 1..=10.
    InvalidRank(i64),
    /// A negative size, or a player count / turn the table does not have.
    InvalidArgument(String),
    /// Text that does not describe a card.
    InvalidCard(String),
    /// The same card seen twice among the hand and the used cards.
    DuplicateCard(Card),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoreError::InvalidRank(rank) => write!(f, "rank {rank} is outside 1..=10"),
            ScoreError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            ScoreError::InvalidCard(input) => write!(f, "card formatting is incorrect: {input:?}"),
            ScoreError::DuplicateCard(card) => write!(f, "{card} is already in play"),
        }
    }
}

impl Error for ScoreError {}

/// Converts a caller-supplied signed size into a `usize`, refusing negatives.
pub(crate) fn non_negative(value: i64, what: &str) -> Result<usize, ScoreError> {
    if value < 0 {
        return Err(ScoreError::InvalidArgument(format!(
            "{what} must not be negative, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| ScoreError::InvalidArgument(format!("{what} is too large: {value}")))
}
