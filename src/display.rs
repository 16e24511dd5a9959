use crate::analysis::Estimate;
use crate::card::{Card, Suit};
use crate::game::Hand;
use crate::scoring::Group;
use std::fmt;

/// `7d` normally, `7 di Denari` with `{:#}`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} di {}", self.rank(), self.suit())
        } else {
            write!(f, "{}{}", self.rank(), self.suit().to_char())
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "[{}]", cards.join(" "))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(
                f,
                "{suit}: {} cards, {} points",
                self.card_count, self.total_points
            ),
            None => write!(f, "no group"),
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Best group: {}", self.current)?;
        writeln!(f, "  Opponent draws {} card(s)", self.draw_size)?;
        writeln!(f, "  Draws examined: {}", self.total)?;
        writeln!(f, "  Draws that beat the hand: {}", self.better)?;
        if self.truncated {
            writeln!(f, "  (search stopped early)")?;
        }
        write!(f, "  Probability of holding: {}%", self.percentage())
    }
}
