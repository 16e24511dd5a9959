use crate::card::Card;
use crate::combinations::{Combinations, binomial};
use crate::error::{ScoreError, non_negative};
use crate::scoring::{Group, best_group};
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exhaustive opponent-draw search with optional early stopping.
#[derive(Clone, Debug, Default)]
pub struct Estimator {
    limit: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
}

/// Outcome of one search over opponent draws.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Estimate {
    pub current: Group,
    pub draw_size: usize,
    /// Candidate draws examined.
    pub total: u64,
    /// Candidates whose best group beats `current`.
    pub better: u64,
    /// The search stopped on the limit or the cancel flag before exhausting the space.
    pub truncated: bool,
}

impl Estimate {
    /// Share of examined draws that do not beat the hand, rounded half away from zero.
    ///
    /// An empty hand scores 0. With no candidate draw at all the hand cannot be
    /// beaten and scores 100.
    pub fn percentage(&self) -> u8 {
        if self.current.is_empty() {
            return 0;
        }
        if self.total == 0 {
            return 100;
        }
        let total = u128::from(self.total);
        let held = u128::from(self.total - self.better);
        // round(100 * held / total) without going through floats
        ((200 * held + total) / (2 * total)) as u8
    }

    pub fn not_beaten(&self) -> u64 {
        self.total - self.better
    }
}

impl Estimator {
    pub fn new() -> Estimator {
        Estimator::default()
    }

    /// Stop after examining `limit` candidate draws.
    pub fn with_limit(mut self, limit: u64) -> Estimator {
        self.limit = Some(limit);
        self
    }

    /// Stop as soon as `flag` is raised by another thread.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Estimator {
        self.cancel = Some(flag);
        self
    }

    fn should_stop(&self, examined: u64) -> bool {
        self.limit.is_some_and(|limit| examined >= limit)
            || self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Searches every `draw_size`-card draw from `remaining`; fails on a negative size.
    pub fn estimate(
        &self,
        hand: &[Card],
        remaining: &[Card],
        draw_size: i64,
    ) -> Result<Estimate, ScoreError> {
        let draw_size = non_negative(draw_size, "draw size")?;
        Ok(self.estimate_draw(hand, remaining, draw_size))
    }

    pub fn estimate_draw(&self, hand: &[Card], remaining: &[Card], draw_size: usize) -> Estimate {
        let current = best_group(hand);
        let mut estimate = Estimate {
            current,
            draw_size,
            total: 0,
            better: 0,
            truncated: false,
        };

        if current.is_empty() {
            debug!("empty hand, skipping search");
            return estimate;
        }

        match binomial(remaining.len(), draw_size) {
            Some(space) => debug!(
                "searching {space} draws of {draw_size} from {} cards against {current}",
                remaining.len()
            ),
            None => debug!(
                "searching an unbounded space of {draw_size}-card draws against {current}"
            ),
        }

        for candidate in Combinations::new(remaining, draw_size) {
            if self.should_stop(estimate.total) {
                estimate.truncated = true;
                break;
            }

            estimate.total += 1;
            let opponent = best_group(&candidate);
            if opponent.beats(&current) {
                trace!("draw {candidate:?} beats with {opponent}");
                estimate.better += 1;
            }
        }

        if estimate.truncated {
            warn!(
                "search stopped after {} of {:?} draws",
                estimate.total,
                binomial(remaining.len(), draw_size)
            );
        }
        debug!(
            "{} of {} draws beat {current}: {}%",
            estimate.better,
            estimate.total,
            estimate.percentage()
        );

        estimate
    }

    /// Runs one independent search per draw size on the rayon pool.
    pub fn forecast(&self, hand: &[Card], remaining: &[Card], draw_sizes: &[usize]) -> Vec<Estimate> {
        draw_sizes
            .par_iter()
            .map(|&draw_size| self.estimate_draw(hand, remaining, draw_size))
            .collect()
    }
}

/// Percentage of opponent draws of `draw_size` cards from `remaining`
/// that do not beat the best group of `hand`.
pub fn win_probability(hand: &[Card], remaining: &[Card], draw_size: i64) -> Result<u8, ScoreError> {
    Estimator::new()
        .estimate(hand, remaining, draw_size)
        .map(|estimate| estimate.percentage())
}

/// `(draw size, percentage)` for each of `draw_sizes`, in input order.
pub fn forecast(hand: &[Card], remaining: &[Card], draw_sizes: &[usize]) -> Vec<(usize, u8)> {
    Estimator::new()
        .forecast(hand, remaining, draw_sizes)
        .iter()
        .map(|estimate| (estimate.draw_size, estimate.percentage()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Deck, UsedCardSet};
    use quickcheck::TestResult;

    fn cards(input: &str) -> Vec<Card> {
        Card::parse_list(input).unwrap()
    }

    #[test]
    fn empty_hand_scores_zero() {
        let deck = Deck::new();
        assert_eq!(win_probability(&[], deck.cards(), 3), Ok(0));
        assert_eq!(win_probability(&[], &[], 0), Ok(0));

        let estimate = Estimator::new().estimate(&[], deck.cards(), 3).unwrap();
        assert_eq!(estimate.total, 0);
    }

    #[test]
    fn no_remaining_cards_scores_hundred() {
        assert_eq!(win_probability(&cards("2c"), &[], 1), Ok(100));
        assert_eq!(win_probability(&cards("2c 3b"), &[], 3), Ok(100));
    }

    #[test]
    fn zero_draw_never_beats() {
        let estimate = Estimator::new()
            .estimate(&cards("2c"), &cards("7d 7s"), 0)
            .unwrap();
        assert_eq!((estimate.total, estimate.better), (1, 0));
        assert_eq!(estimate.percentage(), 100);
    }

    #[test]
    fn negative_draw_is_rejected() {
        assert!(matches!(
            win_probability(&cards("7d"), &cards("1s"), -1),
            Err(ScoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn draw_larger_than_deck_scores_hundred() {
        assert_eq!(win_probability(&cards("7d"), &cards("1s 2s"), 1 << 40), Ok(100));
        let estimate = Estimator::new()
            .estimate(&cards("7d"), &cards("1s 2s"), i64::MAX)
            .unwrap();
        assert_eq!((estimate.total, estimate.truncated), (0, false));
    }

    #[test]
    fn equal_groups_do_not_beat() {
        // 7 of a second suit only ties the 7 of Denari.
        assert_eq!(win_probability(&cards("7d"), &cards("7s 7c 7b"), 1), Ok(100));
    }

    #[test]
    fn rounds_half_up() {
        // 7 of 8 single draws fail to beat a lone 6: 87.5%.
        let hand = cards("6d");
        let remaining = cards("7s 1s 2s 3s 4s 5s 8s 9s");
        let estimate = Estimator::new().estimate(&hand, &remaining, 1).unwrap();
        assert_eq!((estimate.total, estimate.better), (8, 1));
        assert_eq!(estimate.percentage(), 88);

        assert_eq!(win_probability(&hand, &cards("7s 1s"), 1), Ok(50));
        assert_eq!(win_probability(&hand, &cards("7s 1s 2s"), 1), Ok(67));
        assert_eq!(win_probability(&hand, &cards("7s 7c 2s"), 1), Ok(33));
    }

    #[test]
    fn two_card_draws() {
        // Only {2c, 3c} forms a two-card suit; the others top out at a lone 7.
        let estimate = Estimator::new()
            .estimate(&cards("7d 1s"), &cards("2c 3c 7b"), 2)
            .unwrap();
        assert_eq!((estimate.total, estimate.better), (3, 1));
        assert_eq!(estimate.percentage(), 67);
    }

    #[test]
    fn strongest_triple_is_safe_against_full_deck() {
        let hand = cards("7d 6d 1d");
        let mut used = UsedCardSet::new();
        used.extend_unique(hand.iter().copied()).unwrap();
        let remaining = Deck::new().remaining(&used);

        let estimate = Estimator::new().estimate(&hand, &remaining, 3).unwrap();
        assert_eq!(u128::from(estimate.total), binomial(37, 3).unwrap());
        assert_eq!(estimate.better, 0);
        assert_eq!(estimate.percentage(), 100);
    }

    #[test]
    fn weak_single_loses_to_any_pair() {
        let hand = cards("8d");
        let mut used = UsedCardSet::new();
        used.insert(hand[0]);
        let remaining = Deck::new().remaining(&used);

        let estimate = Estimator::new().estimate(&hand, &remaining, 2).unwrap();
        assert_eq!(estimate.total, 741);
        // Only two faces of different suits fail to beat: C(11, 2) minus 10 same-suit pairs.
        assert_eq!(estimate.not_beaten(), 45);
        assert_eq!(estimate.percentage(), 6);
    }

    #[test]
    fn limit_truncates_search() {
        let hand = cards("6d");
        let remaining = cards("7s 1s 2s 3s 4s 5s 8s 9s");

        let estimate = Estimator::new()
            .with_limit(4)
            .estimate(&hand, &remaining, 1)
            .unwrap();
        assert!(estimate.truncated);
        assert_eq!(estimate.total, 4);
        assert_eq!(estimate.better, 1);
        assert_eq!(estimate.percentage(), 75);

        let exact = Estimator::new()
            .with_limit(8)
            .estimate(&hand, &remaining, 1)
            .unwrap();
        assert!(!exact.truncated);
        assert_eq!(exact.total, 8);
    }

    #[test]
    fn cancel_flag_stops_search() {
        let flag = Arc::new(AtomicBool::new(true));
        let estimate = Estimator::new()
            .with_cancel(flag.clone())
            .estimate(&cards("6d"), Deck::new().cards(), 3)
            .unwrap();
        assert!(estimate.truncated);
        assert_eq!(estimate.total, 0);

        flag.store(false, Ordering::Relaxed);
        let estimate = Estimator::new()
            .with_cancel(flag)
            .estimate(&cards("6d"), &cards("7s 1s"), 1)
            .unwrap();
        assert!(!estimate.truncated);
        assert_eq!(estimate.total, 2);
    }

    #[test]
    fn forecast_matches_single_searches() {
        let hand = cards("7d 6d 2s");
        let mut used = UsedCardSet::new();
        used.extend_unique(hand.iter().copied()).unwrap();
        let remaining = Deck::new().remaining(&used);

        let draws = [3, 1, 2];
        let results = forecast(&hand, &remaining, &draws);
        assert_eq!(results.len(), 3);
        for (&draw, &(size, pct)) in draws.iter().zip(&results) {
            assert_eq!(size, draw);
            assert_eq!(Ok(pct), win_probability(&hand, &remaining, draw as i64));
        }
    }

    #[test]
    fn percentage_is_bounded() {
        fn prop(hand: Vec<Card>, remaining: Vec<Card>, draw: u8) -> TestResult {
            let remaining: Vec<Card> = remaining.into_iter().take(12).collect();
            let draw = i64::from(draw % 4);
            match win_probability(&hand, &remaining, draw) {
                Ok(pct) => TestResult::from_bool(pct <= 100),
                Err(_) => TestResult::failed(),
            }
        }
        quickcheck::quickcheck(prop as fn(Vec<Card>, Vec<Card>, u8) -> TestResult);
    }

    #[test]
    fn nothing_left_to_draw_is_a_sure_win() {
        fn prop(hand: Vec<Card>, draw: u8) -> TestResult {
            if hand.is_empty() || draw == 0 {
                return TestResult::discard();
            }
            TestResult::from_bool(win_probability(&hand, &[], i64::from(draw)) == Ok(100))
        }
        quickcheck::quickcheck(prop as fn(Vec<Card>, u8) -> TestResult);
    }
}
