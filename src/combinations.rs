use crate::error::{ScoreError, non_negative};
use smallvec::SmallVec;

/// One emitted subset. Opponent draws are small, so they stay inline.
pub type Subset<T> = SmallVec<[T; 6]>;

/// Lazily walks every `k`-subset of `items` by position.
///
/// Subsets come out in lexicographic order of the chosen positions, each
/// one keeping the relative order of `items`. Only the current index vector
/// is held between calls to `next`. Cloning an unstarted iterator replays
/// the whole sequence.
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: SmallVec<[usize; 6]>,
    remaining: Option<u128>,
    started: bool,
    done: bool,
}

/// Every `k`-subset of `items`; fails when `k` is negative.
pub fn combinations<T: Clone>(items: &[T], k: i64) -> Result<Combinations<'_, T>, ScoreError> {
    let k = non_negative(k, "subset size")?;
    Ok(Combinations::new(items, k))
}

/// `C(n, k)`, or `None` when it does not fit in a `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

impl<'a, T: Clone> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Self {
        // An oversized k must not size the index buffer.
        let done = k > items.len();
        let indices = if done { SmallVec::new() } else { (0..k).collect() };

        Combinations {
            items,
            indices,
            remaining: binomial(items.len(), k),
            started: false,
            done,
        }
    }

    /// Moves `indices` to the next position set, or reports exhaustion.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();

        // Rightmost index that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };

        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Subset<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.started {
            if !self.advance() {
                self.done = true;
                self.remaining = Some(0);
                return None;
            }
        } else {
            self.started = true;
        }

        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(self.indices.iter().map(|&i| self.items[i].clone()).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining.and_then(|r| usize::try_from(r).ok()) {
            Some(r) => (r, Some(r)),
            None => (usize::MAX, None),
        }
    }
}
