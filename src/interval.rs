// Interval algebra tracking what is known about the plaintext residue. The
// set is kept sorted and deduplicated so every run enumerates intervals in
// the same order; overlapping members are redundant but harmless and are
// never merged.

use crate::{ceil_div, floor_div};

use num_bigint::BigInt;
use num_traits::One;

/// A closed integer range `[lower, upper]` with `lower <= upper`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    pub lower: BigInt,
    pub upper: BigInt,
}

impl Interval {
    pub fn new(lower: BigInt, upper: BigInt) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }

    pub fn contains(&self, value: &BigInt) -> bool {
        &self.lower <= value && value <= &self.upper
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `interval`, keeping the set sorted and dropping exact
    /// duplicates.
    pub fn insert(&mut self, interval: Interval) {
        if let Err(position) = self.intervals.binary_search(&interval) {
            self.intervals.insert(position, interval);
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn contains(&self, value: &BigInt) -> bool {
        self.intervals.iter().any(|interval| interval.contains(value))
    }

    /// Returns the converged value when the set is a single point `[a, a]`.
    pub fn converged_point(&self) -> Option<&BigInt> {
        match self.intervals.as_slice() {
            [interval] if interval.lower == interval.upper => Some(&interval.lower),
            _ => None,
        }
    }

    /// The narrowing step: for every `[a, b]` in the set and every wrap
    /// count `r` with
    ///
    /// ```text
    /// ceil((a*s - B3 + 1) / n) <= r <= floor((b*s - B2) / n),
    /// ```
    ///
    /// the candidate interval is
    ///
    /// ```text
    /// [max(a, ceil((B2 + r*n) / s)), min(b, floor((B3 - 1 + r*n) / s))]
    /// ```
    ///
    /// and is kept only when non-empty. The union of candidates always
    /// retains the true residue when `s` is genuinely conformant.
    pub fn refine(&self, s: &BigInt, n: &BigInt, b2: &BigInt, b3: &BigInt) -> IntervalSet {
        let one = BigInt::one();
        let mut refined = IntervalSet::new();
        for Interval { lower: a, upper: b } in self.iter() {
            let r_min = ceil_div(&(a * s - b3 + &one), n);
            let r_max = floor_div(&(b * s - b2), n);

            let mut r = r_min;
            while r <= r_max {
                let candidate_lower = ceil_div(&(b2 + &r * n), s).max(a.clone());
                let candidate_upper = floor_div(&(b3 - &one + &r * n), s).min(b.clone());
                if candidate_lower <= candidate_upper {
                    refined.insert(Interval::new(candidate_lower, candidate_upper));
                }
                r += &one;
            }
        }
        refined
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}
