//! Compensated summation
//!
//! [`CompensatedAccumulator`] keeps a running sum together with a correction
//! term that collects the low-order bits lost by each floating-point addition
//! (Neumaier's variant of Kahan–Babuška summation). The error of a sum of `N`
//! terms stays bounded by a small multiple of the machine epsilon instead of
//! growing with `N`, which matters for large images.

use num_traits::Float;

/// Running sum with error compensation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensatedAccumulator<R: Float> {
    sum: R,
    compensation: R,
}

impl<R: Float> Default for CompensatedAccumulator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Float> CompensatedAccumulator<R> {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            sum: R::zero(),
            compensation: R::zero(),
        }
    }

    /// Add one term.
    ///
    /// Once the running sum is no longer finite the correction term is left
    /// alone, so NaN and infinities reach [`value`](Self::value) unchanged.
    #[inline]
    pub fn add(&mut self, value: R) {
        let t = self.sum + value;
        if t.is_finite() {
            if self.sum.abs() >= value.abs() {
                self.compensation = self.compensation + ((self.sum - t) + value);
            } else {
                self.compensation = self.compensation + ((value - t) + self.sum);
            }
        }
        self.sum = t;
    }

    /// Current best estimate of the sum.
    #[inline]
    pub fn value(&self) -> R {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }

    /// The accumulated correction term.
    #[inline]
    pub fn compensation(&self) -> R {
        self.compensation
    }

    /// Combine two accumulators into one covering the inputs of both.
    ///
    /// See [`merge_from`](Self::merge_from).
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.merge_from(&other);
        self
    }

    /// Fold `other` into `self`.
    ///
    /// Adding `other.value()` would round away `other`'s correction before it
    /// is applied. Instead the running sum and the correction term of `other`
    /// are fed in as two separate compensated terms.
    pub fn merge_from(&mut self, other: &Self) {
        self.add(other.sum);
        self.add(other.compensation);
    }

    /// Reset to zero.
    pub fn reset(&mut self) {
        self.sum = R::zero();
        self.compensation = R::zero();
    }

    /// Compensated sum of every item of `iter`.
    pub fn sum_iter<I: IntoIterator<Item = R>>(iter: I) -> R {
        iter.into_iter().collect::<Self>().value()
    }
}

impl<R: Float> Extend<R> for CompensatedAccumulator<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<R: Float> FromIterator<R> for CompensatedAccumulator<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
