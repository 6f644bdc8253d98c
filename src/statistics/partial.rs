//! Per-partition accumulation
//!
//! A [`PartialStatistics`] is owned by exactly one worker while its region is
//! visited, so the hot loop needs no synchronization.

use super::compensated::CompensatedAccumulator;
use super::driver::SampleRegion;
use super::sample::{RealType, Sample};

/// Running min, max, count, sum and sum of squares for one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialStatistics<T: Sample> {
    pub(crate) count: u64,
    pub(crate) min: T,
    pub(crate) max: T,
    // false until a sample took part in an ordered comparison
    pub(crate) has_extrema: bool,
    pub(crate) sum: CompensatedAccumulator<RealType>,
    pub(crate) sum_of_squares: CompensatedAccumulator<RealType>,
}

impl<T: Sample> Default for PartialStatistics<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> PartialStatistics<T> {
    /// Fresh accumulator: extrema start at the opposite ends of `T`'s range.
    pub fn new() -> Self {
        Self {
            count: 0,
            min: T::max_value(),
            max: T::min_value(),
            has_extrema: false,
            sum: CompensatedAccumulator::new(),
            sum_of_squares: CompensatedAccumulator::new(),
        }
    }

    /// Account for one sample.
    ///
    /// The first orderable sample seeds both extrema, so infinities are reported
    /// as themselves rather than as the finite bounds of `T`. After that, strict
    /// comparisons keep the first of equal extrema. A NaN sample compares false
    /// against everything, so it never becomes an extremum, but it is counted
    /// and poisons the sums.
    #[inline]
    pub fn visit(&mut self, sample: T) {
        self.count += 1;
        if !self.has_extrema {
            if sample.partial_cmp(&sample).is_some() {
                self.min = sample;
                self.max = sample;
                self.has_extrema = true;
            }
        } else {
            if sample < self.min {
                self.min = sample;
            }
            if sample > self.max {
                self.max = sample;
            }
        }
        let real = sample.to_real();
        self.sum.add(real);
        self.sum_of_squares.add(real * real);
    }

    /// Visit every sample of `region` once.
    pub fn visit_region<R>(&mut self, region: &R)
    where
        R: SampleRegion<T> + ?Sized,
    {
        region.for_each_sample(|sample| self.visit(sample));
    }

    /// Accumulate a whole region into a new instance.
    pub fn from_region<R>(region: &R) -> Self
    where
        R: SampleRegion<T> + ?Sized,
    {
        let mut partial = Self::new();
        partial.visit_region(region);
        partial
    }

    /// Fold another partition's totals into this one.
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        if other.has_extrema {
            if !self.has_extrema || other.min < self.min {
                self.min = other.min;
            }
            if !self.has_extrema || other.max > self.max {
                self.max = other.max;
            }
            self.has_extrema = true;
        }
        self.sum.merge_from(&other.sum);
        self.sum_of_squares.merge_from(&other.sum_of_squares);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Smallest visited sample, `None` before any ordered sample was seen.
    pub fn min(&self) -> Option<T> {
        self.has_extrema.then_some(self.min)
    }

    /// Largest visited sample, `None` before any ordered sample was seen.
    pub fn max(&self) -> Option<T> {
        self.has_extrema.then_some(self.max)
    }

    pub fn sum(&self) -> RealType {
        self.sum.value()
    }

    pub fn sum_of_squares(&self) -> RealType {
        self.sum_of_squares.value()
    }
}
