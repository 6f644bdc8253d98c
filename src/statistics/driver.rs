//! Parallel reduction driver
//!
//! The driver runs one [`PartialStatistics`] per region on the Rayon pool and
//! folds the partials into a [`GlobalStatistics`] once every region finished.
//!
//! # Preconditions
//!
//! Regions handed to [`ReductionDriver::reduce_regions`] must be disjoint and
//! together cover the input exactly once. Overlapping or missing regions are a
//! caller bug and are not detected in release builds.

use super::partial::PartialStatistics;
use super::result::{GlobalStatistics, StatisticsResult};
use super::sample::Sample;
use crate::errors::Result;
use crate::parallel::ParallelConfig;
use crate::partition::PartitionStrategy;
use log::{debug, trace, warn};
use ndarray::{ArrayBase, ArrayViewD, Data, Dimension};
use rayon::prelude::*;
use rayon::ThreadPool;

/// A block of samples that can be visited once, in any order.
pub trait SampleRegion<T: Sample> {
    /// Number of samples in the region.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` exactly once per sample.
    fn for_each_sample<F: FnMut(T)>(&self, f: F);
}

impl<T: Sample> SampleRegion<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn for_each_sample<F: FnMut(T)>(&self, f: F) {
        self.iter().copied().for_each(f);
    }
}

impl<T: Sample> SampleRegion<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn for_each_sample<F: FnMut(T)>(&self, f: F) {
        self.iter().copied().for_each(f);
    }
}

impl<T: Sample, R: SampleRegion<T> + ?Sized> SampleRegion<T> for &R {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn for_each_sample<F: FnMut(T)>(&self, f: F) {
        (**self).for_each_sample(f)
    }
}

impl<T, S, D> SampleRegion<T> for ArrayBase<S, D>
where
    T: Sample,
    S: Data<Elem = T>,
    D: Dimension,
{
    fn len(&self) -> usize {
        ArrayBase::len(self)
    }

    fn for_each_sample<F: FnMut(T)>(&self, f: F) {
        // Contiguous arrays are walked in memory order, others logically.
        match self.as_slice_memory_order() {
            Some(slice) => slice.iter().copied().for_each(f),
            None => self.iter().copied().for_each(f),
        }
    }
}

/// Runs partition-local accumulation and the merge fold.
#[derive(Debug, Default)]
pub struct ReductionDriver {
    pool: Option<ThreadPool>,
}

impl ReductionDriver {
    /// Driver running on the global Rayon pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Driver running on a dedicated pool when `config` fixes a thread count.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be built.
    pub fn with_config(config: &ParallelConfig) -> Result<Self> {
        Ok(Self {
            pool: config.build_pool()?,
        })
    }

    /// Number of worker threads partitions are spread over.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Accumulate every region independently, without merging.
    ///
    /// The partials come back in region order regardless of which worker
    /// finished first.
    pub fn accumulate<T, R>(&self, regions: &[R]) -> Vec<PartialStatistics<T>>
    where
        T: Sample,
        R: SampleRegion<T> + Sync,
    {
        let run = || {
            regions
                .par_iter()
                .map(|region| PartialStatistics::from_region(region))
                .collect::<Vec<_>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Reduce pre-partitioned regions to global totals.
    ///
    /// The `collect` inside [`accumulate`](Self::accumulate) is the barrier;
    /// the merge below is a single sequential fold over the finished partials.
    pub fn reduce_regions<T, R>(&self, regions: &[R]) -> GlobalStatistics<T>
    where
        T: Sample,
        R: SampleRegion<T> + Sync,
    {
        debug!(
            "Reducing {} regions on {} threads",
            regions.len(),
            self.num_threads()
        );

        let partials = self.accumulate(regions);
        for (idx, partial) in partials.iter().enumerate() {
            trace!(
                "Partition {}: count={} sum={} sum_of_squares={}",
                idx,
                partial.count(),
                partial.sum(),
                partial.sum_of_squares()
            );
        }

        let global = GlobalStatistics::merge_all(partials);
        if global.count() == 0 {
            warn!("Reduction visited no samples, min/max are undefined");
        }
        global
    }

    /// Split `array` with `strategy` into at most `partitions` regions and reduce them.
    pub fn reduce_array<T, P>(
        &self,
        array: ArrayViewD<'_, T>,
        partitions: usize,
        strategy: &P,
    ) -> GlobalStatistics<T>
    where
        T: Sample,
        P: PartitionStrategy + ?Sized,
    {
        let total = array.len();
        let regions = strategy.split(array, partitions);
        let global = self.reduce_regions(&regions);
        debug_assert_eq!(
            global.count(),
            total as u64,
            "partition strategy must cover every sample exactly once"
        );
        global
    }

    /// Reduce and derive the final statistics in one call.
    pub fn compute<T, P>(
        &self,
        array: ArrayViewD<'_, T>,
        partitions: usize,
        strategy: &P,
    ) -> StatisticsResult<T>
    where
        T: Sample,
        P: PartitionStrategy + ?Sized,
    {
        StatisticsResult::from_global(self.reduce_array(array, partitions, strategy))
    }
}
