//! Statistics filter
//!
//! [`StatisticsFilter`] wraps the reduction the way an image pipeline stage
//! would: it owns an input array, passes it through unmodified as its output
//! and only reruns the reduction when the input or the partitioning changed
//! since the last [`update`](StatisticsFilter::update).

use crate::errors::{ImgStatError, Result};
use crate::parallel::ParallelConfig;
use crate::partition::PartitionKind;
use crate::statistics::{ReductionDriver, RealType, Sample, StatisticsResult};
use log::debug;
use ndarray::ArrayD;
use std::fmt;

/// Pipeline stage computing min, max, mean, sigma, variance, sum and sum of squares.
#[derive(Debug)]
pub struct StatisticsFilter<T: Sample> {
    input: Option<ArrayD<T>>,
    number_of_partitions: usize,
    strategy: PartitionKind,
    driver: ReductionDriver,
    modified: bool,
    statistics: Option<StatisticsResult<T>>,
}

impl<T: Sample> Default for StatisticsFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> StatisticsFilter<T> {
    /// Filter on the global pool, one partition per worker thread.
    pub fn new() -> Self {
        let driver = ReductionDriver::new();
        Self {
            input: None,
            number_of_partitions: driver.num_threads(),
            strategy: PartitionKind::default(),
            driver,
            modified: true,
            statistics: None,
        }
    }

    /// Replace the input array. Statistics from a previous run are discarded.
    pub fn set_input(&mut self, input: ArrayD<T>) {
        self.input = Some(input);
        self.statistics = None;
        self.modified = true;
    }

    /// Mark the input as changed after it was mutated through [`input_mut`](Self::input_mut).
    pub fn modified(&mut self) {
        self.statistics = None;
        self.modified = true;
    }

    pub fn input(&self) -> Option<&ArrayD<T>> {
        self.input.as_ref()
    }

    /// Mutable access to the input; call [`modified`](Self::modified) after changing it.
    pub fn input_mut(&mut self) -> Option<&mut ArrayD<T>> {
        self.input.as_mut()
    }

    /// The input, passed through unmodified.
    pub fn output(&self) -> Option<&ArrayD<T>> {
        self.input.as_ref()
    }

    /// Give the input back, leaving the filter without one.
    pub fn take_input(&mut self) -> Option<ArrayD<T>> {
        self.statistics = None;
        self.modified = true;
        self.input.take()
    }

    /// Set how many regions the input is split into.
    ///
    /// # Errors
    ///
    /// Returns [`ImgStatError::InvalidPartition`] for zero partitions.
    pub fn set_number_of_partitions(&mut self, partitions: usize) -> Result<()> {
        if partitions == 0 {
            return Err(ImgStatError::InvalidPartition {
                message: "number of partitions must be at least 1".to_string(),
            });
        }
        if partitions != self.number_of_partitions {
            self.number_of_partitions = partitions;
            self.modified();
        }
        Ok(())
    }

    pub fn number_of_partitions(&self) -> usize {
        self.number_of_partitions
    }

    pub fn set_partition_strategy(&mut self, strategy: PartitionKind) {
        if strategy != self.strategy {
            self.strategy = strategy;
            self.modified();
        }
    }

    pub fn partition_strategy(&self) -> PartitionKind {
        self.strategy
    }

    /// Run partitions on a pool configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be built.
    pub fn set_parallel_config(&mut self, config: &ParallelConfig) -> Result<()> {
        self.driver = ReductionDriver::with_config(config)?;
        Ok(())
    }

    /// Whether the next [`update`](Self::update) will rerun the reduction.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Recompute the statistics if anything changed since the last run.
    ///
    /// # Errors
    ///
    /// Returns [`ImgStatError::MissingInput`] when no input was set.
    pub fn update(&mut self) -> Result<()> {
        let input = self.input.as_ref().ok_or(ImgStatError::MissingInput)?;
        if !self.modified && self.statistics.is_some() {
            debug!("Statistics are up to date, skipping reduction");
            return Ok(());
        }

        debug!(
            "Computing statistics of {} samples with {} {} partitions",
            input.len(),
            self.number_of_partitions,
            self.strategy
        );
        let statistics =
            self.driver
                .compute(input.view(), self.number_of_partitions, &self.strategy);
        self.statistics = Some(statistics);
        self.modified = false;
        Ok(())
    }

    /// Result of the last completed run.
    ///
    /// # Errors
    ///
    /// Returns [`ImgStatError::ResultNotReady`] before the first successful
    /// [`update`](Self::update) or after the input changed.
    pub fn statistics(&self) -> Result<&StatisticsResult<T>> {
        self.statistics.as_ref().ok_or(ImgStatError::ResultNotReady)
    }

    pub fn minimum(&self) -> Result<Option<T>> {
        Ok(self.statistics()?.min())
    }

    pub fn maximum(&self) -> Result<Option<T>> {
        Ok(self.statistics()?.max())
    }

    pub fn mean(&self) -> Result<RealType> {
        Ok(self.statistics()?.mean())
    }

    pub fn sigma(&self) -> Result<RealType> {
        Ok(self.statistics()?.sigma())
    }

    pub fn variance(&self) -> Result<RealType> {
        Ok(self.statistics()?.variance())
    }

    pub fn sum(&self) -> Result<RealType> {
        Ok(self.statistics()?.sum())
    }

    pub fn sum_of_squares(&self) -> Result<RealType> {
        Ok(self.statistics()?.sum_of_squares())
    }
}

impl<T: Sample> fmt::Display for StatisticsFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StatisticsFilter")?;
        match &self.input {
            Some(input) => writeln!(f, "   Input shape: {:?}", input.shape())?,
            None => writeln!(f, "   Input: (none)")?,
        }
        writeln!(f, "   Partitions: {}", self.number_of_partitions)?;
        writeln!(f, "   Strategy: {}", self.strategy)?;
        writeln!(f, "   Threads: {}", self.driver.num_threads())?;
        writeln!(f, "   Modified: {}", self.modified)?;
        match &self.statistics {
            Some(statistics) => write!(f, "{}", statistics),
            None => write!(f, "   Statistics: (not computed)"),
        }
    }
}
