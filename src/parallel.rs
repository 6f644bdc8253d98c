//! Parallel processing configuration and management
//!
//! This module provides abstractions for configuring the Rayon thread pool the
//! reduction driver runs its partitions on.

use crate::errors::{ImgStatError, Result};
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Build a dedicated pool for this configuration, leaving the global pool untouched.
    ///
    /// Returns `None` when no thread count is configured; callers then run on the
    /// global pool.
    pub fn build_pool(&self) -> Result<Option<ThreadPool>> {
        match self.num_threads {
            Some(0) => Err(ImgStatError::ThreadPoolError(
                "Thread count must be at least 1".to_string(),
            )),
            Some(num_threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|idx| format!("imgstat-worker-{}", idx))
                    .build()?;
                debug!("Built dedicated pool with {} threads", num_threads);
                Ok(Some(pool))
            }
            None => Ok(None),
        }
    }

    /// Get the current number of threads being used
    pub fn current_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(rayon::current_num_threads)
    }

    /// Create a configuration that uses all available CPU cores
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    /// Create a configuration that uses a specific number of threads
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Create a configuration that uses the default thread pool
    pub fn new_default() -> Self {
        Self { num_threads: None }
    }
}

/// Get information about the current parallel configuration
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Print parallel processing information
    pub fn print_info(&self) {
        println!("Parallel Processing Information:");
        println!("   Current threads: {}", self.current_threads);
        println!("   Available CPU cores: {}", self.available_cores);
        println!("   Available parallelism: {}", self.available_parallelism);
    }
}
