//! imgstat: parallel whole-array statistics
//!
//! imgstat computes the minimum, maximum, count, sum, sum of squares, mean,
//! sample variance and standard deviation of every sample in an N-dimensional
//! array in a single pass. The array is cut into disjoint regions, each region is
//! accumulated on its own Rayon worker with compensated summation, and the
//! per-region totals are folded together once every worker has finished.
//!
//! ## Key Features
//!
//! - **Parallel Processing**: One accumulator per region, no locks in the hot loop
//! - **Compensated Summation**: Neumaier summation that survives the merge across regions
//! - **Partition Independence**: Same results for any number of regions, up to rounding
//! - **Any Pixel Type**: Generic over integer and floating-point samples
//! - **Pipeline Stage**: A filter with pass-through output and dirty-flag recomputation
//!
//! ## Module Organization
//!
//! - [`statistics`]: Accumulators, the reduction driver and the derived results
//! - [`partition`]: Strategies that split arrays into regions
//! - [`filter`]: Pipeline-style filter caching the last result
//! - [`parallel`]: Parallel processing configuration
//! - [`input`]: Plain-text sample input used by the command line tool
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Example
//!
//! ```rust
//! use imgstat::prelude::*;
//! use ndarray::{ArrayD, IxDyn};
//!
//! let image = ArrayD::from_shape_vec(IxDyn(&[5]), vec![1u8, 2, 3, 4, 5]).unwrap();
//!
//! let driver = ReductionDriver::new();
//! let stats = driver.compute(image.view(), 3, &SplitOuterAxis);
//!
//! assert_eq!(stats.count(), 5);
//! assert_eq!(stats.min(), Some(1));
//! assert_eq!(stats.mean(), 3.0);
//! assert_eq!(stats.variance(), 2.5);
//! ```

// Core modules
pub mod errors;
pub mod filter;
pub mod input;
pub mod parallel;
pub mod partition;
pub mod statistics;

// Direct re-exports for the public API
pub use errors::*;
pub use filter::*;
pub use parallel::*;
pub use partition::*;
pub use statistics::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{ImgStatError, Result};
    pub use crate::filter::StatisticsFilter;
    pub use crate::parallel::ParallelConfig;
    pub use crate::partition::{PartitionKind, PartitionStrategy, SplitFlat, SplitOuterAxis};
    pub use crate::statistics::{
        CompensatedAccumulator, GlobalStatistics, PartialStatistics, ReductionDriver, Sample,
        SampleRegion, StatisticsResult,
    };
}
