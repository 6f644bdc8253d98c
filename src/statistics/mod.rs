//! Statistical reduction over whole arrays
//!
//! This module computes the minimum, maximum, count, sum, sum of squares, mean,
//! variance and standard deviation of every sample of an array in one parallel pass.
//!
//! # Organization
//!
//! This module is organized into submodules:
//! - [`compensated`]: Compensated (Neumaier) summation
//! - [`sample`]: The sample type contract and the accumulation type
//! - [`partial`]: Per-partition accumulators
//! - [`driver`]: Parallel accumulation and the merge fold
//! - [`result`]: Merged totals and derived statistics

pub mod compensated;
pub mod driver;
pub mod partial;
pub mod result;
pub mod sample;

// Re-export the main types for convenience
pub use compensated::CompensatedAccumulator;
pub use driver::{ReductionDriver, SampleRegion};
pub use partial::PartialStatistics;
pub use result::{GlobalStatistics, StatisticsResult};
pub use sample::{RealType, Sample};
