//! Merged totals and derived statistics

use super::partial::PartialStatistics;
use super::sample::{RealType, Sample};
use serde_json::{json, Value as JsonValue};
use std::fmt;

/// Totals over the whole input, produced only by merging partials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalStatistics<T: Sample> {
    totals: PartialStatistics<T>,
}

impl<T: Sample> GlobalStatistics<T> {
    /// Fold every partial, in iteration order, into one set of totals.
    pub fn merge_all<I>(partials: I) -> Self
    where
        I: IntoIterator<Item = PartialStatistics<T>>,
    {
        let totals = partials
            .into_iter()
            .fold(PartialStatistics::new(), |mut acc, partial| {
                acc.merge(&partial);
                acc
            });
        Self { totals }
    }

    pub fn count(&self) -> u64 {
        self.totals.count
    }

    /// `None` when no sample could be ordered.
    pub fn min(&self) -> Option<T> {
        self.totals.min()
    }

    /// `None` when no sample could be ordered.
    pub fn max(&self) -> Option<T> {
        self.totals.max()
    }

    pub fn sum(&self) -> RealType {
        self.totals.sum.value()
    }

    pub fn sum_of_squares(&self) -> RealType {
        self.totals.sum_of_squares.value()
    }
}

impl<T: Sample> From<PartialStatistics<T>> for GlobalStatistics<T> {
    fn from(totals: PartialStatistics<T>) -> Self {
        Self { totals }
    }
}

/// Final statistics derived once from [`GlobalStatistics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsResult<T: Sample> {
    global: GlobalStatistics<T>,
    mean: RealType,
    variance: RealType,
    sigma: RealType,
}

impl<T: Sample> StatisticsResult<T> {
    /// Derive mean, sample variance and sigma from merged totals.
    ///
    /// Mean is 0 for an empty input and variance is 0 for fewer than two
    /// samples. Rounding can drive the variance of near-constant input slightly
    /// below zero; it is clamped to 0, which also keeps `sigma` real.
    pub fn from_global(global: GlobalStatistics<T>) -> Self {
        let count = global.count();
        let sum = global.sum();
        let sum_of_squares = global.sum_of_squares();

        let mean = if count > 0 {
            sum / count as RealType
        } else {
            0.0
        };

        let variance = if count > 1 {
            let n = count as RealType;
            let variance = (sum_of_squares - n * mean * mean) / (n - 1.0);
            // NaN passes through untouched
            if variance < 0.0 {
                0.0
            } else {
                variance
            }
        } else {
            0.0
        };

        let sigma = if variance > 0.0 { variance.sqrt() } else { variance };

        Self {
            global,
            mean,
            variance,
            sigma,
        }
    }

    pub fn count(&self) -> u64 {
        self.global.count()
    }

    /// Minimum sample, `None` for an input without orderable samples.
    pub fn min(&self) -> Option<T> {
        self.global.min()
    }

    /// Maximum sample, `None` for an input without orderable samples.
    pub fn max(&self) -> Option<T> {
        self.global.max()
    }

    pub fn sum(&self) -> RealType {
        self.global.sum()
    }

    pub fn sum_of_squares(&self) -> RealType {
        self.global.sum_of_squares()
    }

    pub fn mean(&self) -> RealType {
        self.mean
    }

    /// Bessel-corrected sample variance.
    pub fn variance(&self) -> RealType {
        self.variance
    }

    /// Standard deviation, `sqrt(variance)`.
    pub fn sigma(&self) -> RealType {
        self.sigma
    }

    /// The merged totals the statistics were derived from.
    pub fn global(&self) -> &GlobalStatistics<T> {
        &self.global
    }

    /// JSON object with every statistic; undefined extrema become `null`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "count": self.count(),
            "min": self.min().map(Sample::to_real),
            "max": self.max().map(Sample::to_real),
            "sum": finite_or_null(self.sum()),
            "sum_of_squares": finite_or_null(self.sum_of_squares()),
            "mean": finite_or_null(self.mean),
            "variance": finite_or_null(self.variance),
            "sigma": finite_or_null(self.sigma),
        })
    }
}

fn finite_or_null(value: RealType) -> JsonValue {
    if value.is_finite() {
        json!(value)
    } else {
        JsonValue::Null
    }
}

struct Extremum<T>(Option<T>);

impl<T: fmt::Debug> fmt::Display for Extremum<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{:?}", value),
            None => write!(f, "(undefined)"),
        }
    }
}

impl<T: Sample> fmt::Display for StatisticsResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Count: {}", self.count())?;
        writeln!(f, "   Minimum: {}", Extremum(self.min()))?;
        writeln!(f, "   Maximum: {}", Extremum(self.max()))?;
        writeln!(f, "   Sum: {}", self.sum())?;
        writeln!(f, "   Sum of Squares: {}", self.sum_of_squares())?;
        writeln!(f, "   Mean: {}", self.mean)?;
        writeln!(f, "   Variance: {}", self.variance)?;
        write!(f, "   Sigma: {}", self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(values: &[f64]) -> StatisticsResult<f64> {
        StatisticsResult::from_global(GlobalStatistics::from(PartialStatistics::from_region(
            values,
        )))
    }

    #[test]
    fn test_known_input() {
        let stats = stats_of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.count(), 5);
        assert_eq!(stats.sum(), 15.0);
        assert_eq!(stats.sum_of_squares(), 55.0);
        assert_eq!(stats.mean(), 3.0);
        assert_eq!(stats.variance(), 2.5);
        assert!((stats.sigma() - 2.5f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_json_for_empty_input() {
        let json = stats_of(&[]).to_json();
        assert_eq!(json["count"], 0);
        assert!(json["min"].is_null());
        assert!(json["max"].is_null());
        assert_eq!(json["mean"], 0.0);
        assert_eq!(json["sigma"], 0.0);
    }

    #[test]
    fn test_display_marks_undefined_extrema() {
        let text = stats_of(&[]).to_string();
        assert!(text.contains("Minimum: (undefined)"));
        assert!(stats_of(&[7.0]).to_string().contains("Maximum: 7.0"));
    }
}
