//! Partitioning strategies
//!
//! A strategy cuts an array view into disjoint views that together cover every
//! sample exactly once. How many partitions to ask for is the caller's choice;
//! strategies may return fewer when the array is too small to split further.

use ndarray::{ArrayView, ArrayViewD, Axis};
use std::fmt;
use std::str::FromStr;

/// Splits an array view into at most `partitions` disjoint covering regions.
pub trait PartitionStrategy {
    /// `partitions == 0` is treated as 1.
    fn split<'a, T>(&self, array: ArrayViewD<'a, T>, partitions: usize) -> Vec<ArrayViewD<'a, T>>;
}

/// Lengths of `parts` near-equal pieces of `len`, larger pieces first.
fn piece_lengths(len: usize, parts: usize) -> impl Iterator<Item = usize> {
    let parts = parts.clamp(1, len.max(1));
    let base = len / parts;
    let remainder = len % parts;
    (0..parts).map(move |idx| base + usize::from(idx < remainder))
}

/// Slabs along the outermost axis, e.g. bands of rows of a 2-D image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOuterAxis;

impl PartitionStrategy for SplitOuterAxis {
    fn split<'a, T>(&self, array: ArrayViewD<'a, T>, partitions: usize) -> Vec<ArrayViewD<'a, T>> {
        if array.ndim() == 0 || array.is_empty() {
            return vec![array];
        }

        let outer = array.len_of(Axis(0));
        let mut regions = Vec::with_capacity(partitions.clamp(1, outer));
        let mut rest = array;
        for len in piece_lengths(outer, partitions) {
            let (head, tail) = rest.split_at(Axis(0), len);
            regions.push(head);
            rest = tail;
        }
        regions
    }
}

/// Near-equal runs of a contiguous buffer, ignoring the array's shape.
///
/// Views that are not in standard layout fall back to [`SplitOuterAxis`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitFlat;

impl PartitionStrategy for SplitFlat {
    fn split<'a, T>(&self, array: ArrayViewD<'a, T>, partitions: usize) -> Vec<ArrayViewD<'a, T>> {
        let Some(mut rest) = array.to_slice() else {
            return SplitOuterAxis.split(array, partitions);
        };
        if rest.is_empty() {
            return vec![array];
        }

        let mut regions = Vec::with_capacity(partitions.clamp(1, rest.len()));
        for len in piece_lengths(rest.len(), partitions) {
            let (head, tail) = rest.split_at(len);
            regions.push(ArrayView::from(head).into_dyn());
            rest = tail;
        }
        regions
    }
}

/// Runtime choice between the built-in strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartitionKind {
    #[default]
    OuterAxis,
    Flat,
}

impl PartitionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OuterAxis => "outer-axis",
            Self::Flat => "flat",
        }
    }
}

impl PartitionStrategy for PartitionKind {
    fn split<'a, T>(&self, array: ArrayViewD<'a, T>, partitions: usize) -> Vec<ArrayViewD<'a, T>> {
        match self {
            Self::OuterAxis => SplitOuterAxis.split(array, partitions),
            Self::Flat => SplitFlat.split(array, partitions),
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outer-axis" | "axis" => Ok(Self::OuterAxis),
            "flat" => Ok(Self::Flat),
            _ => Err(format!(
                "Unknown partition strategy '{}': expected 'outer-axis' or 'flat'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn region_lengths(regions: &[ArrayViewD<'_, i32>]) -> Vec<usize> {
        regions.iter().map(|r| r.len()).collect()
    }

    #[test]
    fn test_piece_lengths() {
        assert_eq!(piece_lengths(10, 3).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert_eq!(piece_lengths(2, 5).collect::<Vec<_>>(), vec![1, 1]);
        assert_eq!(piece_lengths(7, 0).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_outer_axis_split() {
        let array = ArrayD::from_shape_vec(IxDyn(&[5, 2]), (0..10).collect()).unwrap();
        let regions = SplitOuterAxis.split(array.view(), 2);
        assert_eq!(region_lengths(&regions), vec![6, 4]);
        assert_eq!(regions[1].shape(), &[2, 2]);
        assert_eq!(regions[1][[0, 0]], 6);

        // More partitions than rows
        let regions = SplitOuterAxis.split(array.view(), 16);
        assert_eq!(regions.len(), 5);
    }

    #[test]
    fn test_flat_split() {
        let array = ArrayD::from_shape_vec(IxDyn(&[2, 5]), (0..10).collect()).unwrap();
        let regions = SplitFlat.split(array.view(), 4);
        assert_eq!(region_lengths(&regions), vec![3, 3, 2, 2]);
        assert_eq!(regions[3].iter().copied().collect::<Vec<_>>(), vec![8, 9]);
    }

    #[test]
    fn test_flat_split_of_transposed_view_falls_back() {
        let array = ArrayD::from_shape_vec(IxDyn(&[2, 5]), (0..10).collect()).unwrap();
        let regions = SplitFlat.split(array.t(), 3);
        assert_eq!(region_lengths(&regions), vec![4, 4, 2]);
    }

    #[test]
    fn test_empty_and_scalar() {
        let empty = ArrayD::<i32>::zeros(IxDyn(&[0, 3]));
        assert_eq!(region_lengths(&SplitOuterAxis.split(empty.view(), 4)), vec![0]);
        assert_eq!(region_lengths(&SplitFlat.split(empty.view(), 4)), vec![0]);

        let scalar = ArrayD::from_elem(IxDyn(&[]), 3);
        assert_eq!(region_lengths(&SplitOuterAxis.split(scalar.view(), 4)), vec![1]);
    }

    #[test]
    fn test_partition_kind_from_str() {
        assert_eq!("flat".parse::<PartitionKind>(), Ok(PartitionKind::Flat));
        assert_eq!("outer-axis".parse::<PartitionKind>(), Ok(PartitionKind::OuterAxis));
        assert!("diagonal".parse::<PartitionKind>().is_err());
    }
}
