use imgstat::{
    CompensatedAccumulator, GlobalStatistics, ParallelConfig, PartialStatistics, PartitionKind,
    PartitionStrategy, ReductionDriver, SplitFlat, SplitOuterAxis, StatisticsResult,
};
use ndarray::{ArrayD, IxDyn};

/// A 3-D test image with a wide dynamic range
fn test_image() -> ArrayD<f32> {
    let (d0, d1, d2) = (37, 23, 11);
    let data: Vec<f32> = (0..d0 * d1 * d2)
        .map(|i| (i as f32 * 0.37).sin() * 1000.0 + (i % 7) as f32 * 0.001)
        .collect();
    ArrayD::from_shape_vec(IxDyn(&[d0, d1, d2]), data).expect("Failed to build test image")
}

fn relative_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}

fn assert_same_statistics(a: &StatisticsResult<f32>, b: &StatisticsResult<f32>) {
    assert_eq!(a.count(), b.count());
    assert_eq!(a.min(), b.min());
    assert_eq!(a.max(), b.max());
    assert!(relative_eq(a.sum(), b.sum(), 1e-14), "{} vs {}", a.sum(), b.sum());
    assert!(relative_eq(a.sum_of_squares(), b.sum_of_squares(), 1e-14));
    assert!(relative_eq(a.mean(), b.mean(), 1e-14));
    assert!(relative_eq(a.variance(), b.variance(), 1e-12));
    assert!(relative_eq(a.sigma(), b.sigma(), 1e-12));
}

#[test]
fn test_partition_count_independence() {
    let image = test_image();
    let driver = ReductionDriver::new();
    let reference = driver.compute(image.view(), 1, &SplitOuterAxis);

    for partitions in [2, 3, 8, 37, 100] {
        for strategy in [PartitionKind::OuterAxis, PartitionKind::Flat] {
            let stats = driver.compute(image.view(), partitions, &strategy);
            assert_same_statistics(&reference, &stats);
        }
    }
}

#[test]
fn test_explicit_partitionings_of_one_to_five() {
    let data = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    let driver = ReductionDriver::new();

    let whole = StatisticsResult::from_global(driver.reduce_regions(&[&data[..]]));
    let three = StatisticsResult::from_global(driver.reduce_regions(&[
        &data[0..2],
        &data[2..3],
        &data[3..5],
    ]));
    let two = StatisticsResult::from_global(driver.reduce_regions(&[&data[0..1], &data[1..5]]));

    for stats in [&whole, &three, &two] {
        assert_eq!(stats.count(), 5);
        assert_eq!(stats.mean(), 3.0);
        assert_eq!(stats.variance(), 2.5);
        assert_eq!(stats.min(), Some(1.0));
        assert_eq!(stats.max(), Some(5.0));
    }
}

#[test]
fn test_merge_order_independence() {
    let image = test_image();
    let regions = SplitFlat.split(image.view(), 9);
    let partials = ReductionDriver::new().accumulate(&regions);

    let forward = GlobalStatistics::merge_all(partials.iter().copied());
    let backward = GlobalStatistics::merge_all(partials.iter().rev().copied());
    // Interleave even and odd partitions
    let shuffled = GlobalStatistics::merge_all(
        partials
            .iter()
            .step_by(2)
            .chain(partials.iter().skip(1).step_by(2))
            .copied(),
    );
    // Tree-shaped merge instead of a linear fold
    let tree = GlobalStatistics::merge_all(partials.chunks(2).map(|pair| {
        let mut acc = PartialStatistics::new();
        for partial in pair {
            acc.merge(partial);
        }
        acc
    }));

    let reference = StatisticsResult::from_global(forward);
    for other in [backward, shuffled, tree] {
        assert_same_statistics(&reference, &StatisticsResult::from_global(other));
    }
}

#[test]
fn test_compensated_sum_beats_naive_sum() {
    // One huge value followed by many small ones; every small term is below
    // half an ulp of the running naive sum and gets rounded away.
    let huge = 1.0e16f64;
    let n = 100_000u64;
    let mut values = vec![huge];
    values.extend(std::iter::repeat(1.0).take(n as usize));

    let exact = huge + n as f64;
    let naive: f64 = values.iter().fold(0.0, |acc, &v| acc + v);
    assert_eq!(naive, huge);

    let driver = ReductionDriver::new();
    for partitions in [1, 4, 16] {
        let chunk = values.len().div_ceil(partitions);
        let regions: Vec<&[f64]> = values.chunks(chunk).collect();
        let global = driver.reduce_regions(&regions);
        assert_eq!(global.sum(), exact, "partitions = {}", partitions);
        assert_eq!(global.count(), n + 1);
    }
}

#[test]
fn test_cancellation_across_partitions() {
    // Each partition alone rounds its unit term into the huge one; the merge
    // must carry both compensation terms to recover the result.
    let regions: [&[f64]; 2] = [&[1.0, 1e100], &[1.0, -1e100]];
    let global = ReductionDriver::new().reduce_regions(&regions);
    assert_eq!(global.sum(), 2.0);

    let naive = regions.iter().flat_map(|r| r.iter()).fold(0.0, |acc, &v| acc + v);
    assert_eq!(naive, 0.0);
}

#[test]
fn test_compensated_error_stays_small() {
    // 0.1 is not representable, so each naive addition rounds
    let n = 1_000_000usize;
    let naive: f64 = std::iter::repeat(0.1f64).take(n).fold(0.0, |acc, v| acc + v);
    let compensated = CompensatedAccumulator::sum_iter(std::iter::repeat(0.1f64).take(n));
    let reference = 100_000.0;

    let naive_error = (naive - reference).abs();
    let compensated_error = (compensated - reference).abs();
    assert!(compensated_error < naive_error);
    assert!(compensated_error <= 1e-10);
}

#[test]
fn test_idempotence() {
    let image = test_image();
    let driver = ReductionDriver::with_config(&ParallelConfig::with_threads(4))
        .expect("Failed to build pool");

    let first = driver.reduce_array(image.view(), 12, &SplitOuterAxis);
    let second = driver.reduce_array(image.view(), 12, &SplitOuterAxis);
    assert_eq!(first.sum().to_bits(), second.sum().to_bits());
    assert_eq!(
        first.sum_of_squares().to_bits(),
        second.sum_of_squares().to_bits()
    );
    assert_eq!(first, second);
}

#[test]
fn test_thread_count_independence() {
    let image = test_image();
    let single = ReductionDriver::with_config(&ParallelConfig::with_threads(1))
        .expect("Failed to build pool");
    let many = ReductionDriver::with_config(&ParallelConfig::with_threads(8))
        .expect("Failed to build pool");
    assert_eq!(single.num_threads(), 1);
    assert_eq!(many.num_threads(), 8);

    // Same partitioning, different worker counts: bit-identical totals
    let a = single.reduce_array(image.view(), 16, &SplitFlat);
    let b = many.reduce_array(image.view(), 16, &SplitFlat);
    assert_eq!(a, b);
}

#[test]
fn test_integer_image() {
    let data: Vec<u16> = (0..4096u32).map(|i| (i * 31 % 65_536) as u16).collect();
    let image = ArrayD::from_shape_vec(IxDyn(&[64, 64]), data.clone()).expect("shape");

    let stats = ReductionDriver::new().compute(image.view(), 5, &SplitOuterAxis);
    let n = data.len() as f64;
    let sum: f64 = data.iter().map(|&v| v as f64).sum();
    let sum_of_squares: f64 = data.iter().map(|&v| (v as f64) * (v as f64)).sum();
    let mean = sum / n;

    assert_eq!(stats.count(), 4096);
    assert_eq!(stats.min(), data.iter().copied().min());
    assert_eq!(stats.max(), data.iter().copied().max());
    // Integer sums well below 2^53 are exact either way
    assert_eq!(stats.sum(), sum);
    assert_eq!(stats.sum_of_squares(), sum_of_squares);
    assert!(relative_eq(
        stats.variance(),
        (sum_of_squares - n * mean * mean) / (n - 1.0),
        1e-12
    ));
}

#[test]
fn test_non_contiguous_view() {
    let image = test_image();
    let transposed = image.t();
    let driver = ReductionDriver::new();

    let a = driver.compute(image.view(), 4, &SplitOuterAxis);
    let b = driver.compute(transposed, 4, &SplitFlat);
    assert_same_statistics(&a, &b);
}

#[test]
fn test_empty_image_partitions() {
    let image = ArrayD::<i32>::zeros(IxDyn(&[0, 16]));
    let driver = ReductionDriver::new();
    let stats = driver.compute(image.view(), 8, &SplitOuterAxis);
    assert_eq!(stats.count(), 0);
    assert_eq!(stats.min(), None);
    assert_eq!(stats.mean(), 0.0);

    // Regions that exist but hold nothing
    let empty: [&[i32]; 3] = [&[], &[], &[]];
    let global = driver.reduce_regions(&empty);
    assert_eq!(global.count(), 0);
    assert_eq!(global.max(), None);
}
