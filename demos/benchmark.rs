//! Simple benchmark example showing the cost and benefit of the parallel
//! compensated reduction.
//!
//! It compares a naive sequential sum against the reduction driver for growing
//! images, and shows how far the naive sum drifts from the compensated one.

use imgstat::{ParallelConfig, ReductionDriver, SplitOuterAxis};
use ndarray::{ArrayD, IxDyn};
use std::time::Instant;

fn make_image(width: usize, height: usize) -> ArrayD<f32> {
    let data: Vec<f32> = (0..width * height)
        .map(|i| (i as f32).sin() * 100.0 + 1.0e4)
        .collect();
    ArrayD::from_shape_vec(IxDyn(&[height, width]), data).expect("image shape")
}

fn naive_mean(image: &ArrayD<f32>) -> (f64, f64) {
    let start = Instant::now();
    let sum: f32 = image.iter().sum();
    let mean = sum as f64 / image.len() as f64;
    (mean, start.elapsed().as_secs_f64())
}

fn main() {
    println!("imgstat Parallel Reduction Benchmark");
    println!("==========================================\n");

    let threads = ParallelConfig::all_cores();
    let parallel = ReductionDriver::with_config(&threads).expect("thread pool");
    let sequential =
        ReductionDriver::with_config(&ParallelConfig::with_threads(1)).expect("thread pool");
    println!(
        "System has {} logical CPU cores available\n",
        parallel.num_threads()
    );

    for side in [1_000, 2_000, 4_000] {
        let image = make_image(side, side);
        println!("Testing with {}x{} samples:", side, side);
        println!("-------------------------------------------");

        let (naive, naive_time) = naive_mean(&image);
        println!("Naive f32 sum:");
        println!("   Mean: {:.6}", naive);
        println!("   Duration: {:.3} seconds\n", naive_time);

        let start = Instant::now();
        let seq = sequential.compute(image.view(), 1, &SplitOuterAxis);
        let seq_time = start.elapsed().as_secs_f64();
        println!("Compensated, 1 partition:");
        println!("   Mean: {:.6}  Sigma: {:.6}", seq.mean(), seq.sigma());
        println!("   Duration: {:.3} seconds\n", seq_time);

        let partitions = parallel.num_threads() * 2;
        let start = Instant::now();
        let par = parallel.compute(image.view(), partitions, &SplitOuterAxis);
        let par_time = start.elapsed().as_secs_f64();
        println!(
            "Compensated, {} partitions on {} threads:",
            partitions,
            parallel.num_threads()
        );
        println!("   Mean: {:.6}  Sigma: {:.6}", par.mean(), par.sigma());
        println!("   Duration: {:.3} seconds", par_time);
        println!("   Speedup: {:.2}x", seq_time / par_time);
        println!(
            "   Naive drift: {:.3e}",
            (naive - par.mean()).abs()
        );
        println!("=========================================\n");
    }
}
