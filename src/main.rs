//! Entry point for the imgstat application.
//! Handles CLI parsing, sample loading, and prints the statistics of the loaded array.

use clap::Parser;
use flexi_logger::Logger;
use imgstat::input::{parse_shape, read_samples, to_array};
use imgstat::{get_parallel_info, ParallelConfig, ReductionDriver, Sample};
use log::info;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader};
use std::str::FromStr;
use std::time::Instant;

mod cli;

use cli::{Args, DType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let _logger = Logger::try_with_env_or_str(level)?.start()?;

    if args.info {
        get_parallel_info().print_info();
        return Ok(());
    }

    let config = ParallelConfig::new(args.threads);
    let driver = ReductionDriver::with_config(&config)?;
    let partitions = args.partitions.unwrap_or_else(|| driver.num_threads());
    info!(
        "Using {} partitions ({}) on {} threads",
        partitions,
        args.strategy,
        driver.num_threads()
    );

    match args.dtype {
        DType::U8 => run::<u8>(&args, &driver, partitions)?,
        DType::U16 => run::<u16>(&args, &driver, partitions)?,
        DType::U32 => run::<u32>(&args, &driver, partitions)?,
        DType::U64 => run::<u64>(&args, &driver, partitions)?,
        DType::I8 => run::<i8>(&args, &driver, partitions)?,
        DType::I16 => run::<i16>(&args, &driver, partitions)?,
        DType::I32 => run::<i32>(&args, &driver, partitions)?,
        DType::I64 => run::<i64>(&args, &driver, partitions)?,
        DType::F32 => run::<f32>(&args, &driver, partitions)?,
        DType::F64 => run::<f64>(&args, &driver, partitions)?,
    }

    Ok(())
}

fn run<T>(args: &Args, driver: &ReductionDriver, partitions: usize) -> imgstat::Result<()>
where
    T: Sample + FromStr,
{
    let samples: Vec<T> = match &args.file {
        Some(path) => read_samples(BufReader::new(File::open(path)?))?,
        None => read_samples(io::stdin().lock())?,
    };
    let shape = args.shape.as_deref().map(parse_shape).transpose()?;
    let array = to_array(samples, shape.as_deref())?;
    info!("Loaded array with shape {:?}", array.shape());

    let start = Instant::now();
    let stats = driver.compute(array.view(), partitions, &args.strategy);
    let elapsed = start.elapsed();

    if args.json {
        let report = json!({
            "source": args.file.as_ref().map(|p| p.display().to_string()),
            "dtype": format!("{:?}", args.dtype).to_lowercase(),
            "shape": array.shape(),
            "partitions": partitions,
            "strategy": args.strategy.as_str(),
            "statistics": stats.to_json(),
            "generated": chrono::Local::now().to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n Statistics");
        println!("================================");
        println!("{}", stats);
        if args.verbose {
            println!("\n Computed in {:.3} ms", elapsed.as_secs_f64() * 1e3);
        }
    }

    Ok(())
}
