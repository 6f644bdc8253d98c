//! Defines command-line interface options using `clap` for the imgstat application.

use clap::{Parser, ValueEnum};
use imgstat::PartitionKind;
use std::path::PathBuf;

/// Compute min/max/mean/variance/sigma of every sample in an array
#[derive(Parser, Debug)]
#[command(
    version,
    name = "imgstat",
    about = "Parallel whole-array statistics with compensated summation"
)]
pub struct Args {
    /// Path to a text file with whitespace or comma separated samples. Reads stdin if not set.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Sample type the values are parsed as
    #[arg(short, long, value_enum, default_value_t = DType::F64)]
    pub dtype: DType,

    /// Array shape, formatted as <d0>,<d1>,... Defaults to a flat array.
    #[arg(short, long)]
    pub shape: Option<String>,

    /// Number of partitions. Defaults to the number of worker threads.
    #[arg(short, long)]
    pub partitions: Option<usize>,

    /// How the array is split into partitions: outer-axis or flat
    #[arg(long, default_value_t = PartitionKind::OuterAxis)]
    pub strategy: PartitionKind,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Print information about the parallel environment and exit
    #[arg(long)]
    pub info: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Sample types accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}
