use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use env_logger::Env;

use handheld_vm::harness::{self, HarnessConfig, NUM_DAYS};
use handheld_vm::puzzles::SolveOptions;

#[derive(Debug, Parser)]
#[command(author, version, about = "Runs the daily puzzle routines over their input files")]
struct Args {
    /// Directory holding `day<N>.txt` inputs.
    #[arg(long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Run only this day. Can be provided multiple times.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=NUM_DAYS as i64))]
    day: Vec<u8>,

    /// Evaluate boot code repair candidates in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl From<Args> for HarnessConfig {
    fn from(args: Args) -> Self {
        HarnessConfig {
            data_dir: args.data_dir,
            days: args.day,
            options: SolveOptions {
                parallel_repair: args.parallel,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = HarnessConfig::from(Args::parse());
    let report = harness::run(&config);

    if !report.is_success() {
        let days: Vec<String> = report.failed.iter().map(|(day, _)| day.to_string()).collect();
        bail!("{} day(s) failed: {}", report.failed.len(), days.join(", "));
    }
    Ok(())
}
