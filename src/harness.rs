use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::error::PuzzleError;
use crate::puzzles::{self, SolveOptions};

pub const NUM_DAYS: u8 = 24;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding `day<N>.txt` inputs.
    pub data_dir: PathBuf,
    /// Days to run. Empty means every registered day.
    pub days: Vec<u8>,
    pub options: SolveOptions,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            data_dir: PathBuf::from("data"),
            days: Vec::new(),
            options: SolveOptions::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub solved: Vec<(u8, serde_json::Value)>,
    pub failed: Vec<(u8, String)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn input_path(data_dir: &Path, day: u8) -> PathBuf {
    data_dir.join(format!("day{day}.txt"))
}

pub fn read_input(data_dir: &Path, day: u8) -> Result<String, PuzzleError> {
    let path = input_path(data_dir, day);
    fs::read_to_string(&path).map_err(|source| PuzzleError::Io { path, source })
}

fn run_day(config: &HarnessConfig, day: u8) -> Result<serde_json::Value, PuzzleError> {
    let input = read_input(&config.data_dir, day)?;
    puzzles::solve(day, &input, &config.options)
}

/// Runs every selected day in order. A failing day is logged and recorded,
/// the remaining days still run.
pub fn run(config: &HarnessConfig) -> Report {
    let mut report = Report::default();

    for day in 1..=NUM_DAYS {
        let selected = config.days.is_empty() || config.days.contains(&day);
        if !selected || !puzzles::REGISTERED.contains(&day) {
            continue;
        }

        info!("Day {} ==========", day);
        match run_day(config, day) {
            Ok(output) => {
                info!("  result: {}", output);
                report.solved.push((day, output));
            }
            Err(e) => {
                error!("  failed: {}", e);
                report.failed.push((day, e.to_string()));
            }
        }
    }

    report
}
