use log::warn;
use serde::Serialize;

use super::{Puzzle, SolveOptions};
use crate::error::PuzzleError;
use crate::program::Program;
use crate::{execute, repair, repair_parallel};

pub struct Day08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Accumulator when the unmodified program is stopped.
    pub part_a: i64,
    /// Accumulator of the repaired program.
    pub part_b: i64,
}

impl Puzzle for Day08 {
    const DAY: u8 = 8;
    type Answer = Answer;

    fn solve(input: &str, options: &SolveOptions) -> Result<Answer, PuzzleError> {
        let program: Program = input.parse()?;

        let direct = execute(&program);
        if direct.terminated() {
            warn!("boot code terminates without a repair");
        }

        let part_b = if options.parallel_repair {
            repair_parallel(&program)?
        } else {
            repair(&program)?
        };

        Ok(Answer {
            part_a: direct.accumulator,
            part_b,
        })
    }
}
