pub mod day01;
pub mod day02;
pub mod day08;

use serde::Serialize;

use crate::error::PuzzleError;

/// A daily puzzle: input text in, two answers out.
pub trait Puzzle {
    const DAY: u8;
    type Answer: Serialize;

    fn solve(input: &str, options: &SolveOptions) -> Result<Self::Answer, PuzzleError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Evaluate repair candidates on the rayon pool.
    pub parallel_repair: bool,
}

/// Days with a registered routine, ascending.
pub const REGISTERED: &[u8] = &[day01::Day01::DAY, day02::Day02::DAY, day08::Day08::DAY];

fn render<P: Puzzle>(input: &str, options: &SolveOptions) -> Result<serde_json::Value, PuzzleError> {
    let answer = P::solve(input, options)?;
    Ok(serde_json::to_value(answer)?)
}

/// Runs the routine registered for `day`.
pub fn solve(day: u8, input: &str, options: &SolveOptions) -> Result<serde_json::Value, PuzzleError> {
    match day {
        d if d == day01::Day01::DAY => render::<day01::Day01>(input, options),
        d if d == day02::Day02::DAY => render::<day02::Day02>(input, options),
        d if d == day08::Day08::DAY => render::<day08::Day08>(input, options),
        _ => Err(PuzzleError::Unregistered(day)),
    }
}
