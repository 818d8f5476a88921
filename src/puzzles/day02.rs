use std::str::FromStr;

use serde::Serialize;

use super::{Puzzle, SolveOptions};
use crate::error::{ParseError, PuzzleError};

pub struct Day02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub part_a: usize,
    pub part_b: usize,
}

/// `<lo>-<hi> <letter>: <password>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub lo: usize,
    pub hi: usize,
    pub letter: char,
    pub password: String,
}

impl Entry {
    /// Letter count lies within `lo..=hi`.
    pub fn valid_by_count(&self) -> bool {
        let count = self.password.chars().filter(|&c| c == self.letter).count();
        (self.lo..=self.hi).contains(&count)
    }

    /// Exactly one of the 1-based positions `lo` and `hi` holds the letter.
    pub fn valid_by_position(&self) -> bool {
        let at = |position: usize| {
            position
                .checked_sub(1)
                .and_then(|index| self.password.chars().nth(index))
                == Some(self.letter)
        };
        at(self.lo) != at(self.hi)
    }
}

impl FromStr for Entry {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Malformed(s.to_string());

        let (policy, password) = s.split_once(':').ok_or_else(malformed)?;
        let (range, letter) = policy.trim().split_once(' ').ok_or_else(malformed)?;
        let (lo, hi) = range.split_once('-').ok_or_else(malformed)?;

        let bound = |raw: &str| {
            raw.parse::<usize>()
                .map_err(|source| ParseError::InvalidInteger {
                    raw: raw.to_string(),
                    source,
                })
        };

        let mut letters = letter.trim().chars();
        let letter = match (letters.next(), letters.next()) {
            (Some(c), None) => c,
            _ => return Err(malformed()),
        };

        Ok(Entry {
            lo: bound(lo)?,
            hi: bound(hi)?,
            letter,
            password: password.trim().to_string(),
        })
    }
}

impl Puzzle for Day02 {
    const DAY: u8 = 2;
    type Answer = Answer;

    fn solve(input: &str, _options: &SolveOptions) -> Result<Answer, PuzzleError> {
        let entries = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| line.parse::<Entry>().map_err(|e| e.at_line(index + 1)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Answer {
            part_a: entries.iter().filter(|e| e.valid_by_count()).count(),
            part_b: entries.iter().filter(|e| e.valid_by_position()).count(),
        })
    }
}
