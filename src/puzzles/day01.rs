use std::collections::HashSet;

use serde::Serialize;

use super::{Puzzle, SolveOptions};
use crate::error::{ParseError, PuzzleError};

pub const TARGET: i64 = 2020;

pub struct Day01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub two_sum: i64,
    /// Absent when no three entries add up to the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_sum: Option<i64>,
}

/// Two entries at distinct positions adding up to `target`.
pub fn find_pair(entries: &[i64], target: i64) -> Option<(i64, i64)> {
    pair_summing(entries, i128::from(target))
}

/// Three entries at distinct positions adding up to `target`.
pub fn find_triple(entries: &[i64], target: i64) -> Option<(i64, i64, i64)> {
    entries.iter().enumerate().find_map(|(i, &first)| {
        let rest = i128::from(target) - i128::from(first);
        pair_summing(&entries[i + 1..], rest).map(|(a, b)| (first, a, b))
    })
}

// Complements are taken in i128 so no entry can overflow the search.
fn pair_summing(entries: &[i64], target: i128) -> Option<(i64, i64)> {
    let mut seen = HashSet::with_capacity(entries.len());
    for &entry in entries {
        if let Ok(other) = i64::try_from(target - i128::from(entry)) {
            if seen.contains(&other) {
                return Some((other, entry));
            }
        }
        seen.insert(entry);
    }
    None
}

fn parse(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let raw = line.trim();
            raw.parse::<i64>().map_err(|source| {
                ParseError::InvalidInteger {
                    raw: raw.to_string(),
                    source,
                }
                .at_line(index + 1)
            })
        })
        .collect()
}

fn product(factors: &[i64]) -> Result<i64, PuzzleError> {
    factors
        .iter()
        .try_fold(1i64, |acc, &factor| acc.checked_mul(factor))
        .ok_or_else(|| PuzzleError::NoAnswer(format!("product of {factors:?} overflows")))
}

impl Puzzle for Day01 {
    const DAY: u8 = 1;
    type Answer = Answer;

    fn solve(input: &str, _options: &SolveOptions) -> Result<Answer, PuzzleError> {
        let entries = parse(input)?;

        let (a, b) = find_pair(&entries, TARGET)
            .ok_or_else(|| PuzzleError::NoAnswer(format!("no two entries sum to {TARGET}")))?;
        let two_sum = product(&[a, b])?;

        let three_sum = match find_triple(&entries, TARGET) {
            Some((x, y, z)) => Some(product(&[x, y, z])?),
            None => None,
        };

        Ok(Answer { two_sum, three_sum })
    }
}
