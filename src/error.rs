use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Errors raised while turning puzzle input text into typed records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown opcode `{0}`")]
    UnknownOpCode(String),
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid integer `{raw}`: {source}")]
    InvalidInteger {
        raw: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
    #[error("malformed line `{0}`")]
    Malformed(String),
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Attaches a 1-based line number.
    pub fn at_line(self, line: usize) -> Self {
        ParseError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("no single jmp/nop swap makes the program terminate ({candidates} candidates tried)")]
    NoSolutionFound { candidates: usize },
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Repair(#[from] RepairError),
    #[error("no routine registered for day {0}")]
    Unregistered(u8),
    #[error("no answer: {0}")]
    NoAnswer(String),
    #[error("failed to render answer: {0}")]
    Render(#[from] serde_json::Error),
}
