use std::{fmt::Display, str::FromStr};

use bitvec::{bitvec, vec::BitVec};

use crate::error::ParseError;

/// Machine state for a single run. Created fresh for every execution and
/// thrown away once the run is classified.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cpu {
    pub acc: i64,          // The accumulator register
    pub pc: i64,           // The instruction pointer, may leave the program
    pub steps: usize,      // Instructions executed so far
    visited: BitVec,       // One bit per program index
}

impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cpu [ acc: {}, pc: {}, steps: {} ]", self.acc, self.pc, self.steps)
    }
}

impl Cpu {
    pub fn new(program_len: usize) -> Self {
        Cpu {
            acc: 0,
            pc: 0,
            steps: 0,
            visited: bitvec![0; program_len],
        }
    }

    /// Marks `address` as executed. Returns `false` if it already was.
    ///
    /// `address` must lie inside the program the machine was sized for.
    pub fn visit(&mut self, address: usize) -> bool {
        !self.visited.replace(address, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Acc,    // A += operand, PC += 1
    Jmp,    // PC += operand
    Nop,    // PC += 1
}

impl OpCode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Acc => "acc",
            OpCode::Jmp => "jmp",
            OpCode::Nop => "nop",
        }
    }

    /// The opcode a repair flips this one into, if any. `acc` is never flipped.
    pub fn toggled(self) -> Option<OpCode> {
        match self {
            OpCode::Acc => None,
            OpCode::Jmp => Some(OpCode::Nop),
            OpCode::Nop => Some(OpCode::Jmp),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for OpCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acc" => Ok(Self::Acc),
            "jmp" => Ok(Self::Jmp),
            "nop" => Ok(Self::Nop),
            other => Err(ParseError::UnknownOpCode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: OpCode,
    pub operand: i64,
}

impl Instruction {
    pub fn new(opcode: OpCode, operand: i64) -> Self {
        Self { opcode, operand }
    }

    pub fn toggled(self) -> Option<Instruction> {
        self.opcode
            .toggled()
            .map(|opcode| Instruction::new(opcode, self.operand))
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:+}", self.opcode, self.operand)
    }
}

impl FromStr for Instruction {
    type Err = ParseError;

    /// Parses `<opcode> <signed integer>`, e.g. `jmp -4` or `acc +3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();

        let opcode = fields
            .next()
            .ok_or(ParseError::MissingField("opcode"))?
            .parse::<OpCode>()?;

        let raw = fields.next().ok_or(ParseError::MissingField("operand"))?;
        let operand = raw
            .parse::<i64>()
            .map_err(|source| ParseError::InvalidInteger {
                raw: raw.to_string(),
                source,
            })?;

        if let Some(extra) = fields.next() {
            return Err(ParseError::TrailingInput(extra.to_string()));
        }

        Ok(Instruction::new(opcode, operand))
    }
}
