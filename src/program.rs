use std::str::FromStr;

use crate::cpu::Instruction;
use crate::error::ParseError;
use crate::memory::Patched;

/// An immutable instruction listing, addressed `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// A view of this program with the opcode at `address` flipped
    /// (`jmp` <-> `nop`). `None` for `acc` or an address past the end.
    pub fn toggled_at(&self, address: usize) -> Option<Patched<'_>> {
        let instruction = self.instructions.get(address)?.toggled()?;
        Patched::new(self, address, instruction)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for Program {
    type Err = ParseError;

    /// One instruction per non-blank line, in file order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| line.parse::<Instruction>().map_err(|e| e.at_line(index + 1)))
            .collect()
    }
}
