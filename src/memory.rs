use crate::cpu::Instruction;
use crate::program::Program;

/// Read-only instruction storage the engine executes from.
///
/// `read` is only called with `address < len()`.
pub trait Addressable {
    fn read(&self, address: usize) -> Instruction;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Addressable for Program {
    fn read(&self, address: usize) -> Instruction {
        self.instructions()[address]
    }

    fn len(&self) -> usize {
        self.instructions().len()
    }
}

impl<T: Addressable + ?Sized> Addressable for &T {
    fn read(&self, address: usize) -> Instruction {
        (**self).read(address)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// A program with exactly one instruction replaced. The base program is
/// shared, nothing is copied.
#[derive(Debug, Clone, Copy)]
pub struct Patched<'p> {
    base: &'p Program,
    address: usize,
    instruction: Instruction,
}

impl<'p> Patched<'p> {
    /// Returns `None` when `address` is outside the base program.
    pub fn new(base: &'p Program, address: usize, instruction: Instruction) -> Option<Self> {
        (address < base.len()).then_some(Self {
            base,
            address,
            instruction,
        })
    }

    pub fn instruction(&self) -> Instruction {
        self.instruction
    }
}

impl Addressable for Patched<'_> {
    fn read(&self, address: usize) -> Instruction {
        if address == self.address {
            self.instruction
        } else {
            self.base.read(address)
        }
    }

    fn len(&self) -> usize {
        self.base.len()
    }
}
