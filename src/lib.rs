pub mod cpu;
pub mod error;
pub mod harness;
pub mod memory;
pub mod program;
pub mod puzzles;
pub mod repair;

use cpu::{Cpu, OpCode};
use log::{debug, trace};
use memory::Addressable;

pub use error::{ParseError, PuzzleError, RepairError};
pub use program::Program;
pub use repair::{find_repair, find_repair_parallel, repair, repair_parallel, Repair};

/// How many upcoming instructions `debug_state` prints.
const PEEK_WINDOW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The pointer landed exactly one past the last instruction.
    Terminated,
    /// The pointer reached an instruction that had already been executed.
    Looped,
    /// The pointer left the program anywhere other than one past the end.
    OutOfBounds { pointer: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub accumulator: i64,
    pub outcome: Outcome,
    pub steps: usize,
}

impl ExecutionResult {
    pub fn terminated(&self) -> bool {
        self.outcome == Outcome::Terminated
    }
}

pub struct EmulationEngine<M> {
    pub(crate) cpu: Cpu,
    memory: M,
}

impl<M: Addressable> EmulationEngine<M> {
    pub fn new(memory: M) -> Self {
        Self {
            cpu: Cpu::new(memory.len()),
            memory,
        }
    }

    fn debug_state(&self) {
        let start = usize::try_from(self.cpu.pc).unwrap_or(self.memory.len());
        let next = (start..self.memory.len())
            .take(PEEK_WINDOW)
            .fold(String::new(), |acc, address| {
                acc + &format!("{} | ", self.memory.read(address))
            });
        debug!(
            "State: PC: {:6}, ACC: {:6}, STEPS: {:6} | {}",
            self.cpu.pc, self.cpu.acc, self.cpu.steps, next
        );
    }

    /// Address of the next instruction, or the outcome if the pointer has
    /// left the program.
    fn fetch_address(&self) -> Result<usize, Outcome> {
        let len = self.memory.len();
        match usize::try_from(self.cpu.pc) {
            Ok(address) if address < len => Ok(address),
            Ok(address) if address == len => Err(Outcome::Terminated),
            _ => Err(Outcome::OutOfBounds { pointer: self.cpu.pc }),
        }
    }

    fn step(&mut self, address: usize) {
        let instr = self.memory.read(address);
        trace!("{:6}: {}", address, instr);

        match instr.opcode {
            OpCode::Acc => {
                self.cpu.acc = self.cpu.acc.wrapping_add(instr.operand);
                self.cpu.pc += 1;
            }
            OpCode::Jmp => {
                self.cpu.pc = self.cpu.pc.saturating_add(instr.operand);
            }
            OpCode::Nop => {
                self.cpu.pc += 1;
            }
        }
        self.cpu.steps += 1;
    }

    /// Runs until the program terminates, leaves its bounds, or is about to
    /// execute an instruction for the second time.
    pub fn main_loop(&mut self) -> ExecutionResult {
        let outcome = loop {
            let address = match self.fetch_address() {
                Ok(address) => address,
                Err(outcome) => break outcome,
            };

            if !self.cpu.visit(address) {
                break Outcome::Looped;
            }

            self.step(address);
        };

        self.debug_state();
        debug!("{:?}: {}", outcome, self.cpu);

        ExecutionResult {
            accumulator: self.cpu.acc,
            outcome,
            steps: self.cpu.steps,
        }
    }
}

/// Executes `program` from a fresh machine state.
pub fn execute<M: Addressable>(program: M) -> ExecutionResult {
    EmulationEngine::new(program).main_loop()
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::cpu::Instruction;
    use crate::program::Program;

    const SAMPLE: &str = "nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn program(listing: &str) -> Program {
        listing.parse().unwrap()
    }

    #[test]
    pub fn scenario_sample_loops() {
        init();
        let prog = program(SAMPLE);
        let result = execute(&prog);
        assert_eq!(result.outcome, Outcome::Looped);
        assert_eq!(result.accumulator, 5);
        assert!(result.steps <= prog.len());
    }

    #[test]
    pub fn scenario_sample_repaired() {
        init();
        let prog = program(SAMPLE);
        let patched = prog.toggled_at(7).unwrap();
        let result = execute(patched);
        assert_eq!(
            result,
            ExecutionResult {
                accumulator: 8,
                outcome: Outcome::Terminated,
                steps: 6,
            }
        );
        // The canonical listing still loops.
        assert_eq!(execute(&prog).outcome, Outcome::Looped);
    }

    #[test]
    pub fn scenario_single_acc_terminates() {
        init();
        let result = execute(&program("acc +5"));
        assert_eq!(result.outcome, Outcome::Terminated);
        assert_eq!(result.accumulator, 5);
        assert_eq!(result.steps, 1);
    }

    #[test]
    pub fn scenario_forward_jumps_land_on_end() {
        init();
        let result = execute(&program("jmp +1\njmp +1"));
        assert_eq!(result.outcome, Outcome::Terminated);
        assert_eq!(result.accumulator, 0);
        assert_eq!(result.steps, 2);
    }

    #[test]
    pub fn scenario_self_jump_loops_immediately() {
        init();
        let result = execute(&program("acc +2\njmp +0"));
        assert_eq!(result.outcome, Outcome::Looped);
        assert_eq!(result.accumulator, 2);
        assert_eq!(result.steps, 2);
    }

    #[test]
    pub fn scenario_jump_past_end_is_out_of_bounds() {
        init();
        let result = execute(&program("acc +1\njmp +5\nacc +1"));
        assert_eq!(result.outcome, Outcome::OutOfBounds { pointer: 6 });
        assert_eq!(result.accumulator, 1);
    }

    #[test]
    pub fn scenario_jump_before_start_is_out_of_bounds() {
        init();
        let result = execute(&program("acc +7\njmp -2"));
        assert_eq!(result.outcome, Outcome::OutOfBounds { pointer: -1 });
        assert_eq!(result.accumulator, 7);
    }

    #[test]
    pub fn scenario_empty_program_terminates() {
        init();
        let result = execute(&Program::default());
        assert_eq!(result.outcome, Outcome::Terminated);
        assert_eq!(result.steps, 0);
    }

    #[test]
    pub fn loop_detected_within_program_length() {
        init();
        // 99 increments, then a jump back to the start.
        let mut instructions: Vec<Instruction> = (0..99)
            .map(|_| Instruction::new(OpCode::Acc, 1))
            .collect();
        instructions.push(Instruction::new(OpCode::Jmp, -99));
        let prog = Program::new(instructions);

        let result = execute(&prog);
        assert_eq!(result.outcome, Outcome::Looped);
        assert_eq!(result.accumulator, 99);
        assert_eq!(result.steps, prog.len());
    }

    #[test]
    pub fn execution_is_deterministic() {
        init();
        let first = execute(&program(SAMPLE));
        let second = execute(&program(SAMPLE));
        assert_eq!(first, second);
    }
}
