//! Single-instruction repair of a looping program.
//!
//! Every `jmp`/`nop` is a candidate. Candidates are tried in ascending address
//! order against a patched view of the program, and the first one whose run
//! terminates wins.

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::cpu::Instruction;
use crate::error::RepairError;
use crate::memory::Patched;
use crate::program::Program;
use crate::{execute, ExecutionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    pub address: usize,
    pub original: Instruction,
    pub replacement: Instruction,
    pub result: ExecutionResult,
}

/// Addresses eligible for a swap, in ascending order. `acc` is never touched.
pub fn candidates(program: &Program) -> impl Iterator<Item = usize> + '_ {
    program
        .instructions()
        .iter()
        .enumerate()
        .filter(|(_, instr)| instr.opcode.toggled().is_some())
        .map(|(address, _)| address)
}

fn attempt(program: &Program, address: usize) -> Option<Repair> {
    let patched: Patched<'_> = program.toggled_at(address)?;
    let result = execute(patched);

    if !result.terminated() {
        debug!(
            "swap at {} ({} -> {}) rejected: {:?} after {} steps",
            address,
            program.instructions()[address],
            patched.instruction(),
            result.outcome,
            result.steps
        );
        return None;
    }

    Some(Repair {
        address,
        original: program.instructions()[address],
        replacement: patched.instruction(),
        result,
    })
}

fn accept(found: Option<Repair>, tried: usize) -> Result<Repair, RepairError> {
    match found {
        Some(repair) => {
            info!(
                "repaired: {} -> {} at {}, acc = {}",
                repair.original, repair.replacement, repair.address, repair.result.accumulator
            );
            Ok(repair)
        }
        None => {
            warn!("no terminating swap among {} candidates", tried);
            Err(RepairError::NoSolutionFound { candidates: tried })
        }
    }
}

/// Finds the lowest-address swap that makes `program` terminate.
pub fn find_repair(program: &Program) -> Result<Repair, RepairError> {
    let mut tried = 0;
    let found = candidates(program).find_map(|address| {
        tried += 1;
        attempt(program, address)
    });
    accept(found, tried)
}

/// Accumulator of the repaired program.
pub fn repair(program: &Program) -> Result<i64, RepairError> {
    find_repair(program).map(|repair| repair.result.accumulator)
}

/// Like [`find_repair`], with candidates evaluated on the rayon pool. The
/// lowest-address winner is still the one returned.
pub fn find_repair_parallel(program: &Program) -> Result<Repair, RepairError> {
    let addresses: Vec<usize> = candidates(program).collect();
    let found = addresses
        .par_iter()
        .find_map_first(|&address| attempt(program, address));
    accept(found, addresses.len())
}

pub fn repair_parallel(program: &Program) -> Result<i64, RepairError> {
    find_repair_parallel(program).map(|repair| repair.result.accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::OpCode;
    use crate::memory::Addressable;
    use crate::Outcome;

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

    #[test]
    fn repairs_sample_at_index_seven() {
        init();
        let program: Program = SAMPLE.parse().unwrap();
        let found = find_repair(&program).unwrap();

        assert_eq!(found.address, 7);
        assert_eq!(found.original, Instruction::new(OpCode::Jmp, -4));
        assert_eq!(found.replacement, Instruction::new(OpCode::Nop, -4));
        assert_eq!(found.result.outcome, Outcome::Terminated);
        assert_eq!(repair(&program), Ok(8));
    }

    #[test]
    fn single_acc_has_no_candidates() {
        init();
        let program: Program = "acc +5".parse().unwrap();
        assert_eq!(candidates(&program).count(), 0);
        assert_eq!(
            repair(&program),
            Err(RepairError::NoSolutionFound { candidates: 0 })
        );
    }

    #[test]
    fn first_candidate_wins_for_forward_jumps() {
        init();
        let program: Program = "jmp +1\njmp +1".parse().unwrap();
        let found = find_repair(&program).unwrap();
        assert_eq!(found.address, 0);
        assert_eq!(found.result.accumulator, 0);
    }

    #[test]
    fn lowest_address_wins_when_several_swaps_work() {
        init();
        // Swapping index 0 lands on the final acc (+10); swapping index 2 runs
        // straight through (+11). Both terminate.
        let program: Program = "nop +3\nacc +1\njmp +0\nacc +10".parse().unwrap();
        assert!(program.toggled_at(2).map(execute).unwrap().terminated());

        let found = find_repair(&program).unwrap();
        assert_eq!(found.address, 0);
        assert_eq!(found.result.accumulator, 10);
        assert_eq!(find_repair_parallel(&program), Ok(found));
    }

    #[test]
    fn acc_is_skipped_and_later_swap_found() {
        init();
        let program: Program = "nop +0\njmp +0\nacc +4".parse().unwrap();
        let found = find_repair(&program).unwrap();
        assert_eq!(found.address, 1);
        assert_eq!(found.result.accumulator, 4);
    }

    #[test]
    fn out_of_bounds_swap_is_rejected() {
        init();
        // Index 0 as `jmp +5` escapes the program instead of terminating.
        let program: Program = "nop +5\njmp +0".parse().unwrap();
        let escaped = execute(program.toggled_at(0).unwrap());
        assert_eq!(escaped.outcome, Outcome::OutOfBounds { pointer: 5 });

        let found = find_repair(&program).unwrap();
        assert_eq!(found.address, 1);
        assert_eq!(found.result.steps, 2);
    }

    #[test]
    fn exhausted_candidates_fail() {
        init();
        let program: Program = "jmp +0\njmp +0".parse().unwrap();
        assert_eq!(
            find_repair(&program),
            Err(RepairError::NoSolutionFound { candidates: 2 })
        );
        assert_eq!(
            repair_parallel(&program),
            Err(RepairError::NoSolutionFound { candidates: 2 })
        );
    }

    #[test]
    fn never_patches_acc_and_only_one_address() {
        let program: Program = SAMPLE.parse().unwrap();
        for address in candidates(&program) {
            assert_ne!(program.instructions()[address].opcode, OpCode::Acc);

            let patched = program.toggled_at(address).unwrap();
            let differing = (0..program.len())
                .filter(|&a| patched.read(a) != program.read(a))
                .count();
            assert_eq!(differing, 1);
        }
        assert_eq!(candidates(&program).collect::<Vec<_>>(), vec![0, 2, 4, 7]);
    }

    #[test]
    fn parallel_search_agrees_with_sequential() {
        init();
        let program: Program = SAMPLE.parse().unwrap();
        assert_eq!(find_repair_parallel(&program), find_repair(&program));
        assert_eq!(repair_parallel(&program), Ok(8));

        let program: Program = "acc +5".parse().unwrap();
        assert_eq!(
            repair_parallel(&program),
            Err(RepairError::NoSolutionFound { candidates: 0 })
        );
    }
}
