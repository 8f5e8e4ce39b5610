//! EVM opcode handlers organized by category.
//!
//! Each handler reads and writes the frame planes in place and returns the
//! program counter increment and gas cost for the dispatch loop to apply, or
//! a [`Fault`] that halts the frame.

use crate::core::errors::Fault;

/// Arithmetic operations: ADD, MUL, SUB, DIV, MOD
pub mod arithmetic;

/// Bitwise operations: AND, OR, XOR, NOT
pub mod bitwise;

/// Comparison operations: LT, GT, EQ, ISZERO
pub mod comparison;

/// Control flow: STOP, JUMP, JUMPI, JUMPDEST, PC, GAS
pub mod control;

/// Memory operations: MLOAD, MSTORE, MSTORE8, MSIZE
pub mod memory;

/// Stack operations: POP, PUSH0-PUSH32, DUP1-DUP16, SWAP1-SWAP16
pub mod stack;

/// Storage operations: SLOAD, SSTORE
pub mod storage;

/// What a handler hands back to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpStep {
    /// How far to advance the program counter; 0 when the handler has already
    /// positioned it (jumps) or halted the frame.
    pub pc_increment: u32,
    /// Gas to charge for the operation.
    pub gas_cost: i64,
}

impl OpStep {
    /// Advance `pc_increment` bytes at `gas_cost`.
    pub const fn advance(pc_increment: u32, gas_cost: i64) -> Self {
        OpStep { pc_increment, gas_cost }
    }

    /// The handler positioned the program counter itself.
    pub const fn in_place(gas_cost: i64) -> Self {
        OpStep { pc_increment: 0, gas_cost }
    }
}

/// Handler outcome: a step for the loop to apply, or a halting fault.
pub type HandlerResult = Result<OpStep, Fault>;
