//! Stack constructors and plumbing: POP, PUSH0-PUSH32, DUP1-DUP16,
//! SWAP1-SWAP16.

use crate::core::{
    context::ExecutionContext,
    layout::WORD_SIZE,
    opcodes::{self, base_gas},
};

use super::{HandlerResult, OpStep};

/// POP - Discard the top of the stack
pub fn pop(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::POP)))
}

/// PUSH0 - Push a zero word
pub fn push0(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    ctx.stack_push(&[0u8; WORD_SIZE])?;
    Ok(OpStep::advance(1, base_gas(opcodes::PUSH0)))
}

/// PUSH1-PUSH32 - Push an immediate read from the code plane.
///
/// The `n` immediate bytes are right-zero-padded when the code ends early,
/// then right-aligned into a fresh word. The program counter advances past
/// the immediate either way.
pub fn push_n(ctx: &mut ExecutionContext<'_>, opcode: u8) -> HandlerResult {
    let n = (opcode - 0x5f) as usize;
    let pc = ctx.frame.pc as usize;

    let mut word = [0u8; WORD_SIZE];
    let available = ctx.code.len().saturating_sub(pc + 1).min(n);
    let at = WORD_SIZE - n;
    word[at..at + available].copy_from_slice(&ctx.code[pc + 1..pc + 1 + available]);

    ctx.stack_push(&word)?;
    Ok(OpStep::advance(1 + n as u32, base_gas(opcode)))
}

/// DUP1-DUP16 - Duplicate the nth entry from the top
pub fn dup_n(ctx: &mut ExecutionContext<'_>, opcode: u8) -> HandlerResult {
    let n = (opcode - 0x7f) as usize;
    ctx.stack_dup(n)?;
    Ok(OpStep::advance(1, base_gas(opcode)))
}

/// SWAP1-SWAP16 - Swap the top with the (n+1)th entry
pub fn swap_n(ctx: &mut ExecutionContext<'_>, opcode: u8) -> HandlerResult {
    let n = (opcode - 0x8f) as usize;
    ctx.stack_swap(n)?;
    Ok(OpStep::advance(1, base_gas(opcode)))
}
