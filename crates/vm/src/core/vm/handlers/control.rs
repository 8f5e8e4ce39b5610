//! Control-flow handlers.
//!
//! Jump validity is checked before any gas is charged: an invalid target
//! halts the frame with nothing deducted.

use crate::core::{
    context::ExecutionContext,
    errors::Fault,
    layout::FrameState,
    opcodes::{self, base_gas},
    word,
};

use super::{HandlerResult, OpStep};

/// STOP - Halts execution, completing the frame successfully
pub fn stop(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    ctx.frame.state = FrameState::CompletedSuccess as u32;
    Ok(OpStep::in_place(base_gas(opcodes::STOP)))
}

/// JUMP - Unconditionally alter the program counter
pub fn jump(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let dest_word = ctx.stack_pop()?;
    let dest = word::saturating_usize(&dest_word);
    if dest >= ctx.code.len() || ctx.code[dest] != opcodes::JUMPDEST {
        return Err(Fault::InvalidJumpDestination(word::read_u64_low(&dest_word)));
    }
    ctx.frame.pc = dest as i32;
    Ok(OpStep::in_place(base_gas(opcodes::JUMP)))
}

/// JUMPI - Conditionally alter the program counter
pub fn jumpi(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let dest_word = ctx.stack_pop()?;
    let condition = ctx.stack_pop()?;

    if word::is_zero(&condition) {
        return Ok(OpStep::advance(1, base_gas(opcodes::JUMPI)));
    }

    let dest = word::saturating_usize(&dest_word);
    if dest >= ctx.code.len() || ctx.code[dest] != opcodes::JUMPDEST {
        return Err(Fault::InvalidJumpDestination(word::read_u64_low(&dest_word)));
    }
    ctx.frame.pc = dest as i32;
    Ok(OpStep::in_place(base_gas(opcodes::JUMPI)))
}

/// JUMPDEST - Mark a valid destination for jumps
pub fn jumpdest(_ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    Ok(OpStep::advance(1, base_gas(opcodes::JUMPDEST)))
}

/// PC - Push the current program counter
pub fn pc(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let word = word::u64_word(ctx.frame.pc as u64);
    ctx.stack_push(&word)?;
    Ok(OpStep::advance(1, base_gas(opcodes::PC)))
}

/// GAS - Push the gas remaining before this operation's own charge
pub fn gas(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let word = word::u64_word(ctx.frame.gas_remaining as u64);
    ctx.stack_push(&word)?;
    Ok(OpStep::advance(1, base_gas(opcodes::GAS)))
}
