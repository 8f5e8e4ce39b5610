//! Memory handlers. Every access grows the plane to cover itself first,
//! zero-filling the created bytes.

use crate::core::{
    context::ExecutionContext,
    layout::WORD_SIZE,
    opcodes::{self, base_gas},
    word,
};

use super::{HandlerResult, OpStep};

/// MLOAD - Load a word from memory, replacing the offset on the stack
pub fn mload(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let offset = word::saturating_usize(&ctx.stack_peek(0)?);
    let value = ctx.memory_read_word(offset)?;
    ctx.stack_write(0, &value)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MLOAD)))
}

/// MSTORE - Store a word to memory
pub fn mstore(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let offset = word::saturating_usize(&ctx.stack_peek(0)?);
    let value = ctx.stack_peek(1)?;
    ctx.memory_write_word(offset, &value)?;
    ctx.stack_shrink(2)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MSTORE)))
}

/// MSTORE8 - Store the low byte of a word to memory
pub fn mstore8(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let offset = word::saturating_usize(&ctx.stack_peek(0)?);
    let value = ctx.stack_peek(1)?;
    ctx.memory_write_byte(offset, value[WORD_SIZE - 1])?;
    ctx.stack_shrink(2)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MSTORE8)))
}

/// MSIZE - Push the current memory size in bytes
pub fn msize(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let word = word::u64_word(ctx.frame.memory_size as u64);
    ctx.stack_push(&word)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MSIZE)))
}
