//! Bitwise handlers, byte-wise over the raw 32-byte words.

use crate::core::{
    context::ExecutionContext,
    opcodes::{self, base_gas},
};

use super::{HandlerResult, OpStep};

/// AND - Bitwise AND operation
pub fn and(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = ctx.stack_peek(0)?;
    let mut b = ctx.stack_peek(1)?;
    for (b, a) in b.iter_mut().zip(a.iter()) {
        *b &= a;
    }
    ctx.stack_write(1, &b)?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::AND)))
}

/// OR - Bitwise OR operation
pub fn or(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = ctx.stack_peek(0)?;
    let mut b = ctx.stack_peek(1)?;
    for (b, a) in b.iter_mut().zip(a.iter()) {
        *b |= a;
    }
    ctx.stack_write(1, &b)?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::OR)))
}

/// XOR - Bitwise XOR operation
pub fn xor(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = ctx.stack_peek(0)?;
    let mut b = ctx.stack_peek(1)?;
    for (b, a) in b.iter_mut().zip(a.iter()) {
        *b ^= a;
    }
    ctx.stack_write(1, &b)?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::XOR)))
}

/// NOT - Bitwise NOT operation
pub fn not(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let mut a = ctx.stack_peek(0)?;
    for byte in a.iter_mut() {
        *byte = !*byte;
    }
    ctx.stack_write(0, &a)?;
    Ok(OpStep::advance(1, base_gas(opcodes::NOT)))
}
