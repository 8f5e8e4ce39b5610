//! Comparison handlers. Results are a full word holding 1 or 0.

use crate::core::{
    context::ExecutionContext,
    opcodes::{self, base_gas},
    word,
};

use super::{HandlerResult, OpStep};

/// LT - Unsigned less-than comparison
pub fn lt(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let b = word::to_u256(&ctx.stack_peek(1)?);
    ctx.stack_write(1, &word::bool_word(a < b))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::LT)))
}

/// GT - Unsigned greater-than comparison
pub fn gt(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let b = word::to_u256(&ctx.stack_peek(1)?);
    ctx.stack_write(1, &word::bool_word(a > b))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::GT)))
}

/// EQ - Equality comparison
pub fn eq(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = ctx.stack_peek(0)?;
    let b = ctx.stack_peek(1)?;
    ctx.stack_write(1, &word::bool_word(a == b))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::EQ)))
}

/// ISZERO - Zero test
pub fn iszero(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = ctx.stack_peek(0)?;
    ctx.stack_write(0, &word::bool_word(word::is_zero(&a)))?;
    Ok(OpStep::advance(1, base_gas(opcodes::ISZERO)))
}
