//! Arithmetic handlers. All operate on the full 256-bit word with wrapping
//! semantics; division and modulo by zero yield zero.
//!
//! Each handler writes its result over the slot one below the top and shrinks
//! the stack by one, reusing the popped slot as scratch.

use std::ops::{Div, Rem};

use alloy::primitives::U256;

use crate::core::{
    context::ExecutionContext,
    opcodes::{self, base_gas},
    word,
};

use super::{HandlerResult, OpStep};

/// ADD - Addition operation
pub fn add(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let b = word::to_u256(&ctx.stack_peek(1)?);
    let result = a.overflowing_add(b).0;
    ctx.stack_write(1, &word::from_u256(result))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::ADD)))
}

/// MUL - Multiplication operation
pub fn mul(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let b = word::to_u256(&ctx.stack_peek(1)?);
    let result = a.overflowing_mul(b).0;
    ctx.stack_write(1, &word::from_u256(result))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MUL)))
}

/// SUB - Subtraction operation
pub fn sub(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let b = word::to_u256(&ctx.stack_peek(1)?);
    let result = a.overflowing_sub(b).0;
    ctx.stack_write(1, &word::from_u256(result))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::SUB)))
}

/// DIV - Integer division operation
pub fn div(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let numerator = word::to_u256(&ctx.stack_peek(0)?);
    let denominator = word::to_u256(&ctx.stack_peek(1)?);
    let result =
        if !denominator.is_zero() { numerator.div(denominator) } else { U256::ZERO };
    ctx.stack_write(1, &word::from_u256(result))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::DIV)))
}

/// MOD - Modulo operation
pub fn modulo(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let a = word::to_u256(&ctx.stack_peek(0)?);
    let modulus = word::to_u256(&ctx.stack_peek(1)?);
    let result = if !modulus.is_zero() { a.rem(modulus) } else { U256::ZERO };
    ctx.stack_write(1, &word::from_u256(result))?;
    ctx.stack_shrink(1)?;
    Ok(OpStep::advance(1, base_gas(opcodes::MOD)))
}
