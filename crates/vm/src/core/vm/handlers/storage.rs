//! Storage handlers: SLOAD and SSTORE over the shared witness plane, keyed
//! by the executing contract address.

use crate::core::{
    context::ExecutionContext,
    errors::Fault,
    layout::WORD_SIZE,
    opcodes,
    storage::{access_cost, sstore_cost},
    word,
};

use super::{HandlerResult, OpStep};

/// SLOAD - Load a storage slot, replacing the key on the stack.
///
/// A hit costs 100 warm / 2100 cold and warms the slot; a miss reads as zero
/// at the cold cost without materializing an entry.
pub fn sload(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    let key = ctx.stack_peek(0)?;
    let address = ctx.frame.contract;

    let (value, cost) = match ctx.storage.find(&address, &key) {
        Some(entry) => {
            let cost = access_cost(entry.is_warm != 0);
            entry.is_warm = 1;
            (entry.value, cost)
        }
        None => ([0u8; WORD_SIZE], access_cost(false)),
    };

    ctx.stack_write(0, &value)?;
    Ok(OpStep::advance(1, cost))
}

/// SSTORE - Write a storage slot with net-metered pricing.
///
/// Forbidden in static frames. A write to a slot absent from the witness
/// appends a fresh entry recording the written value as both current and
/// original; a full plane halts the frame.
pub fn sstore(ctx: &mut ExecutionContext<'_>) -> HandlerResult {
    if ctx.frame.is_static != 0 {
        return Err(Fault::IllegalStateChange);
    }

    let key = ctx.stack_peek(0)?;
    let value = ctx.stack_peek(1)?;
    let address = ctx.frame.contract;

    let cost = match ctx.storage.find_index(&address, &key) {
        Some(index) => {
            let entry = ctx.storage.entry_mut(index);
            let was_warm = entry.is_warm != 0;
            let original_zero = word::is_zero(&entry.original);
            let current_zero = word::is_zero(&entry.value);
            let value_zero = word::is_zero(&value);
            let (cost, refund) = sstore_cost(was_warm, original_zero, current_zero, value_zero);

            entry.value = value;
            entry.is_warm = 1;
            ctx.frame.gas_refund += refund;
            cost
        }
        None => {
            let Some(entry) = ctx.storage.add(&address, &key) else {
                return Err(Fault::InvalidOperation(opcodes::SSTORE));
            };
            entry.value = value;
            entry.original = value;
            entry.is_warm = 1;
            20000
        }
    };

    ctx.stack_shrink(2)?;
    Ok(OpStep::advance(1, cost))
}
