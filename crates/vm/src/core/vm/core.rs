//! The dispatch loop: fetch, trace, dispatch, charge, advance.
//!
//! Every outcome is recorded in the control block; nothing is thrown across
//! the host boundary.

use tracing::debug;

#[cfg(feature = "step-tracing")]
use tracing::trace;

use crate::core::{
    context::ExecutionContext,
    errors::Fault,
    layout::{
        FrameMemory, FrameState, HaltReason, OperationResult, TracerCallbacks,
    },
    opcodes::{self, opcode_name},
};

use super::handlers::{self, OpStep};

/// Cheapest-opcode floor checked before each dispatch. Most opcodes cost at
/// least this much; the real per-opcode charge still runs after the handler.
pub const GAS_FLOOR: i64 = 3;

/// Executes the frame until it halts.
///
/// Drives the control block from `Executing` to a terminal state, mutating
/// the planes in place. Faults become `(ExceptionalHalt, halt_reason)` with
/// the faulting operation's gas left uncharged.
pub fn run(ctx: &mut ExecutionContext<'_>, tracer: Option<&TracerCallbacks>) {
    ctx.frame.state = FrameState::Executing as u32;

    while ctx.frame.is_executing() {
        let pc = ctx.frame.pc as usize;
        if pc >= ctx.code.len() {
            break;
        }

        if ctx.frame.gas_remaining < GAS_FLOOR {
            debug!(pc, gas = ctx.frame.gas_remaining, "gas floor reached");
            ctx.frame.set_halt(HaltReason::InsufficientGas);
            return;
        }

        let opcode = ctx.code[pc];

        #[cfg(feature = "step-tracing")]
        trace!(
            pc,
            opcode = opcode_name(opcode),
            gas = ctx.frame.gas_remaining,
            stack = ctx.frame.stack_size,
            "executing opcode"
        );

        trace_pre(ctx, tracer);

        let step = match dispatch(ctx, opcode) {
            Ok(step) => step,
            Err(fault) => {
                debug!(%fault, pc, opcode = opcode_name(opcode), "exceptional halt");
                ctx.frame.set_halt(fault.halt_reason());
                return;
            }
        };

        if ctx.frame.gas_remaining < step.gas_cost {
            debug!(
                pc,
                opcode = opcode_name(opcode),
                cost = step.gas_cost,
                gas = ctx.frame.gas_remaining,
                "out of gas"
            );
            ctx.frame.set_halt(HaltReason::InsufficientGas);
            return;
        }
        ctx.frame.gas_remaining -= step.gas_cost;

        trace_post(ctx, tracer, &step);

        if step.pc_increment > 0 {
            ctx.frame.pc += step.pc_increment as i32;
        }
    }

    // ran off the end of code, or a handler completed the frame
    if ctx.frame.is_executing() {
        ctx.frame.state = FrameState::CompletedSuccess as u32;
    }
}

fn dispatch(ctx: &mut ExecutionContext<'_>, opcode: u8) -> Result<OpStep, Fault> {
    match opcode {
        opcodes::STOP => handlers::control::stop(ctx),

        opcodes::ADD => handlers::arithmetic::add(ctx),
        opcodes::MUL => handlers::arithmetic::mul(ctx),
        opcodes::SUB => handlers::arithmetic::sub(ctx),
        opcodes::DIV => handlers::arithmetic::div(ctx),
        opcodes::MOD => handlers::arithmetic::modulo(ctx),

        opcodes::LT => handlers::comparison::lt(ctx),
        opcodes::GT => handlers::comparison::gt(ctx),
        opcodes::EQ => handlers::comparison::eq(ctx),
        opcodes::ISZERO => handlers::comparison::iszero(ctx),

        opcodes::AND => handlers::bitwise::and(ctx),
        opcodes::OR => handlers::bitwise::or(ctx),
        opcodes::XOR => handlers::bitwise::xor(ctx),
        opcodes::NOT => handlers::bitwise::not(ctx),

        opcodes::POP => handlers::stack::pop(ctx),
        opcodes::MLOAD => handlers::memory::mload(ctx),
        opcodes::MSTORE => handlers::memory::mstore(ctx),
        opcodes::MSTORE8 => handlers::memory::mstore8(ctx),
        opcodes::SLOAD => handlers::storage::sload(ctx),
        opcodes::SSTORE => handlers::storage::sstore(ctx),
        opcodes::JUMP => handlers::control::jump(ctx),
        opcodes::JUMPI => handlers::control::jumpi(ctx),
        opcodes::PC => handlers::control::pc(ctx),
        opcodes::MSIZE => handlers::memory::msize(ctx),
        opcodes::GAS => handlers::control::gas(ctx),
        opcodes::JUMPDEST => handlers::control::jumpdest(ctx),

        opcodes::PUSH0 => handlers::stack::push0(ctx),
        0x60..=0x7f => handlers::stack::push_n(ctx, opcode),
        0x80..=0x8f => handlers::stack::dup_n(ctx, opcode),
        0x90..=0x9f => handlers::stack::swap_n(ctx, opcode),

        // suspension-point opcodes not yet implemented halt alongside INVALID
        opcodes::REVERT | opcodes::INVALID | opcodes::SELFDESTRUCT => {
            Err(Fault::InvalidOperation(opcode))
        }

        _ => unassigned(opcode),
    }
}

#[cfg(feature = "permissive-dispatch")]
fn unassigned(_opcode: u8) -> Result<OpStep, Fault> {
    Ok(OpStep::advance(1, opcodes::STUB_GAS))
}

#[cfg(not(feature = "permissive-dispatch"))]
fn unassigned(opcode: u8) -> Result<OpStep, Fault> {
    Err(Fault::InvalidOperation(opcode))
}

#[inline]
fn trace_pre(ctx: &mut ExecutionContext<'_>, tracer: Option<&TracerCallbacks>) {
    if let Some(callbacks) = tracer {
        if let Some(pre) = callbacks.pre {
            // SAFETY: the host guarantees the callback is sound and treats
            // the frame as read-only for the duration of the upcall.
            unsafe { pre(ctx.raw) };
        }
    }
}

#[inline]
fn trace_post(ctx: &mut ExecutionContext<'_>, tracer: Option<&TracerCallbacks>, step: &OpStep) {
    if let Some(callbacks) = tracer {
        if let Some(post) = callbacks.post {
            let result = OperationResult {
                gas_cost: step.gas_cost,
                halt_reason: HaltReason::None as u32,
                pc_increment: step.pc_increment,
            };
            // SAFETY: as in `trace_pre`; `result` outlives the upcall.
            unsafe { post(ctx.raw, &result) };
        }
    }
}

/// Executes one message frame on a host-prepared shared region.
///
/// `frame` points at the control block; `tracer` is an optional callback
/// vtable, null for no tracing. All output is written back through the
/// control block. A null `frame` returns immediately.
///
/// # Safety
///
/// `frame` must satisfy the layout contract documented on
/// [`ExecutionContext::from_raw`], and nothing else may access the region for
/// the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn execute_message(
    frame: *mut FrameMemory,
    tracer: *const TracerCallbacks,
) {
    if frame.is_null() {
        return;
    }

    let tracer = tracer.as_ref();
    let mut ctx = ExecutionContext::from_raw(frame);
    run(&mut ctx, tracer);
}
