//! Byte-exact layout of the shared frame region.
//!
//! The host allocates one contiguous region, places the 384-byte control
//! block at its base, and reserves the variable-length planes behind it.
//! Every plane pointer in the block is a byte offset from the control block
//! base, never an absolute address, which keeps the layout position
//! independent and safe to hand between address spaces.
//!
//! The layout is contractual. Integer fields are native little-endian (the
//! layout is only supported on little-endian hosts); addresses and value
//! words are raw byte arrays, read big-endian when used as numbers. The
//! offsets asserted at the bottom of this module are part of the ABI and must
//! match the host's frame description exactly.

use std::mem::{offset_of, size_of};

/// Size of the control block in bytes.
pub const FRAME_HEADER_BYTES: usize = 384;

/// Stack element width in bytes.
pub const WORD_SIZE: usize = 32;

/// Maximum stack depth.
pub const MAX_STACK_DEPTH: usize = 1024;

/// Bytes the host must reserve for the stack plane. The plane is reserved at
/// full capacity so neighbouring planes cannot be overwritten as the stack
/// grows.
pub const STACK_PLANE_BYTES: usize = MAX_STACK_DEPTH * WORD_SIZE;

/// Address width in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Hard ceiling on memory expansion. Growing past it halts the frame with
/// [`HaltReason::OutOfBounds`]. Build-time knob; the host must reserve this
/// many bytes for the memory plane.
pub const MAX_MEMORY_BYTES: usize = 1024 * 1024;

/// The shared control block at the base of the frame region.
///
/// Mutated in place by the interpreter and read back by the host after the
/// call; never shared across invocations without a reset.
#[repr(C, align(64))]
#[derive(Debug, Clone)]
pub struct FrameMemory {
    /// Program counter into the code plane.
    pub pc: i32,
    /// Code section index, reserved for object-format code.
    pub section: i32,
    /// Gas remaining; signed, non-negative outside a halting transition.
    pub gas_remaining: i64,
    /// Accumulated gas refund.
    pub gas_refund: i64,
    /// Current stack depth, at most [`MAX_STACK_DEPTH`].
    pub stack_size: i32,
    /// Current memory size in bytes, always a multiple of 32.
    pub memory_size: i32,
    /// Lifecycle state, one of [`FrameState`].
    pub state: u32,
    /// Frame type, one of [`FrameKind`] (ABI name: `type`).
    pub kind: u32,
    /// Non-zero forbids state-mutating operations.
    pub is_static: u32,
    /// Call depth.
    pub depth: u32,

    /// Byte offset of the stack plane from the control block base.
    pub stack_ptr: u64,
    /// Byte offset of the memory plane.
    pub memory_ptr: u64,
    /// Byte offset of the code plane.
    pub code_ptr: u64,
    /// Byte offset of the input plane.
    pub input_ptr: u64,
    /// Byte offset of the output plane.
    pub output_ptr: u64,
    /// Byte offset of the return-data plane.
    pub return_data_ptr: u64,
    /// Byte offset of the logs plane.
    pub logs_ptr: u64,
    /// Byte offset of the warm-address set.
    pub warm_addresses_ptr: u64,

    /// Code plane size in bytes.
    pub code_size: u32,
    /// Input plane size in bytes.
    pub input_size: u32,
    /// Output plane size in bytes.
    pub output_size: u32,
    /// Return-data plane size in bytes.
    pub return_data_size: u32,
    /// Number of emitted logs.
    pub logs_count: u32,
    /// Number of warm addresses.
    pub warm_addresses_count: u32,
    /// Number of warm storage slots.
    pub warm_storage_count: u32,
    /// Pads the size table to an 8-byte boundary.
    pub padding: u32,

    /// Recipient address.
    pub recipient: [u8; ADDRESS_SIZE],
    /// Sender address.
    pub sender: [u8; ADDRESS_SIZE],
    /// Executing contract address; keys the storage plane.
    pub contract: [u8; ADDRESS_SIZE],
    /// Transaction originator address.
    pub originator: [u8; ADDRESS_SIZE],
    /// Mining beneficiary (coinbase) address.
    pub mining_beneficiary: [u8; ADDRESS_SIZE],

    /// Wei value transferred, big-endian.
    pub value: [u8; WORD_SIZE],
    /// Apparent value for delegated calls, big-endian.
    pub apparent_value: [u8; WORD_SIZE],
    /// Gas price in Wei, big-endian.
    pub gas_price: [u8; WORD_SIZE],

    /// Exceptional halt reason, one of [`HaltReason`]; 0 while healthy.
    pub halt_reason: u32,

    /// Reserved; must stay zero.
    pub reserved: [u8; 40],
}

impl FrameMemory {
    /// An all-zero control block; the host overwrites the live fields before
    /// invocation.
    pub const fn zeroed() -> Self {
        FrameMemory {
            pc: 0,
            section: 0,
            gas_remaining: 0,
            gas_refund: 0,
            stack_size: 0,
            memory_size: 0,
            state: 0,
            kind: 0,
            is_static: 0,
            depth: 0,
            stack_ptr: 0,
            memory_ptr: 0,
            code_ptr: 0,
            input_ptr: 0,
            output_ptr: 0,
            return_data_ptr: 0,
            logs_ptr: 0,
            warm_addresses_ptr: 0,
            code_size: 0,
            input_size: 0,
            output_size: 0,
            return_data_size: 0,
            logs_count: 0,
            warm_addresses_count: 0,
            warm_storage_count: 0,
            padding: 0,
            recipient: [0; ADDRESS_SIZE],
            sender: [0; ADDRESS_SIZE],
            contract: [0; ADDRESS_SIZE],
            originator: [0; ADDRESS_SIZE],
            mining_beneficiary: [0; ADDRESS_SIZE],
            value: [0; WORD_SIZE],
            apparent_value: [0; WORD_SIZE],
            gas_price: [0; WORD_SIZE],
            halt_reason: 0,
            reserved: [0; 40],
        }
    }

    /// Whether the frame is still in the executing state.
    pub fn is_executing(&self) -> bool {
        self.state == FrameState::Executing as u32
    }

    /// Records an exceptional halt in the control block.
    pub fn set_halt(&mut self, reason: HaltReason) {
        self.state = FrameState::ExceptionalHalt as u32;
        self.halt_reason = reason as u32;
    }
}

/// Frame lifecycle states, written to [`FrameMemory::state`].
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Created by the host, not yet entered.
    NotStarted = 0,
    /// The dispatch loop is running.
    Executing = 1,
    /// Waiting on the host to drive a child frame. Reserved.
    Suspended = 2,
    /// Code completed; outer processing pending. Reserved.
    Success = 3,
    /// Halted exceptionally; see [`FrameMemory::halt_reason`].
    ExceptionalHalt = 4,
    /// Execution reverted. Reserved.
    Revert = 5,
    /// Frame failed outside code execution. Reserved.
    Failed = 6,
    /// Ran to completion.
    CompletedSuccess = 7,
}

/// Frame types, written to the control block `type` field.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Contract-creation frame.
    ContractCreation = 0,
    /// Message-call frame.
    MessageCall = 1,
}

/// Exceptional halt reasons, written to [`FrameMemory::halt_reason`].
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// No halt recorded.
    None = 0,
    /// Charged gas exceeded the remaining budget.
    InsufficientGas = 1,
    /// Dispatch hit an invalid or unassigned opcode.
    InvalidOperation = 2,
    /// Jump target out of bounds or not a `JUMPDEST`.
    InvalidJumpDestination = 3,
    /// Pop from an empty stack.
    StackUnderflow = 4,
    /// Push past the maximum stack depth.
    StackOverflow = 5,
    /// State mutation inside a static frame.
    IllegalStateChange = 6,
    /// Memory expansion past the ceiling.
    OutOfBounds = 7,
}

/// Storage plane descriptor, placed by the host directly after the control
/// block (control block base + 384).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StorageHeader {
    /// Byte offset of the storage entry array from the control block base.
    pub storage_ptr: u64,
    /// Live entries in the plane.
    pub slot_count: u32,
    /// Allocated entry capacity.
    pub max_slots: u32,
}

/// Size of the storage descriptor in bytes.
pub const STORAGE_HEADER_BYTES: usize = 16;

/// Per-operation record handed to the post-execution trace callback.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct OperationResult {
    /// Gas charged for the operation.
    pub gas_cost: i64,
    /// Halt reason produced by the operation; 0 for a healthy step.
    pub halt_reason: u32,
    /// Program counter increment applied after the operation.
    pub pc_increment: u32,
}

/// Host trace hooks. Either pointer may be null; a null `pre` disables
/// tracing entirely. Callbacks may read the control block but must not
/// mutate it.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TracerCallbacks {
    /// Invoked before each operation executes.
    pub pre: Option<unsafe extern "C" fn(frame: *mut FrameMemory)>,
    /// Invoked after each operation's gas has been charged.
    pub post:
        Option<unsafe extern "C" fn(frame: *mut FrameMemory, result: *const OperationResult)>,
}

// The offsets below are read by the host's frame description; a drift here is
// an ABI break, not a refactor.
const _: () = {
    assert!(size_of::<FrameMemory>() == FRAME_HEADER_BYTES);
    assert!(offset_of!(FrameMemory, pc) == 0);
    assert!(offset_of!(FrameMemory, gas_remaining) == 8);
    assert!(offset_of!(FrameMemory, stack_size) == 24);
    assert!(offset_of!(FrameMemory, stack_ptr) == 48);
    assert!(offset_of!(FrameMemory, code_size) == 112);
    assert!(offset_of!(FrameMemory, recipient) == 144);
    assert!(offset_of!(FrameMemory, value) == 244);
    assert!(offset_of!(FrameMemory, halt_reason) == 340);
    assert!(size_of::<StorageHeader>() == STORAGE_HEADER_BYTES);
    assert!(size_of::<OperationResult>() == 16);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_block_offsets() {
        assert_eq!(offset_of!(FrameMemory, pc), 0);
        assert_eq!(offset_of!(FrameMemory, section), 4);
        assert_eq!(offset_of!(FrameMemory, gas_remaining), 8);
        assert_eq!(offset_of!(FrameMemory, gas_refund), 16);
        assert_eq!(offset_of!(FrameMemory, stack_size), 24);
        assert_eq!(offset_of!(FrameMemory, memory_size), 28);
        assert_eq!(offset_of!(FrameMemory, state), 32);
        assert_eq!(offset_of!(FrameMemory, kind), 36);
        assert_eq!(offset_of!(FrameMemory, is_static), 40);
        assert_eq!(offset_of!(FrameMemory, depth), 44);
    }

    #[test]
    fn test_plane_pointer_offsets() {
        assert_eq!(offset_of!(FrameMemory, stack_ptr), 48);
        assert_eq!(offset_of!(FrameMemory, memory_ptr), 56);
        assert_eq!(offset_of!(FrameMemory, code_ptr), 64);
        assert_eq!(offset_of!(FrameMemory, input_ptr), 72);
        assert_eq!(offset_of!(FrameMemory, output_ptr), 80);
        assert_eq!(offset_of!(FrameMemory, return_data_ptr), 88);
        assert_eq!(offset_of!(FrameMemory, logs_ptr), 96);
        assert_eq!(offset_of!(FrameMemory, warm_addresses_ptr), 104);
    }

    #[test]
    fn test_plane_size_offsets() {
        assert_eq!(offset_of!(FrameMemory, code_size), 112);
        assert_eq!(offset_of!(FrameMemory, input_size), 116);
        assert_eq!(offset_of!(FrameMemory, output_size), 120);
        assert_eq!(offset_of!(FrameMemory, return_data_size), 124);
        assert_eq!(offset_of!(FrameMemory, logs_count), 128);
        assert_eq!(offset_of!(FrameMemory, warm_addresses_count), 132);
        assert_eq!(offset_of!(FrameMemory, warm_storage_count), 136);
    }

    #[test]
    fn test_context_offsets() {
        assert_eq!(offset_of!(FrameMemory, recipient), 144);
        assert_eq!(offset_of!(FrameMemory, sender), 164);
        assert_eq!(offset_of!(FrameMemory, contract), 184);
        assert_eq!(offset_of!(FrameMemory, originator), 204);
        assert_eq!(offset_of!(FrameMemory, mining_beneficiary), 224);
        assert_eq!(offset_of!(FrameMemory, value), 244);
        assert_eq!(offset_of!(FrameMemory, apparent_value), 276);
        assert_eq!(offset_of!(FrameMemory, gas_price), 308);
        assert_eq!(offset_of!(FrameMemory, halt_reason), 340);
        assert_eq!(offset_of!(FrameMemory, reserved), 344);
    }

    #[test]
    fn test_operation_result_layout() {
        assert_eq!(offset_of!(OperationResult, gas_cost), 0);
        assert_eq!(offset_of!(OperationResult, halt_reason), 8);
        assert_eq!(offset_of!(OperationResult, pc_increment), 12);
        assert_eq!(size_of::<OperationResult>(), 16);
    }

    #[test]
    fn test_zeroed_block_is_not_started() {
        let frame = FrameMemory::zeroed();
        assert_eq!(frame.state, FrameState::NotStarted as u32);
        assert_eq!(frame.halt_reason, HaltReason::None as u32);
        assert!(frame.reserved.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_set_halt() {
        let mut frame = FrameMemory::zeroed();
        frame.state = FrameState::Executing as u32;
        frame.set_halt(HaltReason::InvalidJumpDestination);
        assert_eq!(frame.state, FrameState::ExceptionalHalt as u32);
        assert_eq!(frame.halt_reason, 3);
        assert!(!frame.is_executing());
    }
}
