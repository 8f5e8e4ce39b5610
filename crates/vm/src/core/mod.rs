//! Core VM implementation over the shared frame region.

/// Execution context borrowed over the control block and its planes.
pub mod context;

/// Fault taxonomy mapped onto the control block halt-reason codes.
pub mod errors;

/// Host-side frame construction, used by tests and benches.
pub mod harness;

/// Byte-exact layout of the control block and the tracer ABI.
pub mod layout;

/// Memory plane operations.
pub mod memory;

/// Opcode constants and dispatch metadata.
pub mod opcodes;

/// Stack plane operations.
pub mod stack;

/// Storage plane with warm/cold tracking and write pricing.
pub mod storage;

/// The dispatch loop and per-opcode handlers.
pub mod vm;

/// 32-byte big-endian word primitives.
pub mod word;
