//! Flatframe EVM virtual machine.
//!
//! This crate executes a single EVM message frame to completion (or to an
//! exceptional halt) directly on a shared memory region prepared by the host.
//! The control block, stack, memory, code, and storage planes all live in one
//! host-allocated buffer, so the surrounding runtime performs zero marshalling
//! per opcode: the interpreter mutates the region in place and the host reads
//! the outcome back from the same bytes.

/// Core interpreter implementation: the shared frame layout, plane views, and
/// the dispatch loop with its opcode handlers.
pub mod core;
