//! The dispatch loop and per-opcode handlers.

mod core;

/// Opcode handlers organized by category.
pub mod handlers;

pub use self::core::{execute_message, run, GAS_FLOOR};
