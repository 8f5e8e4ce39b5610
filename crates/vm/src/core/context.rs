//! Execution context: an exclusive view over the control block and its
//! planes for the duration of one interpreter call.
//!
//! The region is owned by the host; the interpreter borrows it whole, carves
//! the plane slices out once, and mutates everything in place. Nothing is
//! copied in or out.

use std::slice;

use crate::core::{
    layout::{
        FrameMemory, StorageHeader, FRAME_HEADER_BYTES, MAX_MEMORY_BYTES, STACK_PLANE_BYTES,
    },
    storage::{StorageEntry, StoragePlane},
};

/// Mutable view over one frame region, alive for a single call.
pub struct ExecutionContext<'a> {
    /// The control block.
    pub frame: &'a mut FrameMemory,
    /// Control block pointer as handed in by the host, passed through to
    /// tracer callbacks.
    pub(crate) raw: *mut FrameMemory,
    /// Stack plane, reserved at full capacity.
    pub(crate) stack: &'a mut [u8],
    /// Memory plane, reserved up to the expansion ceiling.
    pub(crate) memory: &'a mut [u8],
    /// Code plane.
    pub(crate) code: &'a [u8],
    /// Storage plane with its live count.
    pub(crate) storage: StoragePlane<'a>,
}

impl<'a> ExecutionContext<'a> {
    /// Builds the context from a raw control block pointer.
    ///
    /// # Safety
    ///
    /// `frame` must point to a region laid out per [`FrameMemory`]:
    ///
    /// - the plane offsets in the block stay inside the host allocation, with
    ///   [`STACK_PLANE_BYTES`] reserved at `stack_ptr`, [`MAX_MEMORY_BYTES`]
    ///   at `memory_ptr`, `code_size` bytes at `code_ptr`, a
    ///   [`StorageHeader`] at base + 384, and `max_slots` entries at its
    ///   `storage_ptr`;
    /// - no plane overlaps another;
    /// - nothing else reads or writes the region for the lifetime `'a`.
    pub unsafe fn from_raw(frame: *mut FrameMemory) -> ExecutionContext<'a> {
        let base = frame as *mut u8;
        let block = &mut *frame;

        let stack = slice::from_raw_parts_mut(base.add(block.stack_ptr as usize), STACK_PLANE_BYTES);
        let memory = slice::from_raw_parts_mut(base.add(block.memory_ptr as usize), MAX_MEMORY_BYTES);
        let code = slice::from_raw_parts(
            base.add(block.code_ptr as usize) as *const u8,
            block.code_size as usize,
        );

        let header = &mut *(base.add(FRAME_HEADER_BYTES) as *mut StorageHeader);
        let slots: &mut [StorageEntry] = if header.max_slots == 0 {
            &mut []
        } else {
            slice::from_raw_parts_mut(
                base.add(header.storage_ptr as usize) as *mut StorageEntry,
                header.max_slots as usize,
            )
        };

        ExecutionContext {
            frame: block,
            raw: frame,
            stack,
            memory,
            code,
            storage: StoragePlane { header, slots },
        }
    }

    /// The code plane.
    pub fn code(&self) -> &[u8] {
        self.code
    }
}
