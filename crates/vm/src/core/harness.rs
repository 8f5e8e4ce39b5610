//! Host-side construction of the shared frame region.
//!
//! The production host lives on the other side of a foreign-memory bridge and
//! builds the region there. This module is its in-crate stand-in: it lays a
//! frame out exactly the way the host does, so unit tests, integration tests,
//! and benches can drive the interpreter against a real region.

use std::{ptr, slice};

use eyre::{bail, Result};

use crate::core::{
    context::ExecutionContext,
    layout::{
        FrameKind, FrameMemory, StorageHeader, TracerCallbacks, ADDRESS_SIZE, FRAME_HEADER_BYTES,
        MAX_MEMORY_BYTES, STACK_PLANE_BYTES, STORAGE_HEADER_BYTES, WORD_SIZE,
    },
    storage::{StorageEntry, STORAGE_ENTRY_BYTES},
    vm::run,
    word::Word,
};

/// 64-byte chunk keeping the backing allocation cache-line aligned, matching
/// the control block's alignment.
#[repr(C, align(64))]
#[derive(Clone, Copy)]
struct Chunk([u8; 64]);

/// Stack plane offset inside a harness-built region: control block, storage
/// descriptor, then padding up to the next cache line.
const STACK_PLANE_OFFSET: usize = 448;

const _: () = assert!(STACK_PLANE_OFFSET >= FRAME_HEADER_BYTES + STORAGE_HEADER_BYTES);

/// An owned, fully laid-out frame region.
pub struct HostFrame {
    buf: Vec<Chunk>,
}

impl HostFrame {
    /// Raw control block pointer, as the host would hand it to
    /// `execute_message`.
    pub fn frame_ptr(&mut self) -> *mut FrameMemory {
        self.buf.as_mut_ptr() as *mut FrameMemory
    }

    /// The control block.
    pub fn frame(&self) -> &FrameMemory {
        // SAFETY: the builder placed a FrameMemory at the base of the
        // 64-byte-aligned allocation.
        unsafe { &*(self.buf.as_ptr() as *const FrameMemory) }
    }

    /// The control block, mutably.
    pub fn frame_mut(&mut self) -> &mut FrameMemory {
        // SAFETY: as in `frame`.
        unsafe { &mut *(self.buf.as_mut_ptr() as *mut FrameMemory) }
    }

    /// An execution context borrowing this region.
    pub fn context(&mut self) -> ExecutionContext<'_> {
        // SAFETY: the builder reserved every plane at the capacity the
        // context requires, and &mut self makes the borrow exclusive.
        unsafe { ExecutionContext::from_raw(self.frame_ptr()) }
    }

    /// Runs the interpreter over this frame without tracing.
    pub fn execute(&mut self) {
        let mut ctx = self.context();
        run(&mut ctx, None);
    }

    /// Runs the interpreter over this frame with the given tracer attached.
    pub fn execute_traced(&mut self, tracer: &TracerCallbacks) {
        let mut ctx = self.context();
        run(&mut ctx, Some(tracer));
    }

    /// The live storage entries.
    pub fn storage_slots(&self) -> &[StorageEntry] {
        let base = self.buf.as_ptr() as *const u8;
        // SAFETY: the builder placed the descriptor and the entry array.
        unsafe {
            let header = &*(base.add(FRAME_HEADER_BYTES) as *const StorageHeader);
            let count = header.slot_count as usize;
            if count == 0 {
                return &[];
            }
            slice::from_raw_parts(base.add(header.storage_ptr as usize) as *const StorageEntry, count)
        }
    }

    /// Copies the stack word `from_top` entries below the top, if the stack
    /// is that deep.
    pub fn stack_word(&self, from_top: usize) -> Option<Word> {
        let frame = self.frame();
        let depth = frame.stack_size as usize;
        if from_top >= depth {
            return None;
        }
        let at = frame.stack_ptr as usize + (depth - 1 - from_top) * WORD_SIZE;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.bytes()[at..at + WORD_SIZE]);
        Some(word)
    }

    /// Copies `len` bytes of the memory plane starting at `offset`.
    pub fn memory_bytes(&self, offset: usize, len: usize) -> Vec<u8> {
        let at = self.frame().memory_ptr as usize + offset;
        self.bytes()[at..at + len].to_vec()
    }

    fn bytes(&self) -> &[u8] {
        // SAFETY: the allocation is buf.len() * 64 contiguous initialized bytes.
        unsafe { slice::from_raw_parts(self.buf.as_ptr() as *const u8, self.buf.len() * 64) }
    }
}

/// Builder for [`HostFrame`].
///
/// Lays out, in order: control block, storage descriptor, stack plane (full
/// capacity), memory plane (up to the ceiling), code plane, input plane, and
/// the storage entry array.
pub struct FrameBuilder {
    code: Vec<u8>,
    input: Vec<u8>,
    gas: i64,
    is_static: bool,
    depth: u32,
    kind: FrameKind,
    contract: [u8; ADDRESS_SIZE],
    sender: [u8; ADDRESS_SIZE],
    recipient: [u8; ADDRESS_SIZE],
    originator: [u8; ADDRESS_SIZE],
    mining_beneficiary: [u8; ADDRESS_SIZE],
    max_storage_slots: u32,
    witness: Vec<(Option<[u8; ADDRESS_SIZE]>, Word, Word)>,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuilder {
    /// A frame with no code, a 1M gas budget, and room for 64 storage slots.
    pub fn new() -> Self {
        FrameBuilder {
            code: Vec::new(),
            input: Vec::new(),
            gas: 1_000_000,
            is_static: false,
            depth: 0,
            kind: FrameKind::MessageCall,
            contract: [0; ADDRESS_SIZE],
            sender: [0; ADDRESS_SIZE],
            recipient: [0; ADDRESS_SIZE],
            originator: [0; ADDRESS_SIZE],
            mining_beneficiary: [0; ADDRESS_SIZE],
            max_storage_slots: 64,
            witness: Vec::new(),
        }
    }

    /// Sets the bytecode.
    pub fn code(mut self, code: &[u8]) -> Self {
        self.code = code.to_vec();
        self
    }

    /// Sets the input data.
    pub fn input(mut self, input: &[u8]) -> Self {
        self.input = input.to_vec();
        self
    }

    /// Sets the gas budget.
    pub fn gas(mut self, gas: i64) -> Self {
        self.gas = gas;
        self
    }

    /// Marks the frame static, forbidding state mutation.
    pub fn static_frame(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Sets the call depth.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the executing contract address.
    pub fn contract(mut self, address: [u8; ADDRESS_SIZE]) -> Self {
        self.contract = address;
        self
    }

    /// Sets the storage plane capacity.
    pub fn max_storage_slots(mut self, max: u32) -> Self {
        self.max_storage_slots = max;
        self
    }

    /// Pre-loads a witness slot for the executing contract. The entry arrives
    /// cold with `original` set to `value`, the state at frame entry.
    pub fn witness_slot(mut self, key: Word, value: Word) -> Self {
        self.witness.push((None, key, value));
        self
    }

    /// Pre-loads a witness slot for an arbitrary account.
    pub fn witness_slot_for(
        mut self,
        address: [u8; ADDRESS_SIZE],
        key: Word,
        value: Word,
    ) -> Self {
        self.witness.push((Some(address), key, value));
        self
    }

    /// Allocates and populates the region.
    pub fn build(self) -> Result<HostFrame> {
        if self.gas < 0 {
            bail!("gas budget must be non-negative, got {}", self.gas);
        }
        if self.witness.len() > self.max_storage_slots as usize {
            bail!(
                "witness holds {} slots but the plane capacity is {}",
                self.witness.len(),
                self.max_storage_slots
            );
        }

        let stack_offset = STACK_PLANE_OFFSET;
        let memory_offset = stack_offset + STACK_PLANE_BYTES;
        let code_offset = memory_offset + MAX_MEMORY_BYTES;
        let input_offset = code_offset + self.code.len();
        let storage_offset = (input_offset + self.input.len()).next_multiple_of(8);
        let total = storage_offset + self.max_storage_slots as usize * STORAGE_ENTRY_BYTES;

        let mut buf = vec![Chunk([0u8; 64]); total.div_ceil(64)];
        let base = buf.as_mut_ptr() as *mut u8;

        let mut frame = FrameMemory::zeroed();
        frame.gas_remaining = self.gas;
        frame.kind = self.kind as u32;
        frame.is_static = self.is_static as u32;
        frame.depth = self.depth;
        frame.stack_ptr = stack_offset as u64;
        frame.memory_ptr = memory_offset as u64;
        frame.code_ptr = code_offset as u64;
        frame.input_ptr = input_offset as u64;
        frame.code_size = self.code.len() as u32;
        frame.input_size = self.input.len() as u32;
        frame.recipient = self.recipient;
        frame.sender = self.sender;
        frame.contract = self.contract;
        frame.originator = self.originator;
        frame.mining_beneficiary = self.mining_beneficiary;

        let header = StorageHeader {
            storage_ptr: storage_offset as u64,
            slot_count: self.witness.len() as u32,
            max_slots: self.max_storage_slots,
        };

        // SAFETY: every write below stays inside the freshly allocated,
        // zeroed buffer; offsets were just computed against its length.
        unsafe {
            ptr::write(base as *mut FrameMemory, frame);
            ptr::write(base.add(FRAME_HEADER_BYTES) as *mut StorageHeader, header);
            ptr::copy_nonoverlapping(self.code.as_ptr(), base.add(code_offset), self.code.len());
            ptr::copy_nonoverlapping(self.input.as_ptr(), base.add(input_offset), self.input.len());

            let slots = base.add(storage_offset) as *mut StorageEntry;
            for (i, (address, key, value)) in self.witness.iter().enumerate() {
                let mut entry = StorageEntry::zeroed();
                entry.address = address.unwrap_or(self.contract);
                entry.key = *key;
                entry.value = *value;
                entry.original = *value;
                ptr::write(slots.add(i), entry);
            }
        }

        Ok(HostFrame { buf })
    }
}
