//! Storage plane: a flat, append-only array of `(address, key)` slots shared
//! with the host, with warm/cold access tracking and net-metered write
//! pricing.
//!
//! The host pre-loads every slot the frame may touch (the witness); the
//! interpreter mutates values in place and appends slots for first-time
//! writes. Lookup is a linear scan over the live prefix: witnesses are small
//! and the scan is cache-friendly.

use std::mem::size_of;

use crate::core::{
    layout::{StorageHeader, ADDRESS_SIZE, WORD_SIZE},
    word::Word,
};

/// One pre-loaded (or appended) storage slot in the shared plane.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StorageEntry {
    /// Account whose storage this slot belongs to.
    pub address: [u8; ADDRESS_SIZE],
    /// Slot key.
    pub key: [u8; WORD_SIZE],
    /// Current value.
    pub value: [u8; WORD_SIZE],
    /// Value at entry into the message frame, for refund accounting.
    pub original: [u8; WORD_SIZE],
    /// 1 once the slot has been accessed during the frame.
    pub is_warm: u8,
    /// Alignment padding.
    pub padding: [u8; 7],
}

/// Size of one storage entry in bytes; part of the shared layout.
pub const STORAGE_ENTRY_BYTES: usize = 124;

const _: () = assert!(size_of::<StorageEntry>() == STORAGE_ENTRY_BYTES);

impl StorageEntry {
    /// An all-zero, cold entry.
    pub const fn zeroed() -> Self {
        StorageEntry {
            address: [0; ADDRESS_SIZE],
            key: [0; WORD_SIZE],
            value: [0; WORD_SIZE],
            original: [0; WORD_SIZE],
            is_warm: 0,
            padding: [0; 7],
        }
    }
}

/// Mutable view over the storage plane and its live count.
pub struct StoragePlane<'a> {
    pub(crate) header: &'a mut StorageHeader,
    pub(crate) slots: &'a mut [StorageEntry],
}

impl StoragePlane<'_> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.header.slot_count as usize
    }

    /// Whether the plane holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first live slot matching `(address, key)`.
    pub fn find_index(&self, address: &[u8; ADDRESS_SIZE], key: &Word) -> Option<usize> {
        let live = self.len().min(self.slots.len());
        self.slots[..live]
            .iter()
            .position(|entry| entry.address == *address && entry.key == *key)
    }

    /// First live slot matching `(address, key)`.
    pub fn find(
        &mut self,
        address: &[u8; ADDRESS_SIZE],
        key: &Word,
    ) -> Option<&mut StorageEntry> {
        let index = self.find_index(address, key)?;
        Some(&mut self.slots[index])
    }

    /// The slot at an index previously returned by [`Self::find_index`].
    pub fn entry_mut(&mut self, index: usize) -> &mut StorageEntry {
        &mut self.slots[index]
    }

    /// Appends a cold, zero-valued slot for `(address, key)`. Returns `None`
    /// when the plane is at capacity.
    pub fn add(
        &mut self,
        address: &[u8; ADDRESS_SIZE],
        key: &Word,
    ) -> Option<&mut StorageEntry> {
        let live = self.len();
        if live >= (self.header.max_slots as usize).min(self.slots.len()) {
            return None;
        }
        self.header.slot_count += 1;

        let entry = &mut self.slots[live];
        *entry = StorageEntry::zeroed();
        entry.address = *address;
        entry.key = *key;
        Some(entry)
    }
}

/// Cost of touching a slot: 100 once warm, 2100 cold.
pub(crate) const fn access_cost(was_warm: bool) -> i64 {
    if was_warm {
        100
    } else {
        2100
    }
}

/// Net-metered SSTORE pricing over a slot snapshot taken before the write.
/// Returns `(gas_cost, gas_refund)`.
pub(crate) fn sstore_cost(
    was_warm: bool,
    original_zero: bool,
    current_zero: bool,
    value_zero: bool,
) -> (i64, i64) {
    if value_zero {
        // clearing a live slot earns the refund
        let refund = if current_zero { 0 } else { 4800 };
        (access_cost(was_warm), refund)
    } else if current_zero && original_zero {
        // first-time set of a slot that entered the frame empty
        (20000, 0)
    } else {
        // overwrite, or re-set after an in-frame clear
        (access_cost(was_warm), 0)
    }
}
