use std::mem::size_of;

use bitvec::{bitbox, boxed::BitBox, order::Lsb0};
use itertools::izip;
use num::traits::AsPrimitive;

use crate::{container_kind::ContainerKind, segment::Key};

/// Offset stored for a key which has no container.
pub const SENTINEL: u32 = u32::MAX;

/// Location of one container in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub offset: usize,
    pub len: usize,
    pub kind: ContainerKind,
}

/// Per-key routing tables: start offset, length and mode of each container,
/// indexed directly by container key.
#[derive(Clone, PartialEq, Eq)]
pub struct ContainerIndex {
    offsets: Box<[u32]>,
    lengths: Box<[u16]>,
    modes: BitBox<u64, Lsb0>,
}

impl Default for ContainerIndex {
    fn default() -> Self {
        Self::with_slots(0)
    }
}

impl ContainerIndex {
    /// Allocates `slots` empty slots. Every slot starts absent.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            offsets: vec![SENTINEL; slots].into_boxed_slice(),
            lengths: vec![0; slots].into_boxed_slice(),
            modes: bitbox![u64, Lsb0; 0; slots],
        }
    }

    /// the number of allocated key slots
    #[inline]
    pub fn slots(&self) -> usize {
        self.offsets.len()
    }

    /// Records the container for `key`.
    pub(crate) fn set(&mut self, key: Key, entry: Entry) {
        let slot: usize = key.as_();
        debug_assert!(slot < self.slots(), "key {key} out of range");
        debug_assert!(entry.len > 0, "containers are never empty");
        debug_assert!(entry.offset < SENTINEL as usize, "store offset overflow");
        debug_assert_eq!(self.offsets[slot], SENTINEL, "key {key} set twice");

        self.offsets[slot] = entry.offset.as_();
        self.lengths[slot] = entry.len.as_();
        self.modes.set(slot, entry.kind.is_bitmap());
    }

    /// Lookup the container for `key`.
    /// Returns `None` if the key is past the last slot or has no container.
    #[inline]
    pub fn lookup(&self, key: Key) -> Option<Entry> {
        let slot: usize = key.as_();
        let offset = *self.offsets.get(slot)?;
        if offset == SENTINEL {
            return None;
        }
        Some(Entry {
            offset: offset.as_(),
            len: self.len_at(slot),
            kind: ContainerKind::from_mode_bit(self.modes[slot]),
        })
    }

    #[inline]
    fn len_at(&self, slot: usize) -> usize {
        self.lengths[slot].as_()
    }

    /// Iterates over every present container in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Entry)> + '_ {
        izip!(0..=Key::MAX, self.offsets.iter(), self.modes.iter().by_vals())
            .filter(|&(_, &offset, _)| offset != SENTINEL)
            .map(|(key, &offset, bitmap)| {
                let entry = Entry {
                    offset: offset.as_(),
                    len: self.len_at(key.as_()),
                    kind: ContainerKind::from_mode_bit(bitmap),
                };
                (key, entry)
            })
    }

    /// Heap bytes held by the three tables.
    pub fn heap_size(&self) -> usize {
        size_of::<u32>() * self.offsets.len()
            + size_of::<u16>() * self.lengths.len()
            + size_of::<u64>() * self.modes.as_raw_slice().len()
    }
}
