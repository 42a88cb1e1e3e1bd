use std::mem::size_of;

use crate::{container_kind::ContainerKind, index::ContainerIndex};

/// A summary of how a [`crate::FlatBitmap`] lays out its containers and how
/// much heap memory it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    /// allocated container key slots, including slots with no container
    pub slots: usize,
    pub arrays: usize,
    pub bitmaps: usize,
    /// 16-bit words in the shared backing store
    pub store_words: usize,
    /// bytes held by the index tables and the backing store
    pub heap_bytes: usize,
}

impl MemoryStats {
    pub(crate) fn collect(index: &ContainerIndex, store: &[u16]) -> Self {
        let (arrays, bitmaps) =
            index
                .iter()
                .fold((0, 0), |(arrays, bitmaps), (_, entry)| match entry.kind {
                    ContainerKind::Array => (arrays + 1, bitmaps),
                    ContainerKind::Bitmap => (arrays, bitmaps + 1),
                });

        Self {
            slots: index.slots(),
            arrays,
            bitmaps,
            store_words: store.len(),
            heap_bytes: index.heap_size() + size_of::<u16>() * store.len(),
        }
    }

    /// The number of containers actually present.
    #[inline]
    pub fn containers(&self) -> usize {
        self.arrays + self.bitmaps
    }

    /// Average heap bits spent per stored value. Returns 0 for an empty set.
    pub fn bits_per_value(&self, cardinality: usize) -> f64 {
        if cardinality == 0 {
            0.0
        } else {
            (self.heap_bytes * 8) as f64 / cardinality as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BITMAP_WORDS, CONTAINER_THRESHOLD, FlatBitmap};

    #[test]
    fn test_empty_stats() {
        let stats = FlatBitmap::empty().stats();
        assert_eq!(stats, MemoryStats::default());
        assert_eq!(stats.containers(), 0);
        assert_eq!(stats.bits_per_value(0), 0.0);
    }

    #[test]
    fn test_sparse_stats() {
        // keys 0 and 2, key 1 is allocated but empty
        let stats = FlatBitmap::from_iter([1, 131072]).stats();
        assert_eq!(stats.slots, 3);
        assert_eq!(stats.arrays, 2);
        assert_eq!(stats.bitmaps, 0);
        assert_eq!(stats.store_words, 2);
        // 3 offsets, 3 lengths, 1 mode word, 2 store words
        assert_eq!(stats.heap_bytes, 3 * 4 + 3 * 2 + 8 + 2 * 2);
    }

    #[test]
    fn test_bitmap_growth() {
        let array = FlatBitmap::from_iter(0..CONTAINER_THRESHOLD as u32 - 1).stats();
        let bitmap = FlatBitmap::from_iter(0..CONTAINER_THRESHOLD as u32).stats();
        assert_eq!(array.store_words, CONTAINER_THRESHOLD - 1);
        assert_eq!(bitmap.store_words, BITMAP_WORDS);
        assert_eq!((array.arrays, array.bitmaps), (1, 0));
        assert_eq!((bitmap.arrays, bitmap.bitmaps), (0, 1));

        let two = FlatBitmap::from_iter((0..CONTAINER_THRESHOLD as u32).flat_map(|v| [v, v + 65536]));
        let two = two.stats();
        assert_eq!(two.bitmaps, 2);
        assert_eq!(
            two.heap_bytes - bitmap.heap_bytes,
            // one more bitmap, plus one more offset and length
            BITMAP_WORDS * 2 + 4 + 2
        );
    }
}
