use std::fmt::{self, Debug};

use bitvec::{order::Lsb0, slice::BitSlice};
use num::traits::AsPrimitive;

use crate::{BITMAP_WORDS, container_kind::ContainerKind, segment::Low};

/// A borrowed view of one container inside the backing store.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ContainerRef<'a> {
    /// Sorted, duplicate free low bits.
    Array(&'a [u16]),

    /// `BITMAP_WORDS` words, bit `low % 16` of word `low / 16` set per member.
    Bitmap(&'a [u16]),
}

impl<'a> ContainerRef<'a> {
    pub(crate) fn new(kind: ContainerKind, words: &'a [u16]) -> Self {
        match kind {
            ContainerKind::Array => {
                debug_assert!(words.is_sorted_by(|a, b| a < b), "array must be sorted");
                ContainerRef::Array(words)
            }
            ContainerKind::Bitmap => {
                debug_assert_eq!(words.len(), BITMAP_WORDS, "bitmap must be full size");
                ContainerRef::Bitmap(words)
            }
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            ContainerRef::Array(_) => ContainerKind::Array,
            ContainerRef::Bitmap(_) => ContainerKind::Bitmap,
        }
    }

    /// The backing store words occupied by this container.
    #[inline]
    pub fn words(&self) -> &'a [u16] {
        match *self {
            ContainerRef::Array(words) | ContainerRef::Bitmap(words) => words,
        }
    }

    /// returns true if this container contains the given low bits
    #[inline]
    pub fn contains(&self, low: Low) -> bool {
        match *self {
            ContainerRef::Array(values) => values.binary_search(&low).is_ok(),
            ContainerRef::Bitmap(words) => {
                let idx: usize = low.as_();
                bits(words).get(idx).is_some_and(|bit| *bit)
            }
        }
    }

    /// the number of values stored in this container
    pub fn cardinality(&self) -> usize {
        match *self {
            ContainerRef::Array(values) => values.len(),
            ContainerRef::Bitmap(words) => bits(words).count_ones(),
        }
    }
}

impl Debug for ContainerRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Array(_) => write!(f, "Array({})", self.cardinality()),
            ContainerRef::Bitmap(_) => write!(f, "Bitmap({})", self.cardinality()),
        }
    }
}

#[inline(always)]
pub(crate) fn bits(words: &[u16]) -> &BitSlice<u16, Lsb0> {
    BitSlice::from_slice(words)
}

#[inline(always)]
pub(crate) fn bits_mut(words: &mut [u16]) -> &mut BitSlice<u16, Lsb0> {
    BitSlice::from_slice_mut(words)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::{collection::btree_set, proptest};

    use super::*;

    fn mkbitmap(values: impl IntoIterator<Item = u16>) -> Vec<u16> {
        let mut words = vec![0u16; BITMAP_WORDS];
        for v in values {
            bits_mut(&mut words).set(v as usize, true);
        }
        words
    }

    #[test]
    fn test_bitmap_word_layout() {
        let words = mkbitmap([0, 17, 65535]);
        assert_eq!(words[0], 0b1);
        // 17 lands on bit 1 of word 1
        assert_eq!(words[1], 0b10);
        assert_eq!(words[4095], 0b1000_0000_0000_0000);
        assert!(words[2..4095].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_bitmap_contains() {
        let words = mkbitmap([0, 17, 65535]);
        let container = ContainerRef::new(ContainerKind::Bitmap, &words);
        assert!(container.contains(0));
        assert!(container.contains(17));
        assert!(container.contains(65535));
        assert!(!container.contains(1));
        assert!(!container.contains(16));
        assert!(!container.contains(65534));
        assert_eq!(container.cardinality(), 3);
        assert_eq!(container.kind(), ContainerKind::Bitmap);
        assert_eq!(format!("{container:?}"), "Bitmap(3)");
    }

    #[test]
    fn test_array_contains() {
        let values = [1u16, 5, 4000, 65535];
        let container = ContainerRef::new(ContainerKind::Array, &values);
        for v in values {
            assert!(container.contains(v));
        }
        assert!(!container.contains(0));
        assert!(!container.contains(6));
        assert!(!container.contains(65534));
        assert_eq!(container.cardinality(), 4);
        assert_eq!(container.words(), &values);
        assert_eq!(format!("{container:?}"), "Array(4)");
    }

    proptest! {
        #[test]
        fn test_containers_agree_proptest(set in btree_set(0u16..=u16::MAX, 0..512), probe: u16) {
            let array: Vec<u16> = set.iter().copied().collect();
            let bitmap = mkbitmap(set.iter().copied());
            let array = ContainerRef::new(ContainerKind::Array, &array);
            let bitmap = ContainerRef::new(ContainerKind::Bitmap, &bitmap);

            let expected = BTreeSet::contains(&set, &probe);
            assert_eq!(array.contains(probe), expected);
            assert_eq!(bitmap.contains(probe), expected);
            assert_eq!(array.cardinality(), set.len());
            assert_eq!(bitmap.cardinality(), set.len());
        }
    }
}
