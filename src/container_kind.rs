use std::fmt::{self, Display};

use crate::{BITMAP_WORDS, CONTAINER_THRESHOLD};

/// The representation chosen for a single container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerKind {
    /// A sorted, duplicate free list of low bits.
    #[default]
    Array,

    /// A fixed block of `BITMAP_WORDS` 16-bit words, one bit per low bits value.
    Bitmap,
}

impl ContainerKind {
    /// Picks the representation for a container holding `cardinality`
    /// distinct values.
    #[inline]
    pub const fn for_cardinality(cardinality: usize) -> Self {
        if cardinality >= CONTAINER_THRESHOLD {
            ContainerKind::Bitmap
        } else {
            ContainerKind::Array
        }
    }

    /// The number of backing store words a container of this kind occupies.
    #[inline]
    pub const fn store_words(self, cardinality: usize) -> usize {
        match self {
            ContainerKind::Array => cardinality,
            ContainerKind::Bitmap => BITMAP_WORDS,
        }
    }

    #[inline]
    pub(crate) const fn is_bitmap(self) -> bool {
        matches!(self, ContainerKind::Bitmap)
    }

    #[inline]
    pub(crate) const fn from_mode_bit(bit: bool) -> Self {
        if bit {
            ContainerKind::Bitmap
        } else {
            ContainerKind::Array
        }
    }
}

impl Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Array => f.write_str("array"),
            ContainerKind::Bitmap => f.write_str("bitmap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(ContainerKind::for_cardinality(0), ContainerKind::Array);
        assert_eq!(ContainerKind::for_cardinality(1), ContainerKind::Array);
        assert_eq!(
            ContainerKind::for_cardinality(CONTAINER_THRESHOLD - 1),
            ContainerKind::Array
        );
        assert_eq!(
            ContainerKind::for_cardinality(CONTAINER_THRESHOLD),
            ContainerKind::Bitmap
        );
        assert_eq!(ContainerKind::for_cardinality(65536), ContainerKind::Bitmap);
    }

    #[test]
    fn test_store_words() {
        assert_eq!(ContainerKind::Array.store_words(17), 17);
        assert_eq!(ContainerKind::Bitmap.store_words(17), BITMAP_WORDS);
        assert_eq!(ContainerKind::Bitmap.store_words(65536), BITMAP_WORDS);
    }

    #[test]
    fn test_mode_bit() {
        for kind in [ContainerKind::Array, ContainerKind::Bitmap] {
            assert_eq!(ContainerKind::from_mode_bit(kind.is_bitmap()), kind);
        }
    }
}
