use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::{
    BuildErr,
    builder::{build_sorted_unique, collect_strictly_sorted},
    container::ContainerRef,
    container_kind::ContainerKind,
    index::ContainerIndex,
    segment::{Key, split},
    stats::MemoryStats,
};

/// A read-only bitmap over a set of `u32` values.
///
/// Values are grouped into containers by their upper 16 bits. Each container
/// is stored either as a sorted array of its lower 16 bits or, once it holds
/// [`crate::CONTAINER_THRESHOLD`] values, as a fixed 65536 bit bitmap. All
/// containers share one flat backing store, addressed through a per-key index.
///
/// `FlatBitmap` is built once and never mutated.
///
/// # Examples
///
/// ```
/// use flat_bitmap::FlatBitmap;
///
/// let bitmap: FlatBitmap = vec![100, 200, 300, 300].into_iter().collect();
///
/// assert_eq!(bitmap.cardinality(), 3);
/// assert!(bitmap.contains(200));
/// assert!(!bitmap.contains(201));
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct FlatBitmap {
    index: ContainerIndex,
    store: Box<[u16]>,
    max_value: u32,
    cardinality: usize,
}

static_assertions::assert_impl_all!(FlatBitmap: Send, Sync);

impl FlatBitmap {
    /// Returns a bitmap which contains no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a bitmap from `values`, which may contain duplicates and be in
    /// any order.
    ///
    /// Fails with [`BuildErr::MissingInput`] if no input is provided at all.
    /// An empty input is valid and produces an empty bitmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_bitmap::{BuildErr, FlatBitmap};
    ///
    /// let bitmap = FlatBitmap::try_build(Some([42, 42, 7])).unwrap();
    /// assert_eq!(bitmap.cardinality(), 2);
    ///
    /// let missing = FlatBitmap::try_build(None::<Vec<u32>>);
    /// assert_eq!(missing, Err(BuildErr::MissingInput { param: "values" }));
    /// ```
    pub fn try_build<I>(values: Option<I>) -> Result<Self, BuildErr>
    where
        I: IntoIterator<Item = u32>,
    {
        let values = values.ok_or(BuildErr::MissingInput { param: "values" })?;
        Ok(Self::from_iter(values))
    }

    /// Builds a bitmap from values which are already strictly ascending,
    /// skipping the sort.
    ///
    /// Fails with [`BuildErr::Unsorted`] on the first value which is not
    /// greater than the one before it.
    pub fn from_sorted_iter<I>(values: I) -> Result<Self, BuildErr>
    where
        I: IntoIterator<Item = u32>,
    {
        let values = collect_strictly_sorted(values)?;
        Ok(build_sorted_unique(&values))
    }

    pub(crate) fn from_parts(
        index: ContainerIndex,
        store: Box<[u16]>,
        max_value: u32,
        cardinality: usize,
    ) -> Self {
        Self { index, store, max_value, cardinality }
    }

    /// returns true if this bitmap contains the given value
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        let (key, low) = split(value);
        self.container(key)
            .is_some_and(|container| container.contains(low))
    }

    /// The greatest value in the bitmap, or 0 if it is empty.
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// The number of distinct values in the bitmap.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    /// The number of allocated container key slots. Keys at or past this
    /// bound have no container.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.index.slots()
    }

    /// Returns the container stored under `key`, if any.
    #[inline]
    pub fn container(&self, key: Key) -> Option<ContainerRef<'_>> {
        let entry = self.index.lookup(key)?;
        let words = self.store.get(entry.offset..entry.offset + entry.len)?;
        Some(ContainerRef::new(entry.kind, words))
    }

    /// Returns the representation of the container stored under `key`, if any.
    #[inline]
    pub fn container_kind(&self, key: Key) -> Option<ContainerKind> {
        self.index.lookup(key).map(|entry| entry.kind)
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats::collect(&self.index, &self.store)
    }

    #[cfg(test)]
    pub(crate) fn index(&self) -> &ContainerIndex {
        &self.index
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &[u16] {
        &self.store
    }
}

impl FromIterator<u32> for FlatBitmap {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let values = iter.into_iter().sorted_unstable().dedup().collect_vec();
        build_sorted_unique(&values)
    }
}

impl Debug for FlatBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("FlatBitmap")
            .field("cardinality", &self.cardinality)
            .field("max_value", &self.max_value)
            .field("slots", &stats.slots)
            .field("arrays", &stats.arrays)
            .field("bitmaps", &stats.bitmaps)
            .finish()
    }
}
