use num::traits::AsPrimitive;
use tracing::{debug, trace};

use crate::{
    BuildErr,
    bitmap::FlatBitmap,
    container::bits_mut,
    container_kind::ContainerKind,
    index::{ContainerIndex, Entry},
    segment::{high, low},
};

/// Collects `iter` into a vec, failing on the first value which is not
/// strictly greater than its predecessor.
pub(crate) fn collect_strictly_sorted(
    iter: impl IntoIterator<Item = u32>,
) -> Result<Vec<u32>, BuildErr> {
    let iter = iter.into_iter();
    let mut values: Vec<u32> = Vec::with_capacity(iter.size_hint().0);
    for next in iter {
        match values.last() {
            Some(&prev) if next <= prev => return Err(BuildErr::Unsorted { prev, next }),
            _ => values.push(next),
        }
    }
    Ok(values)
}

/// Builds a `FlatBitmap` from a sorted slice of unique values.
/// SAFETY: the result answers queries incorrectly if `values` is not sorted or
/// contains duplicates
pub(crate) fn build_sorted_unique(values: &[u32]) -> FlatBitmap {
    debug_assert!(values.is_sorted_by(|a, b| a < b), "values must be sorted and unique");

    let Some(&max_value) = values.last() else {
        return FlatBitmap::empty();
    };
    let slots = usize::from(high(max_value)) + 1;

    // every run of values sharing a key is contiguous since the input is sorted
    let runs = || values.chunk_by(|a, b| high(*a) == high(*b));

    let store_words: usize = runs()
        .map(|run| ContainerKind::for_cardinality(run.len()).store_words(run.len()))
        .sum();

    let mut index = ContainerIndex::with_slots(slots);
    let mut store: Vec<u16> = Vec::with_capacity(store_words);
    let (mut arrays, mut bitmaps) = (0usize, 0usize);

    for run in runs() {
        let key = high(run[0]);
        let kind = ContainerKind::for_cardinality(run.len());
        let offset = store.len();

        match kind {
            ContainerKind::Array => {
                store.extend(run.iter().map(|&v| low(v)));
                arrays += 1;
            }
            ContainerKind::Bitmap => {
                store.resize(offset + kind.store_words(run.len()), 0);
                let bits = bits_mut(&mut store[offset..]);
                for &v in run {
                    bits.set(low(v).as_(), true);
                }
                bitmaps += 1;
            }
        }

        let len = store.len() - offset;
        trace!(key, %kind, len, "materialized container");
        index.set(key, Entry { offset, len, kind });
    }
    debug_assert_eq!(store.len(), store_words);

    debug!(
        cardinality = values.len(),
        max_value,
        slots,
        arrays,
        bitmaps,
        store_words,
        "built flat bitmap"
    );

    FlatBitmap::from_parts(index, store.into_boxed_slice(), max_value, values.len())
}
