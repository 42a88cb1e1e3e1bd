use itertools::Itertools;
use proptest::{collection::vec, prelude::*};
use rand::{SeedableRng, seq::index};

use crate::{
    CONTAINER_THRESHOLD, ContainerKind, FlatBitmap,
    segment::{high, unsplit},
};

/// Checks a bitmap against the sorted, unique values it was built from: every
/// value and its successor answer correctly, the accessors match, and every
/// container picked the representation its population calls for.
#[track_caller]
pub fn check_membership(bitmap: &FlatBitmap, expected: &[u32]) {
    assert!(expected.is_sorted_by(|a, b| a < b), "expected must be sorted and unique");

    assert_eq!(bitmap.cardinality(), expected.len(), "cardinality");
    assert_eq!(bitmap.max_value(), expected.last().copied().unwrap_or(0), "max value");
    assert_eq!(
        bitmap.slot_count(),
        expected.last().map_or(0, |&max| usize::from(high(max)) + 1),
        "slot count"
    );

    for (i, &v) in expected.iter().enumerate() {
        assert!(bitmap.contains(v), "missing {v}");
        if let Some(next) = v.checked_add(1) {
            let present = expected.get(i + 1) == Some(&next);
            assert_eq!(bitmap.contains(next), present, "successor {next} of {v}");
        }
    }
    if let Some(above) = expected.last().and_then(|max| max.checked_add(1)) {
        assert!(!bitmap.contains(above), "{above} is past the max value");
    }

    let mut populated = 0;
    for (key, run) in &expected.iter().chunk_by(|&&v| high(v)) {
        let len = run.count();
        let container = bitmap.container(key).expect("container must exist");
        assert_eq!(container.kind(), ContainerKind::for_cardinality(len), "key {key}");
        assert_eq!(container.cardinality(), len, "key {key}");
        populated += 1;
    }
    assert_eq!(bitmap.stats().containers(), populated, "container count");
}

/// A proptest strategy producing a few runs of consecutive values packed into
/// a handful of containers, so that container sizes straddle the
/// array/bitmap threshold. Values may repeat.
pub fn clustered_values() -> impl Strategy<Value = Vec<u32>> {
    let run = (0u16..8, 0usize..=CONTAINER_THRESHOLD + 64, any::<u16>());
    vec(run, 1..4).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(key, len, start)| {
                (0..len).map(move |i| unsplit(key, start.wrapping_add(i as u16)))
            })
            .collect()
    })
}

pub struct SetGen {
    rng: rand::rngs::StdRng,
}

impl SetGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// `per_key` random low bits in each of `keys` random containers.
    /// Returns sorted unique values.
    #[track_caller]
    pub fn distributed(&mut self, keys: usize, per_key: usize) -> Vec<u32> {
        let mut out = Vec::with_capacity(keys * per_key);
        for key in index::sample(&mut self.rng, 1 << 16, keys).into_iter() {
            for low in index::sample(&mut self.rng, 1 << 16, per_key).into_iter() {
                out.push(unsplit(key as u16, low as u16));
            }
        }
        out.sort();
        assert_eq!(out.len(), keys * per_key);
        out
    }

    /// The first `per_key` low bits of each of the first `keys` containers.
    pub fn dense(&mut self, keys: usize, per_key: usize) -> Vec<u32> {
        itertools::iproduct!(0..keys, 0..per_key)
            .map(|(key, low)| unsplit(key as u16, low as u16))
            .collect()
    }

    /// `len` values drawn uniformly from the whole `u32` range.
    pub fn random(&mut self, len: usize) -> Vec<u32> {
        index::sample(&mut self.rng, u32::MAX as usize, len)
            .into_iter()
            .map(|i| i as u32)
            .sorted()
            .collect()
    }
}
