//! flat-bitmap is a read-only bitmap over sets of 32-bit unsigned integers
//! (`u32`), in the spirit of [Roaring Bitmaps](https://roaringbitmap.org/),
//! tuned for low memory use on sparse data.
//!
//! ## Layout:
//!
//! - **Containers**: each value is split into a 16-bit container key and 16
//!   bits of payload. Values sharing a key form one container, stored either
//!   as a sorted array of payloads or, once it holds [`CONTAINER_THRESHOLD`]
//!   values, as a fixed 65536 bit bitmap.
//!
//! - **Flat store**: every container lives in a single contiguous buffer of
//!   16-bit words. A per-key index of offsets, lengths and packed mode bits
//!   routes each query in constant time.
//!
//! A [`FlatBitmap`] is built once and never changes afterwards, so it can be
//! shared freely between threads.
//!
//! ```
//! use flat_bitmap::FlatBitmap;
//!
//! let bitmap = FlatBitmap::from_iter([3, 1, 1, 200_000]);
//! assert!(bitmap.contains(200_000));
//! assert!(!bitmap.contains(2));
//! assert_eq!(bitmap.cardinality(), 3);
//! assert_eq!(bitmap.max_value(), 200_000);
//! ```

use thiserror::Error;

mod bitmap;
mod builder;
mod container;
mod container_kind;
mod index;
pub mod segment;
mod stats;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use bitmap::FlatBitmap;
pub use container::ContainerRef;
pub use container_kind::ContainerKind;
pub use stats::MemoryStats;

/// The number of distinct values at which a container switches from the array
/// to the bitmap representation.
pub const CONTAINER_THRESHOLD: usize = 4096;

/// The number of 16-bit words held by every bitmap container.
pub const BITMAP_WORDS: usize = (1usize << u16::BITS) / u16::BITS as usize;

static_assertions::const_assert_eq!(BITMAP_WORDS, 4096);
static_assertions::const_assert!(BITMAP_WORDS <= u16::MAX as usize);
static_assertions::const_assert!(CONTAINER_THRESHOLD <= BITMAP_WORDS);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildErr {
    #[error("invalid argument: `{param}` was not provided")]
    MissingInput { param: &'static str },

    #[error("values must be strictly ascending: {next} follows {prev}")]
    Unsorted { prev: u32, next: u32 },
}
