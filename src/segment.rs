use num::traits::AsPrimitive;

/// The upper 16 bits of a value, selecting its container.
pub type Key = u16;

/// The lower 16 bits of a value, its position inside a container.
pub type Low = u16;

const LOW_BITS: u32 = Low::BITS;

/// Returns the container key of `value`.
#[inline(always)]
pub fn high(value: u32) -> Key {
    (value >> LOW_BITS).as_()
}

/// Returns the in-container offset of `value`.
#[inline(always)]
pub fn low(value: u32) -> Low {
    (value & 0xFFFF).as_()
}

#[inline(always)]
pub fn split(value: u32) -> (Key, Low) {
    (high(value), low(value))
}

#[inline(always)]
pub fn unsplit(key: Key, low: Low) -> u32 {
    let key: u32 = key.as_();
    let low: u32 = low.as_();
    (key << LOW_BITS) | low
}
