/// Powers of ten, indexed by exponent. `POW_TEN[9]` is the largest power
/// of ten that fits a `u32`, which is why decimal parsing works in
/// 9-digit chunks.
pub const POW_TEN: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Decimal digits consumed per accumulator step while parsing.
pub const DIGITS_PER_CHUNK: usize = 9;

/// Largest magnitude kept in the small-constant caches.
pub const MAX_CONSTANT: usize = 16;
