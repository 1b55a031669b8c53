//! Small numeric helpers usable with floats as well as integers.
//!
//! Unlike [`Ord::clamp`] these only need [`PartialOrd`] and never panic: with
//! inverted bounds `clamp` returns the upper bound.

/// Smaller of two values (`a` when they compare equal or unordered).
pub fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

/// Larger of two values (`a` when they compare equal or unordered).
pub fn max<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

/// `min(hi, max(lo, value))`
pub fn clamp<T: PartialOrd + Copy>(value: T, lo: T, hi: T) -> T {
    min(hi, max(lo, value))
}
