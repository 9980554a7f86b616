/// Index of the highest set bit of `v`. For a power of two this is its log2.
///
/// `v` must be non-zero; the result is meaningless otherwise.
#[inline]
pub fn most_significant_bit(v: u32) -> u32 {
    debug_assert!(v != 0, "most_significant_bit of zero is undefined");
    31 - v.leading_zeros()
}
