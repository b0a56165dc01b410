/// Aligns `n` up to the next multiple of `alignment`.
///
/// `alignment` must be a non-zero power of two.
///
/// # Examples
///
/// ```
/// use membuf_bytes::align::align_up;
///
/// assert_eq!(align_up(0, 8), 0);
/// assert_eq!(align_up(1, 8), 8);
/// assert_eq!(align_up(8, 8), 8);
/// assert_eq!(align_up(13, 8), 16);
/// ```
#[inline]
pub fn align_up(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (n + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up_is_smallest_multiple() {
        for alignment in [1usize, 2, 8, 64] {
            for n in 0..200 {
                let a = align_up(n, alignment);
                assert!(a >= n);
                assert_eq!(a % alignment, 0);
                assert!(a - n < alignment);
            }
        }
    }
}
