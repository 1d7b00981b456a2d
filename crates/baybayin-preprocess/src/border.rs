//! Border extrapolation shared by the neighborhood filters.

/// Mirror an out-of-range index without repeating the edge pixel
/// (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let i = i.rem_euclid(period);
    (if i >= n { period - i } else { i }) as usize
}

#[cfg(test)]
mod tests {
    use super::reflect101;

    #[test]
    fn mirrors_without_repeating_edges() {
        let idx: Vec<usize> = (-3..8).map(|i| reflect101(i, 5)).collect();
        assert_eq!(idx, vec![3, 2, 1, 0, 1, 2, 3, 4, 3, 2, 1]);
    }

    #[test]
    fn handles_padding_wider_than_the_image() {
        assert_eq!(reflect101(5, 2), 1);
        assert_eq!(reflect101(-7, 3), 1);
        assert_eq!(reflect101(42, 1), 0);
    }
}
