//! Height of the list as a function of its element count.

/// Number of levels a list holding `count` elements should have:
/// 1 for zero or one element, otherwise `floor(log2(count)) + 1`.
pub fn target_height(count: usize) -> usize {
    if count <= 1 {
        return 1;
    }
    return count.ilog2() as usize + 1;
}
