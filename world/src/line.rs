//! Line merge algorithm operating on a single row or column.
//!
//! A line is an ordered sequence of cell values where zero marks an empty
//! cell. Merging compacts tiles towards index zero and combines adjacent equal
//! tiles into their sum. A tile produced by a merge never merges again within
//! the same pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.

/// Collapses the line towards index zero, returning a line of the same length.
#[must_use]
pub fn merge(line: &[u32]) -> Vec<u32> {
    let mut packed: Vec<u32> = Vec::with_capacity(line.len());
    let mut last_was_merged = false;

    for &value in line.iter().filter(|value| **value != 0) {
        if !last_was_merged {
            if let Some(last) = packed.last_mut() {
                if *last == value {
                    // Tiles too large to double are left side by side.
                    if let Some(doubled) = last.checked_mul(2) {
                        *last = doubled;
                        last_was_merged = true;
                        continue;
                    }
                }
            }
        }

        packed.push(value);
        last_was_merged = false;
    }

    packed.resize(line.len(), 0);
    packed
}

/// Merges the line in place, reporting whether any value changed.
pub fn merge_in_place(line: &mut [u32]) -> bool {
    let merged = merge(line);
    if merged.as_slice() == &*line {
        return false;
    }
    line.copy_from_slice(&merged);
    true
}

#[cfg(test)]
mod tests {
    use super::{merge, merge_in_place};

    #[test]
    fn merges_at_most_once_per_pair() {
        assert_eq!(merge(&[2, 2, 2, 2]), vec![4, 4, 0, 0]);
        assert_eq!(merge(&[2, 2, 2]), vec![4, 2, 0]);
        assert_eq!(merge(&[4, 4, 8]), vec![8, 8, 0]);
    }

    #[test]
    fn merged_tile_does_not_chain_with_following_tile() {
        assert_eq!(merge(&[2, 2, 4, 0]), vec![4, 4, 0, 0]);
        assert_eq!(merge(&[4, 2, 2, 0]), vec![4, 4, 0, 0]);
    }

    #[test]
    fn compacts_across_gaps() {
        assert_eq!(merge(&[0, 2, 0, 2]), vec![4, 0, 0, 0]);
        assert_eq!(merge(&[2, 0, 2, 0]), vec![4, 0, 0, 0]);
        assert_eq!(merge(&[0, 0, 0, 8]), vec![8, 0, 0, 0]);
        assert_eq!(merge(&[2, 0, 0, 4]), vec![2, 4, 0, 0]);
    }

    #[test]
    fn leaves_compact_distinct_values_untouched() {
        assert_eq!(merge(&[2, 4, 8, 16]), vec![2, 4, 8, 16]);
    }

    #[test]
    fn handles_degenerate_lines() {
        assert!(merge(&[]).is_empty());
        assert_eq!(merge(&[0, 0, 0]), vec![0, 0, 0]);
        assert_eq!(merge(&[2]), vec![2]);
    }

    #[test]
    fn refuses_to_double_past_u32_range() {
        let top = 1 << 31;
        assert_eq!(merge(&[top, top]), vec![top, top]);
    }

    #[test]
    fn merge_in_place_reports_change() {
        let mut line = [0, 2, 0, 2];
        assert!(merge_in_place(&mut line));
        assert_eq!(line, [4, 0, 0, 0]);

        let mut stable = [2, 4, 8, 0];
        assert!(!merge_in_place(&mut stable));
        assert_eq!(stable, [2, 4, 8, 0]);
    }
}
