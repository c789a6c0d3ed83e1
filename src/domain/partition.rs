//! Splitting an ordered payment sequence into contiguous worker chunks.

use std::ops::Range;

/// Plans the chunk boundaries for `len` items and a requested chunk size.
///
/// Every chunk has exactly `chunk_size` items except the last, which holds the
/// remainder. A chunk size of `0` or `1` means "no parallelism": the whole
/// input becomes one chunk (even when empty) handled by a single worker.
/// For `chunk_size > 1` an empty input yields no chunks.
pub fn plan(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    if chunk_size <= 1 {
        return vec![0..len];
    }

    (0..len)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(len))
        .collect()
}

/// Applies [`plan`] to a slice.
pub fn partition<T>(items: &[T], chunk_size: usize) -> Vec<&[T]> {
    plan(items.len(), chunk_size)
        .into_iter()
        .map(|range| &items[range])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_no_parallelism_is_single_chunk() {
        assert_eq!(plan(10, 0), vec![0..10]);
        assert_eq!(plan(10, 1), vec![0..10]);
        assert_eq!(plan(0, 0), vec![0..0]);
    }

    #[test]
    fn test_last_chunk_holds_remainder() {
        assert_eq!(plan(10, 3), vec![0..3, 3..6, 6..9, 9..10]);
        assert_eq!(plan(9, 3), vec![0..3, 3..6, 6..9]);
        assert_eq!(plan(2, 5), vec![0..2]);
    }

    #[test]
    fn test_empty_input_has_no_chunks() {
        assert!(plan(0, 4).is_empty());
    }

    #[test]
    fn test_partition_reconstructs_input() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..500);
            let k = rng.gen_range(2..64);
            let items: Vec<usize> = (0..len).collect();

            let chunks = partition(&items, k);
            assert_eq!(chunks.len(), len.div_ceil(k));
            if let Some((_, head)) = chunks.split_last() {
                assert!(head.iter().all(|chunk| chunk.len() == k));
            }
            assert_eq!(chunks.concat(), items);
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(plan(1_234, 100), plan(1_234, 100));
    }
}
