//! Reproducible train/holdout partitioning and evaluation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Indices of the two partitions produced by [`holdout_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub holdout: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(fraction * n)` indices.
///
/// Identical `(n, fraction, seed)` always yields the identical split.
pub fn holdout_split(n: usize, fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout_len = ((fraction * n as f64).ceil() as usize).min(n);
    let train = indices.split_off(holdout_len);
    Split {
        train,
        holdout: indices,
    }
}

/// Fraction of `predicted` equal to `expected`; 0.0 for empty input.
pub fn accuracy<T: PartialEq>(predicted: &[T], expected: &[T]) -> f64 {
    let n = predicted.len().min(expected.len());
    if n == 0 {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(expected)
        .filter(|(p, e)| p == e)
        .count();
    hits as f64 / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let split = holdout_split(10, 0.2, 42);
        assert_eq!(split.holdout.len(), 2);
        assert_eq!(split.train.len(), 8);

        // ceil(0.2 * 16) = 4
        let split = holdout_split(16, 0.2, 42);
        assert_eq!(split.holdout.len(), 4);

        let split = holdout_split(1, 0.2, 42);
        assert_eq!(split.holdout.len(), 1);
        assert!(split.train.is_empty());
    }

    #[test]
    fn test_split_is_reproducible() {
        assert_eq!(holdout_split(50, 0.2, 42), holdout_split(50, 0.2, 42));
        assert_ne!(holdout_split(50, 0.2, 42), holdout_split(50, 0.2, 43));
    }

    #[test]
    fn test_split_is_a_partition() {
        let split = holdout_split(23, 0.2, 7);
        let mut all: Vec<usize> = split.train.iter().chain(&split.holdout).copied().collect();
        all.sort();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 2, 3, 4], &[1, 2, 0, 0]), 0.5);
        assert_eq!(accuracy::<u8>(&[], &[]), 0.0);
        assert_eq!(accuracy(&["a"], &["a"]), 1.0);
    }
}
