//! Tests for seeded uniform integer draws

#[cfg(test)]
mod tests {
    use edgetile::algorithm::selection::{RandomSelector, RandomSource};
    use std::collections::HashSet;

    // Tests identical seeds produce identical sequences
    // Verified by seeding from entropy instead of the given seed
    #[test]
    fn test_deterministic_sequence() {
        let mut first = RandomSelector::new(42);
        let mut second = RandomSelector::new(42);

        for _ in 0..100 {
            assert_eq!(first.int_inclusive(0, 19), second.int_inclusive(0, 19));
        }
    }

    // Tests draws stay inside the inclusive range and reach both ends
    // Verified by using an exclusive upper bound
    #[test]
    fn test_inclusive_range() {
        let mut selector = RandomSelector::new(7);
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let value = selector.int_inclusive(2, 5);
            assert!((2..=5).contains(&value));
            seen.insert(value);
        }

        assert_eq!(seen.len(), 4);
    }

    // Tests degenerate ranges return the lower bound
    // Verified by removing the early return for max <= min
    #[test]
    fn test_degenerate_range() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(selector.int_inclusive(3, 3), 3);
        assert_eq!(selector.int_inclusive(4, 1), 4);
    }

    // Tests mutable references forward to the underlying source
    // Verified by returning min from the reference impl
    #[test]
    fn test_mut_reference_forwards() {
        fn draw(mut source: impl RandomSource) -> usize {
            source.int_inclusive(0, 100)
        }

        let mut direct = RandomSelector::new(9);
        let mut owned = RandomSelector::new(9);

        for _ in 0..20 {
            assert_eq!(direct.int_inclusive(0, 100), draw(&mut owned));
        }
    }
}
