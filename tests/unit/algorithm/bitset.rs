//! Tests for `TileBitset` operations including set operations and ordered draws

#[cfg(test)]
mod tests {
    use edgetile::algorithm::adjacency::TileVariant;
    use edgetile::algorithm::bitset::TileBitset;

    fn variants(indices: &[usize]) -> Vec<TileVariant> {
        indices.iter().copied().map(TileVariant::new).collect()
    }

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(5);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 5);
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = TileBitset::new(5);
        bitset.insert(TileVariant::new(3));
        assert!(bitset.contains(TileVariant::new(3)));
        assert!(!bitset.contains(TileVariant::new(2)));
        assert_eq!(bitset.count(), 1);
    }

    // Tests variants outside the universe are neither stored nor reported
    // Verified by removing the bounds check in insert
    #[test]
    fn test_out_of_universe_variants_ignored() {
        let mut bitset = TileBitset::new(5);
        bitset.insert(TileVariant::new(7));
        assert!(bitset.is_empty());
        assert!(!bitset.contains(TileVariant::new(7)));
    }

    // Tests intersection of two bitsets returns correct elements
    // Verified by changing intersection operation to union operation
    #[test]
    fn test_intersection() {
        let first = TileBitset::from_variants(variants(&[1, 2, 4]), 5);
        let second = TileBitset::from_variants(variants(&[2, 3, 4]), 5);

        let intersection = first.intersection(&second);
        assert_eq!(intersection.to_vec(), variants(&[2, 4]));
        // Operands untouched
        assert_eq!(first.count(), 3);
    }

    // Tests in-place intersection can empty the set
    // Verified by skipping the bitwise and in intersect_with
    #[test]
    fn test_intersect_with_disjoint_sets() {
        let mut set = TileBitset::from_variants(variants(&[0, 3]), 5);
        set.intersect_with(&TileBitset::from_variants(variants(&[1, 2, 4]), 5));
        assert!(set.is_empty());
    }

    // Tests creation of bitset with all bits set
    // Verified by initializing all bits to 0 instead of 1
    #[test]
    fn test_all_bits_set() {
        let bitset = TileBitset::all(5);
        for i in 0..5 {
            assert!(bitset.contains(TileVariant::new(i)));
        }
        assert_eq!(bitset.count(), 5);
    }

    // Tests nth enumerates members in ascending order
    // Verified by iterating zeros instead of ones
    #[test]
    fn test_nth_ascending_order() {
        let bitset = TileBitset::from_variants(variants(&[4, 1, 3]), 5);
        assert_eq!(bitset.nth(0), Some(TileVariant::new(1)));
        assert_eq!(bitset.nth(1), Some(TileVariant::new(3)));
        assert_eq!(bitset.nth(2), Some(TileVariant::new(4)));
        assert_eq!(bitset.nth(3), None);
    }

    // Tests display renders members in braces
    // Verified by changing the join separator
    #[test]
    fn test_display() {
        let bitset = TileBitset::from_variants(variants(&[0, 3]), 5);
        assert_eq!(bitset.to_string(), "{0,3}");
        assert_eq!(TileBitset::new(5).to_string(), "{}");
    }
}
