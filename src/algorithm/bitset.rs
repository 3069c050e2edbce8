use crate::algorithm::adjacency::TileVariant;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the tile variant universe
///
/// Bit `i` is set when variant `i` is a member. Enumeration is always in
/// ascending variant order, which makes indexed draws reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no variants present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing every variant of the universe
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Build a bitset from a list of variants, ignoring those outside the universe
    pub fn from_variants(variants: impl IntoIterator<Item = TileVariant>, max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for variant in variants {
            bitset.insert(variant);
        }
        bitset
    }

    /// Size of the universe this set ranges over
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a variant
    pub fn insert(&mut self, variant: TileVariant) {
        if variant.index() < self.max_tiles {
            self.bits.set(variant.index(), true);
        }
    }

    /// Test variant membership
    pub fn contains(&self, variant: TileVariant) -> bool {
        self.bits.get(variant.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no variants are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count variants in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The `n`-th member in ascending order
    pub fn nth(&self, n: usize) -> Option<TileVariant> {
        self.bits.iter_ones().nth(n).map(TileVariant::new)
    }

    /// Iterate members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = TileVariant> + '_ {
        self.bits.iter_ones().map(TileVariant::new)
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<TileVariant> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<usize> = self.iter().map(TileVariant::index).collect();
        write!(f, "{{{}}}", members.iter().map(ToString::to_string).collect::<Vec<_>>().join(","))
    }
}
