//! Edge compatibility rules for the tile variants
//!
//! Every variant carries four compatibility sets, one per side, naming the
//! variants allowed to sit next to it on that side. The table is authored
//! once and never recomputed. Sets need not be symmetric: when a cell is
//! resolved, each committed neighbor's own set for the side facing the cell
//! is the one that applies.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, TileError, invalid_parameter};
use std::fmt;

/// Identifier of a tile variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileVariant(usize);

impl TileVariant {
    /// Wrap a raw variant index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw variant index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four edges of a grid cell
///
/// `Up` faces `y + 1` and `Right` faces `x + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Neighbor at `(x, y + 1)`
    Up,
    /// Neighbor at `(x, y - 1)`
    Down,
    /// Neighbor at `(x - 1, y)`
    Left,
    /// Neighbor at `(x + 1, y)`
    Right,
}

impl Side {
    /// All sides in resolution order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];

    /// The side pointing back from the neighbor
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Coordinate offset `(dx, dy)` of the neighbor on this side
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Compatibility sets for the four sides of one variant
#[derive(Clone, Debug)]
pub struct EdgeRules {
    up: TileBitset,
    down: TileBitset,
    left: TileBitset,
    right: TileBitset,
}

impl EdgeRules {
    /// Set of variants permitted on `side`
    pub const fn side(&self, side: Side) -> &TileBitset {
        match side {
            Side::Up => &self.up,
            Side::Down => &self.down,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Side sets of one variant, ordered up, down, left, right
pub type SideLists<'a> = [&'a [usize]; 4];

// Five-variant reference table
const REFERENCE_RULES: [SideLists<'static>; 5] = [
    [&[0, 4], &[0, 1], &[0, 2], &[0, 3]],
    [&[0, 4], &[2, 3, 4], &[1, 3, 4], &[1, 2, 4]],
    [&[1, 2, 3], &[2, 3, 4], &[1, 3, 4], &[0, 3]],
    [&[1, 2, 3], &[2, 3, 4], &[0, 2], &[1, 2, 4]],
    [&[1, 2, 3], &[0, 1], &[1, 3, 4], &[1, 2, 4]],
];

/// Static adjacency table over a fixed variant universe
#[derive(Clone, Debug)]
pub struct AdjacencyModel {
    rules: Vec<EdgeRules>,
    universe: TileBitset,
    empty: TileBitset,
}

impl Default for AdjacencyModel {
    fn default() -> Self {
        Self::reference()
    }
}

impl AdjacencyModel {
    /// The built-in five-variant model
    pub fn reference() -> Self {
        let universe = REFERENCE_RULES.len();
        let rules = REFERENCE_RULES
            .iter()
            .map(|lists| Self::edge_rules(lists, universe))
            .collect();

        Self {
            rules,
            universe: TileBitset::all(universe),
            empty: TileBitset::new(universe),
        }
    }

    /// Build a model from per-variant side lists
    ///
    /// Variant `i` takes its rules from `rules[i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `rules` is empty
    /// - A side list names a variant outside `0..rules.len()`
    pub fn from_rules(rules: &[SideLists<'_>]) -> Result<Self> {
        let universe = rules.len();
        if universe == 0 {
            return Err(invalid_parameter(
                "rules",
                &0,
                &"a model needs at least one variant",
            ));
        }

        for lists in rules {
            if let Some(&index) = lists.iter().flat_map(|list| list.iter()).find(|&&v| v >= universe) {
                return Err(TileError::InvalidTileIndex {
                    index,
                    max_tiles: universe,
                });
            }
        }

        Ok(Self {
            rules: rules
                .iter()
                .map(|lists| Self::edge_rules(lists, universe))
                .collect(),
            universe: TileBitset::all(universe),
            empty: TileBitset::new(universe),
        })
    }

    fn edge_rules(lists: &SideLists<'_>, universe: usize) -> EdgeRules {
        let set = |list: &[usize]| {
            TileBitset::from_variants(list.iter().copied().map(TileVariant::new), universe)
        };
        let [up, down, left, right] = *lists;

        EdgeRules {
            up: set(up),
            down: set(down),
            left: set(left),
            right: set(right),
        }
    }

    /// Number of variants in the universe
    pub fn variant_count(&self) -> usize {
        self.rules.len()
    }

    /// Set containing every variant
    pub const fn universe(&self) -> &TileBitset {
        &self.universe
    }

    /// Iterate all variants in ascending order
    pub fn variants(&self) -> impl Iterator<Item = TileVariant> + '_ {
        self.universe.iter()
    }

    /// Checked conversion from a raw index
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is outside the universe
    pub fn variant(&self, index: usize) -> Result<TileVariant> {
        if index < self.variant_count() {
            Ok(TileVariant::new(index))
        } else {
            Err(TileError::InvalidTileIndex {
                index,
                max_tiles: self.variant_count(),
            })
        }
    }

    /// Variants permitted on `side` of `variant`
    ///
    /// Variants outside the universe have no compatible neighbors.
    pub fn compatible_side(&self, variant: TileVariant, side: Side) -> &TileBitset {
        self.rules
            .get(variant.index())
            .map_or(&self.empty, |rules| rules.side(side))
    }

    /// Whether `neighbor` may sit on `side` of `variant`
    pub fn allows(&self, variant: TileVariant, side: Side, neighbor: TileVariant) -> bool {
        self.compatible_side(variant, side).contains(neighbor)
    }
}
