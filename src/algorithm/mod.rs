/// Tile variants, sides and the static compatibility table
pub mod adjacency;
/// Fixed-size bitset over the tile variant universe
pub mod bitset;
/// Stall detection and recovery policies
pub mod deadlock;
/// Candidate narrowing and commitment for a single cell
pub mod resolver;
/// Random fill loop driving the resolver to completion
pub mod scheduler;
/// Uniform random draws
pub mod selection;
