//! Reference constants and runtime configuration defaults

// Reference grid extent in cells
/// Default grid width
pub const GRID_WIDTH: usize = 20;
/// Default grid height
pub const GRID_HEIGHT: usize = 20;
/// Largest grid accepted, in cells
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Edge length of a square tile image in pixels
pub const TILE_SIZE: u32 = 50;

/// Cell committed before the fill loop starts
pub const SEED_POSITION: (usize, usize) = (5, 5);
/// Variant committed at the seed cell
pub const SEED_VARIANT: usize = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Resolver invocations allowed before the fill is abandoned
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

// Stall recovery thresholds
/// Blocked results at one cell before its neighbors are cleared
pub const DEFAULT_CLEAR_AFTER: usize = 1;
/// Blocked results without progress before the whole grid is reset
pub const DEFAULT_RESET_AFTER: usize = 1_000;

// Input and output naming
/// Extension of tile source files, named `<variant>.ppm`
pub const TILE_EXTENSION: &str = "ppm";
/// Default output path
pub const DEFAULT_OUTPUT: &str = "result.ppm";
/// Suffix added to the output stem for the fill animation
pub const VISUALIZATION_SUFFIX: &str = "_fill";

// Fill animation settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on frames per animation
pub const MAX_GIF_FRAMES: usize = 300;
/// Pixels per grid cell in animation frames
pub const GIF_CELL_SCALE: u32 = 8;

// Progress bar display settings
/// Iterations between progress bar refreshes
pub const PROGRESS_REFRESH_INTERVAL: usize = 64;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
