/// Command-line parsing and the end-to-end runner
pub mod cli;
/// Reference constants and defaults
pub mod configuration;
/// Error types shared by every module
pub mod error;
/// Tile sets, compositing and canvas export
pub mod image;
/// Binary PPM codec
pub mod ppm;
/// Progress bar for running fills
pub mod progress;
/// Terminal grid dump and color swatches
pub mod swatch;
/// Fill event capture and GIF export
pub mod visualization;
