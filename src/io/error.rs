//! Error types and context management for grid filling and image operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TileError {
    /// Raster file content does not follow the binary PPM layout
    Decode {
        /// Path to the offending file
        path: PathBuf,
        /// Description of what's wrong with the content
        reason: String,
    },

    /// A tile image does not have the configured tile dimensions
    TileSize {
        /// Variant the image was loaded for
        variant: usize,
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        actual: (u32, u32),
    },

    /// Buffer dimensions exceed what can be addressed
    Allocation {
        /// Buffer being allocated
        what: &'static str,
        /// Description of the overflow
        reason: String,
    },

    /// Tile variant exceeds available tile set or adjacency model
    InvalidTileIndex {
        /// The invalid variant index
        index: usize,
        /// Number of variants available
        max_tiles: usize,
    },

    /// Grid coordinate falls outside the configured grid extent
    InvalidPosition {
        /// Requested (x, y)
        position: (usize, usize),
        /// Grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid was still incomplete when the iteration cap was reached
    IterationLimit {
        /// Resolver invocations performed
        iterations: usize,
        /// Cells still unassigned when the loop stopped
        unassigned: usize,
    },

    /// Failed to encode an image through the `image` crate
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, reason } => {
                write!(f, "Failed to decode '{}': {reason}", path.display())
            }
            Self::TileSize {
                variant,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Tile {variant} is {}x{}, expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::Allocation { what, reason } => {
                write!(f, "Cannot allocate {what}: {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::InvalidPosition {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the {}x{} grid",
                    position.0, position.1, dimensions.0, dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::IterationLimit {
                iterations,
                unassigned,
            } => {
                write!(
                    f,
                    "Grid incomplete after {iterations} iterations ({unassigned} cells unassigned)"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TileError>;

/// Attaches a file path to errors produced without one
pub trait WithPath<T> {
    /// Replace the placeholder path of a path-carrying error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> WithPath<T> for Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|mut error| {
            match &mut error {
                TileError::Decode { path: slot, .. }
                | TileError::ImageExport { path: slot, .. }
                | TileError::FileSystem { path: slot, .. } => *slot = path.into(),
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for TileError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for TileError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Placeholder used until a concrete path is attached
pub const UNKNOWN_PATH: &str = "<unknown>";

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileError {
    TileError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a decode error for content without a known path
pub fn decode_error(reason: &impl ToString) -> TileError {
    TileError::Decode {
        path: PathBuf::from(UNKNOWN_PATH),
        reason: reason.to_string(),
    }
}

/// Create an allocation error
pub fn allocation_error(what: &'static str, reason: &impl ToString) -> TileError {
    TileError::Allocation {
        what,
        reason: reason.to_string(),
    }
}
