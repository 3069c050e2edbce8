//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use edgetile::TileError;
    use edgetile::io::error::{
        Result, UNKNOWN_PATH, WithPath, allocation_error, decode_error, invalid_parameter,
    };
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = TileError::FileSystem {
            path: "/tmp/0.ppm".into(),
            operation: "open",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(decode_error(&"bad").source().is_none());
    }

    // Tests IterationLimit error formatting
    // Verified by omitting the unassigned count from the message
    #[test]
    fn test_iteration_limit_error() {
        let error = TileError::IterationLimit {
            iterations: 1000,
            unassigned: 27,
        };

        let message = error.to_string();
        assert!(message.contains("1000 iterations"));
        assert!(message.contains("27 cells"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("tile_size", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("tile_size"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
    }

    // Tests size and position errors name both extents
    // Verified by swapping expected and actual in the message
    #[test]
    fn test_geometry_errors() {
        let size = TileError::TileSize {
            variant: 3,
            expected: (50, 50),
            actual: (40, 50),
        };
        assert_eq!(size.to_string(), "Tile 3 is 40x50, expected 50x50");

        let position = TileError::InvalidPosition {
            position: (20, 1),
            dimensions: (20, 20),
        };
        assert_eq!(
            position.to_string(),
            "Position (20, 1) is outside the 20x20 grid"
        );

        let allocation = allocation_error("canvas", &"too large");
        assert_eq!(allocation.to_string(), "Cannot allocate canvas: too large");
    }

    // Tests conversions use the placeholder path until one is attached
    // Verified by leaving the placeholder after with_path
    #[test]
    fn test_from_io_error_and_with_path() {
        let error: TileError = std::io::Error::other("disk full").into();
        assert!(error.to_string().contains(UNKNOWN_PATH));

        let result: Result<()> = Err(error);
        match result.with_path("out/result.ppm") {
            Err(TileError::FileSystem { path, .. }) => {
                assert_eq!(path, PathBuf::from("out/result.ppm"));
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests errors without a path are unaffected by with_path
    // Verified by panicking on variants without a path
    #[test]
    fn test_with_path_ignores_pathless_errors() {
        let result: Result<()> = Err(TileError::InvalidTileIndex {
            index: 5,
            max_tiles: 5,
        });

        assert!(matches!(
            result.with_path("ignored"),
            Err(TileError::InvalidTileIndex { index: 5, .. })
        ));
    }
}
