//! Terminal previews of a grid: numeric dump and 24-bit color swatches

use crate::spatial::Grid;
use image::RgbImage;

/// Printed in place of a variant for unassigned cells
pub const UNASSIGNED_LABEL: i64 = -1;

/// Resets terminal colors at the end of a preview line
pub const ANSI_RESET: &str = "\x1b[0m";

/// Numeric dump of the grid, one line per row `y` from 0 upward
///
/// Each cell is right-aligned in two columns and followed by a space.
pub fn format_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let label = grid
                .get(x, y)
                .map_or(UNASSIGNED_LABEL, |variant| variant.index() as i64);
            out.push_str(&format!("{label:>2} "));
        }
        out.push('\n');
    }
    out
}

/// A full block glyph in the given 24-bit foreground color
pub fn swatch(color: [u8; 3]) -> String {
    let [r, g, b] = color;
    format!("\x1b[38;2;{r};{g};{b}m█")
}

/// Color preview of the grid using `palette[variant]` per cell
///
/// Unassigned cells and variants without a palette entry print a space.
pub fn render_preview(grid: &Grid, palette: &[[u8; 3]]) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            match grid
                .get(x, y)
                .and_then(|variant| palette.get(variant.index()))
            {
                Some(&color) => out.push_str(&swatch(color)),
                None => out.push(' '),
            }
        }
        out.push_str(ANSI_RESET);
        out.push('\n');
    }
    out
}

/// Average color of an image, black when empty
pub fn mean_color(image: &RgbImage) -> [u8; 3] {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return [0, 0, 0];
    }

    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(channel);
        }
    }

    sums.map(|sum| (sum / count) as u8)
}
