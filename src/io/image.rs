//! Tile image sets, grid compositing and canvas export

use crate::algorithm::adjacency::TileVariant;
use crate::io::configuration::TILE_EXTENSION;
use crate::io::error::{Result, TileError, allocation_error};
use crate::io::ppm;
use crate::io::swatch::mean_color;
use crate::spatial::Grid;
use image::{RgbImage, imageops};
use std::path::Path;

/// Source raster for one tile variant
pub type TileImage = RgbImage;

/// Output raster assembled from tile images
pub type Canvas = RgbImage;

/// Tile images indexed by variant, all of one size
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<TileImage>,
    tile_width: u32,
    tile_height: u32,
}

impl TileSet {
    /// Wrap tile images, checking each against the tile size
    ///
    /// # Errors
    ///
    /// Returns an error if any image is not `tile_width x tile_height`
    pub fn new(tiles: Vec<TileImage>, tile_width: u32, tile_height: u32) -> Result<Self> {
        for (variant, tile) in tiles.iter().enumerate() {
            if tile.dimensions() != (tile_width, tile_height) {
                return Err(TileError::TileSize {
                    variant,
                    expected: (tile_width, tile_height),
                    actual: tile.dimensions(),
                });
            }
        }

        Ok(Self {
            tiles,
            tile_width,
            tile_height,
        })
    }

    /// Load `0.ppm` through `<count - 1>.ppm` from `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if any file is missing, fails to decode or has the
    /// wrong size
    pub fn load_dir(dir: &Path, count: usize, tile_width: u32, tile_height: u32) -> Result<Self> {
        let tiles = (0..count)
            .map(|variant| ppm::load(&dir.join(format!("{variant}.{TILE_EXTENSION}"))))
            .collect::<Result<Vec<_>>>()?;

        Self::new(tiles, tile_width, tile_height)
    }

    /// Image for `variant`
    pub fn get(&self, variant: TileVariant) -> Option<&TileImage> {
        self.tiles.get(variant.index())
    }

    /// Number of tile images
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set has no images
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile width in pixels
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Mean color of each tile, indexed by variant
    pub fn palette(&self) -> Vec<[u8; 3]> {
        self.tiles.iter().map(mean_color).collect()
    }
}

/// Copy each committed cell's tile into a new canvas
///
/// The canvas is `grid_width * tile_width` by `grid_height * tile_height`
/// and starts black. Cell `(x, y)` lands at pixel offset
/// `(x * tile_width, y * tile_height)`. Unassigned cells are skipped and
/// their region stays black.
///
/// # Errors
///
/// Returns an error if:
/// - The canvas dimensions overflow
/// - A committed variant has no tile image
pub fn composite(grid: &Grid, tiles: &TileSet) -> Result<Canvas> {
    let width = canvas_extent(grid.width(), tiles.tile_width(), "canvas width")?;
    let height = canvas_extent(grid.height(), tiles.tile_height(), "canvas height")?;
    let bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3));
    if bytes.is_none() {
        return Err(allocation_error(
            "canvas",
            &format!("{width}x{height} overflows"),
        ));
    }

    let mut canvas = Canvas::new(width, height);

    for ((x, y), variant) in grid.committed() {
        let tile = tiles.get(variant).ok_or(TileError::InvalidTileIndex {
            index: variant.index(),
            max_tiles: tiles.len(),
        })?;
        let offset_x = i64::from(tiles.tile_width()) * x as i64;
        let offset_y = i64::from(tiles.tile_height()) * y as i64;
        imageops::replace(&mut canvas, tile, offset_x, offset_y);
    }

    Ok(canvas)
}

fn canvas_extent(cells: usize, tile_extent: u32, what: &'static str) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|count| count.checked_mul(tile_extent))
        .ok_or_else(|| allocation_error(what, &format!("{cells} cells of {tile_extent} pixels")))
}

/// Write the canvas to `output_path`
///
/// `.ppm` paths go through the PPM codec; any other extension is encoded
/// by the `image` crate.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - Encoding or writing the file fails
pub fn export_canvas(canvas: &Canvas, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TileError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let is_ppm = output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TILE_EXTENSION));

    if is_ppm {
        ppm::store(canvas, output_path)
    } else {
        canvas
            .save(output_path)
            .map_err(|e| TileError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}
