//! Event capture and GIF generation for fill visualization

use crate::algorithm::adjacency::TileVariant;
use crate::algorithm::scheduler::FillObserver;
use crate::io::configuration::{
    GIF_CELL_SCALE, MAX_GIF_FRAMES, MAX_GRID_CELLS, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{Result, TileError};
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// A single change to the grid during a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillEvent {
    /// A variant was written to a cell
    Commit {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
        /// Variant written
        variant: TileVariant,
        /// Loop iteration, 0 for the initial seed
        iteration: usize,
    },
    /// Every cell was cleared
    Reset {
        /// Loop iteration that triggered the reset
        iteration: usize,
    },
    /// A single cell was unassigned
    Clear {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
        /// Loop iteration that cleared it
        iteration: usize,
    },
}

/// Records fill events for post-run visualization
pub struct FillCapture {
    events: Vec<FillEvent>,
    dimensions: (usize, usize),
    palette: Vec<[u8; 3]>,
    empty_color: [u8; 4],
}

impl FillCapture {
    /// The average of all palette colors is used for unassigned cells
    pub fn new(width: usize, height: usize, palette: Vec<[u8; 3]>) -> Self {
        let empty_color = if palette.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 3];
            for color in &palette {
                for (sum, &channel) in sums.iter_mut().zip(color.iter()) {
                    *sum += u32::from(channel);
                }
            }

            let count = palette.len() as u32;
            let [r, g, b] = sums.map(|sum| (sum / count) as u8);
            [r, g, b, 255]
        };

        Self {
            events: Vec::with_capacity(width.saturating_mul(height).min(MAX_GRID_CELLS)),
            dimensions: (width, height),
            palette,
            empty_color,
        }
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[FillEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured events as an animated GIF
    ///
    /// Frames are dropped when the requested delay is below what viewers
    /// support, or when the animation would exceed `MAX_GIF_FRAMES`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - A committed variant has no palette color
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(TileError::InvalidParameter {
                parameter: "visualization",
                value: String::new(),
                reason: "No fill events captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let viewer_skip = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize;
        let budget_skip = self.events.len().div_ceil(MAX_GIF_FRAMES);
        let skip_factor = viewer_skip.max(budget_skip).max(1);

        let frames = self.generate_frames(effective_delay_ms, skip_factor)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TileError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| TileError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| TileError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let (width, height) = self.dimensions;
        let mut cells: Vec<Option<TileVariant>> = vec![None; width * height];
        let mut frames = vec![self.render_frame(&cells, delay_ms)?];

        for (count, event) in self.events.iter().enumerate() {
            match *event {
                FillEvent::Commit { x, y, variant, .. } => {
                    if let Some(cell) = cell_at(&mut cells, width, x, y) {
                        *cell = Some(variant);
                    }
                }
                FillEvent::Clear { x, y, .. } => {
                    if let Some(cell) = cell_at(&mut cells, width, x, y) {
                        *cell = None;
                    }
                }
                FillEvent::Reset { .. } => cells.fill(None),
            }

            if (count + 1) % skip_factor == 0 {
                frames.push(self.render_frame(&cells, delay_ms)?);
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(self.render_frame(&cells, delay_ms)?);
        }

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        Ok(frames)
    }

    fn render_frame(&self, cells: &[Option<TileVariant>], delay_ms: u32) -> Result<Frame> {
        let (width, height) = self.dimensions;
        let mut img = RgbaImage::new(width as u32 * GIF_CELL_SCALE, height as u32 * GIF_CELL_SCALE);

        for (index, cell) in cells.iter().enumerate() {
            let color = match cell {
                None => Rgba(self.empty_color),
                Some(variant) => {
                    let [r, g, b] = self.palette.get(variant.index()).copied().ok_or(
                        TileError::InvalidTileIndex {
                            index: variant.index(),
                            max_tiles: self.palette.len(),
                        },
                    )?;
                    Rgba([r, g, b, 255])
                }
            };

            let cell_x = (index % width) as u32 * GIF_CELL_SCALE;
            let cell_y = (index / width) as u32 * GIF_CELL_SCALE;
            for dy in 0..GIF_CELL_SCALE {
                for dx in 0..GIF_CELL_SCALE {
                    img.put_pixel(cell_x + dx, cell_y + dy, color);
                }
            }
        }

        Ok(Frame::from_parts(
            img,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}

fn cell_at(
    cells: &mut [Option<TileVariant>],
    width: usize,
    x: usize,
    y: usize,
) -> Option<&mut Option<TileVariant>> {
    if x < width { cells.get_mut(y * width + x) } else { None }
}

impl FillObserver for FillCapture {
    fn on_commit(&mut self, x: usize, y: usize, variant: TileVariant, iteration: usize) {
        self.events.push(FillEvent::Commit {
            x,
            y,
            variant,
            iteration,
        });
    }

    fn on_reset(&mut self, iteration: usize) {
        self.events.push(FillEvent::Reset { iteration });
    }

    fn on_clear(&mut self, x: usize, y: usize, iteration: usize) {
        self.events.push(FillEvent::Clear { x, y, iteration });
    }
}
