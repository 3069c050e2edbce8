//! Command-line interface for filling a grid and compositing its tiles

use crate::algorithm::adjacency::AdjacencyModel;
use crate::algorithm::deadlock::StallPolicy;
use crate::algorithm::scheduler::{FillConfig, FillReport, FillScheduler};
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    DEFAULT_CLEAR_AFTER, DEFAULT_MAX_ITERATIONS, DEFAULT_OUTPUT, DEFAULT_RESET_AFTER, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, GRID_HEIGHT, GRID_WIDTH, TILE_SIZE, VISUALIZATION_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{TileSet, composite, export_canvas};
use crate::io::progress::FillProgress;
use crate::io::swatch::{format_grid, render_preview};
use crate::io::visualization::FillCapture;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Recovery strategy when resolutions keep getting blocked
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StallMode {
    /// Keep picking cells and ignore blocked results
    Retry,
    /// Clear and reseed the whole grid when filling stops making progress
    Reset,
    /// Unassign the neighbors of a cell that keeps getting blocked
    Clear,
}

#[derive(Parser)]
#[command(name = "edgetile")]
#[command(
    author,
    version,
    about = "Fill a grid with edge-compatible tiles and composite the tile images"
)]
/// Command-line arguments for the tiling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory containing the tile images 0.ppm through 4.ppm
    #[arg(value_name = "TILE_DIR", default_value = ".")]
    pub tile_dir: PathBuf,

    /// Output image path (.ppm, or any format the image crate can write)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum resolver iterations before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Grid width in cells
    #[arg(long, default_value_t = GRID_WIDTH)]
    pub grid_width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = GRID_HEIGHT)]
    pub grid_height: usize,

    /// Edge length of the square tile images in pixels
    #[arg(short, long, default_value_t = TILE_SIZE)]
    pub tile_size: u32,

    /// How to recover from blocked cells
    #[arg(long, value_enum, default_value_t = StallMode::Clear)]
    pub stall: StallMode,

    /// Blocked results that trigger recovery (per cell for clear, since the last new commitment for reset)
    #[arg(long, value_name = "N")]
    pub stall_after: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write an animated GIF of the fill next to the output
    #[arg(short, long)]
    pub visualize: bool,

    /// Print the resolved grid and a color preview to the terminal
    #[arg(short, long)]
    pub print_grid: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Stall policy selected by `--stall` and `--stall-after`
    pub fn stall_policy(&self) -> StallPolicy {
        match self.stall {
            StallMode::Retry => StallPolicy::Retry,
            StallMode::Reset => StallPolicy::Reset {
                after: self.stall_after.unwrap_or(DEFAULT_RESET_AFTER),
            },
            StallMode::Clear => StallPolicy::Clear {
                after: self.stall_after.unwrap_or(DEFAULT_CLEAR_AFTER),
            },
        }
    }

    /// Fill parameters derived from the arguments
    pub fn fill_config(&self) -> FillConfig {
        FillConfig {
            max_iterations: self.iterations,
            stall_policy: self.stall_policy(),
            ..FillConfig::for_grid(self.grid_width, self.grid_height)
        }
    }

    /// Path of the fill animation, derived from the output path
    pub fn visualization_path(&self) -> PathBuf {
        let stem = self.output.file_stem().unwrap_or_default();
        let name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        self.output.parent().map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}

/// Runs one fill from tile loading to output export
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load tiles, fill the grid, composite and write the outputs
    ///
    /// Tiles are loaded before filling so a bad tile directory fails fast.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any tile image is missing, malformed or of the wrong size
    /// - The fill configuration is invalid
    /// - The grid is incomplete when the iteration cap is reached
    /// - The output image or animation cannot be written
    // Allow print for the requested grid preview and the run summary
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    pub fn run(&self) -> Result<FillReport> {
        let model = AdjacencyModel::reference();
        let tiles = TileSet::load_dir(
            &self.cli.tile_dir,
            model.variant_count(),
            self.cli.tile_size,
            self.cli.tile_size,
        )?;

        let config = self.cli.fill_config();
        let mut scheduler =
            FillScheduler::new(&model, config, RandomSelector::new(self.cli.seed))?;

        let total_cells = config.width.saturating_mul(config.height);
        let progress = self
            .cli
            .should_show_progress()
            .then(|| FillProgress::new(total_cells));
        let capture = self
            .cli
            .visualize
            .then(|| FillCapture::new(config.width, config.height, tiles.palette()));

        let mut observer = (progress, capture);
        let result = scheduler.run(&mut observer);
        let (progress, capture) = observer;
        if let Some(progress) = &progress {
            progress.finish();
        }
        let (grid, report) = result?;

        if self.cli.print_grid {
            print!("{}", format_grid(&grid));
            print!("{}", render_preview(&grid, &tiles.palette()));
        }

        let canvas = composite(&grid, &tiles)?;
        export_canvas(&canvas, &self.cli.output)?;

        if let Some(capture) = &capture {
            capture.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
        }

        if !self.cli.quiet {
            eprintln!(
                "Filled {}x{} grid in {} iterations ({} blocked, {} cleared, {} resets) -> {}",
                config.width,
                config.height,
                report.iterations,
                report.blocked,
                report.cleared,
                report.resets,
                self.cli.output.display()
            );
        }

        Ok(report)
    }
}
