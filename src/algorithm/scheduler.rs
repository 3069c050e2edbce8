use crate::{
    algorithm::adjacency::{AdjacencyModel, Side, TileVariant},
    algorithm::deadlock::{StallAction, StallPolicy, StallTracker},
    algorithm::resolver::{CellResolver, ResolveResult},
    algorithm::selection::RandomSource,
    io::configuration::{
        DEFAULT_MAX_ITERATIONS, GRID_HEIGHT, GRID_WIDTH, MAX_GRID_CELLS, SEED_POSITION,
        SEED_VARIANT,
    },
    io::error::{Result, TileError, allocation_error, invalid_parameter},
    spatial::Grid,
};

/// Parameters of one fill run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Cell committed before the loop starts
    pub seed_position: (usize, usize),
    /// Variant committed at the seed cell
    pub seed_variant: TileVariant,
    /// Resolver invocations allowed before giving up
    pub max_iterations: usize,
    /// Reaction to repeated blocked resolutions
    pub stall_policy: StallPolicy,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            seed_position: SEED_POSITION,
            seed_variant: TileVariant::new(SEED_VARIANT),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stall_policy: StallPolicy::Retry,
        }
    }
}

impl FillConfig {
    /// Reference configuration resized to `width x height`
    ///
    /// Keeps the reference seed cell when it fits, otherwise seeds the center.
    pub fn for_grid(width: usize, height: usize) -> Self {
        let seed_position = if SEED_POSITION.0 < width && SEED_POSITION.1 < height {
            SEED_POSITION
        } else {
            (width / 2, height / 2)
        };

        Self {
            width,
            height,
            seed_position,
            ..Self::default()
        }
    }

    /// Check the configuration against `model`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either grid dimension is zero
    /// - The cell count overflows or exceeds `MAX_GRID_CELLS`
    /// - The seed cell lies outside the grid
    /// - The seed variant is not part of the model
    /// - The iteration cap is zero
    /// - A stall policy has a zero threshold
    pub fn validate(&self, model: &AdjacencyModel) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", self.width, self.height),
                &"grid dimensions must be positive",
            ));
        }

        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            Some(cells) => {
                return Err(allocation_error(
                    "grid",
                    &format!("{cells} cells exceed the limit of {MAX_GRID_CELLS}"),
                ));
            }
            None => {
                return Err(allocation_error(
                    "grid",
                    &format!("{}x{} cells overflow", self.width, self.height),
                ));
            }
        }

        if self.seed_position.0 >= self.width || self.seed_position.1 >= self.height {
            return Err(TileError::InvalidPosition {
                position: self.seed_position,
                dimensions: (self.width, self.height),
            });
        }

        model.variant(self.seed_variant.index())?;

        if self.max_iterations == 0 {
            return Err(invalid_parameter(
                "max_iterations",
                &self.max_iterations,
                &"at least one iteration is required",
            ));
        }

        if self.stall_policy.threshold() == Some(0) {
            return Err(invalid_parameter(
                "stall_after",
                &0,
                &"stall threshold must be positive",
            ));
        }

        Ok(())
    }
}

/// Counters collected over a fill run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Resolver invocations
    pub iterations: usize,
    /// Invocations that committed a variant (including overwrites)
    pub commits: usize,
    /// Invocations that were blocked
    pub blocked: usize,
    /// Grid resets triggered by the stall policy
    pub resets: usize,
    /// Committed cells unassigned by the stall policy
    pub cleared: usize,
}

/// Receives fill events as they happen
pub trait FillObserver {
    /// A variant was written to `(x, y)`; iteration 0 is the seed
    fn on_commit(&mut self, _x: usize, _y: usize, _variant: TileVariant, _iteration: usize) {}

    /// The grid was cleared before being reseeded
    fn on_reset(&mut self, _iteration: usize) {}

    /// The committed cell at `(x, y)` was unassigned
    fn on_clear(&mut self, _x: usize, _y: usize, _iteration: usize) {}

    /// A loop iteration finished with `unassigned` cells left
    fn on_iteration(&mut self, _iteration: usize, _unassigned: usize) {}
}

impl FillObserver for () {}

impl<T: FillObserver> FillObserver for Option<T> {
    fn on_commit(&mut self, x: usize, y: usize, variant: TileVariant, iteration: usize) {
        if let Some(observer) = self {
            observer.on_commit(x, y, variant, iteration);
        }
    }

    fn on_reset(&mut self, iteration: usize) {
        if let Some(observer) = self {
            observer.on_reset(iteration);
        }
    }

    fn on_clear(&mut self, x: usize, y: usize, iteration: usize) {
        if let Some(observer) = self {
            observer.on_clear(x, y, iteration);
        }
    }

    fn on_iteration(&mut self, iteration: usize, unassigned: usize) {
        if let Some(observer) = self {
            observer.on_iteration(iteration, unassigned);
        }
    }
}

impl<A: FillObserver, B: FillObserver> FillObserver for (A, B) {
    fn on_commit(&mut self, x: usize, y: usize, variant: TileVariant, iteration: usize) {
        self.0.on_commit(x, y, variant, iteration);
        self.1.on_commit(x, y, variant, iteration);
    }

    fn on_reset(&mut self, iteration: usize) {
        self.0.on_reset(iteration);
        self.1.on_reset(iteration);
    }

    fn on_clear(&mut self, x: usize, y: usize, iteration: usize) {
        self.0.on_clear(x, y, iteration);
        self.1.on_clear(x, y, iteration);
    }

    fn on_iteration(&mut self, iteration: usize, unassigned: usize) {
        self.0.on_iteration(iteration, unassigned);
        self.1.on_iteration(iteration, unassigned);
    }
}

/// Drives random cell resolution until the grid is complete
///
/// Each iteration picks a uniformly random cell, regardless of whether it
/// is already committed, and resolves it. Blocked results leave the grid
/// untouched and are handed to the stall policy. The grid is scanned after
/// every resolution and the loop ends when no cell is unassigned. A
/// committed cell that gets picked again is re-resolved from its current
/// neighbors and may change.
pub struct FillScheduler<'m, R> {
    resolver: CellResolver<'m>,
    config: FillConfig,
    rng: R,
    stall: StallTracker,
}

impl<'m, R: RandomSource> FillScheduler<'m, R> {
    /// Create a scheduler for `model`
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation against `model`
    pub fn new(model: &'m AdjacencyModel, config: FillConfig, rng: R) -> Result<Self> {
        config.validate(model)?;

        Ok(Self {
            resolver: CellResolver::new(model),
            config,
            rng,
            stall: StallTracker::new(config.stall_policy, config.width, config.height),
        })
    }

    /// The configuration in use
    pub const fn config(&self) -> &FillConfig {
        &self.config
    }

    /// A fresh grid holding only the seed commitment
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cell lies outside the grid
    pub fn seeded_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.config.width, self.config.height);
        self.seed(&mut grid)?;
        Ok(grid)
    }

    fn seed(&self, grid: &mut Grid) -> Result<()> {
        let (x, y) = self.config.seed_position;
        grid.commit(x, y, self.config.seed_variant)
    }

    /// Pick a cell and resolve it
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver rejects the drawn position
    pub fn step(&mut self, grid: &mut Grid) -> Result<((usize, usize), ResolveResult)> {
        let x = self.rng.int_inclusive(0, grid.width().saturating_sub(1));
        let y = self.rng.int_inclusive(0, grid.height().saturating_sub(1));
        let outcome = self.resolver.resolve(grid, x, y, &mut self.rng)?;
        Ok(((x, y), outcome))
    }

    /// Run the loop on `grid` until it is complete
    ///
    /// At least one resolution is performed even if `grid` starts complete.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The iteration cap is reached with unassigned cells left
    /// - A reset cannot reseed the grid
    /// - `grid` does not match the configured dimensions
    pub fn fill(&mut self, grid: &mut Grid, observer: &mut impl FillObserver) -> Result<FillReport> {
        if grid.dimensions() != (self.config.width, self.config.height) {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", grid.width(), grid.height()),
                &format!(
                    "expected a {}x{} grid",
                    self.config.width, self.config.height
                ),
            ));
        }

        let mut report = FillReport::default();
        let mut unassigned = grid.unassigned_count();

        loop {
            if report.iterations >= self.config.max_iterations {
                return Err(TileError::IterationLimit {
                    iterations: report.iterations,
                    unassigned,
                });
            }
            report.iterations += 1;

            let ((x, y), outcome) = self.step(grid)?;
            match outcome {
                ResolveResult::Committed(variant) => {
                    report.commits += 1;
                    observer.on_commit(x, y, variant, report.iterations);
                }
                ResolveResult::Blocked => report.blocked += 1,
            }

            match self.stall.record(x, y, outcome) {
                StallAction::Continue => {}
                StallAction::ResetGrid => {
                    grid.clear();
                    observer.on_reset(report.iterations);
                    self.seed(grid)?;
                    let (sx, sy) = self.config.seed_position;
                    observer.on_commit(sx, sy, self.config.seed_variant, report.iterations);
                    report.resets += 1;
                }
                StallAction::ClearAround { x: cx, y: cy } => {
                    for side in Side::ALL {
                        let Some((nx, ny)) = grid.neighbor(cx, cy, side) else {
                            continue;
                        };
                        if grid.unassign(nx, ny)? {
                            observer.on_clear(nx, ny, report.iterations);
                            report.cleared += 1;
                        }
                    }
                }
            }

            let remaining = grid.unassigned_count();
            if remaining < unassigned {
                self.stall.progress();
            }
            unassigned = remaining;

            observer.on_iteration(report.iterations, unassigned);
            if unassigned == 0 {
                return Ok(report);
            }
        }
    }

    /// Seed a new grid and fill it
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails or the iteration cap is reached
    pub fn run(&mut self, observer: &mut impl FillObserver) -> Result<(Grid, FillReport)> {
        let mut grid = self.seeded_grid()?;
        let (x, y) = self.config.seed_position;
        observer.on_commit(x, y, self.config.seed_variant, 0);

        let report = self.fill(&mut grid, observer)?;
        Ok((grid, report))
    }
}
