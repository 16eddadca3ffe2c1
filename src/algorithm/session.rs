//! The observe/propagate solve loop over one output grid
//!
//! A session is single-use: once it reaches `Solved` or `Contradicted` it
//! stays there. Retrying means building a new session with another seed.

use crate::{
    algorithm::{
        cell::Cell,
        propagation::CellGrid,
        selection::{Observation, select_lowest_entropy},
    },
    io::configuration::UNRESOLVED_PIXEL,
    spatial::{
        grid::GridShape,
        tiles::{Palette, Tile},
    },
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, instrument, trace};

/// Signal returned by a single solve step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and its consequences propagated
    Continue,
    /// Every cell holds exactly one tile
    Succeeded,
    /// Some cell has no possible tile left
    Failed,
}

/// Result of driving a session for a bounded number of steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every cell holds exactly one tile
    Succeeded,
    /// A contradiction was reached
    Failed,
    /// The step budget ran out before either terminal state
    Incomplete,
}

impl RunOutcome {
    /// Whether the run produced a complete result
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Still collapsing cells
    Unsolved,
    /// Terminal: every cell resolved
    Solved,
    /// Terminal: a cell ran out of tiles
    Contradicted,
}

/// One seeded solve over a fixed palette and grid
#[derive(Clone, Debug)]
pub struct Session {
    palette: Palette,
    grid: CellGrid,
    rng: StdRng,
    state: SessionState,
    observed: Option<Box<[usize]>>,
    steps: usize,
}

impl Session {
    /// Wire a fresh grid and propagate the bans of unsupported tiles
    ///
    /// A cell left empty by this makes the first `observe` report `Failed`.
    pub fn new(palette: Palette, shape: GridShape, seed: u64) -> Self {
        let mut grid = CellGrid::new(shape, &palette);
        let drained = grid.propagate(&palette);
        debug!(
            tiles = palette.len(),
            width = shape.width(),
            height = shape.height(),
            seed,
            drained,
            "Initialized session"
        );

        Self {
            palette,
            grid,
            rng: StdRng::seed_from_u64(seed),
            state: SessionState::Unsolved,
            observed: None,
            steps: 0,
        }
    }

    /// Collapse the lowest-entropy undecided cell, or detect a terminal state
    ///
    /// Bans made by the collapse are queued but not propagated. Once terminal,
    /// the terminal outcome is returned again without touching the grid.
    pub fn observe(&mut self) -> StepOutcome {
        match self.state {
            SessionState::Solved => return StepOutcome::Succeeded,
            SessionState::Contradicted => return StepOutcome::Failed,
            SessionState::Unsolved => {}
        }

        match select_lowest_entropy(self.grid.cells_mut(), &self.palette, &mut self.rng) {
            Observation::Contradiction { cell } => {
                let (x, y) = self.grid.shape().coordinate(cell);
                debug!(x, y, steps = self.steps, "Contradiction");
                self.state = SessionState::Contradicted;
                StepOutcome::Failed
            }
            Observation::Collapsed => {
                let observed: Option<Box<[usize]>> =
                    self.grid.cells().iter().map(Cell::resolved).collect();
                if observed.is_none() {
                    self.state = SessionState::Contradicted;
                    return StepOutcome::Failed;
                }

                debug!(steps = self.steps, "Solved");
                self.observed = observed;
                self.state = SessionState::Solved;
                StepOutcome::Succeeded
            }
            Observation::Candidate { cell, entropy } => {
                let chosen = self
                    .grid
                    .cell_mut(cell)
                    .and_then(|target| target.observe_random(&self.palette, &mut self.rng));
                trace!(cell, entropy, tile = ?chosen, "Observed");
                StepOutcome::Continue
            }
        }
    }

    /// Push every pending ban through the grid until none remain
    ///
    /// Returns the number of cells whose queues were drained.
    pub fn propagate(&mut self) -> usize {
        self.grid.propagate(&self.palette)
    }

    /// One observation followed, when it collapsed a cell, by propagation
    pub fn run_step(&mut self) -> StepOutcome {
        let outcome = self.observe();
        if outcome == StepOutcome::Continue {
            self.propagate();
            self.steps += 1;
        }
        outcome
    }

    /// Step until a terminal state or until `limit` steps were taken
    ///
    /// A `limit` of 0 means no limit. Detecting success costs one step of its
    /// own, so a grid that needs `k` collapses reports `Succeeded` within
    /// `k + 1` steps.
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn run(&mut self, limit: usize) -> RunOutcome {
        let mut taken = 0;
        while limit == 0 || taken < limit {
            match self.run_step() {
                StepOutcome::Continue => taken += 1,
                StepOutcome::Succeeded => return RunOutcome::Succeeded,
                StepOutcome::Failed => return RunOutcome::Failed,
            }
        }

        debug!(taken, "Step limit reached");
        RunOutcome::Incomplete
    }

    /// Representative pixel of each cell, row-major
    ///
    /// Cells that are not resolved to exactly one tile report
    /// `UNRESOLVED_PIXEL`. Safe to call at any point of the run.
    pub fn result(&self) -> Vec<u8> {
        self.grid
            .cells()
            .iter()
            .map(|cell| {
                cell.resolved()
                    .and_then(|tile| self.palette.get(tile))
                    .map_or(UNRESOLVED_PIXEL, Tile::representative)
            })
            .collect()
    }

    /// Palette index of each resolved cell, row-major
    pub fn resolved_indices(&self) -> Vec<Option<usize>> {
        self.grid.cells().iter().map(Cell::resolved).collect()
    }

    /// Number of tiles still possible in each cell, row-major
    pub fn possibility_counts(&self) -> Vec<usize> {
        self.grid.cells().iter().map(Cell::count).collect()
    }

    /// Resolved tile of every cell, available once solved
    pub fn observed(&self) -> Option<&[usize]> {
        self.observed.as_deref()
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of collapses performed so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Output width in cells
    pub const fn width(&self) -> usize {
        self.grid.shape().width()
    }

    /// Output height in cells
    pub const fn height(&self) -> usize {
        self.grid.shape().height()
    }

    /// The tiles cells are resolved against
    pub fn tiles(&self) -> &[Tile] {
        self.palette.tiles()
    }

    /// The shared palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The underlying grid of cells
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }
}
