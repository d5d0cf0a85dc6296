// Grid model - dense, fixed-size matrix of block / empty cells

use crate::config::GridConfig;
use crate::grid::cell::{CellState, Coordinate};
use crate::grid::traits::{CellGrid, GridError, GridResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest grid `GridModel` will allocate
pub const MAX_GRID_CELLS: usize = 1 << 28;

// Process-wide so that two distinct models never share a revision
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Owns the cell data of one grid instance.
///
/// Cells are stored row-major (`y * width + x`). Every construction and every
/// effective mutation takes a fresh revision number, which is how a
/// `ComponentFinder` notices that its cache no longer describes this grid.
#[derive(Debug, Clone)]
pub struct GridModel {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    revision: u64,
}

impl GridModel {
    /// Build a grid from configuration: explicit pattern, explicit matrix, or random fill
    pub fn create(config: &GridConfig) -> GridResult<Self> {
        config.validate()?;

        let model = if let Some(pattern) = &config.pattern {
            let model = Self::from_pattern(pattern)?;
            let width_matches = config.width.map_or(true, |w| w == model.width);
            let height_matches = config.height.map_or(true, |h| h == model.height);
            if !width_matches || !height_matches {
                return Err(GridError::shape(
                    config.width(),
                    config.height(),
                    format!("pattern is {}x{}", model.width, model.height),
                ));
            }
            model
        } else if let Some(matrix) = &config.matrix {
            Self::from_columns(config.width(), config.height(), matrix)?
        } else {
            Self::random(config.width(), config.height(), config.seed)?
        };

        info!(
            "Created {}x{} grid with {} blocks (revision {})",
            model.width,
            model.height,
            model.block_count(),
            model.revision
        );
        Ok(model)
    }

    /// Each cell independently Block or Empty with probability 1/2
    pub fn random(width: usize, height: usize, seed: Option<u64>) -> GridResult<Self> {
        let count = Self::check_dimensions(width, height)?;
        let cells = match seed {
            Some(seed) => {
                debug!("Generating {}x{} grid from seed {}", width, height, seed);
                random_cells(&mut StdRng::seed_from_u64(seed), count)
            }
            None => random_cells(&mut rand::thread_rng(), count),
        };

        Ok(Self {
            width,
            height,
            cells,
            revision: next_revision(),
        })
    }

    /// Build from a column-major matrix: `matrix.len() == width`, every column `height` long
    pub fn from_columns(width: usize, height: usize, matrix: &[Vec<CellState>]) -> GridResult<Self> {
        let count = Self::check_dimensions(width, height)?;

        if matrix.len() != width {
            return Err(GridError::shape(
                width,
                height,
                format!("matrix has {} columns", matrix.len()),
            ));
        }
        if let Some((x, column)) = matrix.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(GridError::shape(
                width,
                height,
                format!("column {} has {} cells", x, column.len()),
            ));
        }

        let mut cells = vec![CellState::Empty; count];
        for (x, column) in matrix.iter().enumerate() {
            for (y, &state) in column.iter().enumerate() {
                cells[y * width + x] = state;
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            revision: next_revision(),
        })
    }

    /// Build from a text picture. One non-blank line per row, top row first.
    /// `#`, `B`, `1` are blocks; `.`, `E`, `0` are background; whitespace
    /// inside a line is ignored.
    pub fn from_pattern(pattern: &str) -> GridResult<Self> {
        let rows: Vec<Vec<char>> = pattern
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 {
            return Err(GridError::shape(0, 0, "pattern has no rows"));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::shape(
                    width,
                    height,
                    format!("row {} has {} cells", y, row.len()),
                ));
            }
            for (x, &glyph) in row.iter().enumerate() {
                let state = CellState::from_glyph(glyph).ok_or_else(|| {
                    GridError::shape(
                        width,
                        height,
                        format!("unknown glyph {:?} at ({}, {})", glyph, x, y),
                    )
                })?;
                cells.push(state);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            revision: next_revision(),
        })
    }

    /// Cell count for a `width` x `height` grid, rejecting empty and oversized shapes
    fn check_dimensions(width: usize, height: usize) -> GridResult<usize> {
        if width == 0 || height == 0 {
            return Err(GridError::shape(width, height, "dimensions must be positive"));
        }
        match width.checked_mul(height) {
            Some(count) if count <= MAX_GRID_CELLS => Ok(count),
            _ => Err(GridError::shape(
                width,
                height,
                format!("grid too large (limit {} cells)", MAX_GRID_CELLS),
            )),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> usize {
        coord.y * self.width + coord.x
    }

    pub fn cell_at(&self, x: i32, y: i32) -> GridResult<CellState> {
        let coord = self.validate_coordinates(x, y)?;
        Ok(self.cells[self.index(coord)])
    }

    pub fn is_block(&self, x: i32, y: i32) -> GridResult<bool> {
        self.cell_at(x, y).map(CellState::is_block)
    }

    /// Set a cell; returns whether the grid changed. Any change takes a new revision.
    pub fn set_cell(&mut self, x: i32, y: i32, state: CellState) -> GridResult<bool> {
        let coord = self.validate_coordinates(x, y)?;
        let idx = self.index(coord);
        if self.cells[idx] == state {
            return Ok(false);
        }

        self.cells[idx] = state;
        self.revision = next_revision();
        debug!("Cell {} set to {:?} (revision {})", coord, state, self.revision);
        Ok(true)
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, x: i32, y: i32) -> GridResult<CellState> {
        let state = self.cell_at(x, y)?.toggled();
        self.set_cell(x, y, state)?;
        Ok(state)
    }

    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_block()).count()
    }

    /// All coordinates in scan order (rows top to bottom, left to right)
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coordinate::new(x, y)))
    }
}

impl CellGrid for GridModel {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, coord: Coordinate) -> CellState {
        self.cells[self.index(coord)]
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

fn random_cells<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<CellState> {
    (0..count).map(|_| CellState::from(rng.gen_bool(0.5))).collect()
}
