// Common traits and error types for grid implementations

use crate::grid::cell::{CellState, Coordinate};

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Supplied matrix or pattern does not match the declared dimensions
    Shape {
        expected_width: usize,
        expected_height: usize,
        reason: String,
    },
    /// Coordinate outside the grid extent
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    /// Configuration could not be loaded or is contradictory
    Config(String),
}

impl GridError {
    pub fn shape(expected_width: usize, expected_height: usize, reason: impl Into<String>) -> Self {
        GridError::Shape {
            expected_width,
            expected_height,
            reason: reason.into(),
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, GridError::Shape { .. })
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, GridError::OutOfBounds { .. })
    }
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Shape {
                expected_width,
                expected_height,
                reason,
            } => {
                write!(
                    f,
                    "Shape error: expected {}x{} grid, {}",
                    expected_width, expected_height, reason
                )
            }
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Coordinate ({}, {}) out of bounds for {}x{} grid",
                    x, y, width, height
                )
            }
            GridError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

/// Read access the component finder needs from a grid
pub trait CellGrid {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// State of an in-bounds cell
    fn cell(&self, coord: Coordinate) -> CellState;

    /// Changes whenever the cell contents change; cached results are only
    /// valid for the revision they were computed against
    fn revision(&self) -> u64;

    /// Validate signed coordinates against grid bounds
    fn validate_coordinates(&self, x: i32, y: i32) -> GridResult<Coordinate> {
        let (width, height) = (self.width(), self.height());
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            return Err(GridError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width,
                height,
            });
        }
        Ok(Coordinate::new(x as usize, y as usize))
    }

    fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::OutOfBounds {
            x: -1,
            y: 0,
            width: 3,
            height: 3,
        };
        assert_eq!(err.to_string(), "Coordinate (-1, 0) out of bounds for 3x3 grid");
        assert!(err.is_out_of_bounds());

        let err = GridError::shape(2, 2, "got 1 columns");
        assert_eq!(err.to_string(), "Shape error: expected 2x2 grid, got 1 columns");
        assert!(err.is_shape());
    }
}
