// Grid shape and content configuration
use crate::grid::{CellState, GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GRID_WIDTH: usize = 10;

/// How a grid should be built.
///
/// With neither `matrix` nor `pattern` the grid is filled at random. `matrix`
/// is indexed `matrix[x][y]`: the outer vector has one entry per column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: Option<usize>,
    /// Defaults to `width` (square grid)
    pub height: Option<usize>,
    pub matrix: Option<Vec<Vec<CellState>>>,
    /// Text picture, one line per row, see `GridModel::from_pattern`
    pub pattern: Option<String>,
    /// Seed for reproducible random grids
    pub seed: Option<u64>,
}

impl GridConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_matrix(mut self, matrix: Vec<Vec<CellState>>) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn width(&self) -> usize {
        self.width.unwrap_or(DEFAULT_GRID_WIDTH)
    }

    pub fn height(&self) -> usize {
        self.height.unwrap_or_else(|| self.width())
    }

    /// `None` when the dimensions overflow `usize`
    pub fn cell_count(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    pub fn from_json_str(json: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject contradictory settings before any grid is built
    pub fn validate(&self) -> GridResult<()> {
        if self.matrix.is_some() && self.pattern.is_some() {
            return Err(GridError::Config(
                "`matrix` and `pattern` are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_square() {
        let config = GridConfig::default();
        assert_eq!(config.width(), 10);
        assert_eq!(config.height(), 10);

        let config: GridConfig = serde_json::from_str(r#"{"width": 7}"#).unwrap();
        assert_eq!((config.width(), config.height()), (7, 7));
        assert_eq!(config.cell_count(), Some(49));

        let config = GridConfig::new(usize::MAX, 2);
        assert_eq!(config.cell_count(), None);
    }

    #[test]
    fn test_matrix_from_json() {
        let config = GridConfig::from_json_str(
            r#"{"width": 2, "height": 3, "matrix": [[1, 0, 1], [0, 0, 1]], "seed": 9}"#,
        )
        .unwrap();
        let matrix = config.matrix.unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0][2], CellState::Block);
        assert_eq!(matrix[1][0], CellState::Empty);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_matrix_and_pattern_conflict() {
        let err =
            GridConfig::from_json_str(r##"{"matrix": [[1]], "pattern": "#"}"##).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = GridConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }
}
