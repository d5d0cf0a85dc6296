//! Block grid: connected-group discovery over a grid of block / background cells.
//!
//! `GridModel` owns the cells, `ComponentFinder` answers "which group is under
//! this cell" with a flood fill whose results are cached per grid revision.
//! The `display` module and the two binaries are the presentation side.

pub mod cli;
pub mod config;
pub mod display;
pub mod grid;

pub use config::{AppConfig, DisplayConfig, GridConfig};
pub use grid::{
    flood_fill, CellGrid, CellState, ComponentFinder, Coordinate, GridError, GridModel,
    GridResult, Group, GroupId, GroupResult, QueryMetrics, MAX_GRID_CELLS,
};
