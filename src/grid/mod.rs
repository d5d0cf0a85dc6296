// Grid module - cell model plus the connected-group engine that runs over it

pub mod cell;
pub mod finder;
pub mod group;
pub mod metrics;
pub mod model;
pub mod traits;

// Re-export the main grid types for easy access
pub use cell::{CellState, Coordinate};
pub use finder::{flood_fill, ComponentFinder};
pub use group::{Group, GroupId, GroupResult};
pub use metrics::QueryMetrics;
pub use model::{GridModel, MAX_GRID_CELLS};
pub use traits::{CellGrid, GridError, GridResult};

// Re-export common types used by all grids
pub use crate::config::GridConfig;
