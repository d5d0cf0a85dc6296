// Configuration for grid construction and display

pub mod app_config;
pub mod grid_config;

pub use app_config::{AppConfig, DisplayConfig};
pub use grid_config::{GridConfig, DEFAULT_GRID_WIDTH};
