use crate::config::GridConfig;
use crate::grid::{GridError, GridResult};
use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by the binaries: what grid to build and how to show it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub display: DisplayConfig,
}

/// Display and output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print column and row numbers around the grid
    pub show_headers: bool,
    /// Glyph drawn for a block cell (text output)
    pub block_glyph: String,
    /// Glyph drawn for background (text output)
    pub empty_glyph: String,
    /// Glyph drawn for a block in the highlighted group (text output)
    pub highlight_glyph: String,
    pub background_color: Color,
    pub block_color: Color,
    pub hover_color: Color,
    /// Text color of the group size labels left by clicks
    pub label_color: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_headers: true,
            block_glyph: "##".to_string(),
            empty_glyph: " .".to_string(),
            highlight_glyph: "@@".to_string(),
            background_color: Color::DarkGrey,
            block_color: Color::Blue,
            hover_color: Color::Yellow,
            label_color: Color::White,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load_from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> GridResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Defaults overridden by `BLOCK_GRID_WIDTH`, `BLOCK_GRID_HEIGHT` and `BLOCK_GRID_SEED`
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup("BLOCK_GRID_WIDTH").and_then(|v| v.parse().ok()) {
            self.grid.width = Some(width);
        }
        if let Some(height) = lookup("BLOCK_GRID_HEIGHT").and_then(|v| v.parse().ok()) {
            self.grid.height = Some(height);
        }
        if let Some(seed) = lookup("BLOCK_GRID_SEED").and_then(|v| v.parse().ok()) {
            self.grid.seed = Some(seed);
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> GridResult<()> {
        self.grid.validate()?;

        if self.grid.width() == 0 || self.grid.height() == 0 {
            return Err(GridError::Config(
                "Grid dimensions must be positive".to_string(),
            ));
        }

        let glyphs = [
            &self.display.block_glyph,
            &self.display.empty_glyph,
            &self.display.highlight_glyph,
        ];
        let glyph_width = self.display.block_glyph.chars().count();
        if glyph_width == 0 || glyphs.iter().any(|g| g.chars().count() != glyph_width) {
            return Err(GridError::Config(
                "Display glyphs must be non-empty and the same width".to_string(),
            ));
        }

        Ok(())
    }
}
