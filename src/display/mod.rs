// Display module - text rendering of grids and groups
// Both binaries and the tests go through these functions so output stays consistent

pub mod formatters;

pub use formatters::{
    column_headers, format_count_label, format_group_id, group_status, row_prefix,
};

use crate::config::DisplayConfig;
use crate::grid::{CellGrid, ComponentFinder, Coordinate, GridModel, GroupResult};
use std::collections::HashSet;

/// Render the grid as text, drawing the cells of `highlight` with the highlight glyph
pub fn render_grid(
    model: &GridModel,
    highlight: Option<&GroupResult>,
    config: &DisplayConfig,
) -> String {
    let highlighted: HashSet<Coordinate> = highlight
        .map(|result| result.cells.iter().copied().collect())
        .unwrap_or_default();

    render_with(model, config, |coord| {
        if !model.cell(coord).is_block() {
            config.empty_glyph.clone()
        } else if highlighted.contains(&coord) {
            config.highlight_glyph.clone()
        } else {
            config.block_glyph.clone()
        }
    })
}

/// Render the grid with every cached block tagged by its group id.
/// Blocks the finder has not labelled yet keep the plain block glyph.
pub fn render_groups(model: &GridModel, finder: &ComponentFinder, config: &DisplayConfig) -> String {
    render_with(model, config, |coord| {
        if !model.cell(coord).is_block() {
            return config.empty_glyph.clone();
        }
        match finder.group_id_at(coord) {
            Some(id) => format_group_id(id),
            None => config.block_glyph.clone(),
        }
    })
}

fn render_with<F>(model: &GridModel, config: &DisplayConfig, glyph: F) -> String
where
    F: Fn(Coordinate) -> String,
{
    let mut out = String::new();
    if config.show_headers {
        out.push_str(&column_headers(model.width()));
        out.push('\n');
    }

    for y in 0..model.height() {
        if config.show_headers {
            out.push_str(&row_prefix(y));
        }
        for x in 0..model.width() {
            out.push(' ');
            out.push_str(&glyph(Coordinate::new(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Print a grid with an optional highlighted group and title
pub fn display_grid(
    model: &GridModel,
    highlight: Option<&GroupResult>,
    config: &DisplayConfig,
    title: Option<&str>,
) {
    if let Some(title) = title {
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count()));
    }
    print!("{}", render_grid(model, highlight, config));
    if let Some(result) = highlight {
        println!("{}", group_status(result.group_id, result.count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_grid() {
        let model = GridModel::from_pattern("#.\n.#").unwrap();
        let text = render_grid(&model, None, &DisplayConfig::default());
        assert_eq!(text, "      0  1\n 0:  ##  .\n 1:   . ##\n");
    }

    #[test]
    fn test_render_highlight_without_headers() {
        let model = GridModel::from_pattern("##.\n..#").unwrap();
        let mut finder = ComponentFinder::new();
        let result = finder.query_group(&model, 0, 0).unwrap();

        let config = DisplayConfig {
            show_headers: false,
            ..DisplayConfig::default()
        };
        let text = render_grid(&model, Some(&result), &config);
        assert_eq!(text, " @@ @@  .\n  .  . ##\n");
    }

    #[test]
    fn test_render_groups() {
        let model = GridModel::from_pattern("#.#\n#..").unwrap();
        let mut finder = ComponentFinder::new();
        finder.query_group(&model, 2, 0).unwrap();

        let config = DisplayConfig {
            show_headers: false,
            ..DisplayConfig::default()
        };
        // (0, 0) not labelled yet
        assert_eq!(render_groups(&model, &finder, &config), " ##  .  0\n ##  .  .\n");

        finder.label_all(&model);
        assert_eq!(render_groups(&model, &finder, &config), "  1  .  0\n  1  .  .\n");
    }

    #[test]
    fn test_display_grid_does_not_panic() {
        let model = GridModel::random(4, 3, Some(5)).unwrap();
        display_grid(&model, None, &DisplayConfig::default(), Some("Test Grid"));
    }
}
