use block_grid::cli::{self, USAGE};
use block_grid::display::{format_count_label, group_status};
use block_grid::{
    AppConfig, CellGrid, ComponentFinder, Coordinate, GridModel, GridResult, GroupResult,
};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::time::Duration;

// Screen rows above the grid (title + blank line)
const GRID_TOP: u16 = 2;
// Screen rows below the grid (blank line + status, metrics, help)
const STATUS_LINES: u16 = 4;
// Terminal columns per grid cell
const CELL_WIDTH: u16 = 2;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How much of the screen an event invalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redraw {
    Skip,
    Status,
    Full,
}

struct App {
    config: AppConfig,
    model: GridModel,
    finder: ComponentFinder,
    hover: Option<GroupResult>,
    /// Clicked blocks and the size of their group
    labels: HashMap<Coordinate, usize>,
    /// Terminal size as (columns, rows)
    viewport: (u16, u16),
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig, viewport: (u16, u16)) -> GridResult<Self> {
        let model = GridModel::create(&config.grid)?;
        Ok(Self {
            config,
            model,
            finder: ComponentFinder::new(),
            hover: None,
            labels: HashMap::new(),
            viewport,
            should_quit: false,
        })
    }

    /// Grid columns that fit on screen
    fn visible_columns(&self) -> u16 {
        let fit = self.viewport.0 / CELL_WIDTH;
        u16::try_from(self.model.width()).map_or(fit, |w| w.min(fit))
    }

    /// Grid rows that fit on screen
    fn visible_rows(&self) -> u16 {
        let fit = self.viewport.1.saturating_sub(GRID_TOP + STATUS_LINES);
        u16::try_from(self.model.height()).map_or(fit, |h| h.min(fit))
    }

    /// Fresh random grid of the same size
    fn regenerate(&mut self) -> GridResult<()> {
        self.model = GridModel::random(self.model.width(), self.model.height(), None)?;
        self.finder.invalidate();
        self.hover = None;
        self.labels.clear();
        info!("Regenerated {}x{} grid", self.model.width(), self.model.height());
        Ok(())
    }

    /// Grid cell under a terminal position, if it is drawn
    fn cell_under(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        let y = row.checked_sub(GRID_TOP)?;
        let x = column / CELL_WIDTH;
        if x < self.visible_columns() && y < self.visible_rows() {
            Some((i32::from(x), i32::from(y)))
        } else {
            None
        }
    }

    fn hover_at(&mut self, x: i32, y: i32) -> GridResult<()> {
        let result = self.finder.query_group(&self.model, x, y)?;
        self.hover = if result.is_empty() { None } else { Some(result) };
        Ok(())
    }

    /// Pin the group size onto a clicked block. Background cells and blocks
    /// that already carry a label are left alone.
    fn label_at(&mut self, x: i32, y: i32) -> GridResult<bool> {
        let result = self.finder.query_group(&self.model, x, y)?;
        if result.is_empty() {
            return Ok(false);
        }
        let coord = self.model.validate_coordinates(x, y)?;
        if self.labels.contains_key(&coord) {
            return Ok(false);
        }
        debug!("Labelled {} with group size {}", coord, result.count);
        self.labels.insert(coord, result.count);
        Ok(true)
    }

    /// Recount every label after the grid changed; labels on cells that are no longer blocks go away
    fn refresh_labels(&mut self) -> GridResult<()> {
        let coords: Vec<Coordinate> = self.labels.keys().copied().collect();
        for coord in coords {
            let (x, y) = (coord.x as i32, coord.y as i32);
            let result = self.finder.query_group(&self.model, x, y)?;
            if result.is_empty() {
                self.labels.remove(&coord);
            } else {
                self.labels.insert(coord, result.count);
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> GridResult<Redraw> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true
                }
                KeyCode::Char('r') => {
                    self.regenerate()?;
                    return Ok(Redraw::Full);
                }
                KeyCode::Char('i') => {
                    self.finder.invalidate();
                    self.hover = None;
                    return Ok(Redraw::Full);
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                let cell = self.cell_under(mouse.column, mouse.row);
                match (mouse.kind, cell) {
                    (MouseEventKind::Moved, Some((x, y))) => {
                        let previous = self.hover.as_ref().and_then(|h| h.group_id);
                        self.hover_at(x, y)?;
                        let current = self.hover.as_ref().and_then(|h| h.group_id);
                        // Same group: only the query counters changed
                        return Ok(if previous == current {
                            Redraw::Status
                        } else {
                            Redraw::Full
                        });
                    }
                    (MouseEventKind::Moved, None) => {
                        return Ok(if self.hover.take().is_some() {
                            Redraw::Full
                        } else {
                            Redraw::Skip
                        });
                    }
                    (MouseEventKind::Down(MouseButton::Left), Some((x, y))) => {
                        return Ok(if self.label_at(x, y)? {
                            Redraw::Full
                        } else {
                            Redraw::Status
                        });
                    }
                    (MouseEventKind::Down(MouseButton::Right), Some((x, y))) => {
                        let state = self.model.toggle(x, y)?;
                        debug!("Toggled ({}, {}) to {:?}", x, y, state);
                        self.refresh_labels()?;
                        self.hover_at(x, y)?;
                        return Ok(Redraw::Full);
                    }
                    _ => {}
                }
            }
            Event::Resize(columns, rows) => {
                self.viewport = (columns, rows);
                return Ok(Redraw::Full);
            }
            _ => {}
        }
        Ok(Redraw::Skip)
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let display = &self.config.display;
        let highlighted: HashSet<Coordinate> = self
            .hover
            .as_ref()
            .map(|h| h.cells.iter().copied().collect())
            .unwrap_or_default();
        let (columns, rows) = (self.visible_columns(), self.visible_rows());

        let mut title = format!(
            "Block Grid {}x{} - {} blocks",
            self.model.width(),
            self.model.height(),
            self.model.block_count()
        );
        if usize::from(columns) < self.model.width() || usize::from(rows) < self.model.height() {
            title.push_str(&format!(" (showing {}x{})", columns, rows));
        }

        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        queue!(
            out,
            SetForegroundColor(display.hover_color),
            Print(title),
            ResetColor
        )?;

        for row in 0..rows {
            for column in 0..columns {
                let coord = Coordinate::new(usize::from(column), usize::from(row));
                let color = if highlighted.contains(&coord) {
                    display.hover_color
                } else if self.model.is_block(column.into(), row.into()).unwrap_or(false) {
                    display.block_color
                } else {
                    display.background_color
                };
                let text = self
                    .labels
                    .get(&coord)
                    .map(|&count| format_count_label(count))
                    .unwrap_or_else(|| " ".repeat(usize::from(CELL_WIDTH)));
                queue!(
                    out,
                    cursor::MoveTo(column * CELL_WIDTH, GRID_TOP + row),
                    SetBackgroundColor(color),
                    SetForegroundColor(display.label_color),
                    Print(text)
                )?;
            }
        }
        queue!(out, ResetColor)?;

        self.draw_status(out)
    }

    /// Redraw only the lines below the grid
    fn draw_status(&self, out: &mut impl Write) -> io::Result<()> {
        let display = &self.config.display;
        let status_row = GRID_TOP + self.visible_rows() + 1;
        let status = match &self.hover {
            Some(result) => group_status(result.group_id, result.count),
            None => "Hover over a block to see its group".to_string(),
        };
        queue!(
            out,
            cursor::MoveTo(0, status_row),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(display.hover_color),
            Print(status),
            ResetColor,
            cursor::MoveTo(0, status_row + 1),
            Clear(ClearType::CurrentLine),
            Print(self.finder.metrics().summary()),
            cursor::MoveTo(0, status_row + 2),
            Clear(ClearType::CurrentLine),
            Print("click: label size | right-click: toggle | r: new grid | i: clear cache | q: quit")
        )?;

        out.flush()
    }
}

fn run(app: &mut App, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    app.draw(out)?;
    while !app.should_quit {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match app.handle_event(event::read()?)? {
            Redraw::Full => app.draw(out)?,
            Redraw::Status => app.draw_status(out)?,
            Redraw::Skip => {}
        }
    }
    Ok(())
}

fn show_help() {
    println!("Usage: block_grid {}", USAGE);
    println!();
    println!("Hover over a block to highlight every block connected to it.");
    println!("Click a block to pin its group size onto it.");
    println!("Right-click toggles a cell, 'r' generates a new grid, 'q' quits.");
    println!();
    println!("Environment: BLOCK_GRID_WIDTH, BLOCK_GRID_HEIGHT, BLOCK_GRID_SEED, RUST_LOG");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Anything chattier than errors would tear the alternate screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let args = cli::parse_args(std::env::args().skip(1))?;
    if args.help {
        show_help();
        return Ok(());
    }

    let mut app = App::new(args.to_config()?, terminal::size()?)?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let result = run(&mut app, &mut stdout);

    // Restore the terminal before reporting anything
    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    println!("{}", app.finder.metrics().summary());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_grid::{CellState, DisplayConfig, GridConfig};
    use crossterm::event::{KeyEvent, MouseEvent};

    fn app(pattern: &str) -> App {
        let config = AppConfig {
            grid: GridConfig::default().with_pattern(pattern),
            display: DisplayConfig::default(),
        };
        App::new(config, (80, 24)).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_pointer_maps_to_cells() {
        let app = app("#.#\n...\n#.#");

        assert_eq!(app.cell_under(0, GRID_TOP), Some((0, 0)));
        assert_eq!(app.cell_under(1, GRID_TOP), Some((0, 0)));
        assert_eq!(app.cell_under(2, GRID_TOP + 1), Some((1, 1)));
        assert_eq!(app.cell_under(5, GRID_TOP + 2), Some((2, 2)));

        assert_eq!(app.cell_under(0, 0), None);
        assert_eq!(app.cell_under(6, GRID_TOP), None);
        assert_eq!(app.cell_under(0, GRID_TOP + 3), None);
    }

    #[test]
    fn test_hover_redraws_on_group_change_only() {
        let mut app = app("##.\n...\n..#");

        let redraw = app.handle_event(mouse(MouseEventKind::Moved, 0, GRID_TOP)).unwrap();
        assert_eq!(redraw, Redraw::Full);
        assert_eq!(app.hover.as_ref().map(|h| h.count), Some(2));

        // Same group: status line still refreshes so the counters stay current
        let redraw = app.handle_event(mouse(MouseEventKind::Moved, 2, GRID_TOP)).unwrap();
        assert_eq!(redraw, Redraw::Status);
        assert_eq!(app.finder.metrics().cache_hits, 1);

        let redraw = app.handle_event(mouse(MouseEventKind::Moved, 4, GRID_TOP)).unwrap();
        assert_eq!(redraw, Redraw::Full);
        assert!(app.hover.is_none());

        let redraw = app.handle_event(mouse(MouseEventKind::Moved, 0, 0)).unwrap();
        assert_eq!(redraw, Redraw::Skip);

        app.handle_event(mouse(MouseEventKind::Moved, 4, GRID_TOP + 2)).unwrap();
        let redraw = app.handle_event(mouse(MouseEventKind::Moved, 0, 0)).unwrap();
        assert_eq!(redraw, Redraw::Full);
        assert!(app.hover.is_none());
    }

    #[test]
    fn test_click_labels_block_with_group_size() {
        let mut app = app("##.\n...\n..#");
        let left = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(app.handle_event(mouse(left, 0, GRID_TOP)).unwrap(), Redraw::Full);
        assert_eq!(app.labels.get(&Coordinate::new(0, 0)), Some(&2));

        // Once per block
        assert_eq!(app.handle_event(mouse(left, 1, GRID_TOP)).unwrap(), Redraw::Status);
        assert_eq!(app.labels.len(), 1);

        // Background cells never get a label and are not changed
        app.handle_event(mouse(left, 4, GRID_TOP)).unwrap();
        assert_eq!(app.labels.len(), 1);
        assert_eq!(app.model.block_count(), 3);

        app.handle_event(mouse(left, 4, GRID_TOP + 2)).unwrap();
        assert_eq!(app.labels.get(&Coordinate::new(2, 2)), Some(&1));
    }

    #[test]
    fn test_right_click_toggles_and_recounts_labels() {
        let mut app = app("##.\n...\n..#");
        let left = MouseEventKind::Down(MouseButton::Left);
        let right = MouseEventKind::Down(MouseButton::Right);

        app.handle_event(mouse(left, 0, GRID_TOP)).unwrap();
        assert_eq!(app.handle_event(mouse(right, 4, GRID_TOP)).unwrap(), Redraw::Full);
        assert_eq!(app.model.cell_at(2, 0).unwrap(), CellState::Block);
        assert_eq!(app.labels.get(&Coordinate::new(0, 0)), Some(&3));
        assert_eq!(app.hover.as_ref().map(|h| h.count), Some(3));

        app.handle_event(mouse(right, 0, GRID_TOP)).unwrap();
        assert!(app.labels.is_empty());
    }

    #[test]
    fn test_keys() {
        let mut app = app("##\n..");
        app.handle_event(mouse(MouseEventKind::Moved, 0, GRID_TOP)).unwrap();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, GRID_TOP))
            .unwrap();

        assert_eq!(app.handle_event(key('i')).unwrap(), Redraw::Full);
        assert_eq!(app.finder.group_count(), 0);
        assert!(app.hover.is_none());
        assert_eq!(app.labels.len(), 1);

        assert_eq!(app.handle_event(key('r')).unwrap(), Redraw::Full);
        assert!(app.labels.is_empty());
        assert_eq!((app.model.width(), app.model.height()), (2, 2));

        assert_eq!(app.handle_event(key('x')).unwrap(), Redraw::Skip);
        assert!(!app.should_quit);
        app.handle_event(key('q')).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_drawing_is_clamped_to_viewport() {
        let config = AppConfig {
            grid: GridConfig::new(70_000, 3).with_seed(5),
            display: DisplayConfig::default(),
        };
        let mut app = App::new(config, (20, 10)).unwrap();
        assert_eq!((app.visible_columns(), app.visible_rows()), (10, 3));
        assert_eq!(app.cell_under(19, GRID_TOP + 2), Some((9, 2)));
        assert_eq!(app.cell_under(20, GRID_TOP), None);

        let mut screen = Vec::new();
        app.draw(&mut screen).unwrap();
        assert!(String::from_utf8_lossy(&screen).contains("(showing 10x3)"));

        assert_eq!(app.handle_event(Event::Resize(8, 7)).unwrap(), Redraw::Full);
        assert_eq!((app.visible_columns(), app.visible_rows()), (4, 1));
        assert_eq!(app.cell_under(0, GRID_TOP + 1), None);
    }
}
