// Non-interactive report: partition a grid into groups and list them by size

use block_grid::cli::{self, USAGE};
use block_grid::display::{display_grid, format_group_id, render_groups};
use block_grid::{ComponentFinder, Group, GridModel};
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct GroupSummary<'a> {
    id: usize,
    size: usize,
    bounding_box: Option<(block_grid::Coordinate, block_grid::Coordinate)>,
    cells: &'a [block_grid::Coordinate],
}

#[derive(Serialize)]
struct Report<'a> {
    width: usize,
    height: usize,
    blocks: usize,
    groups: Vec<GroupSummary<'a>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("Usage: group_report {}", USAGE);
        return Ok(());
    }

    let config = args.to_config()?;
    let model = GridModel::create(&config.grid)?;
    let mut finder = ComponentFinder::new();
    let group_count = finder.label_all(&model);
    info!("{}", finder.metrics().summary());

    let mut groups: Vec<&Group> = finder.groups().collect();
    groups.sort_by(|a, b| b.size().cmp(&a.size()).then(a.id.cmp(&b.id)));

    if args.json {
        let report = Report {
            width: model.width(),
            height: model.height(),
            blocks: model.block_count(),
            groups: groups
                .iter()
                .map(|g| GroupSummary {
                    id: g.id,
                    size: g.size(),
                    bounding_box: g.bounding_box(),
                    cells: &g.cells,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let title = format!(
        "Block Grid {}x{} - {} blocks in {} groups",
        model.width(),
        model.height(),
        model.block_count(),
        group_count
    );
    display_grid(&model, None, &config.display, Some(&title));
    println!();
    print!("{}", render_groups(&model, &finder, &config.display));
    println!();

    println!("  id  size  bounds");
    for group in groups {
        let bounds = match group.bounding_box() {
            Some((min, max)) => format!("{} - {}", min, max),
            None => "-".to_string(),
        };
        println!("  {}  {:4}  {}", format_group_id(group.id), group.size(), bounds);
    }

    Ok(())
}
