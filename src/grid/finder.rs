// Component finder - flood fill over block cells with a per-grid result cache
//
// A query on a block cell either hits the cache (the cell already belongs to
// a computed group) or runs one flood fill, which assigns the next group id
// and records membership for every cell it reached. Group ids are only
// meaningful for the grid revision they were computed against; a query on a
// different revision clears the cache first.

use crate::grid::cell::Coordinate;
use crate::grid::group::{Group, GroupId, GroupResult};
use crate::grid::metrics::QueryMetrics;
use crate::grid::traits::{CellGrid, GridResult};
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Computes and caches connected groups of block cells
#[derive(Debug, Default)]
pub struct ComponentFinder {
    /// Indexed by `GroupId`
    groups: Vec<Group>,
    membership: HashMap<Coordinate, GroupId>,
    /// Revision of the grid the cache describes; `None` while empty
    revision: Option<u64>,
    metrics: QueryMetrics,
}

impl ComponentFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group containing (x, y).
    ///
    /// Background cells give an empty result without touching the cache.
    pub fn query_group<G: CellGrid + ?Sized>(
        &mut self,
        grid: &G,
        x: i32,
        y: i32,
    ) -> GridResult<GroupResult> {
        let seed = grid.validate_coordinates(x, y)?;
        Ok(self.query_coordinate(grid, seed))
    }

    fn query_coordinate<G: CellGrid + ?Sized>(&mut self, grid: &G, seed: Coordinate) -> GroupResult {
        self.sync_revision(grid.revision());

        if !grid.cell(seed).is_block() {
            self.metrics.empty_queries += 1;
            trace!("Query {} is background", seed);
            return GroupResult::empty();
        }

        if let Some(&id) = self.membership.get(&seed) {
            self.metrics.cache_hits += 1;
            trace!("Query {} hit cached group #{}", seed, id);
            return GroupResult::from(&self.groups[id]);
        }

        let started = Instant::now();
        let cells = flood_fill(grid, seed);
        let elapsed = started.elapsed();

        let id = self.groups.len();
        for &coord in &cells {
            self.membership.insert(coord, id);
        }
        self.metrics.record_fill(cells.len(), elapsed);
        debug!(
            "Filled group #{} from {}: {} blocks in {:?}",
            id,
            seed,
            cells.len(),
            elapsed
        );

        let group = Group {
            id,
            cells: Arc::from(cells),
        };
        let result = GroupResult::from(&group);
        self.groups.push(group);
        result
    }

    fn sync_revision(&mut self, revision: u64) {
        match self.revision {
            Some(cached) if cached == revision => {}
            Some(cached) => {
                warn!(
                    "Grid changed (revision {} -> {}), dropping {} cached groups",
                    cached,
                    revision,
                    self.groups.len()
                );
                self.invalidate();
                self.revision = Some(revision);
            }
            None => self.revision = Some(revision),
        }
    }

    /// Forget every cached group and restart ids at 0
    pub fn invalidate(&mut self) {
        info!("Invalidating {} cached groups", self.groups.len());
        self.groups.clear();
        self.membership.clear();
        self.revision = None;
        self.metrics.invalidations += 1;
    }

    /// Query every block cell in scan order so the whole grid is partitioned.
    /// Returns the number of groups.
    pub fn label_all<G: CellGrid + ?Sized>(&mut self, grid: &G) -> usize {
        self.sync_revision(grid.revision());
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let coord = Coordinate::new(x, y);
                if grid.cell(coord).is_block() && !self.membership.contains_key(&coord) {
                    self.query_coordinate(grid, coord);
                }
            }
        }
        self.groups.len()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// Cached groups in id order
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Cached group of a cell, without filling
    pub fn group_id_at(&self, coord: Coordinate) -> Option<GroupId> {
        self.membership.get(&coord).copied()
    }

    pub fn metrics(&self) -> &QueryMetrics {
        &self.metrics
    }
}

/// Depth-first flood fill from `seed` over 4-connected block cells.
///
/// Uses an explicit stack; neighbors are pushed in reverse so cells come out
/// in the same order a recursive +x, -x, +y, -y walk would visit them.
/// Returns an empty list when `seed` is background.
pub fn flood_fill<G: CellGrid + ?Sized>(grid: &G, seed: Coordinate) -> Vec<Coordinate> {
    let width = grid.width();
    let mut visited = vec![false; width * grid.height()];
    let mut cells = Vec::new();
    let mut stack = vec![seed];

    while let Some(current) = stack.pop() {
        if !grid.contains(current) {
            continue;
        }
        let idx = current.y * width + current.x;
        if visited[idx] || !grid.cell(current).is_block() {
            continue;
        }

        visited[idx] = true;
        cells.push(current);
        stack.extend(current.neighbors().rev());
    }

    cells
}
