use std::time::Duration;

/// Counters describing how a `ComponentFinder` has answered its queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMetrics {
    /// Flood fills run (cache misses on block cells)
    pub fills: u64,
    /// Queries answered from the cache
    pub cache_hits: u64,
    /// Queries on background cells
    pub empty_queries: u64,
    /// Times the cache was cleared, explicitly or after a grid change
    pub invalidations: u64,
    /// Cells visited across all fills
    pub cells_visited: u64,
    pub last_fill_time: Duration,
    pub peak_fill_time: Duration,
}

impl QueryMetrics {
    pub fn total_queries(&self) -> u64 {
        self.fills + self.cache_hits + self.empty_queries
    }

    /// Share of block-cell queries served without a fill
    pub fn hit_rate(&self) -> f64 {
        let block_queries = self.fills + self.cache_hits;
        if block_queries == 0 {
            0.0
        } else {
            self.cache_hits as f64 / block_queries as f64
        }
    }

    pub(crate) fn record_fill(&mut self, cells: usize, elapsed: Duration) {
        self.fills += 1;
        self.cells_visited += cells as u64;
        self.last_fill_time = elapsed;
        if elapsed > self.peak_fill_time {
            self.peak_fill_time = elapsed;
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} queries: {} fills, {} cache hits ({:.1}% hit rate), {} on background, {} invalidations, peak fill {:.3} ms",
            self.total_queries(),
            self.fills,
            self.cache_hits,
            self.hit_rate() * 100.0,
            self.empty_queries,
            self.invalidations,
            self.peak_fill_time.as_secs_f64() * 1000.0
        )
    }
}
