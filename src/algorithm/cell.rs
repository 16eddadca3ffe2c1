//! Belief state of a single grid position
//!
//! A cell tracks which tiles are still possible, how many tiles in each
//! neighbour still support each of its candidates, and the bans it has not yet
//! pushed to its neighbours. Cells never reference each other; the owning
//! `CellGrid` routes notifications between them.

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::selection::cumulative_choice;
use crate::math::entropy::weighted_entropy;
use crate::spatial::direction::{DIRECTION_COUNT, Direction};
use crate::spatial::tiles::Palette;
use rand::Rng;

/// Aggregates over a cell's remaining tiles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStatistics {
    /// Number of tiles still possible
    pub count: usize,
    /// Sum of the weights of the possible tiles
    pub sum_of_weights: f64,
    /// Sum of `w ln w` over the possible tiles
    pub sum_of_log_weights: f64,
    /// Weighted entropy of the possible tiles (0 when none remain)
    pub entropy: f64,
    /// The only remaining tile, when exactly one is left
    pub resolved: Option<usize>,
}

impl CellStatistics {
    /// Recompute every aggregate from a possibility set
    pub fn compute(possible: &TileBitset, palette: &Palette) -> Self {
        let mut count = 0;
        let mut sum_of_weights = 0.0;
        let mut sum_of_log_weights = 0.0;
        let mut last = None;

        for tile in possible.iter().filter_map(|index| palette.get(index)) {
            count += 1;
            sum_of_weights += tile.weight();
            sum_of_log_weights += tile.log_weight();
            last = Some(tile.index());
        }

        Self {
            count,
            sum_of_weights,
            sum_of_log_weights,
            entropy: weighted_entropy(sum_of_weights, sum_of_log_weights),
            resolved: last.filter(|_| count == 1),
        }
    }
}

/// One grid position's evolving set of candidate tiles
#[derive(Clone, Debug)]
pub struct Cell {
    possible: TileBitset,
    /// `compatible[direction][tile]`: tiles in the neighbour via `direction`
    /// that still allow `tile` here
    compatible: [Vec<u32>; DIRECTION_COUNT],
    /// Banned but not yet propagated; popped last-in first-out
    pending_bans: Vec<usize>,
    /// Memoized aggregates, cleared on every ban
    statistics: Option<CellStatistics>,
}

impl Cell {
    /// Create a cell where every tile is possible and no support is recorded
    pub fn new(tile_count: usize) -> Self {
        Self {
            possible: TileBitset::all(tile_count),
            compatible: std::array::from_fn(|_| vec![0; tile_count]),
            pending_bans: Vec::new(),
            statistics: None,
        }
    }

    /// The set of tiles still possible
    pub const fn possible(&self) -> &TileBitset {
        &self.possible
    }

    /// Whether `tile` is still a candidate
    pub fn is_possible(&self, tile: usize) -> bool {
        self.possible.contains(tile)
    }

    /// Number of tiles still possible
    pub fn count(&self) -> usize {
        self.statistics
            .map_or_else(|| self.possible.count(), |stats| stats.count)
    }

    /// The single remaining tile, if the cell is resolved
    pub fn resolved(&self) -> Option<usize> {
        match self.statistics {
            Some(stats) => stats.resolved,
            None => self.possible.first().filter(|_| self.possible.count() == 1),
        }
    }

    /// Aggregates over the remaining tiles, recomputed only after a ban
    pub fn statistics(&mut self, palette: &Palette) -> CellStatistics {
        if let Some(stats) = self.statistics {
            return stats;
        }

        let stats = CellStatistics::compute(&self.possible, palette);
        self.statistics = Some(stats);
        stats
    }

    /// Memoized aggregates, `None` when a ban has invalidated them
    pub const fn cached_statistics(&self) -> Option<&CellStatistics> {
        self.statistics.as_ref()
    }

    /// Current support count for `tile` from the neighbour via `direction`
    pub fn compatible_count(&self, tile: usize, direction: Direction) -> u32 {
        self.compatible
            .get(direction.index())
            .and_then(|counts| counts.get(tile))
            .copied()
            .unwrap_or(0)
    }

    /// Whether bans are waiting to be pushed to neighbours
    pub fn has_pending_bans(&self) -> bool {
        !self.pending_bans.is_empty()
    }

    /// Take the most recently banned tile that has not been propagated
    pub fn pop_pending_ban(&mut self) -> Option<usize> {
        self.pending_bans.pop()
    }

    /// Remove `tile` from the candidates and queue it for propagation
    ///
    /// Returns `false` and does nothing if the tile was already banned.
    pub fn ban(&mut self, tile: usize) -> bool {
        if !self.possible.remove(tile) {
            return false;
        }

        self.statistics = None;
        self.pending_bans.push(tile);
        true
    }

    /// A neighbour lost one supporter of `tile`; ban it once none remain
    ///
    /// Notifications for a counter that is already zero are stale and ignored.
    /// Returns whether this notification banned the tile.
    pub fn notify_ban(&mut self, tile: usize, direction: Direction) -> bool {
        let Some(count) = self
            .compatible
            .get_mut(direction.index())
            .and_then(|counts| counts.get_mut(tile))
        else {
            return false;
        };

        if *count == 0 {
            return false;
        }

        *count -= 1;
        *count == 0 && self.ban(tile)
    }

    /// Record one more supporter of `tile` in the neighbour via `direction`
    pub fn notify_compatible(&mut self, tile: usize, direction: Direction) {
        if let Some(count) = self
            .compatible
            .get_mut(direction.index())
            .and_then(|counts| counts.get_mut(tile))
        {
            *count += 1;
        }
    }

    /// Drop all support recorded from `direction`, for cells on the grid border
    pub fn clear_support(&mut self, direction: Direction) {
        if let Some(counts) = self.compatible.get_mut(direction.index()) {
            counts.fill(0);
        }
    }

    /// Collapse to one tile chosen with probability proportional to weight
    ///
    /// Every other remaining tile is banned and queued; propagation is left to
    /// the caller. Returns the chosen tile, or `None` if nothing was possible.
    pub fn observe_random<R>(&mut self, palette: &Palette, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let draw = rng.random::<f64>();
        let total = self.statistics(palette).sum_of_weights;

        let candidates = self
            .possible
            .iter()
            .filter_map(|index| palette.get(index).map(|tile| (index, tile.weight())));
        let selected = cumulative_choice(candidates, total, draw)?;

        let others: Vec<usize> = self.possible.iter().filter(|&i| i != selected).collect();
        for tile in others {
            self.ban(tile);
        }

        Some(selected)
    }
}
