use crate::{
    algorithm::cell::Cell,
    spatial::{
        direction::{DIRECTION_COUNT, Direction},
        grid::GridShape,
        tiles::Palette,
    },
};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Owner of every cell in the output grid
///
/// Neighbour relations are resolved through the `GridShape`, so a cell never
/// holds a handle to another cell. Bans travel from a cell to its neighbours
/// as support-count notifications.
#[derive(Clone, Debug)]
pub struct CellGrid {
    shape: GridShape,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocate the grid and seed every cell's support counts from the palette
    ///
    /// Support in a direction is only seeded when a neighbour exists there;
    /// border cells keep zero counters towards the outside. A tile with no
    /// supporter towards an existing neighbour is banned straight away, so the
    /// grid may start with pending bans.
    pub fn new(shape: GridShape, palette: &Palette) -> Self {
        // Support every tile would receive from a neighbour on each side
        let mut interior = Cell::new(palette.len());
        for tile in palette {
            for direction in Direction::ALL {
                for &compatible in tile.compatible(direction) {
                    interior.notify_compatible(compatible, direction.opposite());
                }
            }
        }

        let unsupported: [Vec<usize>; DIRECTION_COUNT] = Direction::ALL.map(|direction| {
            (0..palette.len())
                .filter(|&tile| interior.compatible_count(tile, direction) == 0)
                .collect()
        });

        let cells = (0..shape.len())
            .map(|index| {
                let mut cell = interior.clone();
                for direction in Direction::ALL {
                    if shape.neighbor(index, direction).is_none() {
                        cell.clear_support(direction);
                    } else if let Some(tiles) = unsupported.get(direction.index()) {
                        for &tile in tiles {
                            cell.ban(tile);
                        }
                    }
                }
                cell
            })
            .collect();

        Self { shape, cells }
    }

    /// Grid geometry
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to all cells in row-major order
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cell at a row-major index
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Mutable cell at a row-major index
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Drain one cell's pending bans, last banned first
    ///
    /// Each popped tile withdraws its support from the matching tiles of every
    /// existing neighbour. Bans this causes inside the neighbours are queued
    /// there, not drained here.
    pub fn propagate_bans(&mut self, index: usize, palette: &Palette) {
        while let Some(tile) = self.cells.get_mut(index).and_then(Cell::pop_pending_ban) {
            let Some(banned) = palette.get(tile) else {
                continue;
            };

            for direction in Direction::ALL {
                let Some(target) = self
                    .shape
                    .neighbor(index, direction)
                    .and_then(|neighbor| self.cells.get_mut(neighbor))
                else {
                    continue;
                };

                for &compatible in banned.compatible(direction) {
                    target.notify_ban(compatible, direction.opposite());
                }
            }
        }
    }

    /// Propagate until no cell has pending bans
    ///
    /// Only cells with work are visited: the queue starts with every cell that
    /// has pending bans, in row-major order, and a neighbour is enqueued when
    /// draining a cell leaves bans pending in it. The fixpoint reached does not
    /// depend on visiting order.
    ///
    /// Returns the number of cells drained.
    pub fn propagate(&mut self, palette: &Palette) -> usize {
        let mut queued = bitvec![0; self.cells.len()];
        let mut queue: VecDeque<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.has_pending_bans())
            .map(|(index, _)| index)
            .collect();
        for &index in &queue {
            queued.set(index, true);
        }

        let mut drained = 0;
        while let Some(index) = queue.pop_front() {
            queued.set(index, false);
            self.propagate_bans(index, palette);
            drained += 1;

            for direction in Direction::ALL {
                let Some(neighbor) = self.shape.neighbor(index, direction) else {
                    continue;
                };
                let pending = self
                    .cells
                    .get(neighbor)
                    .is_some_and(Cell::has_pending_bans);
                if pending && queued.get(neighbor).as_deref() == Some(&false) {
                    queued.set(neighbor, true);
                    queue.push_back(neighbor);
                }
            }
        }

        drained
    }

    /// Whether any cell still has bans to propagate
    pub fn has_pending_bans(&self) -> bool {
        self.cells.iter().any(Cell::has_pending_bans)
    }
}
