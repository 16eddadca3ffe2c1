use crate::{algorithm::cell::Cell, io::configuration::ENTROPY_NOISE, spatial::tiles::Palette};
use rand::Rng;

/// Result of scanning the grid for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Observation {
    /// A cell has no possible tile left
    Contradiction {
        /// Row-major index of the first empty cell found
        cell: usize,
    },
    /// Every cell holds exactly one tile
    Collapsed,
    /// The undecided cell with the lowest (perturbed) entropy
    Candidate {
        /// Row-major index of the chosen cell
        cell: usize,
        /// Entropy including the tie-breaking noise
        entropy: f64,
    },
}

/// Pick the first candidate whose cumulative normalised weight exceeds `draw`
///
/// `draw` is expected in `[0, 1)`. When rounding leaves the running share short
/// of the draw the last candidate is taken. Returns `None` only when there are
/// no candidates.
pub fn cumulative_choice<I>(candidates: I, total_weight: f64, draw: f64) -> Option<usize>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut cumulative = 0.0;
    let mut last = None;

    for (index, weight) in candidates {
        cumulative += weight / total_weight;
        if cumulative > draw {
            return Some(index);
        }
        last = Some(index);
    }

    last
}

/// Find the undecided cell with minimal entropy, scanning in row-major order
///
/// A fresh noise sample is drawn for each cell that could beat the current
/// minimum, so near-equal entropies do not always favour the earliest cell.
/// The scan stops at the first cell with no possible tile.
pub fn select_lowest_entropy<R>(cells: &mut [Cell], palette: &Palette, rng: &mut R) -> Observation
where
    R: Rng + ?Sized,
{
    let mut min_entropy = f64::MAX;
    let mut argmin = None;

    for (index, cell) in cells.iter_mut().enumerate() {
        let stats = cell.statistics(palette);
        if stats.count == 0 {
            return Observation::Contradiction { cell: index };
        }

        if stats.count >= 2 && stats.entropy <= min_entropy {
            let noise = ENTROPY_NOISE * rng.random::<f64>();
            if stats.entropy + noise < min_entropy {
                min_entropy = stats.entropy + noise;
                argmin = Some(index);
            }
        }
    }

    argmin.map_or(Observation::Collapsed, |cell| Observation::Candidate {
        cell,
        entropy: min_entropy,
    })
}
