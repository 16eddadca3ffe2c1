//! Tests for grid wiring and ban propagation

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::propagation::CellGrid;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::GridShape;
    use tilecollapse::spatial::tiles::{Palette, Pattern, Tile};

    fn tile(pixel: u8, adjacency: [Vec<usize>; 4]) -> Tile {
        let pattern = Pattern::new(vec![pixel], None).expect("1x1 pattern");
        Tile::new(pattern, 1.0, adjacency).expect("valid tile")
    }

    /// Tiles 0 and 1 each only tolerate themselves, in every direction
    fn two_regions() -> Palette {
        Palette::new(vec![
            tile(1, [vec![0], vec![0], vec![0], vec![0]]),
            tile(2, [vec![1], vec![1], vec![1], vec![1]]),
        ])
        .expect("valid palette")
    }

    fn grid(width: usize, height: usize, palette: &Palette) -> CellGrid {
        CellGrid::new(
            GridShape::new(width, height).expect("valid shape"),
            palette,
        )
    }

    // Tests support is only seeded towards neighbours that exist
    // Verified by seeding every direction of every cell
    #[test]
    fn test_wiring_seeds_support_from_neighbors() {
        let palette = two_regions();
        let cells = grid(2, 2, &palette);

        let corner = cells.cell(0).expect("cell 0");
        assert_eq!(corner.compatible_count(0, Direction::Right), 1);
        assert_eq!(corner.compatible_count(0, Direction::Down), 1);
        assert_eq!(corner.compatible_count(0, Direction::Left), 0);
        assert_eq!(corner.compatible_count(0, Direction::Up), 0);
        assert_eq!(cells.cells().len(), 4);
    }

    // Tests the counters count every supporting tile
    #[test]
    fn test_wiring_counts_all_supporters() {
        let palette = Palette::new(vec![
            tile(1, [vec![0, 1], vec![], vec![0], vec![]]),
            tile(2, [vec![], vec![], vec![0], vec![]]),
        ])
        .expect("valid palette");
        let cells = grid(2, 1, &palette);

        // Tile 0 in the right cell is supported by tiles 0 and 1 on its left
        let right = cells.cell(1).expect("cell 1");
        assert_eq!(right.compatible_count(0, Direction::Left), 1);
        assert_eq!(right.compatible_count(1, Direction::Left), 1);
        let left = cells.cell(0).expect("cell 0");
        assert_eq!(left.compatible_count(0, Direction::Right), 2);
        assert_eq!(left.compatible_count(1, Direction::Right), 0);
    }

    // Tests tiles without support towards an existing neighbour are banned at wiring
    // Verified by only banning when a counter drops from 1 to 0
    #[test]
    fn test_wiring_bans_unsupported_tiles() {
        let palette = Palette::new(vec![
            tile(1, [vec![0], vec![], vec![0], vec![]]),
            tile(2, [vec![], vec![], vec![], vec![]]),
        ])
        .expect("valid palette");

        let cells = grid(2, 1, &palette);
        for index in 0..2 {
            let cell = cells.cell(index).expect("cell");
            assert_eq!(cell.resolved(), Some(0));
            assert!(cell.has_pending_bans());
        }

        // A lone cell has no neighbour to lack support from
        let lone = grid(1, 1, &palette);
        assert_eq!(lone.cell(0).expect("cell 0").count(), 2);
        assert!(!lone.has_pending_bans());
    }

    // Tests pruning at wiring can empty a cell, and propagation carries it to the neighbours
    #[test]
    fn test_wiring_pruning_propagates() {
        // Chain 0 -> 1 -> 2 to the right, too short for four columns
        let palette = Palette::new(vec![
            tile(1, [vec![1], vec![], vec![], vec![]]),
            tile(2, [vec![2], vec![], vec![0], vec![]]),
            tile(3, [vec![], vec![], vec![1], vec![]]),
        ])
        .expect("valid palette");
        let mut cells = grid(4, 1, &palette);

        assert_eq!(cells.cell(1).expect("cell 1").resolved(), Some(1));
        assert_eq!(cells.cell(2).expect("cell 2").resolved(), Some(1));
        cells.propagate(&palette);
        assert!(cells.cells().iter().any(|cell| cell.count() == 0));
    }

    // Tests draining one cell only queues bans in its neighbours
    // Verified by propagating recursively inside propagate_bans
    #[test]
    fn test_propagate_bans_queues_in_neighbors() {
        let palette = two_regions();
        let mut cells = grid(3, 1, &palette);

        cells.cell_mut(0).expect("cell 0").ban(1);
        cells.propagate_bans(0, &palette);

        assert!(!cells.cell(0).expect("cell 0").has_pending_bans());
        let middle = cells.cell(1).expect("cell 1");
        assert!(!middle.is_possible(1));
        assert!(middle.has_pending_bans());
        assert!(cells.cell(2).expect("cell 2").is_possible(1));
    }

    // Tests the fixpoint reaches every cell in a chain
    // Verified by draining only the initially pending cells
    #[test]
    fn test_propagate_reaches_fixpoint() {
        let palette = two_regions();
        let mut cells = grid(4, 3, &palette);

        cells.cell_mut(5).expect("cell 5").ban(0);
        let drained = cells.propagate(&palette);

        assert!(drained >= 12);
        assert!(!cells.has_pending_bans());
        assert!(cells.cells().iter().all(|cell| cell.resolved() == Some(1)));
    }

    // Tests propagation with nothing pending does nothing
    #[test]
    fn test_propagate_without_bans() {
        let palette = two_regions();
        let mut cells = grid(2, 2, &palette);
        assert_eq!(cells.propagate(&palette), 0);
        assert!(cells.cells().iter().all(|cell| cell.count() == 2));
    }

    // Tests incompatible choices in two cells empty the cells between them
    #[test]
    fn test_conflicting_bans_empty_cells() {
        let palette = two_regions();
        let mut cells = grid(3, 1, &palette);

        cells.cell_mut(0).expect("cell 0").ban(1);
        cells.cell_mut(2).expect("cell 2").ban(0);
        cells.propagate(&palette);

        assert!(cells.cells().iter().any(|cell| cell.count() == 0));
        assert_eq!(cells.shape().width(), 3);
    }
}
