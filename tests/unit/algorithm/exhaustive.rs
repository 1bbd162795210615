//! Tests for the bitmask depth-first search on small grids

#[cfg(test)]
mod tests {
    use hexwalk::algorithm::cancel::StopToken;
    use hexwalk::algorithm::exhaustive::{ExhaustiveOutcome, ExhaustiveSearch};
    use hexwalk::algorithm::walk::{is_closed, is_valid};
    use hexwalk::spatial::grid::Grid;
    use hexwalk::spatial::tiles::TileRecord;
    use std::thread;
    use std::time::Duration;

    fn ring(points: [u8; 6]) -> Grid {
        let positions = [(6, 5), (6, 4), (5, 4), (4, 5), (4, 6), (5, 6)];
        let mut records = vec![TileRecord::new(5, 5, 0)];
        records.extend(
            positions
                .iter()
                .zip(points)
                .map(|(&(x, y), point)| TileRecord::new(x, y, point)),
        );
        Grid::from_records(records).expect("ring grid is valid")
    }

    fn parallelogram(width: u8, height: u8) -> Grid {
        let records = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .map(|(x, y)| TileRecord::new(x, y, u8::from(x != 0 || y != 0)))
            .collect();
        Grid::from_records(records).expect("parallelogram grid is valid")
    }

    // Tests the optimum on a ring visits every ring tile and returns
    // Verified by stopping at the first closed walk found
    #[test]
    fn test_ring_optimum() {
        let grid = ring([1; 6]);
        let outcome = ExhaustiveSearch::new(&grid).run(&StopToken::new());

        assert!(outcome.finished);
        assert_eq!(outcome.walk.len(), 8);
        assert_eq!(grid.score(&outcome.walk), 6);
        assert!(is_valid(&grid, &outcome.walk));
        assert!(is_closed(&grid, &outcome.walk));
    }

    // Tests higher tiers are collected once unlocked
    // Verified by keeping the initial capacity fixed
    #[test]
    fn test_unlocks_higher_tiers() {
        let grid = ring([1, 2, 3, 1, 1, 1]);
        let outcome = ExhaustiveSearch::new(&grid).run(&StopToken::new());

        assert!(outcome.finished);
        assert_eq!(grid.score(&outcome.walk), 9);
        assert!(is_valid(&grid, &outcome.walk));
    }

    // Tests a pre-stopped search reports an unfinished, empty outcome
    // Verified by ignoring the stop token
    #[test]
    fn test_stopped_before_start() {
        let grid = ring([1; 6]);
        let stop = StopToken::new();
        stop.stop();

        let outcome = ExhaustiveSearch::new(&grid).run(&stop);
        assert!(!outcome.finished);
        assert!(outcome.walk.is_empty());
    }

    // Tests grids above the mask width are refused
    // Verified by raising the tile limit past 64
    #[test]
    fn test_large_grid_not_applicable() {
        let grid = parallelogram(10, 9);
        assert!(grid.len() > 64);

        let search = ExhaustiveSearch::new(&grid);
        assert!(!search.is_applicable());
        assert_eq!(search.run(&StopToken::new()), ExhaustiveOutcome::default());
    }

    // Tests a start with no enterable neighbor finishes with no walk
    // Verified by recording the bare start as a closed walk
    #[test]
    fn test_no_closed_walk() {
        let grid = Grid::from_records(vec![TileRecord::new(2, 2, 0)]).expect("valid grid");
        let outcome = ExhaustiveSearch::new(&grid).run(&StopToken::new());

        assert!(outcome.finished);
        assert!(outcome.walk.is_empty());
    }

    // Tests a search stopped mid-run keeps its best closed walk so far
    // Verified by clearing the best walk when the stop token is observed
    #[test]
    fn test_stopped_mid_run() {
        let grid = parallelogram(8, 7);
        assert!(grid.len() <= 64);
        let search = ExhaustiveSearch::new(&grid);
        assert!(search.is_applicable());

        let stop = StopToken::new();
        let outcome = thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(Duration::from_millis(50));
                stop.stop();
            });
            search.run(&stop)
        });

        assert!(!outcome.finished);
        if !outcome.walk.is_empty() {
            assert!(is_closed(&grid, &outcome.walk));
            assert!(is_valid(&grid, &outcome.walk));
        }
    }
}
