//! Tests for the point-reachability cap and the structural connectivity filter

#[cfg(test)]
mod tests {
    use hexwalk::spatial::grid::Neighbors;
    use hexwalk::spatial::pruning::{
        connected_tiles, max_reachable_point, retain_point_reachable,
    };
    use hexwalk::spatial::tiles::TileRecord;
    use smallvec::smallvec;

    // Tests the first missing tier caps reachable points
    // Verified by starting the tier scan at 1
    #[test]
    fn test_max_reachable_point_stops_at_gap() {
        assert_eq!(max_reachable_point([0u8, 1, 3]), 2);
        assert_eq!(max_reachable_point([0u8, 1, 1, 2, 5]), 3);
        assert_eq!(max_reachable_point([0u8, 1, 2, 4, 5]), 3);
    }

    // Tests a gap-free set of tiers caps at the number of distinct values
    // Verified by returning the largest point instead
    #[test]
    fn test_max_reachable_point_without_gap() {
        assert_eq!(max_reachable_point([0u8, 1, 2, 3]), 4);
        assert_eq!(max_reachable_point([0u8, 1, 1, 1]), 2);
        assert_eq!(max_reachable_point([0u8]), 1);
        assert_eq!(max_reachable_point(Vec::<u8>::new()), 0);
    }

    // Tests records above the cap are removed and order is preserved
    // Verified by inverting the filter comparison
    #[test]
    fn test_retain_point_reachable() {
        let records = vec![
            TileRecord::new(0, 0, 0),
            TileRecord::new(1, 0, 3),
            TileRecord::new(2, 0, 1),
            TileRecord::new(3, 0, 2),
            TileRecord::new(4, 0, 5),
        ];

        let kept = retain_point_reachable(records);
        let points: Vec<u8> = kept.iter().map(|record| record.point).collect();
        assert_eq!(points, vec![0, 3, 1, 2]);
    }

    // Tests a dead-end tail hanging off the start region is pruned
    // Verified by accepting tiles with a single connected neighbor
    #[test]
    fn test_dead_end_is_pruned() {
        // 0 - 1 - 2, with 2 reachable only through 1
        let adjacency: Vec<Neighbors> = vec![smallvec![1], smallvec![0, 2], smallvec![1]];

        let connected = connected_tiles(&adjacency, 0);
        assert!(connected.contains(0));
        assert!(connected.contains(1));
        assert!(!connected.contains(2));
    }

    // Tests every direct neighbor of the start is kept unconditionally
    // Verified by seeding the flood with the start tile only
    #[test]
    fn test_start_neighbors_are_kept() {
        let adjacency: Vec<Neighbors> = vec![smallvec![1, 2], smallvec![0], smallvec![0]];

        let connected = connected_tiles(&adjacency, 0);
        assert_eq!(connected.count(), 3);
    }

    // Tests a region behind single-neighbor entrances is rescued when it borders twice
    // Verified by requiring three borders in the rescue phase
    #[test]
    fn test_loop_region_is_rescued() {
        // A six-cycle: 0-1-3-5-4-2-0
        let adjacency: Vec<Neighbors> = vec![
            smallvec![1, 2],
            smallvec![0, 3],
            smallvec![0, 4],
            smallvec![1, 5],
            smallvec![2, 5],
            smallvec![3, 4],
        ];

        let connected = connected_tiles(&adjacency, 0);
        assert_eq!(connected.count(), 6);
    }

    // Tests a region touching the connected set once is not rescued
    // Verified by merging every deferred region
    #[test]
    fn test_pocket_with_one_border_is_not_rescued() {
        // Triangle 0-1-2 with a pocket 3-4 hanging off tile 1 only
        let adjacency: Vec<Neighbors> = vec![
            smallvec![1, 2],
            smallvec![0, 2, 3],
            smallvec![0, 1],
            smallvec![1, 4],
            smallvec![3],
        ];

        let connected = connected_tiles(&adjacency, 0);
        assert_eq!(connected.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    // Tests tiles disconnected from the start are dropped
    // Verified by marking every tile connected initially
    #[test]
    fn test_disconnected_component_is_dropped() {
        let adjacency: Vec<Neighbors> = vec![
            smallvec![1, 2],
            smallvec![0, 2],
            smallvec![0, 1],
            smallvec![4, 5],
            smallvec![3, 5],
            smallvec![3, 4],
        ];

        let connected = connected_tiles(&adjacency, 0);
        assert_eq!(connected.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
