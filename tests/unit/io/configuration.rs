//! Tests for solver constants and their relationships

#[cfg(test)]
mod tests {
    use hexwalk::io::configuration::{
        BEAM_DEADLINE, EXHAUSTIVE_DEADLINE, EXHAUSTIVE_TILE_LIMIT, FRONTIER_DEADLINE,
        INITIAL_CAPACITY, LOCAL_SEARCH_MAX_TRIALS, MUTATIONS_PER_TRIAL, REFINEMENT_DEADLINE,
        SEED_FATTENING_DEADLINE, TASK_POLL_INTERVAL, TRIALS_PER_CHANGEABLE,
    };

    // Tests the exhaustive limit fits a u64 visited mask
    // Verified by raising the limit to 65
    #[test]
    fn test_exhaustive_limit_fits_mask() {
        assert!(EXHAUSTIVE_TILE_LIMIT <= u64::BITS as usize);
    }

    // Tests stage deadlines are strictly increasing
    // Verified by swapping two deadlines
    #[test]
    fn test_deadlines_increase() {
        let deadlines = [
            EXHAUSTIVE_DEADLINE,
            SEED_FATTENING_DEADLINE,
            BEAM_DEADLINE,
            REFINEMENT_DEADLINE,
            FRONTIER_DEADLINE,
        ];
        assert!(deadlines.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(TASK_POLL_INTERVAL < EXHAUSTIVE_DEADLINE);
    }

    // Tests a fresh walk may only enter point-1 tiles
    // Verified by starting capacity at 0
    #[test]
    fn test_initial_capacity() {
        assert_eq!(INITIAL_CAPACITY, 1);
    }

    // Tests trial bounds stay positive
    // Verified by setting the trial cap to zero
    #[test]
    fn test_trial_bounds() {
        assert!(LOCAL_SEARCH_MAX_TRIALS >= TRIALS_PER_CHANGEABLE);
        assert!(MUTATIONS_PER_TRIAL > 0);
    }
}
