//! Unit tests for rp-coop.
//!
//! The scenario maps are small enough to draw.  `#` is terrain; robots are
//! listed in planning order as `(start, target)` pairs.

#[cfg(test)]
mod helpers {
    use rp_core::{Grid, Position, RobotId};
    use rp_spatial::Path;

    use crate::{PlanOutcome, PlanRequest, WindowedPlanner};

    pub fn p(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    pub fn map(text: &str) -> Grid {
        Grid::parse(text).expect("test map should parse")
    }

    pub fn requests(robots: &[((u32, u32), (u32, u32))]) -> Vec<PlanRequest> {
        robots
            .iter()
            .enumerate()
            .map(|(i, &(s, t))| PlanRequest {
                id:     RobotId(i as u32),
                start:  s.into(),
                target: t.into(),
            })
            .collect()
    }

    /// Plan one round on a fresh table.
    pub fn round(
        grid: &Grid,
        robots: &[((u32, u32), (u32, u32))],
        horizon: u32,
    ) -> Vec<PlanOutcome> {
        WindowedPlanner::new(grid, horizon).plan_round(&requests(robots))
    }

    /// Rendered paths, `"None"` where a robot got no path.
    pub fn rendered(outcomes: &[PlanOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .map(|o| o.path().map_or_else(|| "None".to_owned(), Path::to_string))
            .collect()
    }

    pub fn assert_static(path: Option<&Path>, at: Position) {
        let path = path.expect("robot should have a path");
        assert!(!path.is_empty());
        for step in path.steps() {
            assert_eq!(step.pos, at, "robot left {at} in {path}");
        }
    }

    /// No shared cell at the same tick and no stepping into a cell the other
    /// robot held one tick earlier.
    pub fn assert_no_conflict(earlier: &Path, later: &Path) {
        for (t, pos) in later.positions().enumerate() {
            let t = t as u32;
            assert_ne!(pos, earlier.position_at(t), "vertex conflict at tick {t}");
            if t > 0 {
                assert_ne!(pos, earlier.position_at(t - 1), "follow conflict at tick {t}");
            }
        }
    }
}

// ── ReservationTable ──────────────────────────────────────────────────────────

#[cfg(test)]
mod reservation {
    use super::helpers::{map, p};
    use crate::ReservationTable;

    #[test]
    fn defaults_free() {
        let table = ReservationTable::new(3, 2, 4);
        assert_eq!(table.blocked_count(), 0);
        assert!(!table.is_blocked(p(2, 1), 3));
    }

    #[test]
    fn block_all_covers_every_tick() {
        let mut table = ReservationTable::new(3, 3, 5);
        table.block_all(p(1, 1));
        for t in 0..5 {
            assert!(table.is_blocked(p(1, 1), t));
        }
        assert!(!table.is_blocked(p(0, 1), 0));
        assert_eq!(table.blocked_count(), 5);
    }

    #[test]
    fn block_at_is_single_tick() {
        let mut table = ReservationTable::new(3, 3, 5);
        table.block_at(p(2, 0), 3);
        assert!(table.is_blocked(p(2, 0), 3));
        assert!(!table.is_blocked(p(2, 0), 2));
        assert!(!table.is_blocked(p(2, 0), 4));
    }

    #[test]
    fn past_horizon_is_free_and_ignored() {
        let mut table = ReservationTable::new(2, 2, 3);
        table.block_at(p(0, 0), 3);
        table.block_at(p(0, 0), 100);
        assert_eq!(table.blocked_count(), 0);
        table.block_all(p(0, 0));
        assert!(!table.is_blocked(p(0, 0), 3));
    }

    #[test]
    fn free_from_checks_rest_of_window() {
        let mut table = ReservationTable::new(2, 1, 6);
        table.block_at(p(1, 0), 4);
        assert!(!table.is_free_from(p(1, 0), 0));
        assert!(!table.is_free_from(p(1, 0), 4));
        assert!(table.is_free_from(p(1, 0), 5));
        assert!(table.is_free_from(p(1, 0), 6));
    }

    #[test]
    fn from_grid_claims_terrain() {
        let g = map("..\n#.\n");
        let table = ReservationTable::from_grid(&g, 3);
        assert!(table.matches(&g));
        assert!(table.is_blocked(p(0, 1), 0));
        assert!(table.is_blocked(p(0, 1), 2));
        assert_eq!(table.blocked_count(), 3);
    }

    #[test]
    fn display_dumps_layers() {
        let mut table = ReservationTable::new(2, 1, 2);
        table.block_at(p(1, 0), 1);
        assert_eq!(table.to_string(), "t=0\n..\nt=1\n.#\n");
    }

    #[test]
    #[should_panic(expected = "at least one tick")]
    fn zero_horizon_rejected() {
        ReservationTable::new(2, 2, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_panics() {
        let table = ReservationTable::new(2, 2, 2);
        table.is_blocked(p(2, 0), 0);
    }
}

// ── Single-robot windows ──────────────────────────────────────────────────────

#[cfg(test)]
mod window {
    use super::helpers::{map, p, rendered, round};
    use crate::{ReservationTable, WindowedPlanner};

    const WALL: &str = "
        ...
        .#.
        .#.
    ";

    #[test]
    fn short_window_truncates_route() {
        let g = map(WALL);
        let out = round(&g, &[((0, 0), (2, 2))], 4);
        assert_eq!(rendered(&out), ["[(0, 0, 0), (1, 0, 1), (2, 0, 2), (2, 1, 3)]"]);
        assert!(!out[0].reached());
    }

    #[test]
    fn long_window_waits_at_goal() {
        let g = map(WALL);
        let out = round(&g, &[((0, 0), (2, 2))], 6);
        assert_eq!(
            rendered(&out),
            ["[(0, 0, 0), (1, 0, 1), (2, 0, 2), (2, 1, 3), (2, 2, 4), (2, 2, 5)]"]
        );
        assert!(out[0].reached());
    }

    #[test]
    fn start_on_target_waits_whole_window() {
        let g = map(WALL);
        let planner = WindowedPlanner::new(&g, 3);
        let w = planner.search(p(2, 0), p(2, 0)).unwrap();
        assert!(w.reached);
        assert_eq!(w.path.to_string(), "[(2, 0, 0), (2, 0, 1), (2, 0, 2)]");
    }

    #[test]
    fn unreachable_target_heads_for_closest_cell() {
        let g = map(
            "
            .#.
            .#.
            .#.
            ",
        );
        let planner = WindowedPlanner::new(&g, 5);
        let w = planner.search(p(0, 0), p(2, 0)).unwrap();
        assert!(!w.reached);
        assert_eq!(w.path.len(), 5);
        // (0, 0) is already the closest reachable cell to the target.
        assert!(w.path.is_stationary());
    }

    #[test]
    fn claimed_start_yields_none() {
        let g = map(WALL);
        let mut table = ReservationTable::from_grid(&g, 4);
        table.block_at(p(0, 0), 0);
        let planner = WindowedPlanner::with_table(&g, table);
        assert!(planner.find_path(p(0, 0), p(2, 2)).is_none());
    }

    #[test]
    fn search_does_not_claim() {
        let g = map(WALL);
        let planner = WindowedPlanner::new(&g, 4);
        let before = planner.table().blocked_count();
        planner.search(p(0, 0), p(2, 2));
        assert_eq!(planner.table().blocked_count(), before);
    }

    #[test]
    fn repeated_search_is_identical() {
        let g = map(WALL);
        let planner = WindowedPlanner::new(&g, 7);
        assert_eq!(planner.search(p(0, 0), p(2, 2)), planner.search(p(0, 0), p(2, 2)));
    }

    #[test]
    #[should_panic(expected = "reservation table is 2x2 but grid is 3x3")]
    fn mismatched_table_rejected() {
        let g = map(WALL);
        WindowedPlanner::with_table(&g, ReservationTable::new(2, 2, 4));
    }
}

// ── Commit ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod commit {
    use rp_spatial::Path;

    use super::helpers::{map, p};
    use crate::WindowedPlanner;

    #[test]
    fn claims_each_step_and_the_next_tick() {
        let g = map("....\n");
        let mut planner = WindowedPlanner::new(&g, 4);
        let path = Path::from_positions([p(0, 0), p(1, 0), p(2, 0), p(2, 0)]);
        planner.commit(p(0, 0), Some(&path));

        let t = planner.table();
        assert!(t.is_blocked(p(0, 0), 0) && t.is_blocked(p(0, 0), 1));
        assert!(!t.is_blocked(p(0, 0), 2));
        assert!(t.is_blocked(p(1, 0), 1) && t.is_blocked(p(1, 0), 2));
        assert!(!t.is_blocked(p(1, 0), 3));
        assert!(t.is_blocked(p(2, 0), 2) && t.is_blocked(p(2, 0), 3));
        assert!(!t.is_blocked(p(3, 0), 0));
    }

    #[test]
    fn short_path_rests_on_final_cell() {
        let g = map("...\n");
        let mut planner = WindowedPlanner::new(&g, 6);
        let path = Path::from_positions([p(0, 0), p(1, 0)]);
        planner.commit(p(0, 0), Some(&path));
        for t in 1..6 {
            assert!(planner.table().is_blocked(p(1, 0), t));
        }
    }

    #[test]
    fn missing_path_claims_start_for_window() {
        let g = map("...\n");
        let mut planner = WindowedPlanner::new(&g, 5);
        planner.commit(p(2, 0), None);
        for t in 0..5 {
            assert!(planner.table().is_blocked(p(2, 0), t));
        }
        assert_eq!(planner.table().blocked_count(), 5);
    }
}

// ── Multi-robot rounds ────────────────────────────────────────────────────────

#[cfg(test)]
mod rounds {
    use super::helpers::{assert_no_conflict, assert_static, map, p, rendered, round};

    #[test]
    fn two_robots_share_a_gap() {
        let g = map(
            "
            ...
            #..
            ##.
            ",
        );
        let out = round(&g, &[((0, 0), (2, 2)), ((1, 0), (2, 1))], 8);
        let (a, b) = (out[0].path().unwrap(), out[1].path().unwrap());
        assert_eq!(
            a.to_string(),
            "[(0, 0, 0), (1, 0, 1), (1, 1, 2), (2, 1, 3), (2, 2, 4), (2, 2, 5), (2, 2, 6), (2, 2, 7)]"
        );
        // The second robot reaches its target early, steps aside while the
        // first passes through, then returns.
        assert_eq!(
            b.to_string(),
            "[(1, 0, 0), (1, 1, 1), (2, 1, 2), (2, 0, 3), (2, 0, 4), (2, 1, 5), (2, 1, 6), (2, 1, 7)]"
        );
        assert!(out[0].reached() && out[1].reached());
        assert_no_conflict(a, b);
    }

    #[test]
    fn gap_with_short_window_overlaps_on_fallback() {
        let g = map(
            "
            ...
            #..
            ##.
            ",
        );
        for horizon in [4, 5] {
            let out = round(&g, &[((0, 0), (2, 2)), ((1, 0), (2, 1))], horizon);
            assert!(!out[1].reached(), "horizon {horizon}");
            // The second robot's fallback ends on (2, 1), which the first
            // passes through at tick 3.
            let (a, b) = (out[0].path().unwrap(), out[1].path().unwrap());
            assert_eq!(a.position_at(3), p(2, 1));
            assert_eq!(b.position_at(3), p(2, 1));
        }
        let out = round(&g, &[((0, 0), (2, 2)), ((1, 0), (2, 1))], 5);
        assert_eq!((out[0].reached(), out[1].reached()), (true, false));
        assert_eq!(
            rendered(&out),
            [
                "[(0, 0, 0), (1, 0, 1), (1, 1, 2), (2, 1, 3), (2, 2, 4)]",
                "[(1, 0, 0), (1, 1, 1), (2, 1, 2), (2, 1, 3), (2, 1, 4)]",
            ]
        );
    }

    #[test]
    fn gap_is_clean_once_window_fits_the_detour() {
        let g = map(
            "
            ...
            #..
            ##.
            ",
        );
        for horizon in 6..=8 {
            let out = round(&g, &[((0, 0), (2, 2)), ((1, 0), (2, 1))], horizon);
            assert!(out[0].reached() && out[1].reached(), "horizon {horizon}");
            assert_no_conflict(out[0].path().unwrap(), out[1].path().unwrap());
        }
    }

    const HIDEOUT: &str = "
        ...
        #.#
        ###
    ";

    #[test]
    fn robot_on_target_hides_to_let_other_pass() {
        let g = map(HIDEOUT);
        let robots = [((0, 0), (2, 0)), ((1, 0), (1, 0))];

        let out = round(&g, &robots, 5);
        assert_eq!(
            rendered(&out),
            [
                "[(0, 0, 0), (1, 0, 1), (2, 0, 2), (2, 0, 3), (2, 0, 4)]",
                "[(1, 0, 0), (1, 1, 1), (1, 1, 2), (1, 0, 3), (1, 0, 4)]",
            ]
        );

        let out = round(&g, &robots, 4);
        assert_eq!(
            rendered(&out),
            [
                "[(0, 0, 0), (1, 0, 1), (2, 0, 2), (2, 0, 3)]",
                "[(1, 0, 0), (1, 1, 1), (1, 1, 2), (1, 0, 3)]",
            ]
        );
    }

    #[test]
    fn short_window_leaves_hiding_robot_in_place() {
        let g = map(HIDEOUT);
        let robots = [((0, 0), (2, 0)), ((1, 0), (1, 0))];

        let out = round(&g, &robots, 3);
        assert_eq!(rendered(&out)[0], "[(0, 0, 0), (1, 0, 1), (2, 0, 2)]");
        assert_static(out[1].path(), p(1, 0));

        let out = round(&g, &robots, 2);
        assert_eq!(rendered(&out)[0], "[(0, 0, 0), (1, 0, 1)]");
        assert_static(out[1].path(), p(1, 0));

        let out = round(&g, &robots, 1);
        assert_eq!(rendered(&out)[0], "[(0, 0, 0)]");
        assert_static(out[1].path(), p(1, 0));
    }

    #[test]
    fn resting_robot_blocks_corridor() {
        let g = map(
            "
            ...
            .#.
            .#.
            ",
        );
        let out = round(&g, &[((1, 0), (1, 0)), ((0, 0), (2, 0))], 3);
        assert_eq!(rendered(&out)[0], "[(1, 0, 0), (1, 0, 1), (1, 0, 2)]");
        assert_static(out[1].path(), p(0, 0));
    }

    const RING: &str = "
        ...
        .#.
        ...
    ";

    #[test]
    fn detour_needs_a_long_enough_window() {
        let g = map(RING);
        let robots = [((0, 0), (0, 0)), ((1, 0), (0, 1))];

        let out = round(&g, &robots, 5);
        assert_static(out[0].path(), p(0, 0));
        assert_static(out[1].path(), p(1, 0));

        let out = round(&g, &robots, 6);
        assert_static(out[0].path(), p(0, 0));
        assert_eq!(
            rendered(&out)[1],
            "[(1, 0, 0), (2, 0, 1), (2, 1, 2), (2, 2, 3), (1, 2, 4), (0, 2, 5)]"
        );

        let out = round(&g, &robots, 7);
        assert_static(out[0].path(), p(0, 0));
        assert_eq!(
            rendered(&out)[1],
            "[(1, 0, 0), (2, 0, 1), (2, 1, 2), (2, 2, 3), (1, 2, 4), (0, 2, 5), (0, 1, 6)]"
        );
        assert!(out[1].reached());
    }

    const LOOP: &str = "
        ....
        .##.
        ....
    ";

    #[test]
    fn swap_goes_round_the_loop() {
        let g = map(LOOP);
        let out = round(&g, &[((2, 0), (0, 0)), ((1, 0), (3, 0))], 9);
        assert_eq!(
            rendered(&out),
            [
                "[(2, 0, 0), (1, 0, 1), (0, 0, 2), (0, 0, 3), (0, 0, 4), (0, 0, 5), (0, 0, 6), (0, 0, 7), (0, 0, 8)]",
                "[(1, 0, 0), (0, 0, 1), (0, 1, 2), (0, 2, 3), (1, 2, 4), (2, 2, 5), (3, 2, 6), (3, 1, 7), (3, 0, 8)]",
            ]
        );
    }

    #[test]
    fn swap_in_other_order() {
        let g = map(LOOP);
        let out = round(&g, &[((1, 0), (3, 0)), ((2, 0), (0, 0))], 9);
        assert_eq!(
            rendered(&out),
            [
                "[(1, 0, 0), (2, 0, 1), (3, 0, 2), (3, 0, 3), (3, 0, 4), (3, 0, 5), (3, 0, 6), (3, 0, 7), (3, 0, 8)]",
                "[(2, 0, 0), (3, 0, 1), (3, 1, 2), (3, 2, 3), (2, 2, 4), (1, 2, 5), (0, 2, 6), (0, 1, 7), (0, 0, 8)]",
            ]
        );
    }

    #[test]
    fn swap_with_spare_window_waits_at_goals() {
        let g = map(LOOP);
        let out = round(&g, &[((1, 0), (3, 0)), ((2, 0), (0, 0))], 11);
        assert_eq!(
            rendered(&out),
            [
                "[(1, 0, 0), (2, 0, 1), (3, 0, 2), (3, 0, 3), (3, 0, 4), (3, 0, 5), (3, 0, 6), (3, 0, 7), (3, 0, 8), (3, 0, 9), (3, 0, 10)]",
                "[(2, 0, 0), (3, 0, 1), (3, 1, 2), (3, 2, 3), (2, 2, 4), (1, 2, 5), (0, 2, 6), (0, 1, 7), (0, 0, 8), (0, 0, 9), (0, 0, 10)]",
            ]
        );
        assert!(out.iter().all(|o| o.reached()));
    }

    #[test]
    fn robot_starting_on_resting_cell_gets_none() {
        let g = map("...\n");
        let out = round(&g, &[((1, 0), (1, 0)), ((1, 0), (2, 0))], 3);
        assert!(out[0].reached());
        assert!(out[1].plan.is_none());
        assert!(!out[1].reached());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use rp_core::{Grid, RobotId};

    use super::helpers::assert_no_conflict;
    use crate::{PlanRequest, WindowedPlanner};

    /// Random grid up to 6x6, a window of 1..=10 ticks and up to four robots
    /// on distinct free cells.
    fn scenario() -> impl Strategy<Value = (Grid, u32, Vec<PlanRequest>)> {
        (2u32..=6, 2u32..=6, 1u32..=10).prop_flat_map(|(w, h, horizon)| {
            let n = (w * h) as usize;
            (
                proptest::collection::vec(prop::bool::weighted(0.2), n),
                proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=4.min(n)),
                proptest::collection::vec(0..n, 4),
            )
                .prop_map(move |(cells, starts, targets)| {
                    let mut grid = Grid::new(w, h);
                    for (i, blocked) in cells.into_iter().enumerate() {
                        grid.set_blocked(grid.position_of(i), blocked);
                    }
                    let requests = starts
                        .iter()
                        .zip(&targets)
                        .enumerate()
                        .map(|(i, (&s, &t))| {
                            let start = grid.position_of(s);
                            grid.set_blocked(start, false);
                            let target = grid.position_of(t);
                            PlanRequest { id: RobotId(i as u32), start, target }
                        })
                        .collect();
                    (grid, horizon, requests)
                })
        })
    }

    proptest! {
        #[test]
        fn paths_span_window_and_move_legally((grid, horizon, requests) in scenario()) {
            let out = WindowedPlanner::new(&grid, horizon).plan_round(&requests);
            prop_assert_eq!(out.len(), requests.len());
            for (req, o) in requests.iter().zip(&out) {
                // Starts are distinct and free, so only a resting claim by an
                // earlier robot can take a start away.
                let Some(path) = o.path() else { continue };
                prop_assert_eq!(path.len(), horizon as usize);
                prop_assert_eq!(path.start(), req.start);
                for pair in path.steps().windows(2) {
                    let (a, b) = (pair[0].pos, pair[1].pos);
                    prop_assert!(a == b || a.is_adjacent(b));
                    prop_assert!(grid.is_free(pair[1].pos));
                }
                if o.reached() {
                    prop_assert_eq!(path.end(), req.target);
                }
            }
        }

        #[test]
        fn reached_paths_avoid_earlier_robots((grid, horizon, requests) in scenario()) {
            let out = WindowedPlanner::new(&grid, horizon).plan_round(&requests);
            for (i, later) in out.iter().enumerate() {
                if !later.reached() {
                    continue;
                }
                let later = later.path().unwrap();
                for earlier in out[..i].iter().filter_map(|o| o.path()) {
                    assert_no_conflict(earlier, later);
                }
            }
        }
    }
}
