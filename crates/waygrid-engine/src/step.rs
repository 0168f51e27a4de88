//! The single-expansion primitive: one call, one node popped.

use rand::Rng;

use waygrid_core::{DisplaySink, Point, SearchStatus, TileState};

use crate::engine::{Phase, SearchEngine};
use crate::node::SearchNode;

/// Uniform cost of moving to an adjacent cell.
const STEP_COST: i32 = 1;

/// Expansion order of the four cardinal neighbors: south, east, north,
/// west (y grows down). Fixed so that runs are reproducible.
const STEP_ORDER: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

impl<S: DisplaySink, R: Rng> SearchEngine<S, R> {
    /// Expand a single node from the frontier.
    ///
    /// No-op unless the search is running or once the goal is visited.
    /// Popping an entry whose recorded cost has since improved discards it
    /// without any other effect: the lazy-deletion stand-in for a
    /// decrease-key operation the binary heap does not have. An empty
    /// frontier means no path exists; the engine reports "No Path" once
    /// and stops stepping until reset.
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(gi) = self.idx(self.goal) else {
            return;
        };
        if self.visited[gi] {
            return;
        }

        let Some(current) = self.frontier.pop() else {
            self.phase = Phase::Exhausted;
            log::debug!("frontier exhausted: no path from {} to {}", self.start, self.goal);
            self.sink.status_changed(SearchStatus::NoPath);
            return;
        };

        // Stale duplicate: a cheaper route to this cell was recorded after
        // this entry was pushed.
        if self
            .best_cost
            .get(&current.idx)
            .is_some_and(|&best| current.g > best)
        {
            return;
        }

        self.visited[current.idx] = true;

        if current.idx == gi {
            let len = self.reconstruct_path();
            self.phase = Phase::Found;
            self.sink.status_changed(SearchStatus::PathLength(len));
            return;
        }

        let current_pos = self.point(current.idx);
        for offset in STEP_ORDER {
            let neighbor = current_pos + offset;
            let Some(ni) = self.idx(neighbor) else {
                continue;
            };
            if self.blocked[ni] {
                continue;
            }

            let tentative = current.g + STEP_COST;
            if self
                .best_cost
                .get(&ni)
                .is_none_or(|&best| tentative < best)
            {
                self.best_cost.insert(ni, tentative);
                self.came_from[ni] = current.idx;
                self.frontier.push(SearchNode {
                    idx: ni,
                    g: tentative,
                    h: neighbor.manhattan(self.goal),
                });
                if neighbor != self.start && neighbor != self.goal {
                    self.sink.tile_changed(neighbor, TileState::Frontier);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use waygrid_core::RecordingSink;

    use super::*;
    use crate::engine::EngineConfig;

    type TestEngine = SearchEngine<RecordingSink, StdRng>;

    fn engine(size: i32, start: Point, goal: Point) -> TestEngine {
        SearchEngine::new(
            EngineConfig { size, start, goal },
            RecordingSink::new(),
            StdRng::seed_from_u64(7),
        )
    }

    /// Step until the search terminates (bounded, in case of a bug).
    fn run_to_end(e: &mut TestEngine) {
        for _ in 0..(e.size * e.size * 8) {
            if !e.running() {
                return;
            }
            e.step();
        }
        panic!("search did not terminate");
    }

    /// Reference shortest-path length in cells (goal included), by BFS
    /// over the engine's current blockade layout.
    fn bfs_len(e: &TestEngine) -> Option<usize> {
        let start = e.idx(e.start_pos()).unwrap();
        let goal = e.idx(e.goal_pos()).unwrap();
        let mut dist = vec![usize::MAX; e.blocked.len()];
        let mut queue = VecDeque::new();
        dist[start] = 1;
        queue.push_back(start);
        while let Some(ci) = queue.pop_front() {
            if ci == goal {
                return Some(dist[ci]);
            }
            let cp = e.point(ci);
            for offset in STEP_ORDER {
                let np = cp + offset;
                let Some(ni) = e.idx(np) else {
                    continue;
                };
                if e.blocked[ni] || dist[ni] != usize::MAX {
                    continue;
                }
                dist[ni] = dist[ci] + 1;
                queue.push_back(ni);
            }
        }
        None
    }

    /// Everything that makes up the observable search state, in a
    /// comparison-friendly shape.
    #[allow(clippy::type_complexity)]
    fn snapshot(
        e: &TestEngine,
    ) -> (
        Phase,
        Vec<bool>,
        Vec<bool>,
        Vec<usize>,
        BTreeMap<usize, i32>,
        Vec<(i32, i32, usize)>,
    ) {
        let mut frontier: Vec<(i32, i32, usize)> =
            e.frontier.iter().map(|n| (n.g, n.h, n.idx)).collect();
        frontier.sort_unstable();
        (
            e.phase,
            e.blocked.clone(),
            e.visited.clone(),
            e.came_from.clone(),
            e.best_cost.iter().map(|(&k, &v)| (k, v)).collect(),
            frontier,
        )
    }

    #[test]
    fn test_step_before_start_is_a_no_op() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        let before = snapshot(&e);
        e.step();
        assert_eq!(snapshot(&e), before);
    }

    #[test]
    fn test_step_while_paused_is_a_no_op() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        e.start();
        e.step();
        e.pause();
        let before = snapshot(&e);
        e.step();
        assert_eq!(snapshot(&e), before);
    }

    #[test]
    fn test_empty_grid_finds_shortest_path() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Found);
        // 8 moves plus the start cell.
        assert_eq!(e.sink().last_status(), Some(SearchStatus::PathLength(9)));
    }

    #[test]
    fn test_path_overlay_excludes_endpoints() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        e.start();
        run_to_end(&mut e);
        let path: Vec<Point> = e
            .sink()
            .tiles
            .iter()
            .filter(|&&(_, s)| s == TileState::Path)
            .map(|&(p, _)| p)
            .collect();
        // 9 cells minus the two endpoints.
        assert_eq!(path.len(), 7);
        assert!(!path.contains(&e.start_pos()));
        assert!(!path.contains(&e.goal_pos()));
        for p in &path {
            assert!(!e.is_blocked(*p));
        }
    }

    #[test]
    fn test_blocked_midpoint_forces_detour() {
        // Endpoints two apart with the cell between them blocked: the
        // direct route would be 3 cells, the detour is 5.
        let mut e = engine(5, Point::new(1, 1), Point::new(3, 1));
        e.set_blocked(Point::new(2, 1));
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Found);
        assert_eq!(e.sink().last_status(), Some(SearchStatus::PathLength(5)));
    }

    #[test]
    fn test_walled_in_goal_exhausts() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        e.set_blocked(Point::new(3, 4));
        e.set_blocked(Point::new(4, 3));
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Exhausted);
        assert_eq!(e.sink().last_status(), Some(SearchStatus::NoPath));
        assert!(
            !e.sink()
                .statuses
                .iter()
                .any(|s| matches!(s, SearchStatus::PathLength(_)))
        );
    }

    #[test]
    fn test_exhausted_engine_stops_stepping() {
        let mut e = engine(3, Point::new(0, 0), Point::new(2, 2));
        e.set_blocked(Point::new(1, 2));
        e.set_blocked(Point::new(2, 1));
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Exhausted);

        // Further steps change nothing and report nothing new.
        let statuses = e.sink().statuses.len();
        let before = snapshot(&e);
        e.step();
        e.step();
        assert_eq!(snapshot(&e), before);
        assert_eq!(e.sink().statuses.len(), statuses);
    }

    #[test]
    fn test_step_after_found_is_a_no_op() {
        let mut e = engine(4, Point::new(0, 0), Point::new(3, 3));
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Found);
        let before = snapshot(&e);
        e.step();
        assert_eq!(snapshot(&e), before);
    }

    #[test]
    fn test_pause_resume_round_trips_are_state_neutral() {
        let mut e = engine(8, Point::new(0, 0), Point::new(7, 7));
        e.set_blocked(Point::new(3, 3));
        e.set_blocked(Point::new(3, 4));
        e.start();
        for _ in 0..10 {
            e.step();
        }
        let before = snapshot(&e);
        for _ in 0..5 {
            e.pause();
            e.resume();
        }
        e.pause();
        e.pause();
        e.resume();
        e.resume();
        assert_eq!(snapshot(&e), before);
    }

    #[test]
    fn test_reset_restores_post_construction_state() {
        let fresh = engine(6, Point::new(0, 0), Point::new(5, 5));
        let mut e = engine(6, Point::new(0, 0), Point::new(5, 5));
        e.start();
        for _ in 0..12 {
            e.step();
        }
        e.reset();
        assert_eq!(snapshot(&e), snapshot(&fresh));
    }

    #[test]
    fn test_search_can_be_rerun_after_reset() {
        let mut e = engine(5, Point::new(0, 0), Point::new(4, 4));
        e.start();
        run_to_end(&mut e);
        e.reset();
        e.start();
        run_to_end(&mut e);
        assert_eq!(e.phase(), Phase::Found);
        assert_eq!(e.sink().last_status(), Some(SearchStatus::PathLength(9)));
    }

    #[test]
    fn test_frontier_events_skip_endpoints_and_blockades() {
        let mut e = engine(5, Point::new(1, 1), Point::new(3, 3));
        e.set_blocked(Point::new(2, 2));
        e.start();
        e.sink_mut().clear();
        run_to_end(&mut e);
        for (p, s) in &e.sink().tiles {
            if *s == TileState::Frontier {
                assert_ne!(*p, e.start_pos());
                assert_ne!(*p, e.goal_pos());
                assert!(!e.is_blocked(*p));
            }
        }
    }

    #[test]
    fn test_matches_reference_bfs_on_random_grids() {
        for seed in 0..24 {
            let mut e = SearchEngine::new(
                EngineConfig {
                    size: 12,
                    start: Point::new(0, 0),
                    goal: Point::new(11, 11),
                },
                RecordingSink::new(),
                StdRng::seed_from_u64(seed),
            );
            e.seed_noise(30);
            let expected = bfs_len(&e);
            e.start();
            run_to_end(&mut e);
            match expected {
                Some(len) => {
                    assert_eq!(e.phase(), Phase::Found, "seed {seed}");
                    assert_eq!(
                        e.sink().last_status(),
                        Some(SearchStatus::PathLength(len)),
                        "seed {seed}"
                    );
                }
                None => {
                    assert_eq!(e.phase(), Phase::Exhausted, "seed {seed}");
                    assert_eq!(e.sink().last_status(), Some(SearchStatus::NoPath), "seed {seed}");
                }
            }
        }
    }
}
