//! The search engine: grid/obstacle editor, lifecycle state machine and
//! command dispatch. The single-expansion algorithm lives in `step.rs`,
//! path reconstruction in `path.rs`, noise seeding in `noise.rs`.

use std::collections::{BinaryHeap, HashMap};

use rand::Rng;

use waygrid_core::{Command, DisplaySink, Point, SearchStatus, TileState};

use crate::node::{NO_PREDECESSOR, SearchNode};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Construction-time configuration. All values are fixed for the lifetime
/// of the engine; only obstacles and the start/goal cells can be edited
/// afterwards, through the command interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub size: i32,
    /// Initial start cell. Must lie within the grid and differ from `goal`.
    pub start: Point,
    /// Initial goal cell. Must lie within the grid and differ from `start`.
    pub goal: Point,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: 100,
            start: Point::new(80, 20),
            goal: Point::new(20, 80),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of the search state machine.
///
/// `Idle → Running → (Paused ⇄ Running) → Found | Exhausted`, with
/// [`reset`](SearchEngine::reset) returning to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No search started since construction or the last reset.
    Idle,
    /// Stepping towards the goal.
    Running,
    /// Started but suspended; stepping is a no-op until resumed.
    Paused,
    /// The goal was reached; the path overlay is on display.
    Found,
    /// The frontier emptied before reaching the goal: no path exists.
    Exhausted,
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// An incremental A* search engine over a fixed-size obstacle grid.
///
/// The engine owns its [`DisplaySink`] and RNG the way an application
/// runner owns its model and driver: one instance, exclusive state, no
/// locking. Invalid commands (out-of-bounds positions, edits mid-run,
/// re-starting a started search) are absorbed as no-ops.
pub struct SearchEngine<S: DisplaySink, R: Rng> {
    pub(crate) size: i32,
    pub(crate) start: Point,
    pub(crate) goal: Point,
    pub(crate) phase: Phase,
    // Grid state, persistent across searches.
    pub(crate) blocked: Vec<bool>,
    // Search-transient state, cleared on start() and reset().
    pub(crate) visited: Vec<bool>,
    pub(crate) came_from: Vec<usize>,
    pub(crate) best_cost: HashMap<usize, i32>,
    pub(crate) frontier: BinaryHeap<SearchNode>,
    pub(crate) rng: R,
    pub(crate) sink: S,
}

impl<S: DisplaySink, R: Rng> SearchEngine<S, R> {
    /// Create a new engine and announce the initial start/goal tiles and
    /// idle status through the sink.
    pub fn new(config: EngineConfig, sink: S, rng: R) -> Self {
        debug_assert!(config.size > 0);
        debug_assert!(config.start != config.goal);
        let len = (config.size * config.size) as usize;
        let mut engine = Self {
            size: config.size,
            start: config.start,
            goal: config.goal,
            phase: Phase::Idle,
            blocked: vec![false; len],
            visited: vec![false; len],
            came_from: vec![NO_PREDECESSOR; len],
            best_cost: HashMap::new(),
            frontier: BinaryHeap::new(),
            rng,
            sink,
        };
        debug_assert!(engine.idx(config.start).is_some());
        debug_assert!(engine.idx(config.goal).is_some());
        engine.sink.tile_changed(engine.start, TileState::Start);
        engine.sink.tile_changed(engine.goal, TileState::Goal);
        engine.sink.status_changed(SearchStatus::Idle);
        engine
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.size || p.y >= self.size {
            return None;
        }
        Some((p.x + p.y * self.size) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.size, idx as i32 / self.size)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The current start cell.
    #[inline]
    pub fn start_pos(&self) -> Point {
        self.start
    }

    /// The current goal cell.
    #[inline]
    pub fn goal_pos(&self) -> Point {
        self.goal
    }

    /// Whether `pos` holds a blockade. Out-of-bounds positions read clear.
    #[inline]
    pub fn is_blocked(&self, pos: Point) -> bool {
        self.idx(pos).is_some_and(|i| self.blocked[i])
    }

    /// The current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a search has been started since construction or the last
    /// reset.
    #[inline]
    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the search is actively stepping.
    #[inline]
    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Borrow the attached display sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the attached display sink.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Whether the grid accepts blockade edits: only before the search is
    /// started, or while it is paused.
    #[inline]
    fn editable(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Paused)
    }

    // -----------------------------------------------------------------------
    // Tile editor
    // -----------------------------------------------------------------------

    /// Place a blockade at `pos`. No-op mid-run, out of bounds, or on the
    /// start/goal cells.
    pub fn set_blocked(&mut self, pos: Point) {
        if !self.editable() {
            return;
        }
        let Some(i) = self.idx(pos) else {
            return;
        };
        if pos == self.start || pos == self.goal {
            return;
        }
        self.blocked[i] = true;
        self.sink.tile_changed(pos, TileState::Blocked);
    }

    /// Remove a blockade at `pos`. Same guards as [`set_blocked`](Self::set_blocked).
    pub fn clear_blocked(&mut self, pos: Point) {
        if !self.editable() {
            return;
        }
        let Some(i) = self.idx(pos) else {
            return;
        };
        if pos == self.start || pos == self.goal {
            return;
        }
        self.blocked[i] = false;
        self.sink.tile_changed(pos, TileState::Clear);
    }

    /// Add or remove a blockade, the single entry point used by
    /// [`Command::ToggleBlocked`].
    pub fn toggle_blocked(&mut self, pos: Point, add: bool) {
        if add {
            self.set_blocked(pos);
        } else {
            self.clear_blocked(pos);
        }
    }

    /// Relocate the start cell. No-op once a search has been started, and
    /// for positions that are out of bounds, blocked, or the goal.
    pub fn set_start(&mut self, pos: Point) {
        if self.started() {
            return;
        }
        let Some(i) = self.idx(pos) else {
            return;
        };
        if pos == self.goal || self.blocked[i] {
            return;
        }
        let vacated = self.start;
        self.start = pos;
        self.sink.tile_changed(vacated, TileState::Clear);
        self.sink.tile_changed(pos, TileState::Start);
    }

    /// Relocate the goal cell. Same guards as [`set_start`](Self::set_start).
    pub fn set_goal(&mut self, pos: Point) {
        if self.started() {
            return;
        }
        let Some(i) = self.idx(pos) else {
            return;
        };
        if pos == self.start || self.blocked[i] {
            return;
        }
        let vacated = self.goal;
        self.goal = pos;
        self.sink.tile_changed(vacated, TileState::Clear);
        self.sink.tile_changed(pos, TileState::Goal);
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Begin a search from the current start cell. No-op unless idle.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.clear_search_state();
        let Some(si) = self.idx(self.start) else {
            return;
        };
        self.best_cost.insert(si, 0);
        self.visited[si] = true;
        self.came_from[si] = NO_PREDECESSOR;
        self.frontier.push(SearchNode {
            idx: si,
            g: 0,
            h: self.start.manhattan(self.goal),
        });
        self.phase = Phase::Running;
        log::debug!("search started: {} -> {}", self.start, self.goal);
        self.sink.status_changed(SearchStatus::Searching);
    }

    /// Suspend stepping. No-op unless running; touches nothing but the
    /// phase flag, so pause/resume round-trips are state-neutral.
    pub fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Paused;
        self.sink.status_changed(SearchStatus::Paused);
    }

    /// Resume stepping after a pause. No-op unless paused.
    pub fn resume(&mut self) {
        if self.phase != Phase::Paused {
            return;
        }
        self.phase = Phase::Running;
        self.sink.status_changed(SearchStatus::Searching);
    }

    /// Discard the current search and return to idle.
    ///
    /// Clears all search-transient state and removes the frontier/path
    /// overlays from the display. Blockades and the start/goal cells
    /// persist across resets.
    pub fn reset(&mut self) {
        // Every cell carrying a search overlay has a best-cost entry.
        // Cells blocked mid-search (edits are legal while paused) keep
        // their blockade classification.
        let overlays: Vec<Point> = self
            .best_cost
            .keys()
            .filter(|&&i| !self.blocked[i])
            .map(|&i| self.point(i))
            .collect();
        for p in overlays {
            if p != self.start && p != self.goal {
                self.sink.tile_changed(p, TileState::Clear);
            }
        }
        self.clear_search_state();
        self.phase = Phase::Idle;
        self.sink.tile_changed(self.start, TileState::Start);
        self.sink.tile_changed(self.goal, TileState::Goal);
        log::debug!("engine reset");
        self.sink.status_changed(SearchStatus::Idle);
    }

    fn clear_search_state(&mut self) {
        self.visited.fill(false);
        self.came_from.fill(NO_PREDECESSOR);
        self.best_cost.clear();
        self.frontier.clear();
    }

    // -----------------------------------------------------------------------
    // Command dispatch
    // -----------------------------------------------------------------------

    /// Apply a single inbound command. Dispatch is synchronous; whatever
    /// the command could not legally do was silently skipped by the time
    /// this returns.
    pub fn command(&mut self, cmd: Command) {
        match cmd {
            Command::ToggleBlocked { pos, add } => self.toggle_blocked(pos, add),
            Command::SetStart(pos) => self.set_start(pos),
            Command::SetGoal(pos) => self.set_goal(pos),
            Command::SeedNoise(pct) => self.seed_noise(pct),
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Reset => self.reset(),
            Command::Step => self.step(),
        }
    }
}
