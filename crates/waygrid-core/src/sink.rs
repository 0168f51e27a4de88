//! The display collaborator seam.
//!
//! The engine never draws anything itself. Every time a cell changes its
//! observable [`TileState`], and every time the overall search status
//! changes, the engine notifies its [`DisplaySink`]. A front end keeps its
//! own picture of the grid up to date from these notifications alone.

use crate::geom::Point;
use crate::tile::{SearchStatus, TileState};

/// Receiver for tile-state and status change events.
pub trait DisplaySink {
    /// A single cell was reclassified.
    fn tile_changed(&mut self, pos: Point, state: TileState);

    /// The overall search status changed.
    fn status_changed(&mut self, status: SearchStatus);
}

/// A sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn tile_changed(&mut self, _pos: Point, _state: TileState) {}
    fn status_changed(&mut self, _status: SearchStatus) {}
}

/// A sink that records every event in order, mainly for tests and replay.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub tiles: Vec<(Point, TileState)>,
    pub statuses: Vec<SearchStatus>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent status, if any was reported.
    pub fn last_status(&self) -> Option<SearchStatus> {
        self.statuses.last().copied()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.statuses.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn tile_changed(&mut self, pos: Point, state: TileState) {
        self.tiles.push((pos, state));
    }

    fn status_changed(&mut self, status: SearchStatus) {
        self.statuses.push(status);
    }
}
