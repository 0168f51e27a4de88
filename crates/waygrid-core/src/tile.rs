//! Tile classification and search status reporting.

use std::fmt;

/// The externally observable classification of a grid cell.
///
/// Exactly one cell is `Start` and exactly one is `Goal` at all times
/// outside of a transient reassignment; neither is ever `Blocked`.
/// `Frontier` and `Path` are search overlays layered on otherwise `Clear`
/// cells and are removed again on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    Clear,
    Blocked,
    Start,
    Goal,
    Frontier,
    Path,
}

/// Human-readable search status, for a window title or HUD line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// No search has been started (or the engine was reset).
    Idle,
    /// The search is stepping towards the goal.
    Searching,
    /// The search is started but paused.
    Paused,
    /// The frontier emptied before reaching the goal: no path exists.
    NoPath,
    /// A path was found; the value is its length in cells, goal included.
    PathLength(usize),
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Searching => f.write_str("Searching..."),
            Self::Paused => f.write_str("Paused"),
            Self::NoPath => f.write_str("No Path"),
            Self::PathLength(n) => write!(f, "Path length {n}"),
        }
    }
}
