//! The inbound command message.
//!
//! A driver loop translates raw input events (clicks, key presses, panel
//! buttons) into [`Command`] values and feeds them to the engine
//! synchronously; the engine absorbs anything invalid as a no-op.

use crate::geom::Point;

/// A command issued by the UI/input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Add (`add == true`) or remove a blockade at `pos`.
    ToggleBlocked { pos: Point, add: bool },
    /// Relocate the start cell.
    SetStart(Point),
    /// Relocate the goal cell.
    SetGoal(Point),
    /// Reset and fill roughly the given percentage of the grid with
    /// random blockades.
    SeedNoise(i32),
    /// Begin the search.
    Start,
    /// Pause automatic stepping.
    Pause,
    /// Resume after a pause.
    Resume,
    /// Discard the current search and return to the idle state.
    Reset,
    /// Expand a single node from the frontier.
    Step,
}
