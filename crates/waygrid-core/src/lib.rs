//! **waygrid-core** — shared types for the waygrid pathfinding toolkit.
//!
//! This crate provides the vocabulary the search engine and its
//! collaborators speak: geometry primitives, the per-cell tile
//! classification, the human-readable search status, the inbound command
//! message, and the [`DisplaySink`] seam through which the engine reports
//! tile reclassifications to whatever front end is attached.

pub mod command;
pub mod geom;
pub mod sink;
pub mod tile;

pub use command::Command;
pub use geom::Point;
pub use sink::{DisplaySink, NullSink, RecordingSink};
pub use tile::{SearchStatus, TileState};
