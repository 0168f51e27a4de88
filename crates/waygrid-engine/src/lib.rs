//! **waygrid-engine** — an incremental, steppable A* search engine.
//!
//! The engine owns a fixed-size obstacle grid together with the transient
//! state of one search: the frontier (a priority queue that may hold stale
//! duplicates, pruned lazily on pop), the authoritative best-cost map, the
//! closed set, and the predecessor links used for path reconstruction.
//!
//! A driver feeds it [`Command`](waygrid_core::Command)s — tile edits,
//! lifecycle transitions, and single-expansion [`step`](SearchEngine::step)
//! requests — and the engine reports every observable tile
//! reclassification and status change through its
//! [`DisplaySink`](waygrid_core::DisplaySink). Every call is synchronous
//! and returns in bounded time; pacing is entirely the caller's business.

mod engine;
mod node;
mod noise;
mod path;
mod step;

pub use engine::{EngineConfig, Phase, SearchEngine};
