//! Automatic-mode driver: seed noise, run the search to termination, and
//! print the resulting grid as ASCII.
//!
//! Usage: `astar [noise-percentage]` (default 25).
//!
//! The sink keeps its own picture of the grid, updated purely from the
//! engine's tile-change events — the same contract a graphical front end
//! would rely on.

use std::fmt::Write as _;

use waygrid_core::{Command, DisplaySink, Point, SearchStatus, TileState};
use waygrid_engine::{EngineConfig, SearchEngine};

struct AsciiSink {
    size: i32,
    tiles: Vec<TileState>,
    status: SearchStatus,
}

impl AsciiSink {
    fn new(size: i32) -> Self {
        Self {
            size,
            tiles: vec![TileState::Clear; (size * size) as usize],
            status: SearchStatus::Idle,
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity((self.size * (self.size + 1)) as usize);
        for y in 0..self.size {
            for x in 0..self.size {
                let c = match self.tiles[(x + y * self.size) as usize] {
                    TileState::Clear => '.',
                    TileState::Blocked => '#',
                    TileState::Start => 'S',
                    TileState::Goal => 'G',
                    TileState::Frontier => 'o',
                    TileState::Path => '*',
                };
                out.push(c);
            }
            out.push('\n');
        }
        let _ = write!(out, "[{}]", self.status);
        out
    }
}

impl DisplaySink for AsciiSink {
    fn tile_changed(&mut self, pos: Point, state: TileState) {
        self.tiles[(pos.x + pos.y * self.size) as usize] = state;
    }

    fn status_changed(&mut self, status: SearchStatus) {
        self.status = status;
    }
}

fn main() {
    let pct: i32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(25);

    let size = 40;
    let config = EngineConfig {
        size,
        start: Point::new(32, 8),
        goal: Point::new(8, 32),
    };
    let mut engine = SearchEngine::new(config, AsciiSink::new(size), rand::rng());

    engine.command(Command::SeedNoise(pct));
    engine.command(Command::Start);

    let mut expansions = 0u32;
    while engine.running() {
        engine.command(Command::Step);
        expansions += 1;
    }

    println!("{}", engine.sink().render());
    println!("{expansions} expansions");
}
