//! Random obstacle seeding.

use rand::{Rng, RngExt};

use waygrid_core::{DisplaySink, Point, TileState};

use crate::engine::SearchEngine;

impl<S: DisplaySink, R: Rng> SearchEngine<S, R> {
    /// Reset the engine and fill roughly `percentage` percent of the grid
    /// with random blockades.
    ///
    /// The percentage is clamped to [0, 100] and `size² * pct / 100` cells
    /// are drawn uniformly **with replacement**: collisions re-block the
    /// same cell, so the resulting density may undershoot the request.
    /// Draws landing on the start or goal cell are skipped. Any previous
    /// blockage is replaced, not accumulated.
    pub fn seed_noise(&mut self, percentage: i32) {
        self.reset();

        for i in 0..self.blocked.len() {
            if self.blocked[i] {
                self.blocked[i] = false;
                let p = self.point(i);
                self.sink.tile_changed(p, TileState::Clear);
            }
        }

        let pct = percentage.clamp(0, 100);
        let count = self.size * self.size * pct / 100;
        for _ in 0..count {
            let pos = Point::new(
                self.rng.random_range(0..self.size),
                self.rng.random_range(0..self.size),
            );
            self.set_blocked(pos);
        }
        log::debug!("seeded noise at {pct}%");
    }
}
