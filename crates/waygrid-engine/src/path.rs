//! Path reconstruction along the predecessor chain.

use rand::Rng;

use waygrid_core::{DisplaySink, TileState};

use crate::engine::SearchEngine;
use crate::node::NO_PREDECESSOR;

impl<S: DisplaySink, R: Rng> SearchEngine<S, R> {
    /// Walk the predecessor chain from the goal back to the start and
    /// return its length in cells, goal included.
    ///
    /// Every intermediate cell is reported as [`TileState::Path`]; the
    /// endpoints keep their own classification. The chain is guaranteed to
    /// terminate at the start by construction; a chain longer than the
    /// grid would mean corrupted predecessor links, so the walk gives up
    /// there with an error log rather than spinning.
    pub(crate) fn reconstruct_path(&mut self) -> usize {
        let Some(goal_idx) = self.idx(self.goal) else {
            return 0;
        };
        let start_idx = self.idx(self.start);

        let limit = self.blocked.len();
        let mut len = 0usize;
        let mut ci = goal_idx;
        while ci != NO_PREDECESSOR {
            if len >= limit {
                log::error!("predecessor chain from {} did not terminate", self.goal);
                break;
            }
            len += 1;
            if ci != goal_idx && Some(ci) != start_idx {
                let p = self.point(ci);
                self.sink.tile_changed(p, TileState::Path);
            }
            ci = self.came_from[ci];
        }
        log::debug!("path reconstructed, length {len}");
        len
    }
}
