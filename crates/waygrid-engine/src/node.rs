use std::cmp::Ordering;

/// Sentinel predecessor value meaning "reached from nowhere".
pub(crate) const NO_PREDECESSOR: usize = usize::MAX;

/// A frontier entry: a discovered position with its exact cost from the
/// start (`g`) and heuristic estimate to the goal (`h`).
///
/// Entries are never updated in place. When a cheaper route to a position
/// is found, a fresh entry is pushed and the old one becomes stale; the
/// best-cost map identifies stale entries at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchNode {
    pub(crate) idx: usize,
    pub(crate) g: i32,
    pub(crate) h: i32,
}

impl SearchNode {
    /// Total priority: cost so far plus heuristic estimate.
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g + self.h
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest f first;
        // equal f prefers the node closer to the goal by heuristic.
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.h.cmp(&self.h))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
