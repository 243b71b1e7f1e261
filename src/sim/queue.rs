use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::Time;
use super::event::Action;

/// An action with its absolute fire time fixed.
///
/// Sorted by `when`, then by `sequence` so that equal-time events pop in the
/// order they were pushed. `BinaryHeap` is a max-heap and we want a min-heap,
/// so the comparison is reversed.
pub struct Scheduled<C> {
    pub when: Time,
    sequence: u64,
    pub action: Action<C>,
}

impl<C> PartialOrd for Scheduled<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Scheduled<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .when
            .cmp(&self.when)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<C> PartialEq for Scheduled<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C> Eq for Scheduled<C> {}

/// Min-queue of pending events keyed by absolute time.
pub struct EventQueue<C> {
    heap: BinaryHeap<Scheduled<C>>,
    next_sequence: u64,
}

impl<C> EventQueue<C> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, when: Time, action: Action<C>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Scheduled {
            when,
            sequence,
            action,
        });
    }

    /// Remove the earliest event.
    pub fn pop(&mut self) -> Option<Scheduled<C>> {
        self.heap.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<C> Default for EventQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}
