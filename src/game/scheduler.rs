// Deferred actions
//
// Delayed effects (a respawn after a fade) are queued with the simulation time
// they become due. The simulation drains the queue at the start of each tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::game::actuators::RespawnRequest;
use crate::game::movable::TargetId;

/// Effects the simulation knows how to carry out later
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredAction {
    Respawn {
        target: TargetId,
        request: RespawnRequest,
    },
}

#[derive(Debug)]
struct Scheduled<T> {
    due: f64,
    seq: u64,
    action: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed so the max-heap pops the earliest action first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Time-ordered queue of pending actions
#[derive(Debug)]
pub struct DeferredQueue<T> {
    heap: BinaryHeap<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run once simulation time reaches `due`
    pub fn schedule(&mut self, due: f64, action: T) {
        self.heap.push(Scheduled {
            due,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due at `now`, earliest first.
    /// Actions due at the same time come out in scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|next| next.due <= now) {
            if let Some(scheduled) = self.heap.pop() {
                due.push(scheduled.action);
            }
        }
        due
    }

    /// Due time of the earliest pending action
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|next| next.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
