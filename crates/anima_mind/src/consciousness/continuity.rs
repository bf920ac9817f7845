use super::types::Thought;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded log of recent thoughts. Oldest is dropped first; capacity 0
/// stores nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuityBuffer {
    capacity: usize,
    thoughts: VecDeque<Thought>,
}

impl ContinuityBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            thoughts: VecDeque::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, thought: Thought) {
        if self.capacity == 0 {
            return;
        }
        if self.thoughts.len() == self.capacity {
            self.thoughts.pop_front();
        }
        self.thoughts.push_back(thought);
    }

    /// Snapshot, oldest first.
    pub fn items(&self) -> Vec<Thought> {
        self.thoughts.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
