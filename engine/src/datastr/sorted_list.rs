//! Priority queue as a sorted vector.
//!
//! Entries are kept in descending order, so the minimum sits at the end and can be
//! popped or peeked in `O(1)`. Insertion and decrease-key need a binary search and a shift, `O(n)`.

use super::graph::*;
use super::queue::{PriorityQueue, State};

#[derive(Debug)]
pub struct SortedList {
    // descending by (key, node)
    data: Vec<State<Distance>>,
    // key of every queued node
    queued: Vec<Option<Distance>>,
}

impl SortedList {
    fn insert(&mut self, state: State<Distance>) {
        let position = self.data.partition_point(|queued| *queued > state);
        self.data.insert(position, state);
    }

    fn remove(&mut self, state: State<Distance>) {
        let position = self.data.partition_point(|queued| *queued > state);
        debug_assert_eq!(self.data.get(position), Some(&state));
        self.data.remove(position);
    }
}

impl PriorityQueue for SortedList {
    const DECREASE_KEY: bool = true;

    fn new(max_id: usize) -> Self {
        SortedList {
            data: Vec::new(),
            queued: vec![None; max_id],
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, state: State<Distance>) {
        let node = state.node as usize;
        match self.queued[node] {
            Some(key) if state.key < key => self.remove(State { key, node: state.node }),
            Some(_) => return,
            None => (),
        }
        self.queued[node] = Some(state.key);
        self.insert(state);
    }

    fn pop(&mut self) -> Option<State<Distance>> {
        let min = self.data.pop()?;
        self.queued[min.node as usize] = None;
        Some(min)
    }

    fn peek(&self) -> Option<State<Distance>> {
        self.data.last().copied()
    }

    fn clear(&mut self) {
        for state in self.data.drain(..) {
            self.queued[state.node as usize] = None;
        }
    }
}
