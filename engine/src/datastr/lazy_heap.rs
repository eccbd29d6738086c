//! A d-ary heap without a position table.
//!
//! Without positions there is no decrease-key. Pushing a node again adds a second, shadow entry
//! and the outdated one stays in the heap until it surfaces.
//! Only the first extraction of a node counts, the node is then marked as extracted.
//! Outdated entries are dropped as soon as they reach the top, so `peek` always shows a live entry.

use super::graph::*;
use super::queue::{PriorityQueue, State};
use super::timestamped_vector::TimestampedVector;
use std::cmp::min;

#[derive(Debug)]
pub struct LazyMinHeap<const ARITY: usize = 4> {
    data: Vec<State<Distance>>,
    // nodes which already came out of the queue since the last clear
    extracted: TimestampedVector<bool>,
}

impl<const ARITY: usize> LazyMinHeap<ARITY> {
    fn remove_top(&mut self) -> State<Distance> {
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.move_down_in_tree(0);
        }
        top
    }

    fn move_up_in_tree(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / ARITY;
            if self.data[parent] < self.data[position] {
                break;
            }
            self.data.swap(parent, position);
            position = parent;
        }
    }

    fn move_down_in_tree(&mut self, mut position: usize) {
        let heap_size = self.data.len();
        loop {
            let first_child = min(ARITY * position + 1, heap_size);
            let last_child = min(ARITY * position + ARITY + 1, heap_size);
            match (first_child..last_child).min_by_key(|&child| self.data[child]) {
                Some(smallest_child) if self.data[smallest_child] < self.data[position] => {
                    self.data.swap(smallest_child, position);
                    position = smallest_child;
                }
                _ => return,
            }
        }
    }
}

impl<const ARITY: usize> PriorityQueue for LazyMinHeap<ARITY> {
    const DECREASE_KEY: bool = false;

    fn new(max_id: usize) -> Self {
        assert!(ARITY >= 2);
        LazyMinHeap {
            data: Vec::new(),
            extracted: TimestampedVector::new(max_id, false),
        }
    }

    /// Number of entries including outdated ones.
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, state: State<Distance>) {
        if self.extracted[state.node as usize] {
            return;
        }
        self.data.push(state);
        self.move_up_in_tree(self.data.len() - 1);
    }

    fn pop(&mut self) -> Option<State<Distance>> {
        if self.data.is_empty() {
            return None;
        }
        let min = self.remove_top();
        debug_assert!(!self.extracted[min.node as usize]);
        self.extracted.set(min.node as usize, true);

        while let Some(top) = self.data.first() {
            if !self.extracted[top.node as usize] {
                break;
            }
            self.remove_top();
        }

        Some(min)
    }

    fn peek(&self) -> Option<State<Distance>> {
        self.data.first().copied()
    }

    fn clear(&mut self) {
        self.data.clear();
        self.extracted.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod binary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::BinaryLazyHeap);
    }
    mod quaternary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::QuaternaryLazyHeap);
    }
    mod octonary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::OctonaryLazyHeap);
    }
    mod hexadecimal {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::HexadecimalLazyHeap);
    }

    #[test]
    fn shadow_entries_are_dropped_after_first_extraction() {
        let mut heap = LazyMinHeap::<2>::new(3);
        heap.push(State { key: 9, node: 0 });
        heap.push(State { key: 4, node: 0 });
        heap.push(State { key: 6, node: 1 });
        assert_eq!(heap.len(), 3);

        assert_eq!(heap.pop(), Some(State { key: 4, node: 0 }));
        assert_eq!(heap.peek(), Some(State { key: 6, node: 1 }));
        assert_eq!(heap.pop(), Some(State { key: 6, node: 1 }));
        // the outdated entry of node 0 never shows up
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn extracted_nodes_are_not_queued_again() {
        let mut heap = LazyMinHeap::<4>::new(2);
        heap.push(State { key: 1, node: 0 });
        assert_eq!(heap.pop(), Some(State { key: 1, node: 0 }));

        heap.push(State { key: 0, node: 0 });
        assert!(heap.is_empty());

        heap.clear();
        heap.push(State { key: 0, node: 0 });
        assert_eq!(heap.pop(), Some(State { key: 0, node: 0 }));
    }
}
