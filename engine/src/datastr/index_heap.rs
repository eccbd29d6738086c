//! A priority queue implemented with a d-ary heap and a position table.
//!
//! Insertion and popping the minimal element have `O(log n)` time complexity.
//! Checking the minimal element is `O(1)`. Keys of elements in the heap can
//! also be increased or decreased, because the position of every element is known.
//! The arity is a const parameter, 4 if not given.
//!
//! # Examples
//!
//! ```
//! use sp_algo::datastr::index_heap::{Indexing, IndexdMinHeap};
//!
//! #[derive(Copy, Clone, Eq, PartialEq, Debug, Ord, PartialOrd)]
//! pub struct State {
//!     pub distance: usize,
//!     pub node: usize,
//! }
//!
//! // The `Indexing` traits needs to be implemented as well, so we can find elements to decrease their key.
//! impl Indexing for State {
//!     fn as_index(&self) -> usize {
//!         self.node as usize
//!     }
//! }
//!
//! let mut heap = IndexdMinHeap::<State, 8>::new(3);
//! heap.push(State { node: 0, distance: 42 });
//! heap.push(State { node: 1, distance: 23 });
//! heap.push(State { node: 2, distance: 50000 });
//! assert_eq!(heap.peek().cloned(), Some(State { node: 1, distance: 23 }));
//! heap.decrease_key(State { node: 0, distance: 1 });
//! assert_eq!(heap.pop(), Some(State { node: 0, distance: 1 }));
//! ```

use super::graph::Distance;
use super::queue::{PriorityQueue, State};
use std::cmp::min;

/// A trait to map elements in a heap to a unique index.
/// The element type of the `IndexdMinHeap` has to implement this trait.
pub trait Indexing {
    /// This method has to map a heap element to a unique `usize` index.
    fn as_index(&self) -> usize;
}

/// A priority queue where the elements are IDs from 0 to id_count-1 where id_count is a number that is set in the constructor.
/// The elements are sorted ascending by the ordering defined by the `Ord` trait.
/// The interface mirros the standard library BinaryHeap (except for the reversed order).
#[derive(Debug)]
pub struct IndexdMinHeap<T, const ARITY: usize = 4> {
    positions: Vec<usize>,
    data: Vec<T>,
}

const INVALID_POSITION: usize = usize::MAX;

impl<T: Ord + Indexing, const ARITY: usize> IndexdMinHeap<T, ARITY> {
    /// Creates an empty `IndexdMinHeap` as a min-heap.
    /// The indices (as defined by the `Indexing` trait) of all inserted elements
    /// will have to be between in `[0, max_index)`
    pub fn new(max_id: usize) -> IndexdMinHeap<T, ARITY> {
        assert!(ARITY >= 2);
        IndexdMinHeap {
            positions: vec![INVALID_POSITION; max_id],
            data: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the heap already contains an element mapped to the given index
    pub fn contains_index(&self, id: usize) -> bool {
        self.positions[id] != INVALID_POSITION
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        self.data.get(self.positions[id])
    }

    /// Drops all items from the heap.
    /// Only touches the positions of contained elements.
    pub fn clear(&mut self) {
        for element in &self.data {
            self.positions[element.as_index()] = INVALID_POSITION;
        }
        self.data.clear();
    }

    /// Returns a reference to the smallest item in the heap, or None if it is empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes the smallest item from the heap and returns it, or None if it is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let item = self.data.swap_remove(0);
        self.positions[item.as_index()] = INVALID_POSITION;
        if !self.data.is_empty() {
            self.positions[self.data[0].as_index()] = 0;
            self.move_down_in_tree(0);
        }
        Some(item)
    }

    /// Pushes an item onto the heap if its not yet in the queue.
    pub fn push_unless_contained(&mut self, element: T) {
        if !self.contains_index(element.as_index()) {
            self.push(element)
        }
    }

    /// Pushes an item onto the heap.
    /// Panics if an element with the same index already exists.
    pub fn push(&mut self, element: T) {
        assert!(!self.contains_index(element.as_index()));
        let insert_position = self.len();
        self.positions[element.as_index()] = insert_position;
        self.data.push(element);
        self.move_up_in_tree(insert_position);
    }

    /// Updates the key of a contained element in either direction.
    pub fn update_key(&mut self, element: T) {
        match element.cmp(&self.data[self.positions[element.as_index()]]) {
            std::cmp::Ordering::Less => self.decrease_key(element),
            std::cmp::Ordering::Greater => self.increase_key(element),
            _ => (),
        }
    }

    /// Replace a contained element with a smaller one.
    pub fn decrease_key(&mut self, element: T) {
        let position = self.positions[element.as_index()];
        debug_assert!(element <= self.data[position]);
        self.data[position] = element;
        self.move_up_in_tree(position);
    }

    /// Replace a contained element with a larger one.
    pub fn increase_key(&mut self, element: T) {
        let position = self.positions[element.as_index()];
        debug_assert!(element >= self.data[position]);
        self.data[position] = element;
        self.move_down_in_tree(position);
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        self.positions.swap(self.data[a].as_index(), self.data[b].as_index());
        self.data.swap(a, b);
    }

    fn move_up_in_tree(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / ARITY;
            if self.data[parent] < self.data[position] {
                break;
            }
            self.swap_positions(parent, position);
            position = parent;
        }
    }

    fn move_down_in_tree(&mut self, mut position: usize) {
        while let Some(smallest_child) = Self::children_index_range(position, self.len()).min_by_key(|&child| &self.data[child]) {
            if self.data[smallest_child] >= self.data[position] {
                return; // no child is smaller
            }
            self.swap_positions(smallest_child, position);
            position = smallest_child;
        }
    }

    fn children_index_range(parent_index: usize, heap_size: usize) -> std::ops::Range<usize> {
        let first_child = min(ARITY * parent_index + 1, heap_size);
        let last_child = min(ARITY * parent_index + ARITY + 1, heap_size);
        first_child..last_child
    }
}

impl<const ARITY: usize> PriorityQueue for IndexdMinHeap<State<Distance>, ARITY> {
    const DECREASE_KEY: bool = true;

    fn new(max_id: usize) -> Self {
        IndexdMinHeap::new(max_id)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, state: State<Distance>) {
        let queued = self.get(state.node as usize).copied();
        match queued {
            Some(queued) if state < queued => self.decrease_key(state),
            Some(_) => (),
            None => IndexdMinHeap::push(self, state),
        }
    }

    fn pop(&mut self) -> Option<State<Distance>> {
        IndexdMinHeap::pop(self)
    }

    fn peek(&self) -> Option<State<Distance>> {
        IndexdMinHeap::peek(self).copied()
    }

    fn clear(&mut self) {
        IndexdMinHeap::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod binary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::BinaryIndexHeap);
    }
    mod quaternary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::QuaternaryIndexHeap);
    }
    mod octonary {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::OctonaryIndexHeap);
    }
    mod hexadecimal {
        crate::datastr::queue::contract_tests::queue_contract_tests!(crate::datastr::queue::HexadecimalIndexHeap);
    }

    #[test]
    fn positions_follow_elements() {
        let mut heap = IndexdMinHeap::<State<Distance>, 2>::new(6);
        for (node, key) in [(0, 50), (1, 40), (2, 30), (3, 20), (4, 10)] {
            heap.push(State { key, node });
        }
        heap.decrease_key(State { key: 5, node: 0 });
        heap.increase_key(State { key: 60, node: 4 });
        heap.update_key(State { key: 25, node: 1 });

        for node in 0..5 {
            assert_eq!(heap.get(node).map(|s| s.node as usize), Some(node));
        }
        assert!(!heap.contains_index(5));

        let keys: Vec<Distance> = std::iter::from_fn(|| heap.pop()).map(|s| s.key).collect();
        assert_eq!(keys, vec![5, 20, 25, 30, 60]);
        assert!((0..6).all(|node| !heap.contains_index(node)));
    }
}
