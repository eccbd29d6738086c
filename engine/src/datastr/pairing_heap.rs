//! Pairing heap over node ids.
//!
//! Heap nodes live in an arena indexed by graph node id and point to each other through ids,
//! with `INVALID` as null link. Every entry has a `child` (leftmost child), a `next` (right sibling)
//! and a `prev` link, which points to the parent for a leftmost child and to the left sibling otherwise.
//!
//! `meld` is the only primitive: insert melds a singleton into the root, decrease-key cuts the
//! subtree of the entry and melds it back, and extract-min combines the children of the root
//! with the two-pass pairing (pairwise left to right, then accumulate right to left).

use super::graph::*;
use super::queue::{PriorityQueue, State};
use std::mem::take;

const INVALID: NodeId = NodeId::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    state: State<Distance>,
    child: NodeId,
    next: NodeId,
    prev: NodeId,
}

impl Entry {
    const EMPTY: Entry = Entry {
        state: State { key: INFINITY, node: INVALID },
        child: INVALID,
        next: INVALID,
        prev: INVALID,
    };
}

#[derive(Debug)]
pub struct PairingHeap {
    entries: Vec<Entry>,
    contained: Vec<bool>,
    root: NodeId,
    len: usize,
    // reused for the children of the root during pop and as DFS stack during clear
    pairing_buffer: Vec<NodeId>,
}

impl PairingHeap {
    fn entry(&mut self, id: NodeId) -> &mut Entry {
        &mut self.entries[id as usize]
    }

    /// Meld two trees, returning the new root. Both arguments have to be roots.
    fn meld(&mut self, a: NodeId, b: NodeId) -> NodeId {
        debug_assert!(self.entries[a as usize].prev == INVALID && self.entries[a as usize].next == INVALID);
        debug_assert!(self.entries[b as usize].prev == INVALID && self.entries[b as usize].next == INVALID);

        let (parent, child) = if self.entries[b as usize].state < self.entries[a as usize].state {
            (b, a)
        } else {
            (a, b)
        };

        let first_child = self.entries[parent as usize].child;
        if first_child != INVALID {
            self.entry(first_child).prev = child;
        }
        let child_entry = self.entry(child);
        child_entry.next = first_child;
        child_entry.prev = parent;
        self.entry(parent).child = child;

        parent
    }

    /// Detach the subtree rooted at `id` from its parent and siblings.
    fn cut(&mut self, id: NodeId) {
        let Entry { prev, next, .. } = self.entries[id as usize];
        debug_assert!(prev != INVALID);

        let prev_entry = self.entry(prev);
        if prev_entry.child == id {
            prev_entry.child = next;
        } else {
            prev_entry.next = next;
        }
        if next != INVALID {
            self.entry(next).prev = prev;
        }

        let entry = self.entry(id);
        entry.prev = INVALID;
        entry.next = INVALID;
    }

    fn decrease_key(&mut self, state: State<Distance>) {
        let node = state.node;
        self.entry(node).state = state;
        if node != self.root {
            self.cut(node);
            self.root = self.meld(self.root, node);
        }
    }

    fn two_pass_pairing(&mut self, first_child: NodeId) -> NodeId {
        let mut trees = take(&mut self.pairing_buffer);
        trees.clear();

        let mut current = first_child;
        while current != INVALID {
            let entry = self.entry(current);
            let next = entry.next;
            entry.next = INVALID;
            entry.prev = INVALID;
            trees.push(current);
            current = next;
        }

        // first pass: meld pairs from left to right
        let mut num_pairs = 0;
        for i in (0..trees.len()).step_by(2) {
            trees[num_pairs] = if i + 1 < trees.len() { self.meld(trees[i], trees[i + 1]) } else { trees[i] };
            num_pairs += 1;
        }
        trees.truncate(num_pairs);

        // second pass: accumulate from right to left
        let mut root = trees.pop().unwrap_or(INVALID);
        while let Some(tree) = trees.pop() {
            root = self.meld(tree, root);
        }

        self.pairing_buffer = trees;
        root
    }
}

impl PriorityQueue for PairingHeap {
    const DECREASE_KEY: bool = true;

    fn new(max_id: usize) -> Self {
        assert!(max_id < INVALID as usize);
        PairingHeap {
            entries: vec![Entry::EMPTY; max_id],
            contained: vec![false; max_id],
            root: INVALID,
            len: 0,
            pairing_buffer: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, state: State<Distance>) {
        let node = state.node;
        if self.contained[node as usize] {
            if state < self.entries[node as usize].state {
                self.decrease_key(state);
            }
            return;
        }

        self.contained[node as usize] = true;
        self.len += 1;
        *self.entry(node) = Entry { state, ..Entry::EMPTY };
        self.root = if self.root == INVALID { node } else { self.meld(self.root, node) };
    }

    fn pop(&mut self) -> Option<State<Distance>> {
        if self.root == INVALID {
            return None;
        }
        let min = self.root;
        let Entry { state, child, .. } = self.entries[min as usize];
        self.contained[min as usize] = false;
        self.len -= 1;
        self.entry(min).child = INVALID;

        self.root = self.two_pass_pairing(child);
        Some(state)
    }

    fn peek(&self) -> Option<State<Distance>> {
        if self.root == INVALID {
            None
        } else {
            Some(self.entries[self.root as usize].state)
        }
    }

    fn clear(&mut self) {
        let mut stack = take(&mut self.pairing_buffer);
        stack.clear();
        if self.root != INVALID {
            stack.push(self.root);
        }
        while let Some(id) = stack.pop() {
            let Entry { child, next, .. } = self.entries[id as usize];
            self.contained[id as usize] = false;
            *self.entry(id) = Entry::EMPTY;
            stack.extend([child, next].into_iter().filter(|&link| link != INVALID));
        }
        self.pairing_buffer = stack;
        self.root = INVALID;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::datastr::queue::contract_tests::queue_contract_tests!(PairingHeap);

    // walks the tree from the root and checks heap order and link consistency
    fn assert_consistent(heap: &PairingHeap) {
        let mut seen = 0;
        let mut stack = vec![heap.root].into_iter().filter(|&r| r != INVALID).collect::<Vec<_>>();
        if let Some(&root) = stack.first() {
            assert_eq!(heap.entries[root as usize].prev, INVALID);
            assert_eq!(heap.entries[root as usize].next, INVALID);
        }
        while let Some(id) = stack.pop() {
            seen += 1;
            assert!(heap.contained[id as usize]);
            let mut prev = id;
            let mut child = heap.entries[id as usize].child;
            while child != INVALID {
                assert_eq!(heap.entries[child as usize].prev, prev);
                assert!(heap.entries[id as usize].state < heap.entries[child as usize].state);
                stack.push(child);
                prev = child;
                child = heap.entries[child as usize].next;
            }
        }
        assert_eq!(seen, heap.len());
    }

    #[test]
    fn decrease_key_of_deep_entries() {
        let mut heap = PairingHeap::new(8);
        for node in 0..8 {
            heap.push(State { key: 100 + node as Distance, node });
        }
        // forces some pairing, the remaining entries form deeper trees
        assert_eq!(heap.pop(), Some(State { key: 100, node: 0 }));
        assert_consistent(&heap);

        heap.push(State { key: 50, node: 7 });
        assert_consistent(&heap);
        heap.push(State { key: 60, node: 5 });
        assert_consistent(&heap);
        // not smaller, ignored
        heap.push(State { key: 200, node: 3 });
        assert_consistent(&heap);

        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop()).map(|s| s.node).collect();
        assert_eq!(order, vec![7, 5, 1, 2, 3, 4, 6]);
        assert!(heap.contained.iter().all(|&c| !c));
    }

    #[test]
    fn clear_resets_all_entries() {
        let mut heap = PairingHeap::new(5);
        for node in 0..5 {
            heap.push(State { key: 10 - node as Distance, node });
        }
        heap.pop();
        heap.clear();
        assert!(heap.contained.iter().all(|&c| !c));
        assert!(heap.entries.iter().all(|e| e.child == INVALID && e.next == INVALID && e.prev == INVALID));
        assert_consistent(&heap);
    }
}
