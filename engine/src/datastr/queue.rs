//! Common interface of the priority queues driving the searches.
//!
//! All queues store `State`s and are keyed by node id, so the capacity is fixed at construction.
//! Entries are ordered by `(key, node)`, which makes extraction order deterministic:
//! among equal keys, the smallest node id comes out first, regardless of the implementation.

use crate::cli::CliErr;
use crate::datastr::graph::*;
use crate::datastr::index_heap::{IndexdMinHeap, Indexing};
use crate::datastr::lazy_heap::LazyMinHeap;
use crate::datastr::pairing_heap::PairingHeap;
use crate::datastr::sorted_list::SortedList;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Queue entry: a node together with its priority.
#[derive(Copy, Clone, Eq, PartialEq, Debug, PartialOrd, Ord)]
pub struct State<W> {
    pub key: W,
    pub node: NodeId,
}

impl<W> Indexing for State<W> {
    #[inline]
    fn as_index(&self) -> usize {
        self.node as usize
    }
}

/// Min priority queue over node ids in `[0, max_id)`.
pub trait PriorityQueue: Sized {
    /// Whether a second `push` for a queued node updates the entry in place.
    /// When `false`, the queue holds duplicates and discards all but the first extraction of a node.
    const DECREASE_KEY: bool;

    fn new(max_id: usize) -> Self;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an entry.
    /// Queues with decrease-key lower the key of an already queued node if the new key is strictly smaller
    /// and ignore the push otherwise.
    fn push(&mut self, state: State<Distance>);
    fn pop(&mut self) -> Option<State<Distance>>;
    fn peek(&self) -> Option<State<Distance>>;
    /// Back to the empty state, ready for the next search.
    fn clear(&mut self);

    fn extract_min(&mut self) -> Result<State<Distance>> {
        self.pop().ok_or(Error::EmptyQueue)
    }

    fn peek_min(&self) -> Result<State<Distance>> {
        self.peek().ok_or(Error::EmptyQueue)
    }
}

pub type BinaryIndexHeap = IndexdMinHeap<State<Distance>, 2>;
pub type QuaternaryIndexHeap = IndexdMinHeap<State<Distance>, 4>;
pub type OctonaryIndexHeap = IndexdMinHeap<State<Distance>, 8>;
pub type HexadecimalIndexHeap = IndexdMinHeap<State<Distance>, 16>;

pub type BinaryLazyHeap = LazyMinHeap<2>;
pub type QuaternaryLazyHeap = LazyMinHeap<4>;
pub type OctonaryLazyHeap = LazyMinHeap<8>;
pub type HexadecimalLazyHeap = LazyMinHeap<16>;

/// Runtime selector for the concrete queue implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    IndexHeap2,
    IndexHeap4,
    IndexHeap8,
    IndexHeap16,
    LazyHeap2,
    LazyHeap4,
    LazyHeap8,
    LazyHeap16,
    SortedList,
    PairingHeap,
}

impl QueueKind {
    pub const ALL: [QueueKind; 10] = [
        QueueKind::IndexHeap2,
        QueueKind::IndexHeap4,
        QueueKind::IndexHeap8,
        QueueKind::IndexHeap16,
        QueueKind::LazyHeap2,
        QueueKind::LazyHeap4,
        QueueKind::LazyHeap8,
        QueueKind::LazyHeap16,
        QueueKind::SortedList,
        QueueKind::PairingHeap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QueueKind::IndexHeap2 => "index_heap_2",
            QueueKind::IndexHeap4 => "index_heap_4",
            QueueKind::IndexHeap8 => "index_heap_8",
            QueueKind::IndexHeap16 => "index_heap_16",
            QueueKind::LazyHeap2 => "lazy_heap_2",
            QueueKind::LazyHeap4 => "lazy_heap_4",
            QueueKind::LazyHeap8 => "lazy_heap_8",
            QueueKind::LazyHeap16 => "lazy_heap_16",
            QueueKind::SortedList => "sorted_list",
            QueueKind::PairingHeap => "pairing_heap",
        }
    }

    pub fn supports_decrease_key(self) -> bool {
        match self {
            QueueKind::IndexHeap2 | QueueKind::IndexHeap4 | QueueKind::IndexHeap8 | QueueKind::IndexHeap16 => BinaryIndexHeap::DECREASE_KEY,
            QueueKind::LazyHeap2 | QueueKind::LazyHeap4 | QueueKind::LazyHeap8 | QueueKind::LazyHeap16 => BinaryLazyHeap::DECREASE_KEY,
            QueueKind::SortedList => SortedList::DECREASE_KEY,
            QueueKind::PairingHeap => PairingHeap::DECREASE_KEY,
        }
    }
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueueKind {
    type Err = CliErr;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        QueueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or(CliErr("unknown queue kind, expected one of index_heap_{2,4,8,16}, lazy_heap_{2,4,8,16}, sorted_list, pairing_heap"))
    }
}
