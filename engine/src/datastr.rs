//! Data structures used by algorithms.

pub mod distance_matrix;
pub mod graph;
pub mod index_heap;
pub mod lazy_heap;
pub mod pairing_heap;
pub mod queue;
pub mod sorted_list;
pub mod timestamped_vector;
