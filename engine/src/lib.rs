//! Shortest path computations on large static road graphs.
//!
//! The searches in `algo` are generic over the `PriorityQueue` abstraction in `datastr::queue`,
//! so the same Dijkstra variants can be benchmarked against different heap disciplines.
//! `algo` also contains a small runtime dispatch layer (`compute_*` functions) which selects
//! the queue through a `QueueKind` value.

#[macro_use]
pub mod report;
pub mod algo;
pub mod cli;
pub mod datastr;
pub mod error;
pub mod experiments;
pub mod import;
pub mod io;
pub mod reference;

pub use error::{Error, Result};

pub mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
