//! Something with graphs 🤷‍♂️
//!
//! Several traits and structs for working with static road graphs.

pub mod first_out_graph;
pub mod road_network;

pub use self::first_out_graph::{FirstOutGraph, OwnedGraph, MAX_NUM_NODES};
pub use self::road_network::RoadNetwork;

/// Node ids are 32bit unsigned ints
pub type NodeId = u32;
/// Edge ids are 32bit unsigned ints
pub type EdgeId = u32;
/// Arc weights are 32bit unsigned ints
pub type Weight = u32;
/// Path lengths and queue keys are 64bit.
/// A graph has fewer than `NodeId::MAX` nodes, so a simple path has fewer than `2^32 - 1` arcs
/// of weight at most `Weight::MAX` and its length stays below `Distance::MAX`.
pub type Distance = u64;
/// Strictly larger than every path length, so it only ever means "not reached" or "unreachable".
pub const INFINITY: Distance = Distance::MAX;

/// Extend a path of length `dist` by an arc of length `weight`.
#[inline(always)]
pub fn link_distance(dist: Distance, weight: Weight) -> Distance {
    dist.saturating_add(Distance::from(weight))
}

/// Simple struct for weighted links.
/// No behaviour, just a pure data struct.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    pub node: NodeId,
    pub weight: Weight,
}

/// A directed arc as it comes out of an importer, before validation.
/// The weight is signed so that negative input can be detected and rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i64,
}

/// Planar node coordinates.
/// Not used by any search, only passed through to consumers which want geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

/// Base trait for graphs.
/// Interesting behaviour will be added through subtraits.
pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeId) -> usize;
}

pub trait LinkIterable<Link>: Graph {
    /// Type of the outgoing neighbor iterator.
    type Iter<'a>: Iterator<Item = Link>
    where
        Self: 'a;

    /// Get a iterator over the outgoing links of the given node.
    fn link_iter(&self, node: NodeId) -> Self::Iter<'_>;
}

/// Generic Trait for building reversed graphs.
/// Type setup similar to `FromIter` for `std::iter::collect`.
pub trait BuildReversed<G> {
    /// Create a new graph with all edges reversed
    fn reversed(graph: &G) -> Self;
}
