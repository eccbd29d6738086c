//! Persisted one to all results, used to check that queue implementations and search modes
//! produce bit identical distances.

use crate::algo::compute_single_source;
use crate::datastr::{graph::*, queue::QueueKind};
use crate::error::Result;
use crate::io::*;

/// Distances from one source to every node reachable from it, in ascending node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceResult {
    pub source: NodeId,
    pub nodes: Vec<NodeId>,
    pub distances: Vec<Distance>,
}

/// First node where a result disagrees with the reference.
/// `INFINITY` on either side means the node is unreachable there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub node: NodeId,
    pub expected: Distance,
    pub actual: Distance,
}

impl ReferenceResult {
    /// Keep the reachable entries of a complete distance vector.
    pub fn from_distances(source: NodeId, distances: &[Distance]) -> Self {
        let (nodes, distances) = distances
            .iter()
            .enumerate()
            .filter(|&(_, &dist)| dist < INFINITY)
            .map(|(node, &dist)| (node as NodeId, dist))
            .unzip();

        ReferenceResult { source, nodes, distances }
    }

    pub fn compute(network: &RoadNetwork, source: NodeId, queue: QueueKind) -> Result<Self> {
        Ok(Self::from_distances(source, &compute_single_source(network, source, queue)?))
    }

    /// Fail with `NodeOutOfRange` if the result names nodes `network` does not have,
    /// e.g. because it was generated for another graph.
    pub fn check_nodes(&self, network: &RoadNetwork) -> Result<()> {
        network.check_node(self.source)?;
        self.nodes.last().map_or(Ok(()), |&node| network.check_node(node))
    }

    /// Compare a complete distance vector against the reference.
    pub fn compare(&self, distances: &[Distance]) -> Option<Mismatch> {
        let mut expected = self.nodes.iter().zip(self.distances.iter()).peekable();

        for (node, &actual) in distances.iter().enumerate() {
            let node = node as NodeId;
            let expected = match expected.peek() {
                Some(&(&reference_node, &dist)) if reference_node == node => {
                    expected.next();
                    dist
                }
                _ => INFINITY,
            };
            if expected != actual {
                return Some(Mismatch { node, expected, actual });
            }
        }

        // reachable nodes beyond the end of `distances`
        expected.next().map(|(&node, &expected)| Mismatch { node, expected, actual: INFINITY })
    }
}

impl Deconstruct for ReferenceResult {
    fn store_each(&self, store: &dyn Fn(&str, &dyn Store) -> std::io::Result<()>) -> std::io::Result<()> {
        store("source", &vec![self.source])?;
        store("node", &self.nodes)?;
        store("distance", &self.distances)?;
        Ok(())
    }
}

impl Reconstruct for ReferenceResult {
    fn reconstruct_with(loader: Loader) -> std::io::Result<Self> {
        let source: Vec<NodeId> = loader.load("source")?;
        let nodes: Vec<NodeId> = loader.load("node")?;
        let distances: Vec<Distance> = loader.load("distance")?;

        match source[..] {
            [source] if nodes.len() == distances.len() && nodes.windows(2).all(|w| w[0] < w[1]) => Ok(ReferenceResult { source, nodes, distances }),
            _ => Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "malformed reference result")),
        }
    }
}
