//! Goto static graph representation for route planning algorithms.
//!
//! Nodes and edges can be identified by a unique id, going from `0` to `n-1` and `m-1` respectively, where `n` is the number of nodes and `m` the number of directed arcs.
//! We store the graph as an adjacency array using three collections: `first_out`, `head` and `weight`.
//! `head` and `weight` have each `m` elements.
//! `first_out` has `n+1` elements.
//! The first element of `first_out` is always 0 and the last one `m`.
//! `first_out[x]` contains the id of the first edge that is an outgoing edge of node `x`.
//! Thus, `head[first_out[x]..first_out[x+1]]` contains all neighbors of `x`.

use super::*;
use crate::error::{Error, Result};
use crate::io::*;
use std::ops::Range;

/// Container struct for the three collections of a graph.
/// Generic over the types of the three data collections.
/// Anything that can be viewed as a slice works, so both owned (`Vec<T>`, `Box<[T]>`) and borrowed data is possible.
#[derive(Debug, Clone)]
pub struct FirstOutGraph<FirstOutContainer, HeadContainer, WeightContainer> {
    // index of first edge of each node +1 entry in the end
    first_out: FirstOutContainer,
    // the node ids to which each edge points
    head: HeadContainer,
    // the weight of each edge
    weight: WeightContainer,
}

impl<FirstOutContainer, HeadContainer, WeightContainer> FirstOutGraph<FirstOutContainer, HeadContainer, WeightContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    WeightContainer: AsRef<[Weight]>,
{
    /// Borrow a slice of the first_out data
    pub fn first_out(&self) -> &[EdgeId] {
        self.first_out.as_ref()
    }
    /// Borrow a slice of the head data
    pub fn head(&self) -> &[NodeId] {
        self.head.as_ref()
    }
    /// Borrow a slice of the weight data
    pub fn weight(&self) -> &[Weight] {
        self.weight.as_ref()
    }

    /// Create a new `FirstOutGraph` from the three containers.
    /// Panics if the containers do not describe a valid adjacency array.
    pub fn new(first_out: FirstOutContainer, head: HeadContainer, weight: WeightContainer) -> Self {
        assert!(first_out.as_ref().len() < NodeId::MAX as usize);
        assert!(head.as_ref().len() < EdgeId::MAX as usize);
        assert_eq!(*first_out.as_ref().first().unwrap(), 0);
        assert_eq!(*first_out.as_ref().last().unwrap() as usize, head.as_ref().len());
        assert_eq!(weight.as_ref().len(), head.as_ref().len());

        FirstOutGraph { first_out, head, weight }
    }

    /// Decompose the graph into its three seperate data containers
    pub fn decompose(self) -> (FirstOutContainer, HeadContainer, WeightContainer) {
        (self.first_out, self.head, self.weight)
    }

    /// Get the range of edge ids which make up the outgoing edges of `node`
    #[inline(always)]
    pub fn neighbor_edge_indices_usize(&self, node: NodeId) -> Range<usize> {
        let node = node as usize;
        (self.first_out()[node] as usize)..(self.first_out()[node + 1] as usize)
    }
}

impl<FirstOutContainer, HeadContainer, WeightContainer> Deconstruct for FirstOutGraph<FirstOutContainer, HeadContainer, WeightContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    WeightContainer: AsRef<[Weight]>,
{
    fn store_each(&self, store: &dyn Fn(&str, &dyn Store) -> std::io::Result<()>) -> std::io::Result<()> {
        store("first_out", &self.first_out())?;
        store("head", &self.head())?;
        store("weight", &self.weight())?;
        Ok(())
    }
}

pub type OwnedGraph = FirstOutGraph<Vec<EdgeId>, Vec<NodeId>, Vec<Weight>>;

/// Largest node count `new` accepts, `first_out` needs one more entry than there are nodes.
pub const MAX_NUM_NODES: usize = NodeId::MAX as usize - 2;

impl OwnedGraph {
    pub fn from_adjancecy_lists(adjancecy_lists: Vec<Vec<Link>>) -> OwnedGraph {
        // create first_out array by doing a prefix sum over the adjancecy list sizes
        let first_out = {
            let degrees = adjancecy_lists.iter().map(|neighbors| neighbors.len() as EdgeId);
            degrees_to_first_out(degrees).collect()
        };

        // append all adjancecy list and split the pairs into two seperate vectors
        let (head, weight) = adjancecy_lists
            .into_iter()
            .flat_map(|neighbors| neighbors.into_iter().map(|Link { node, weight }| (node, weight)))
            .unzip();

        OwnedGraph::new(first_out, head, weight)
    }

    /// Build a graph from an unordered arc list.
    ///
    /// Outgoing links of each node keep the order in which they appear in `edges`.
    /// Parallel arcs are kept. Fails before anything is allocated for the adjacency array
    /// if `num_nodes` exceeds `MAX_NUM_NODES`, an endpoint is not in `[0, num_nodes)`
    /// or a weight is negative or larger than `Weight::MAX`.
    pub fn from_edges(num_nodes: usize, edges: &[Edge]) -> Result<OwnedGraph> {
        if num_nodes > MAX_NUM_NODES {
            return Err(Error::NodeOutOfRange {
                node: num_nodes as u64 - 1,
                num_nodes: MAX_NUM_NODES,
            });
        }
        for &Edge { from, to, weight } in edges {
            for node in [from, to] {
                if node as usize >= num_nodes {
                    return Err(Error::NodeOutOfRange { node: node.into(), num_nodes });
                }
            }
            if weight < 0 || weight > Weight::MAX as i64 {
                return Err(Error::InvalidWeight { from, to, weight });
            }
        }

        let mut adjancecy_lists = vec![Vec::new(); num_nodes];
        for &Edge { from, to, weight } in edges {
            adjancecy_lists[from as usize].push(Link { node: to, weight: weight as Weight });
        }

        Ok(Self::from_adjancecy_lists(adjancecy_lists))
    }
}

impl Reconstruct for OwnedGraph {
    fn reconstruct_with(loader: Loader) -> std::io::Result<Self> {
        let first_out: Vec<EdgeId> = loader.load("first_out")?;
        let head: Vec<NodeId> = loader.load("head")?;
        let weight: Vec<Weight> = loader.load("weight")?;

        let num_nodes = first_out.len().saturating_sub(1);
        let consistent = first_out.first() == Some(&0)
            && first_out.last().map(|&m| m as usize) == Some(head.len())
            && weight.len() == head.len()
            && first_out.windows(2).all(|w| w[0] <= w[1])
            && num_nodes <= MAX_NUM_NODES
            && head.iter().all(|&h| (h as usize) < num_nodes);

        if !consistent {
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "inconsistent adjacency array"));
        }

        Ok(Self::new(first_out, head, weight))
    }
}

impl<G: LinkIterable<Link>> BuildReversed<G> for OwnedGraph {
    fn reversed(graph: &G) -> Self {
        // vector of adjacency lists for the reverse graph
        let mut reversed: Vec<Vec<Link>> = (0..graph.num_nodes()).map(|_| Vec::<Link>::new()).collect();

        // iterate over all edges and insert them in the reversed structure
        for node in 0..(graph.num_nodes() as NodeId) {
            for Link { node: neighbor, weight } in graph.link_iter(node) {
                reversed[neighbor as usize].push(Link { node, weight });
            }
        }

        OwnedGraph::from_adjancecy_lists(reversed)
    }
}

impl<FirstOutContainer, HeadContainer, WeightContainer> Graph for FirstOutGraph<FirstOutContainer, HeadContainer, WeightContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    WeightContainer: AsRef<[Weight]>,
{
    fn num_nodes(&self) -> usize {
        self.first_out().len() - 1
    }

    fn num_arcs(&self) -> usize {
        self.head().len()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.neighbor_edge_indices_usize(node).len()
    }
}

impl<FirstOutContainer, HeadContainer, WeightContainer> LinkIterable<Link> for FirstOutGraph<FirstOutContainer, HeadContainer, WeightContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    WeightContainer: AsRef<[Weight]>,
{
    #[allow(clippy::type_complexity)]
    type Iter<'a> = std::iter::Map<std::iter::Zip<std::slice::Iter<'a, NodeId>, std::slice::Iter<'a, Weight>>, fn((&NodeId, &Weight)) -> Link>
    where
        Self: 'a;

    #[inline]
    fn link_iter(&self, node: NodeId) -> Self::Iter<'_> {
        let range = self.neighbor_edge_indices_usize(node);
        self.head()[range.clone()]
            .iter()
            .zip(self.weight()[range].iter())
            .map(|(&neighbor, &weight)| Link { node: neighbor, weight })
    }
}

/// Build a first_out array from an iterator of degrees
pub fn degrees_to_first_out<I: Iterator<Item = EdgeId>>(degrees: I) -> impl Iterator<Item = EdgeId> {
    std::iter::once(0).chain(degrees.scan(0, |state, degree| {
        *state += degree as EdgeId;
        Some(*state)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversal() {
        let graph = FirstOutGraph::new(vec![0, 2, 3, 6, 8, 8, 8], vec![2, 1, 3, 1, 3, 4, 0, 4], vec![10, 1, 2, 1, 3, 1, 7, 2]);

        //
        //                  7
        //          +-----------------+
        //          |                 |
        //          v   1        2    |  2
        //          0 -----> 1 -----> 3 ---> 4
        //          |        ^        ^      ^
        //          |        | 1      |      |
        //          |        |        | 3    | 1
        //          +------> 2 -------+      |
        //           10      |               |
        //                   +---------------+
        //
        let reversed = OwnedGraph::reversed(&graph);

        assert_eq!(reversed.first_out(), &[0, 1, 3, 4, 6, 8, 8]);
        assert_eq!(reversed.head(), &[3, 0, 2, 0, 1, 2, 2, 3]);
        assert_eq!(reversed.weight(), &[7, 1, 1, 10, 2, 3, 1, 2]);
    }

    #[test]
    fn from_edges_keeps_input_order_and_parallel_arcs() {
        let edges = [
            Edge { from: 1, to: 0, weight: 4 },
            Edge { from: 0, to: 2, weight: 5 },
            Edge { from: 0, to: 1, weight: 1 },
            Edge { from: 0, to: 1, weight: 3 },
        ];
        let graph = OwnedGraph::from_edges(3, &edges).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_arcs(), 4);
        assert_eq!(graph.first_out(), &[0, 3, 4, 4]);
        assert_eq!(graph.head(), &[2, 1, 1, 0]);
        assert_eq!(graph.weight(), &[5, 1, 3, 4]);
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn from_edges_rejects_out_of_range_endpoints() {
        let edges = [Edge { from: 0, to: 3, weight: 1 }];
        assert!(matches!(
            OwnedGraph::from_edges(3, &edges),
            Err(Error::NodeOutOfRange { node: 3, num_nodes: 3 })
        ));
    }

    #[test]
    fn from_edges_rejects_negative_and_infinite_weights() {
        let negative = [Edge { from: 0, to: 1, weight: -1 }];
        assert!(matches!(OwnedGraph::from_edges(2, &negative), Err(Error::InvalidWeight { weight: -1, .. })));

        let too_large = [Edge { from: 0, to: 1, weight: Weight::MAX as i64 + 1 }];
        assert!(matches!(OwnedGraph::from_edges(2, &too_large), Err(Error::InvalidWeight { .. })));

        let largest = [Edge { from: 0, to: 1, weight: Weight::MAX as i64 }];
        assert_eq!(OwnedGraph::from_edges(2, &largest).unwrap().weight(), &[Weight::MAX]);
    }

    #[test]
    fn from_edges_rejects_node_counts_beyond_the_id_space() {
        assert!(matches!(
            OwnedGraph::from_edges(NodeId::MAX as usize, &[]),
            Err(Error::NodeOutOfRange { num_nodes: MAX_NUM_NODES, .. })
        ));
    }

    #[test]
    fn empty_graph() {
        let graph = OwnedGraph::from_edges(0, &[]).unwrap();
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.num_arcs(), 0);
    }
}
