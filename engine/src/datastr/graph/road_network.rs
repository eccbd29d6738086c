//! A road graph together with everything derived from it once.

use super::*;
use crate::error::{Error, Result};
use crate::io::*;
use std::sync::OnceLock;

/// Immutable graph snapshot shared by all searches.
///
/// The reversed graph is only needed by backward searches and built on first access.
/// Coordinates are not used by any algorithm here, they are only passed through.
#[derive(Debug)]
pub struct RoadNetwork {
    graph: OwnedGraph,
    reversed: OnceLock<OwnedGraph>,
    coordinates: Option<Vec<Coordinate>>,
}

impl RoadNetwork {
    pub fn new(graph: OwnedGraph) -> Self {
        RoadNetwork {
            graph,
            reversed: OnceLock::new(),
            coordinates: None,
        }
    }

    /// Validate and build from an arc list, see `OwnedGraph::from_edges`.
    pub fn from_edges(num_nodes: usize, edges: &[Edge]) -> Result<Self> {
        Ok(Self::new(OwnedGraph::from_edges(num_nodes, edges)?))
    }

    /// Attach one coordinate per node.
    pub fn with_coordinates(mut self, coordinates: Vec<Coordinate>) -> Result<Self> {
        if coordinates.len() != self.num_nodes() {
            return Err(Error::InvalidCoordinates {
                expected: self.num_nodes(),
                actual: coordinates.len(),
            });
        }
        self.coordinates = Some(coordinates);
        Ok(self)
    }

    pub fn graph(&self) -> &OwnedGraph {
        &self.graph
    }

    /// The graph with all arcs flipped, built on first use.
    pub fn reversed(&self) -> &OwnedGraph {
        self.reversed.get_or_init(|| OwnedGraph::reversed(&self.graph))
    }

    pub fn coordinates(&self) -> Option<&[Coordinate]> {
        self.coordinates.as_deref()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_arcs(&self) -> usize {
        self.graph.num_arcs()
    }

    /// Fails with `NodeOutOfRange` unless `node` is a node of this network.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if (node as usize) < self.num_nodes() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node: node.into(),
                num_nodes: self.num_nodes(),
            })
        }
    }
}

impl From<OwnedGraph> for RoadNetwork {
    fn from(graph: OwnedGraph) -> Self {
        Self::new(graph)
    }
}

/// Stored as the graph files plus `x` and `y` if there are coordinates.
impl Deconstruct for RoadNetwork {
    fn store_each(&self, store: &dyn Fn(&str, &dyn Store) -> std::io::Result<()>) -> std::io::Result<()> {
        self.graph.store_each(store)?;
        if let Some(coordinates) = &self.coordinates {
            store("x", &coordinates.iter().map(|c| c.x).collect::<Vec<i64>>())?;
            store("y", &coordinates.iter().map(|c| c.y).collect::<Vec<i64>>())?;
        }
        Ok(())
    }
}

impl Reconstruct for RoadNetwork {
    fn reconstruct_with(loader: Loader) -> std::io::Result<Self> {
        let network = RoadNetwork::new(OwnedGraph::reconstruct_with(loader)?);
        if !loader.has("x") {
            return Ok(network);
        }

        let x: Vec<i64> = loader.load("x")?;
        let y: Vec<i64> = loader.load("y")?;
        if x.len() != y.len() {
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "x and y coordinate counts differ"));
        }
        let coordinates = x.into_iter().zip(y).map(|(x, y)| Coordinate { x, y }).collect();
        network
            .with_coordinates(coordinates)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> RoadNetwork {
        RoadNetwork::from_edges(
            3,
            &[
                Edge { from: 0, to: 1, weight: 2 },
                Edge { from: 2, to: 1, weight: 5 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn reversed_is_memoized() {
        let network = network();
        let first: *const OwnedGraph = network.reversed();
        assert!(std::ptr::eq(first, network.reversed()));
        assert_eq!(network.reversed().head(), &[0, 2]);
        assert_eq!(network.reversed().first_out(), &[0, 0, 2, 2]);
    }

    #[test]
    fn coordinates_have_to_match_node_count() {
        assert!(matches!(
            network().with_coordinates(vec![Coordinate::default(); 2]),
            Err(Error::InvalidCoordinates { expected: 3, actual: 2 })
        ));
        let network = network().with_coordinates(vec![Coordinate { x: 1, y: -1 }; 3]).unwrap();
        assert_eq!(network.coordinates().map(|c| c.len()), Some(3));
    }

    #[test]
    fn stored_networks_load_back() {
        let dir = std::env::temp_dir().join(format!("sp_algo_network_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let network = network().with_coordinates(vec![Coordinate { x: 1, y: 2 }, Coordinate { x: 3, y: 4 }, Coordinate { x: 5, y: 6 }]).unwrap();
        network.deconstruct_to(&dir).unwrap();
        let loaded = RoadNetwork::reconstruct_from(&dir).unwrap();

        assert_eq!(loaded.graph().first_out(), network.graph().first_out());
        assert_eq!(loaded.graph().head(), network.graph().head());
        assert_eq!(loaded.graph().weight(), network.graph().weight());
        assert_eq!(loaded.coordinates(), network.coordinates());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn check_node_bounds() {
        let network = network();
        assert!(network.check_node(2).is_ok());
        assert!(matches!(network.check_node(3), Err(Error::NodeOutOfRange { node: 3, num_nodes: 3 })));
    }
}
