//! Shortest path algorithms generic over the priority queue,
//! plus entry points which pick the queue implementation at runtime through a `QueueKind`.

use crate::cli::CliErr;
use crate::datastr::{distance_matrix::DistanceMatrix, graph::*, queue::*};
use crate::error::{Error, Result};
use std::str::FromStr;
use std::time::{Duration, Instant};

pub mod all_pairs;
pub mod dijkstra;

use self::dijkstra::{query::bidirectional_dijkstra, query::dijkstra as dijkstra_query, ChooseMinKeyDir};

/// Simply a source-target pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub from: NodeId,
    pub to: NodeId,
}

/// Generic container for query results.
/// Since queries modify the state of the internal algorithm data structures,
/// it is impossible to retrieve a path for an older query result once a new query was performed.
/// The borrow held by the path server enforces this.
#[derive(Debug)]
pub struct QueryResult<P, W> {
    distance: W,
    path_server: P,
}

impl<P, W: Copy> QueryResult<P, W> {
    pub fn new(distance: W, path_server: P) -> Self {
        Self { distance, path_server }
    }

    pub fn distance(&self) -> W {
        self.distance
    }
}

impl<P: PathServer, W: Copy> QueryResult<P, W> {
    pub fn path(&mut self) -> Vec<P::NodeInfo> {
        self.path_server.path()
    }
}

pub trait QueryServer {
    type P<'s>: PathServer
    where
        Self: 's;
    /// `None` if `query.to` is not reachable.
    fn query(&mut self, query: Query) -> Option<QueryResult<Self::P<'_>, Distance>>;
    /// Counters of the last query.
    fn stats(&self) -> SearchStats;
}

pub trait PathServer {
    type NodeInfo;
    fn path(&mut self) -> Vec<Self::NodeInfo>;
}

/// Work done by a search, summed over both directions for bidirectional searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub num_queue_pops: usize,
    pub num_queue_pushs: usize,
    pub num_relaxed_arcs: usize,
}

impl std::ops::Add for SearchStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        SearchStats {
            num_queue_pops: self.num_queue_pops + rhs.num_queue_pops,
            num_queue_pushs: self.num_queue_pushs + rhs.num_queue_pushs,
            num_relaxed_arcs: self.num_relaxed_arcs + rhs.num_relaxed_arcs,
        }
    }
}

impl SearchStats {
    pub fn report(&self) {
        report!("num_queue_pops", self.num_queue_pops);
        report!("num_queue_pushs", self.num_queue_pushs);
        report!("num_relaxed_arcs", self.num_relaxed_arcs);
    }
}

/// Limits for a single point to point query.
/// A query exceeding one of them fails with `Error::Timeout` instead of returning a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryBudget {
    pub max_settled_nodes: Option<usize>,
    pub time_limit: Option<Duration>,
}

// the clock is only read every this many settled nodes
const TIME_CHECK_INTERVAL: usize = 1024;

impl QueryBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn settled_nodes(max_settled_nodes: usize) -> Self {
        QueryBudget {
            max_settled_nodes: Some(max_settled_nodes),
            ..Self::default()
        }
    }

    pub fn time(time_limit: Duration) -> Self {
        QueryBudget {
            time_limit: Some(time_limit),
            ..Self::default()
        }
    }

    /// Start the clock. The returned closure has to be called with the number of nodes
    /// settled so far, before each further node is settled.
    pub(crate) fn start(self) -> impl FnMut(usize) -> Result<()> {
        let start = Instant::now();
        move |settled_nodes| {
            let nodes_exhausted = self.max_settled_nodes.map_or(false, |max| settled_nodes >= max);
            let time_exhausted = settled_nodes % TIME_CHECK_INTERVAL == 0 && self.time_limit.map_or(false, |limit| start.elapsed() > limit);
            if nodes_exhausted || time_exhausted {
                Err(Error::Timeout { settled_nodes })
            } else {
                Ok(())
            }
        }
    }
}

/// How `compute_point_to_point` finds the distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointToPointMode {
    /// Full single source search, then look up the target.
    Plain,
    /// Single source search stopping once the target is settled.
    EarlyAbort,
    /// Forward and backward search meeting in the middle.
    Bidirectional,
}

impl PointToPointMode {
    pub const ALL: [PointToPointMode; 3] = [PointToPointMode::Plain, PointToPointMode::EarlyAbort, PointToPointMode::Bidirectional];

    pub fn name(self) -> &'static str {
        match self {
            PointToPointMode::Plain => "plain",
            PointToPointMode::EarlyAbort => "early_abort",
            PointToPointMode::Bidirectional => "bidirectional",
        }
    }
}

impl FromStr for PointToPointMode {
    type Err = CliErr;

    fn from_str(s: &str) -> std::result::Result<Self, CliErr> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or(CliErr("unknown point to point mode, expected plain, early_abort or bidirectional"))
    }
}

/// How `compute_all_pairs` fills the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllPairsMode {
    /// One single source search per node, in parallel.
    Dijkstra,
    /// Floyd-Warshall, ignores the queue.
    Matrix,
}

impl AllPairsMode {
    pub fn name(self) -> &'static str {
        match self {
            AllPairsMode::Dijkstra => "dijkstra",
            AllPairsMode::Matrix => "matrix",
        }
    }
}

impl FromStr for AllPairsMode {
    type Err = CliErr;

    fn from_str(s: &str) -> std::result::Result<Self, CliErr> {
        match s {
            "dijkstra" => Ok(AllPairsMode::Dijkstra),
            "matrix" => Ok(AllPairsMode::Matrix),
            _ => Err(CliErr("unknown all pairs mode, expected dijkstra or matrix")),
        }
    }
}

/// Monomorphize `$body` for the queue selected by `$kind`, with `$Q` naming the queue type.
macro_rules! with_queue {
    ($kind:expr, $Q:ident => $body:expr) => {
        match $kind {
            $crate::datastr::queue::QueueKind::IndexHeap2 => {
                type $Q = $crate::datastr::queue::BinaryIndexHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::IndexHeap4 => {
                type $Q = $crate::datastr::queue::QuaternaryIndexHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::IndexHeap8 => {
                type $Q = $crate::datastr::queue::OctonaryIndexHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::IndexHeap16 => {
                type $Q = $crate::datastr::queue::HexadecimalIndexHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::LazyHeap2 => {
                type $Q = $crate::datastr::queue::BinaryLazyHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::LazyHeap4 => {
                type $Q = $crate::datastr::queue::QuaternaryLazyHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::LazyHeap8 => {
                type $Q = $crate::datastr::queue::OctonaryLazyHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::LazyHeap16 => {
                type $Q = $crate::datastr::queue::HexadecimalLazyHeap;
                $body
            }
            $crate::datastr::queue::QueueKind::SortedList => {
                type $Q = $crate::datastr::sorted_list::SortedList;
                $body
            }
            $crate::datastr::queue::QueueKind::PairingHeap => {
                type $Q = $crate::datastr::pairing_heap::PairingHeap;
                $body
            }
        }
    };
}
pub(crate) use with_queue;

type DijkstraServer<'a, Q> = dijkstra_query::Server<Q, OwnedGraph, &'a OwnedGraph>;
type BidirServer<'a, Q> = bidirectional_dijkstra::Server<Q, ChooseMinKeyDir, OwnedGraph, &'a OwnedGraph>;

/// Distances from `source` to every node, `INFINITY` for unreachable ones.
pub fn compute_single_source(network: &RoadNetwork, source: NodeId, queue: QueueKind) -> Result<Vec<Distance>> {
    network.check_node(source)?;
    Ok(with_queue!(queue, Q => DijkstraServer::<Q>::new(network.graph()).one_to_all(source).distances()))
}

/// Distance from `source` to `target`, `INFINITY` if unreachable.
/// All modes return the same distance.
pub fn compute_point_to_point(network: &RoadNetwork, source: NodeId, target: NodeId, queue: QueueKind, mode: PointToPointMode) -> Result<Distance> {
    compute_point_to_point_with_budget(network, source, target, queue, mode, QueryBudget::unlimited())
}

/// Like `compute_point_to_point`, but fails with `Error::Timeout` when the search exceeds `budget`.
pub fn compute_point_to_point_with_budget(
    network: &RoadNetwork,
    source: NodeId,
    target: NodeId,
    queue: QueueKind,
    mode: PointToPointMode,
    budget: QueryBudget,
) -> Result<Distance> {
    network.check_node(source)?;
    network.check_node(target)?;

    let distance = with_queue!(queue, Q => match mode {
        PointToPointMode::Plain => Some(DijkstraServer::<Q>::new(network.graph()).one_to_all_with_budget(source, budget)?.distance(target)),
        PointToPointMode::EarlyAbort => DijkstraServer::<Q>::new(network.graph()).distance_with_budget(source, target, budget)?,
        PointToPointMode::Bidirectional => BidirServer::<Q>::from_network(network).distance_with_budget(source, target, budget)?,
    });

    Ok(distance.unwrap_or(INFINITY))
}

/// Node sequence of a shortest path from `source` to `target`, both included.
/// Fails with `Error::NoPath` if `target` is unreachable.
pub fn compute_shortest_path(network: &RoadNetwork, source: NodeId, target: NodeId, queue: QueueKind) -> Result<Vec<NodeId>> {
    network.check_node(source)?;
    network.check_node(target)?;

    let path = with_queue!(queue, Q => {
        let mut server = DijkstraServer::<Q>::new(network.graph());
        let path = server.query(Query { from: source, to: target }).map(|mut result| result.path());
        path
    });

    path.ok_or(Error::NoPath { from: source, to: target })
}

/// Distances between all pairs of nodes.
/// The queue is only used in `AllPairsMode::Dijkstra`.
pub fn compute_all_pairs(network: &RoadNetwork, queue: QueueKind, mode: AllPairsMode) -> Result<DistanceMatrix> {
    Ok(match mode {
        AllPairsMode::Dijkstra => with_queue!(queue, Q => all_pairs::dijkstra_all_pairs::<Q, _>(network.graph())),
        AllPairsMode::Matrix => all_pairs::floyd_warshall(network.graph()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> RoadNetwork {
        // 0 -> 1 -> 2 -> 3 with a longer shortcut 0 -> 2, node 4 isolated
        RoadNetwork::from_edges(
            5,
            &[
                Edge { from: 0, to: 1, weight: 1 },
                Edge { from: 1, to: 2, weight: 2 },
                Edge { from: 0, to: 2, weight: 5 },
                Edge { from: 2, to: 3, weight: 1 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn invalid_nodes_are_rejected_by_every_entry_point() {
        let network = network();
        let kind = QueueKind::IndexHeap4;
        assert!(matches!(compute_single_source(&network, 5, kind), Err(Error::NodeOutOfRange { node: 5, num_nodes: 5 })));
        for mode in PointToPointMode::ALL {
            assert!(matches!(compute_point_to_point(&network, 0, 9, kind, mode), Err(Error::NodeOutOfRange { node: 9, .. })));
        }
        assert!(matches!(compute_shortest_path(&network, 7, 0, kind), Err(Error::NodeOutOfRange { node: 7, .. })));
    }

    #[test]
    fn unreachable_targets() {
        let network = network();
        for mode in PointToPointMode::ALL {
            assert_eq!(compute_point_to_point(&network, 0, 4, QueueKind::PairingHeap, mode).unwrap(), INFINITY);
        }
        assert!(matches!(
            compute_shortest_path(&network, 3, 0, QueueKind::SortedList),
            Err(Error::NoPath { from: 3, to: 0 })
        ));
    }

    #[test]
    fn paths_follow_the_cheapest_arcs() {
        let network = network();
        for kind in QueueKind::ALL {
            assert_eq!(compute_shortest_path(&network, 0, 3, kind).unwrap(), vec![0, 1, 2, 3]);
            assert_eq!(compute_shortest_path(&network, 2, 2, kind).unwrap(), vec![2]);
        }
    }

    #[test]
    fn budgets_abort_searches() {
        let network = network();
        for mode in PointToPointMode::ALL {
            let tight = QueryBudget::settled_nodes(1);
            assert!(matches!(
                compute_point_to_point_with_budget(&network, 0, 3, QueueKind::LazyHeap2, mode, tight),
                Err(Error::Timeout { settled_nodes: 1 })
            ));
            let generous = QueryBudget::settled_nodes(100);
            assert_eq!(compute_point_to_point_with_budget(&network, 0, 3, QueueKind::LazyHeap2, mode, generous).unwrap(), 4);
        }
    }

    #[test]
    fn modes_parse_from_their_names() {
        for mode in PointToPointMode::ALL {
            assert_eq!(mode.name().parse::<PointToPointMode>(), Ok(mode));
        }
        assert_eq!("matrix".parse::<AllPairsMode>(), Ok(AllPairsMode::Matrix));
        assert!("astar".parse::<PointToPointMode>().is_err());
    }
}
