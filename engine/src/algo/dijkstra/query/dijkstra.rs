//! Unidirectional queries: a single search from the source, optionally stopping at the target.

use super::*;
use generic_dijkstra::*;
use std::{borrow::Borrow, convert::Infallible};

pub struct Server<Q, G = OwnedGraph, B = G> {
    dijkstra: GenericDijkstra<Q, G, B>,
}

impl<Q, G, B> Server<Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    pub fn new(graph: B) -> Self {
        Self {
            dijkstra: GenericDijkstra::new(graph),
        }
    }

    // Runs until `to` is settled or the queue is exhausted.
    // `check` gets the number of nodes settled so far before each further node is settled.
    fn search<E>(&mut self, from: NodeId, to: Option<NodeId>, mut check: impl FnMut(usize) -> std::result::Result<(), E>) -> std::result::Result<Option<Distance>, E> {
        self.dijkstra.initialize_query(from);

        let mut num_settled = 0;
        while !self.dijkstra.queue().is_empty() {
            check(num_settled)?;
            num_settled += 1;

            match self.dijkstra.next_step() {
                QueryProgress::Settled(State { key, node }) if Some(node) == to => return Ok(Some(key)),
                QueryProgress::Settled(_) => (),
                QueryProgress::Done(result) => return Ok(result),
            }
        }

        Ok(None)
    }

    /// `None` if `to` is not reachable from `from`.
    pub fn distance(&mut self, from: NodeId, to: NodeId) -> Option<Distance> {
        self.search(from, Some(to), |_| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {})
    }

    pub fn distance_with_budget(&mut self, from: NodeId, to: NodeId, budget: QueryBudget) -> Result<Option<Distance>> {
        self.search(from, Some(to), budget.start())
    }

    /// Run a complete search from `from`.
    pub fn one_to_all(&mut self, from: NodeId) -> ServerWrapper<Q, G, B> {
        self.search(from, None, |_| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {});
        ServerWrapper(self)
    }

    pub fn one_to_all_with_budget(&mut self, from: NodeId, budget: QueryBudget) -> Result<ServerWrapper<Q, G, B>> {
        self.search(from, None, budget.start())?;
        Ok(ServerWrapper(self))
    }

    /// Node sequence of the shortest path found by the last query.
    fn path(&self, query: Query) -> Vec<NodeId> {
        self.dijkstra.node_path(query.from, query.to)
    }

    pub fn stats(&self) -> SearchStats {
        self.dijkstra.stats()
    }
}

pub struct PathServerWrapper<'s, Q, G, B>(&'s Server<Q, G, B>, Query);

impl<'s, Q, G, B> PathServer for PathServerWrapper<'s, Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    type NodeInfo = NodeId;

    fn path(&mut self) -> Vec<Self::NodeInfo> {
        Server::path(self.0, self.1)
    }
}

/// Distance lookups after a one to all search.
pub struct ServerWrapper<'s, Q, G, B>(&'s Server<Q, G, B>);

impl<'s, Q, G, B> ServerWrapper<'s, Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    pub fn distance(&self, node: NodeId) -> Distance {
        self.0.dijkstra.tentative_distance(node)
    }

    /// One entry per node, `INFINITY` for unreachable ones.
    pub fn distances(&self) -> Vec<Distance> {
        (0..self.0.dijkstra.graph().num_nodes() as NodeId).map(|node| self.distance(node)).collect()
    }

    /// Write all distances into `target`, which needs one entry per node.
    pub fn write_distances(&self, target: &mut [Distance]) {
        debug_assert_eq!(target.len(), self.0.dijkstra.graph().num_nodes());
        for (node, distance) in target.iter_mut().enumerate() {
            *distance = self.distance(node as NodeId);
        }
    }
}

impl<Q, G, B> QueryServer for Server<Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    type P<'s> = PathServerWrapper<'s, Q, G, B> where Self: 's;

    fn query(&mut self, query: Query) -> Option<QueryResult<Self::P<'_>, Distance>> {
        self.distance(query.from, query.to)
            .map(move |distance| QueryResult::new(distance, PathServerWrapper(self, query)))
    }

    fn stats(&self) -> SearchStats {
        Server::stats(self)
    }
}
