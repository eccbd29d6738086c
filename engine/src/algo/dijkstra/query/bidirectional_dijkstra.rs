use super::*;
use generic_dijkstra::*;
use std::{borrow::Borrow, convert::Infallible};

/// Forward search on the graph and backward search on the reversed graph, meeting in the middle.
///
/// The direction policy `D` decides which side advances.
/// Whenever one side labels or settles a node the other side has already labeled,
/// the sum of both labels is a candidate for the tentative distance.
/// The search stops once the sum of both minimum queue keys reaches the tentative distance.
pub struct Server<Q, D = ChooseMinKeyDir, G = OwnedGraph, B = G> {
    forward_dijkstra: GenericDijkstra<Q, G, B>,
    backward_dijkstra: GenericDijkstra<Q, G, B>,
    tentative_distance: Distance,
    meeting_node: NodeId,
    dir_chooser: D,
}

impl<Q: PriorityQueue, D: BidirChooseDir> Server<Q, D> {
    pub fn new(graph: OwnedGraph) -> Self {
        let reversed = OwnedGraph::reversed(&graph);
        Self::from_graphs(graph, reversed)
    }
}

impl<'a, Q: PriorityQueue, D: BidirChooseDir> Server<Q, D, OwnedGraph, &'a OwnedGraph> {
    /// Borrow both directions from the network, building the reversed graph if necessary.
    pub fn from_network(network: &'a RoadNetwork) -> Self {
        Self::from_graphs(network.graph(), network.reversed())
    }
}

impl<Q, D, G, B> Server<Q, D, G, B>
where
    Q: PriorityQueue,
    D: BidirChooseDir,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    /// `reversed` has to contain exactly the arcs of `graph` turned around.
    pub fn from_graphs(graph: B, reversed: B) -> Self {
        Server {
            forward_dijkstra: GenericDijkstra::new(graph),
            backward_dijkstra: GenericDijkstra::new(reversed),
            tentative_distance: INFINITY,
            meeting_node: 0,
            dir_chooser: Default::default(),
        }
    }

    fn search<E>(
        &mut self,
        from: NodeId,
        to: NodeId,
        mut check: impl FnMut(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<Option<Distance>, E> {
        self.tentative_distance = INFINITY;
        self.meeting_node = from;

        self.forward_dijkstra.initialize_query(from);
        self.backward_dijkstra.initialize_query(to);

        let Server {
            forward_dijkstra,
            backward_dijkstra,
            tentative_distance,
            meeting_node,
            dir_chooser,
        } = self;

        let mut num_settled = 0;
        loop {
            let fw_min_key = forward_dijkstra.queue().peek().map(|s| s.key);
            let bw_min_key = backward_dijkstra.queue().peek().map(|s| s.key);
            if fw_min_key.unwrap_or(INFINITY).saturating_add(bw_min_key.unwrap_or(INFINITY)) >= *tentative_distance {
                break;
            }

            check(num_settled)?;
            num_settled += 1;

            let (search, other) = if dir_chooser.choose(fw_min_key, bw_min_key) {
                (&mut *forward_dijkstra, &*backward_dijkstra)
            } else {
                (&mut *backward_dijkstra, &*forward_dijkstra)
            };

            let settled = search.next_with_improve_callback(|head, dist| {
                let candidate = dist.saturating_add(other.tentative_distance(head));
                if candidate < *tentative_distance {
                    *tentative_distance = candidate;
                    *meeting_node = head;
                }
            });

            if let Some(node) = settled {
                let candidate = search.tentative_distance(node).saturating_add(other.tentative_distance(node));
                if candidate < *tentative_distance {
                    *tentative_distance = candidate;
                    *meeting_node = node;
                }
            }
        }

        Ok(match *tentative_distance {
            INFINITY => None,
            dist => Some(dist),
        })
    }

    /// `None` if `to` is not reachable from `from`.
    pub fn distance(&mut self, from: NodeId, to: NodeId) -> Option<Distance> {
        self.search(from, to, |_| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {})
    }

    pub fn distance_with_budget(&mut self, from: NodeId, to: NodeId, budget: QueryBudget) -> Result<Option<Distance>> {
        self.search(from, to, budget.start())
    }

    /// Node sequence of the shortest path found by the last query, through the meeting node.
    fn path(&self, query: Query) -> Vec<NodeId> {
        let mut path = self.forward_dijkstra.node_path(query.from, self.meeting_node);

        let mut node = self.meeting_node;
        while node != query.to {
            node = self.backward_dijkstra.predecessor(node);
            path.push(node);
        }

        path
    }

    pub fn meeting_node(&self) -> NodeId {
        self.meeting_node
    }

    /// Both directions summed up.
    pub fn stats(&self) -> SearchStats {
        self.forward_dijkstra.stats() + self.backward_dijkstra.stats()
    }
}

pub struct PathServerWrapper<'s, Q, D, G, B>(&'s Server<Q, D, G, B>, Query);

impl<'s, Q, D, G, B> PathServer for PathServerWrapper<'s, Q, D, G, B>
where
    Q: PriorityQueue,
    D: BidirChooseDir,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    type NodeInfo = NodeId;

    fn path(&mut self) -> Vec<Self::NodeInfo> {
        Server::path(self.0, self.1)
    }
}

impl<Q, D, G, B> QueryServer for Server<Q, D, G, B>
where
    Q: PriorityQueue,
    D: BidirChooseDir,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    type P<'s> = PathServerWrapper<'s, Q, D, G, B> where Self: 's;

    fn query(&mut self, query: Query) -> Option<QueryResult<Self::P<'_>, Distance>> {
        self.distance(query.from, query.to)
            .map(move |distance| QueryResult::new(distance, PathServerWrapper(self, query)))
    }

    fn stats(&self) -> SearchStats {
        Server::stats(self)
    }
}
