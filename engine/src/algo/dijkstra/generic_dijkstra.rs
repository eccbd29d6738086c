//! Basic variant of dijkstras algorithm, generic over the priority queue.

use super::*;
use std::{borrow::Borrow, marker::PhantomData};

/// Single source search state.
///
/// The graph can be owned or borrowed (`B: Borrow<G>`), the queue is always owned.
/// All per-node state is allocated once in `new` and reset in `O(1)` by `initialize_query`,
/// so one instance can serve many queries.
pub struct GenericDijkstra<Q, G = OwnedGraph, B = G> {
    graph: B,

    distances: TimestampedVector<Distance>,
    predecessors: Vec<NodeId>,
    queue: Q,

    num_queue_pops: usize,
    num_queue_pushs: usize,
    num_relaxed_arcs: usize,

    _graph_type: PhantomData<G>,
}

impl<Q, G, B> GenericDijkstra<Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    pub fn new(graph: B) -> Self {
        let n = graph.borrow().num_nodes();

        GenericDijkstra {
            graph,

            distances: TimestampedVector::new(n, INFINITY),
            predecessors: vec![n as NodeId; n],
            queue: Q::new(n),

            num_queue_pops: 0,
            num_queue_pushs: 0,
            num_relaxed_arcs: 0,

            _graph_type: PhantomData,
        }
    }

    /// Forget the previous search and start a new one at `from`.
    pub fn initialize_query(&mut self, from: NodeId) {
        self.queue.clear();
        self.distances.reset();

        self.num_queue_pops = 0;
        self.num_queue_pushs = 0;
        self.num_relaxed_arcs = 0;

        self.add_start_node(from);
    }

    pub fn add_start_node(&mut self, from: NodeId) {
        self.distances.set(from as usize, 0);
        self.predecessors[from as usize] = from;
        self.queue.push(State { key: 0, node: from });
        self.num_queue_pushs += 1;
    }

    /// Settle the next node and report every improved tentative distance to `improve_callback`.
    #[inline(always)]
    pub fn next_with_improve_callback(&mut self, improve_callback: impl FnMut(NodeId, Distance)) -> Option<NodeId> {
        self.settle_next_node(improve_callback)
    }

    /// Settle the next node, `Done` once the queue is exhausted.
    pub fn next_step(&mut self) -> QueryProgress<Distance> {
        match self.settle_next_node(|_, _| ()) {
            Some(node) => QueryProgress::Settled(State {
                key: self.distances[node as usize],
                node,
            }),
            None => QueryProgress::Done(None),
        }
    }

    #[inline]
    fn settle_next_node(&mut self, mut improve_callback: impl FnMut(NodeId, Distance)) -> Option<NodeId> {
        let State { key: distance, node } = self.queue.pop()?;
        self.num_queue_pops += 1;
        debug_assert_eq!(distance, self.distances[node as usize]);

        for link in self.graph.borrow().link_iter(node) {
            self.num_relaxed_arcs += 1;
            let candidate = link_distance(distance, link.weight);

            if candidate < self.distances[link.node as usize] {
                self.distances.set(link.node as usize, candidate);
                self.predecessors[link.node as usize] = node;
                improve_callback(link.node, candidate);

                self.queue.push(State { key: candidate, node: link.node });
                self.num_queue_pushs += 1;
            }
        }

        Some(node)
    }

    /// Final for settled nodes, an upper bound for queued ones, `INFINITY` for all others.
    pub fn tentative_distance(&self, node: NodeId) -> Distance {
        self.distances[node as usize]
    }

    /// Only meaningful for nodes reached by the current search.
    pub fn predecessor(&self, node: NodeId) -> NodeId {
        self.predecessors[node as usize]
    }

    /// Follow the predecessors from `to` back to `from`.
    /// `to` has to be reached by the current search which started at `from`.
    pub fn node_path(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        debug_assert!(self.tentative_distance(to) < INFINITY);
        let mut path = vec![to];
        let mut node = to;

        while node != from {
            node = self.predecessor(node);
            path.push(node);
        }

        path.reverse();
        path
    }

    pub fn graph(&self) -> &G {
        self.graph.borrow()
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn num_queue_pops(&self) -> usize {
        self.num_queue_pops
    }

    pub fn num_queue_pushs(&self) -> usize {
        self.num_queue_pushs
    }

    pub fn num_relaxed_arcs(&self) -> usize {
        self.num_relaxed_arcs
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            num_queue_pops: self.num_queue_pops,
            num_queue_pushs: self.num_queue_pushs,
            num_relaxed_arcs: self.num_relaxed_arcs,
        }
    }
}

impl<Q, G, B> Iterator for GenericDijkstra<Q, G, B>
where
    Q: PriorityQueue,
    G: LinkIterable<Link>,
    B: Borrow<G>,
{
    type Item = NodeId;

    #[inline]
    fn next(&mut self) -> Option<NodeId> {
        self.settle_next_node(|_, _| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::pairing_heap::PairingHeap;
    use crate::datastr::queue::{BinaryLazyHeap, QuaternaryIndexHeap};

    fn graph() -> OwnedGraph {
        OwnedGraph::new(vec![0, 2, 3, 6, 8, 8, 8], vec![2, 1, 3, 1, 3, 4, 0, 4], vec![10, 1, 2, 1, 3, 1, 7, 2])
    }

    fn settle_order<Q: PriorityQueue>(graph: &OwnedGraph) -> Vec<(NodeId, Distance)> {
        let mut dijkstra = GenericDijkstra::<Q, OwnedGraph, &OwnedGraph>::new(graph);
        dijkstra.initialize_query(0);
        let mut order = Vec::new();
        while let QueryProgress::Settled(State { key, node }) = dijkstra.next_step() {
            order.push((node, key));
        }
        order
    }

    #[test]
    fn settles_in_distance_order() {
        let graph = graph();
        let expected = vec![(0, 0), (1, 1), (3, 3), (4, 5), (2, 10)];
        assert_eq!(settle_order::<QuaternaryIndexHeap>(&graph), expected);
        assert_eq!(settle_order::<BinaryLazyHeap>(&graph), expected);
        assert_eq!(settle_order::<PairingHeap>(&graph), expected);
    }

    #[test]
    fn reuse_resets_state() {
        let mut dijkstra = GenericDijkstra::<QuaternaryIndexHeap>::new(graph());
        dijkstra.initialize_query(0);
        assert_eq!(dijkstra.by_ref().count(), 5);
        assert_eq!(dijkstra.stats().num_queue_pops, 5);
        assert_eq!(dijkstra.node_path(0, 4), vec![0, 1, 3, 4]);

        dijkstra.initialize_query(4);
        assert_eq!(dijkstra.by_ref().collect::<Vec<_>>(), vec![4]);
        assert_eq!(dijkstra.tentative_distance(0), INFINITY);
        assert_eq!(dijkstra.stats(), SearchStats { num_queue_pops: 1, num_queue_pushs: 1, num_relaxed_arcs: 0 });
    }

    #[test]
    fn improve_callback_sees_every_improvement() {
        let mut dijkstra = GenericDijkstra::<PairingHeap>::new(graph());
        dijkstra.initialize_query(0);
        let mut improvements = Vec::new();
        while dijkstra.next_with_improve_callback(|node, dist| improvements.push((node, dist))).is_some() {}
        assert_eq!(improvements, vec![(2, 10), (1, 1), (3, 3), (4, 5)]);
    }
}
