//! Random query benchmarks with per query reporting.

use rand::prelude::*;
use std::time::Duration;

use crate::{
    algo::{
        dijkstra::{query::bidirectional_dijkstra, query::dijkstra::Server as DijkstraServer, BidirChooseDir, ChooseMinKeyDir},
        *,
    },
    datastr::{graph::*, queue::*},
    report::*,
};

/// Number of dijkstra queries performed for experiments.
/// Can be overriden through the NUM_DIJKSTRA_QUERIES env var.
pub fn num_dijkstra_queries() -> usize {
    std::env::var("NUM_DIJKSTRA_QUERIES").ok().and_then(|num| num.parse().ok()).unwrap_or(1000)
}

fn pin_to_first_core() {
    if let Some(&core) = core_affinity::get_core_ids().as_ref().and_then(|ids| ids.first()) {
        core_affinity::set_for_current(core);
    }
}

fn random_pairs(num_nodes: usize, rng: &mut StdRng) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
    std::iter::from_fn(move || Some((rng.gen_range(0..num_nodes as NodeId), rng.gen_range(0..num_nodes as NodeId))))
}

pub fn run_random_queries(
    num_nodes: usize,
    server: &mut impl QueryServer,
    rng: &mut StdRng,
    reporting_context: &mut CollectionContextGuard,
    num_queries: usize,
) {
    if num_nodes == 0 {
        return;
    }
    run_queries(random_pairs(num_nodes, rng).take(num_queries), server, Some(reporting_context), |_, _| None);
}

/// Run the queries one after another, reporting source, target, time, distance and search counters per query.
/// `ground_truth` may return the expected distance of a query, the result is then asserted to match.
pub fn run_queries<S: QueryServer>(
    query_iter: impl Iterator<Item = (NodeId, NodeId)>,
    server: &mut S,
    mut reporting_context: Option<&mut CollectionContextGuard>,
    mut ground_truth: impl FnMut(NodeId, NodeId) -> Option<Option<Distance>>,
) {
    pin_to_first_core();

    let mut total_query_time = Duration::ZERO;
    let mut num_queries = 0;

    for (from, to) in query_iter {
        num_queries += 1;
        let _query_ctxt = reporting_context.as_mut().map(|ctxt| ctxt.push_collection_item());

        report!("from", from);
        report!("to", to);

        let (dist, time) = measure(|| server.query(Query { from, to }).map(|res| res.distance()));
        report!("running_time_ms", time.as_secs_f64() * 1000.0);
        report!("result", dist);
        server.stats().report();

        if let Some(gt) = ground_truth(from, to) {
            assert_eq!(dist, gt, "wrong distance for query {} -> {}", from, to);
        }

        total_query_time += time;
    }

    if num_queries > 0 {
        eprintln!("Avg. query time {:?}", total_query_time / num_queries);
    };
}

/// Complete searches from random sources, reporting time, number of reached nodes and search counters.
pub fn run_random_one_to_all<Q: PriorityQueue>(
    network: &RoadNetwork,
    rng: &mut StdRng,
    reporting_context: &mut CollectionContextGuard,
    num_queries: usize,
) {
    let num_nodes = network.num_nodes();
    if num_nodes == 0 {
        return;
    }
    pin_to_first_core();

    let mut server = DijkstraServer::<Q, OwnedGraph, &OwnedGraph>::new(network.graph());
    let mut total_query_time = Duration::ZERO;

    for _ in 0..num_queries {
        let from = rng.gen_range(0..num_nodes as NodeId);
        let _query_ctxt = reporting_context.push_collection_item();
        report!("from", from);

        let (num_reached, time) = measure(|| server.one_to_all(from).distances().iter().filter(|&&dist| dist < INFINITY).count());
        report!("running_time_ms", time.as_secs_f64() * 1000.0);
        report!("num_reached_nodes", num_reached);
        server.stats().report();

        total_query_time += time;
    }

    if num_queries > 0 {
        eprintln!("Avg. query time {:?}", total_query_time / num_queries as u32);
    };
}

/// Benchmark one queue implementation in one point to point mode on random queries.
/// Reports the configuration into the current context and the individual queries into a `queries` collection.
/// With `verify`, every distance is checked against an early abort search with a 4-ary index heap.
pub fn run_point_to_point_benchmark(network: &RoadNetwork, queue: QueueKind, mode: PointToPointMode, rng: &mut StdRng, num_queries: usize, verify: bool) {
    report!("queue", queue.name());
    report!("mode", mode.name());
    if mode == PointToPointMode::Bidirectional {
        ChooseMinKeyDir::report();
    }

    let num_nodes = network.num_nodes();
    if num_nodes == 0 {
        return;
    }
    let mut reference = DijkstraServer::<QuaternaryIndexHeap, OwnedGraph, &OwnedGraph>::new(network.graph());
    let ground_truth = |from: NodeId, to: NodeId| verify.then(|| reference.distance(from, to));
    let mut queries_ctxt = push_collection_context("queries".to_string());

    with_queue!(queue, Q => match mode {
        PointToPointMode::Plain => run_random_one_to_all::<Q>(network, rng, &mut queries_ctxt, num_queries),
        PointToPointMode::EarlyAbort => {
            let mut server = DijkstraServer::<Q, OwnedGraph, &OwnedGraph>::new(network.graph());
            run_queries(random_pairs(num_nodes, rng).take(num_queries), &mut server, Some(&mut queries_ctxt), ground_truth)
        }
        PointToPointMode::Bidirectional => {
            let mut server = bidirectional_dijkstra::Server::<Q, ChooseMinKeyDir, OwnedGraph, &OwnedGraph>::from_network(network);
            run_queries(random_pairs(num_nodes, rng).take(num_queries), &mut server, Some(&mut queries_ctxt), ground_truth)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_runs_in_every_mode() {
        let network = RoadNetwork::new(OwnedGraph::new(
            vec![0, 2, 3, 6, 8, 8, 8],
            vec![2, 1, 3, 1, 3, 4, 0, 4],
            vec![10, 1, 2, 1, 3, 1, 7, 2],
        ));
        let mut rng = StdRng::seed_from_u64(42);

        for queue in [QueueKind::IndexHeap2, QueueKind::LazyHeap8, QueueKind::SortedList, QueueKind::PairingHeap] {
            for mode in PointToPointMode::ALL {
                run_point_to_point_benchmark(&network, queue, mode, &mut rng, 20, true);
            }
        }
    }

    #[test]
    fn env_override_falls_back_to_default() {
        if std::env::var("NUM_DIJKSTRA_QUERIES").is_err() {
            assert_eq!(num_dijkstra_queries(), 1000);
        }
    }
}
