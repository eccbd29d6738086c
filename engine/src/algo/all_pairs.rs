//! Distances between all pairs of nodes.
//!
//! Both variants fill a dense `DistanceMatrix` and run on the rayon pool
//! (size configurable through `RAYON_NUM_THREADS`).

use super::*;
use crate::datastr::distance_matrix::DistanceMatrix;
use super::dijkstra::query::dijkstra::Server;
use rayon::prelude::*;

/// One complete Dijkstra per source node.
///
/// Rows are handed out to the workers as disjoint slices of the matrix.
/// Each worker allocates its own search state once and reuses it for all its rows.
pub fn dijkstra_all_pairs<Q, G>(graph: &G) -> DistanceMatrix
where
    Q: PriorityQueue,
    G: LinkIterable<Link> + Sync,
{
    let n = graph.num_nodes();
    let mut matrix = DistanceMatrix::new(n);
    if n == 0 {
        return matrix;
    }

    matrix.as_mut_slice().par_chunks_mut(n).enumerate().for_each_init(
        || Server::<Q, G, &G>::new(graph),
        |server, (source, row)| server.one_to_all(source as NodeId).write_distances(row),
    );

    matrix
}

/// Floyd-Warshall.
///
/// Starts from the arcs (minimum over parallel arcs, `0` on the diagonal) and allows one more
/// intermediate node per round. Row `k` does not change in round `k`, so all other rows are
/// relaxed in parallel against a copy of it.
pub fn floyd_warshall<G: LinkIterable<Link>>(graph: &G) -> DistanceMatrix {
    let n = graph.num_nodes();
    let mut matrix = DistanceMatrix::new(n);

    for node in 0..n {
        matrix[(node, node)] = 0;
        for Link { node: head, weight } in graph.link_iter(node as NodeId) {
            let entry = &mut matrix[(node, head as usize)];
            *entry = std::cmp::min(*entry, Distance::from(weight));
        }
    }

    let mut row_k = vec![INFINITY; n];
    for k in 0..n {
        row_k.copy_from_slice(matrix.row(k as NodeId));
        let row_k = &row_k;

        matrix.as_mut_slice().par_chunks_mut(n).for_each(|row| {
            let via_k = row[k];
            if via_k >= INFINITY {
                return;
            }
            for (dist, &from_k) in row.iter_mut().zip(row_k.iter()) {
                let candidate = via_k.saturating_add(from_k);
                if candidate < *dist {
                    *dist = candidate;
                }
            }
        });
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::queue::QuaternaryIndexHeap;

    #[test]
    fn both_variants_on_small_graph() {
        let graph = OwnedGraph::new(vec![0, 2, 3, 6, 8, 8, 8], vec![2, 1, 3, 1, 3, 4, 0, 4], vec![10, 1, 2, 1, 3, 1, 7, 2]);

        let by_dijkstra = dijkstra_all_pairs::<QuaternaryIndexHeap, _>(&graph);
        let by_matrix = floyd_warshall(&graph);

        assert_eq!(by_dijkstra.row(0), &[0, 1, 10, 3, 5, INFINITY]);
        assert_eq!(by_dijkstra.row(3), &[7, 8, 17, 0, 2, INFINITY]);
        assert_eq!(by_dijkstra.row(5), &[INFINITY, INFINITY, INFINITY, INFINITY, INFINITY, 0]);
        assert_eq!(by_dijkstra, by_matrix);
    }

    #[test]
    fn parallel_arcs_and_empty_graphs() {
        let graph = OwnedGraph::from_edges(
            2,
            &[
                Edge { from: 0, to: 1, weight: 9 },
                Edge { from: 0, to: 1, weight: 4 },
            ],
        )
        .unwrap();
        assert_eq!(floyd_warshall(&graph).get(0, 1), 4);
        assert_eq!(dijkstra_all_pairs::<QuaternaryIndexHeap, _>(&graph).get(0, 1), 4);

        let empty = OwnedGraph::from_edges(0, &[]).unwrap();
        assert_eq!(floyd_warshall(&empty).num_nodes(), 0);
        assert_eq!(dijkstra_all_pairs::<QuaternaryIndexHeap, _>(&empty).num_nodes(), 0);
    }
}
