// Compute the all pairs distance matrix with parallel Dijkstra and with Floyd-Warshall and compare both.

#[macro_use]
extern crate sp_algo;
use sp_algo::{
    algo::{compute_all_pairs, AllPairsMode},
    cli::CliErr,
    datastr::{graph::*, queue::QueueKind},
    io::*,
    report::*,
};
use std::{env, error::Error, fs, path::Path};

pub fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("all_pairs");

    let mut args = env::args();
    args.next();
    let arg = &args.next().ok_or(CliErr("No graph directory arg given"))?;
    let path = Path::new(arg);
    let queue: QueueKind = args.next().as_deref().unwrap_or("index_heap_4").parse()?;
    let output_dir = args.next();

    let network = RoadNetwork::reconstruct_from(&path)?;
    report!("graph", { "num_nodes": network.num_nodes(), "num_arcs": network.num_arcs() });
    report!("queue", queue.name());

    let by_dijkstra = {
        let _ctxt = push_context(AllPairsMode::Dijkstra.name().to_string());
        report_time("parallel dijkstra all pairs", || compute_all_pairs(&network, queue, AllPairsMode::Dijkstra))?
    };
    let by_matrix = {
        let _ctxt = push_context(AllPairsMode::Matrix.name().to_string());
        report_time("floyd warshall", || compute_all_pairs(&network, queue, AllPairsMode::Matrix))?
    };

    let num_differences = by_dijkstra.rows().zip(by_matrix.rows()).flat_map(|(a, b)| a.iter().zip(b)).filter(|(a, b)| a != b).count();
    report!("num_differences", num_differences);

    if let Some(dir) = output_dir {
        fs::create_dir_all(&dir)?;
        by_dijkstra.deconstruct_to(&dir)?;
    }

    if num_differences > 0 {
        return Err(Box::new(CliErr("all pairs modes disagree")));
    }

    Ok(())
}
