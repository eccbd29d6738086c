// Random query benchmark: every queue against every point to point mode on one graph.

#[macro_use]
extern crate sp_algo;
use sp_algo::{
    algo::PointToPointMode,
    cli::CliErr,
    datastr::{graph::*, queue::QueueKind},
    experiments,
    io::*,
    report::*,
};
use std::{env, error::Error, path::Path};

use rand::prelude::*;

fn parse_selection<T: Copy + std::str::FromStr<Err = CliErr>>(arg: Option<String>, all: &[T]) -> Result<Vec<T>, CliErr> {
    match arg.as_deref() {
        None | Some("all") => Ok(all.to_vec()),
        Some(name) => Ok(vec![name.parse()?]),
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("dijkstra");

    let mut args = env::args();
    args.next();
    let arg = &args.next().ok_or(CliErr("No graph directory arg given"))?;
    let path = Path::new(arg);
    let queues = parse_selection(args.next(), &QueueKind::ALL)?;
    let modes = parse_selection(args.next(), &PointToPointMode::ALL)?;
    let verify = env::var("VERIFY_DISTANCES").is_ok();

    let seed = Default::default();
    report!("seed", seed);

    let network = RoadNetwork::reconstruct_from(&path)?;
    report!("graph", { "num_nodes": network.num_nodes(), "num_arcs": network.num_arcs() });

    let num_queries = experiments::num_dijkstra_queries();
    let mut algo_runs_ctxt = push_collection_context("algo_runs".to_string());

    for &queue in &queues {
        for &mode in &modes {
            eprintln!("{} / {}", queue, mode.name());
            let _run_ctxt = algo_runs_ctxt.push_collection_item();
            // same queries for every combination
            let mut rng = StdRng::from_seed(seed);
            experiments::run_point_to_point_benchmark(&network, queue, mode, &mut rng, num_queries, verify);
        }
    }

    Ok(())
}
