// Store one to all results for random sources, or check every queue implementation against stored results.
//
// reference_results generate <graph_dir> <output_dir> [num_sources]
// reference_results check <graph_dir> <reference_dir>

#[macro_use]
extern crate sp_algo;
use sp_algo::{
    algo::{compute_point_to_point, compute_single_source, PointToPointMode},
    cli::CliErr,
    datastr::{graph::*, queue::QueueKind},
    io::*,
    reference::ReferenceResult,
    report::*,
};
use std::{env, error::Error, fs, path::Path};

use rand::prelude::*;

pub fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("reference_results");

    let mut args = env::args();
    args.next();
    let command = args.next().ok_or(CliErr("No command given, expected generate or check"))?;
    let arg = &args.next().ok_or(CliErr("No graph directory arg given"))?;
    let network = RoadNetwork::reconstruct_from(&Path::new(arg))?;
    let arg = &args.next().ok_or(CliErr("No reference directory arg given"))?;
    let reference_dir = Path::new(arg);

    report!("graph", { "num_nodes": network.num_nodes(), "num_arcs": network.num_arcs() });

    match command.as_str() {
        "generate" => {
            let num_sources: usize = args.next().map(|n| n.parse()).transpose()?.unwrap_or(10);
            generate(&network, reference_dir, num_sources)
        }
        "check" => check(&network, reference_dir),
        _ => Err(Box::new(CliErr("Unknown command, expected generate or check"))),
    }
}

fn generate(network: &RoadNetwork, reference_dir: &Path, num_sources: usize) -> Result<(), Box<dyn Error>> {
    if network.num_nodes() == 0 {
        return Err(Box::new(CliErr("Graph has no nodes")));
    }
    let seed = Default::default();
    report!("seed", seed);
    let mut rng = StdRng::from_seed(seed);

    for i in 0..num_sources {
        let source = rng.gen_range(0..network.num_nodes() as NodeId);
        let result = ReferenceResult::compute(network, source, QueueKind::IndexHeap4)?;
        let dir = reference_dir.join(i.to_string());
        fs::create_dir_all(&dir)?;
        result.deconstruct_to(&dir)?;
        eprintln!("source {}: {} reachable nodes", source, result.nodes.len());
    }

    Ok(())
}

fn check(network: &RoadNetwork, reference_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut dirs = fs::read_dir(reference_dir)?.map(|entry| entry.map(|e| e.path())).collect::<Result<Vec<_>, _>>()?;
    dirs.retain(|dir| dir.is_dir());
    dirs.sort();

    let mut num_mismatches = 0;
    let mut checks_ctxt = push_collection_context("checks".to_string());

    for dir in &dirs {
        let reference = ReferenceResult::reconstruct_from(dir)?;
        reference.check_nodes(network)?;
        // one reachable target for the point to point checks
        let target = reference.nodes.last().copied().unwrap_or(reference.source);

        for queue in QueueKind::ALL {
            let _check_ctxt = checks_ctxt.push_collection_item();
            report!("source", reference.source);
            report!("queue", queue.name());

            let distances = compute_single_source(network, reference.source, queue)?;
            let mismatch = reference.compare(&distances);
            if let Some(mismatch) = mismatch {
                eprintln!("{} from {}: {:?}", queue, reference.source, mismatch);
                num_mismatches += 1;
            }
            report!("mismatch", mismatch.map(|m| m.node));

            let expected = distances[target as usize];
            for mode in PointToPointMode::ALL {
                let dist = compute_point_to_point(network, reference.source, target, queue, mode)?;
                if dist != expected {
                    eprintln!("{} {} {} -> {}: {} instead of {}", queue, mode.name(), reference.source, target, dist, expected);
                    num_mismatches += 1;
                }
            }
        }
    }

    report!("num_mismatches", num_mismatches);
    if num_mismatches > 0 {
        return Err(Box::new(CliErr("Results differ from the reference")));
    }

    Ok(())
}
