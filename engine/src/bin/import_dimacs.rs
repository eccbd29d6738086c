// Convert a DIMACS shortest path challenge graph (and optionally its coordinates) into the binary directory format.

use std::{env, error::Error, fs, path::Path};

use sp_algo::{cli::CliErr, datastr::graph::*, import::dimacs, io::*, report::benchmark::report_time};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args();
    args.next();

    let arg = &args.next().ok_or(CliErr("No .gr file arg given"))?;
    let graph_file = Path::new(arg);
    let arg = &args.next().ok_or(CliErr("No output directory arg given"))?;
    let output_dir = Path::new(arg);
    let coordinate_file = args.next();

    let network = report_time("DIMACS import", || dimacs::load_network(graph_file, coordinate_file.as_deref().map(Path::new)))?;
    eprintln!("read {} nodes and {} arcs", network.num_nodes(), network.num_arcs());

    fs::create_dir_all(output_dir)?;
    network.deconstruct_to(&output_dir)?;

    Ok(())
}
