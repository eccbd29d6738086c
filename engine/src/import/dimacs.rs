//! Reader for the graph files of the 9th DIMACS implementation challenge.
//!
//! `.gr` files contain the arcs, `.co` files the node coordinates:
//!
//! ```text
//! c comment
//! p sp <num_nodes> <num_arcs>
//! a <from> <to> <weight>
//! ```
//!
//! ```text
//! p aux sp co <num_nodes>
//! v <node> <x> <y>
//! ```
//!
//! Node ids in the files start at 1 and are shifted to start at 0.

use crate::datastr::graph::*;
use crate::error::{Error, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

/// Parse a `.gr` file into the number of nodes and the arc list.
///
/// If the problem line is missing, the number of nodes is the largest id seen.
pub fn read_graph<R: BufRead>(reader: R) -> Result<(usize, Vec<Edge>)> {
    let mut num_nodes = None;
    let mut max_id = 0;
    let mut edges = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            None | Some("c") => continue,
            Some("p") => {
                expect_token(&mut tokens, "sp", line_number)?;
                let n: usize = parse_field(&mut tokens, "node count", line_number)?;
                let m: usize = parse_field(&mut tokens, "arc count", line_number)?;
                check_node_count(n)?;
                num_nodes = Some(n);
                edges.reserve(m.min(1 << 24));
            }
            Some("a") => {
                let from = parse_node(&mut tokens, num_nodes, line_number)?;
                let to = parse_node(&mut tokens, num_nodes, line_number)?;
                let weight: i64 = parse_field(&mut tokens, "weight", line_number)?;
                if weight < 0 {
                    return Err(Error::InvalidWeight { from, to, weight });
                }
                max_id = max_id.max(from.max(to) as usize + 1);
                edges.push(Edge { from, to, weight });
            }
            Some(other) => {
                return Err(Error::Parse {
                    line: line_number,
                    reason: format!("unknown line type '{}'", other),
                })
            }
        }

        expect_end(&mut tokens, line_number)?;
    }

    Ok((num_nodes.unwrap_or(max_id), edges))
}

/// Parse a `.co` file into one coordinate per node.
pub fn read_coordinates<R: BufRead>(reader: R) -> Result<Vec<Coordinate>> {
    let mut num_nodes = None;
    let mut coordinates = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            None | Some("c") => continue,
            Some("p") => {
                for expected in ["aux", "sp", "co"] {
                    expect_token(&mut tokens, expected, line_number)?;
                }
                let n: usize = parse_field(&mut tokens, "node count", line_number)?;
                check_node_count(n)?;
                num_nodes = Some(n);
                coordinates.resize(n, Coordinate::default());
            }
            Some("v") => {
                let node = parse_node(&mut tokens, num_nodes, line_number)? as usize;
                let x = parse_field(&mut tokens, "x coordinate", line_number)?;
                let y = parse_field(&mut tokens, "y coordinate", line_number)?;
                if node >= coordinates.len() {
                    coordinates.resize(node + 1, Coordinate::default());
                }
                coordinates[node] = Coordinate { x, y };
            }
            Some(other) => {
                return Err(Error::Parse {
                    line: line_number,
                    reason: format!("unknown line type '{}'", other),
                })
            }
        }

        expect_end(&mut tokens, line_number)?;
    }

    Ok(coordinates)
}

/// Read a `.gr` file and optionally a `.co` file and build the network.
pub fn load_network(graph_file: &Path, coordinate_file: Option<&Path>) -> Result<RoadNetwork> {
    let (num_nodes, edges) = read_graph(BufReader::new(File::open(graph_file)?))?;
    let network = RoadNetwork::from_edges(num_nodes, &edges)?;

    match coordinate_file {
        Some(path) => network.with_coordinates(read_coordinates(BufReader::new(File::open(path)?))?),
        None => Ok(network),
    }
}

fn parse_field<T: FromStr>(tokens: &mut SplitWhitespace, what: &str, line: usize) -> Result<T> {
    let token = tokens.next().ok_or_else(|| Error::Parse {
        line,
        reason: format!("missing {}", what),
    })?;
    token.parse().map_err(|_| Error::Parse {
        line,
        reason: format!("invalid {} '{}'", what, token),
    })
}

// 1-based id in the file, 0-based id in the result
// before anything of that size gets allocated
fn check_node_count(n: usize) -> Result<()> {
    if n > MAX_NUM_NODES {
        return Err(Error::NodeOutOfRange {
            node: n as u64,
            num_nodes: MAX_NUM_NODES,
        });
    }
    Ok(())
}

fn parse_node(tokens: &mut SplitWhitespace, num_nodes: Option<usize>, line: usize) -> Result<NodeId> {
    let id: u64 = parse_field(tokens, "node id", line)?;
    let upper = num_nodes.map_or(NodeId::MAX as u64, |n| n as u64);
    if id == 0 || id > upper {
        return Err(Error::NodeOutOfRange {
            node: id,
            num_nodes: num_nodes.unwrap_or(NodeId::MAX as usize),
        });
    }
    Ok((id - 1) as NodeId)
}

fn expect_token(tokens: &mut SplitWhitespace, expected: &str, line: usize) -> Result<()> {
    match tokens.next() {
        Some(token) if token == expected => Ok(()),
        found => Err(Error::Parse {
            line,
            reason: format!("expected '{}', found {:?}", expected, found),
        }),
    }
}

fn expect_end(tokens: &mut SplitWhitespace, line: usize) -> Result<()> {
    match tokens.next() {
        None => Ok(()),
        Some(token) => Err(Error::Parse {
            line,
            reason: format!("unexpected trailing '{}'", token),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = "c 4 node example\n\
                         p sp 4 4\n\
                         a 1 2 1\n\
                         a 2 3 2\n\
                         a 1 3 5\n\
                         \n\
                         a 3 4 1\n";

    #[test]
    fn reads_arcs_with_shifted_ids() {
        let (num_nodes, edges) = read_graph(GRAPH.as_bytes()).unwrap();
        assert_eq!(num_nodes, 4);
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Edge { from: 0, to: 1, weight: 1 });
        assert_eq!(edges[3], Edge { from: 2, to: 3, weight: 1 });
    }

    #[test]
    fn missing_problem_line_uses_largest_id() {
        let (num_nodes, edges) = read_graph("a 1 7 3\na 2 1 1\n".as_bytes()).unwrap();
        assert_eq!(num_nodes, 7);
        assert_eq!(edges[0], Edge { from: 0, to: 6, weight: 3 });
    }

    #[test]
    fn huge_ids_fail_instead_of_allocating() {
        assert!(matches!(read_graph("p sp 4294967295 1\n".as_bytes()), Err(Error::NodeOutOfRange { .. })));
        assert!(matches!(read_coordinates("p aux sp co 4294967295\n".as_bytes()), Err(Error::NodeOutOfRange { .. })));

        let (num_nodes, edges) = read_graph("a 1 4294967295 1\n".as_bytes()).unwrap();
        assert_eq!(num_nodes, 4294967295);
        assert!(matches!(
            RoadNetwork::from_edges(num_nodes, &edges),
            Err(Error::NodeOutOfRange { num_nodes: MAX_NUM_NODES, .. })
        ));
    }

    #[test]
    fn reports_broken_lines() {
        assert!(matches!(read_graph("p sp 2 1\na 1 x 3\n".as_bytes()), Err(Error::Parse { line: 2, .. })));
        assert!(matches!(read_graph("p sp 2 1\na 1 2\n".as_bytes()), Err(Error::Parse { line: 2, .. })));
        assert!(matches!(read_graph("p sp 2 1\na 1 2 3 4\n".as_bytes()), Err(Error::Parse { line: 2, .. })));
        assert!(matches!(read_graph("q 1\n".as_bytes()), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(read_graph("p max 2 1\n".as_bytes()), Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn rejects_bad_ids_and_weights() {
        assert!(matches!(read_graph("p sp 2 1\na 1 3 1\n".as_bytes()), Err(Error::NodeOutOfRange { node: 3, num_nodes: 2 })));
        assert!(matches!(read_graph("p sp 2 1\na 0 1 1\n".as_bytes()), Err(Error::NodeOutOfRange { node: 0, .. })));
        assert!(matches!(
            read_graph("p sp 2 1\na 2 1 -4\n".as_bytes()),
            Err(Error::InvalidWeight { from: 1, to: 0, weight: -4 })
        ));
    }

    #[test]
    fn reads_coordinates() {
        let coordinates = read_coordinates("p aux sp co 2\nv 2 -73530767 41085396\nv 1 5 6\n".as_bytes()).unwrap();
        assert_eq!(
            coordinates,
            vec![Coordinate { x: 5, y: 6 }, Coordinate { x: -73530767, y: 41085396 }]
        );
        assert!(matches!(read_coordinates("p aux sp co 1\nv 2 0 0\n".as_bytes()), Err(Error::NodeOutOfRange { .. })));
    }
}
