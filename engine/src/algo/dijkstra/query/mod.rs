//! Point to point queries on top of `GenericDijkstra`.

use super::*;

pub mod bidirectional_dijkstra;
pub mod dijkstra;
