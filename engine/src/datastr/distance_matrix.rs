//! Dense `n x n` distance table, row-major.

use super::graph::*;
use crate::io::*;
use std::ops::{Index, IndexMut};

/// `matrix[(from, to)]` is the shortest distance from `from` to `to`, `INFINITY` if there is no path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    num_nodes: usize,
    data: Vec<Distance>,
}

impl DistanceMatrix {
    /// All entries `INFINITY`, including the diagonal.
    pub fn new(num_nodes: usize) -> Self {
        DistanceMatrix {
            num_nodes,
            data: vec![INFINITY; num_nodes * num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Distance {
        self[(from as usize, to as usize)]
    }

    /// All distances from `from`
    pub fn row(&self, from: NodeId) -> &[Distance] {
        let start = from as usize * self.num_nodes;
        &self.data[start..start + self.num_nodes]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks panics on a zero chunk size
        self.data.chunks(self.num_nodes.max(1))
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Distance] {
        &mut self.data
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Distance;

    fn index(&self, (from, to): (usize, usize)) -> &Distance {
        debug_assert!(from < self.num_nodes && to < self.num_nodes);
        &self.data[from * self.num_nodes + to]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    fn index_mut(&mut self, (from, to): (usize, usize)) -> &mut Distance {
        debug_assert!(from < self.num_nodes && to < self.num_nodes);
        &mut self.data[from * self.num_nodes + to]
    }
}

impl Deconstruct for DistanceMatrix {
    fn store_each(&self, store: &dyn Fn(&str, &dyn Store) -> std::io::Result<()>) -> std::io::Result<()> {
        store("num_nodes", &vec![self.num_nodes as u64])?;
        store("distances", &self.data)?;
        Ok(())
    }
}

impl Reconstruct for DistanceMatrix {
    fn reconstruct_with(loader: Loader) -> std::io::Result<Self> {
        let num_nodes: Vec<u64> = loader.load("num_nodes")?;
        let data: Vec<Distance> = loader.load("distances")?;
        match num_nodes[..] {
            [num_nodes] if (num_nodes as usize).checked_mul(num_nodes as usize) == Some(data.len()) => Ok(DistanceMatrix {
                num_nodes: num_nodes as usize,
                data,
            }),
            _ => Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "distance matrix size mismatch")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_contiguous() {
        let mut matrix = DistanceMatrix::new(3);
        matrix[(1, 0)] = 4;
        matrix[(1, 2)] = 7;

        assert_eq!(matrix.row(1), &[4, INFINITY, 7]);
        assert_eq!(matrix.get(1, 2), 7);
        assert_eq!(matrix.rows().count(), 3);
        assert_eq!(DistanceMatrix::new(0).rows().count(), 0);
    }
}
