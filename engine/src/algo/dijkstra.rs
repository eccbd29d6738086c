//! Several variants of Dijkstra

use super::*;
use crate::datastr::timestamped_vector::*;

pub mod generic_dijkstra;
pub mod query;

pub use crate::datastr::queue::State;
pub use generic_dijkstra::GenericDijkstra;
pub use query::dijkstra::Server;

/// Result of a single step of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryProgress<W> {
    Settled(State<W>),
    Done(Option<W>),
}

/// Direction policy of bidirectional searches.
/// `choose` receives the minimum keys of the forward and backward queue (`None` for an empty queue)
/// and returns `true` to advance the forward search.
pub trait BidirChooseDir: Default {
    fn choose(&mut self, fw_min_key: Option<Distance>, bw_min_key: Option<Distance>) -> bool;
    fn strategy_key() -> &'static str;
    fn report() {
        report!("choose_direction_strategy", Self::strategy_key());
    }
}

/// Advance the side with the smaller next key, forward on ties.
#[derive(Debug, Default)]
pub struct ChooseMinKeyDir();

impl BidirChooseDir for ChooseMinKeyDir {
    fn choose(&mut self, fw_min_key: Option<Distance>, bw_min_key: Option<Distance>) -> bool {
        match (fw_min_key, bw_min_key) {
            (Some(fw_min_key), Some(bw_min_key)) => fw_min_key <= bw_min_key,
            (None, Some(_)) => false,
            _ => true,
        }
    }
    fn strategy_key() -> &'static str {
        "min_key"
    }
}

/// Strictly alternate, skipping a side whose queue ran empty.
#[derive(Debug, Default)]
pub struct AlternatingDirs {
    prev: bool,
}

impl BidirChooseDir for AlternatingDirs {
    fn choose(&mut self, fw_min_key: Option<Distance>, bw_min_key: Option<Distance>) -> bool {
        self.prev = !self.prev;
        match (fw_min_key, bw_min_key) {
            (Some(_), Some(_)) => self.prev,
            (None, Some(_)) => false,
            _ => true,
        }
    }
    fn strategy_key() -> &'static str {
        "alternating"
    }
}
