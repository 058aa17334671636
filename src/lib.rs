//! A game of life on a bounded lattice.
//!
//! Every step evaluates each cell of a fixed board against the latest
//! generation. In stochastic mode a random share of the survivors is then
//! removed. Every generation is kept, so any of them can be looked up again.

pub use utils::{Point, Pos};
mod utils;

pub use error::{Error, Result};
mod error;

pub use set::{board, moore_neighbors, neighbor_count, neighbors_in, random_subset, Set, MOORE};
pub mod set;

pub use game::{surviving_points, Game, Mode, PruneCount};
pub mod game;

pub mod pattern;
