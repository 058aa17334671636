use std::{collections::HashSet, fmt, slice};

use metrohash::MetroBuildHasher;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{point, Point};

pub use neighborhood::{moore_neighbors, neighbor_count, neighbors_in, MOORE};
mod neighborhood;

/// A duplicate free sequence of points.
///
/// Keeps insertion order for iteration and a hashed index for membership.
/// Two sets are equal when they hold the same points, in any order.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawSet", into = "RawSet")]
pub struct Set {
    points: Vec<Point>,
    index: HashSet<Point, MetroBuildHasher>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            index: HashSet::with_capacity_and_hasher(capacity, MetroBuildHasher::default()),
        }
    }

    /// inserts a point, returns false if it was already there.
    pub fn insert(&mut self, point: Point) -> bool {
        let inserted = self.index.insert(point);
        if inserted {
            self.points.push(point);
        }
        inserted
    }

    pub fn contains(&self, point: Point) -> bool {
        self.index.contains(&point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn is_subset(&self, other: &Set) -> bool {
        self.iter().all(|point| other.contains(*point))
    }

    /// removes the point at `position` by moving the last point into its slot.
    ///
    /// Panics if `position` is out of bounds, like [`Vec::swap_remove`].
    pub fn swap_remove(&mut self, position: usize) -> Point {
        let point = self.points.swap_remove(position);
        self.index.remove(&point);
        point
    }

    /// sorts by `x` then `y`.
    pub fn sort(&mut self) {
        self.points.sort_unstable();
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for Set {}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.points.iter()).finish()
    }
}

impl FromIterator<Point> for Set {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl Extend<Point> for Set {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// wire shape of a set, `{"Points": [...]}`. a null list reads as empty.
#[derive(Serialize, Deserialize)]
struct RawSet {
    #[serde(rename = "Points", default)]
    points: Option<Vec<Point>>,
}

impl From<RawSet> for Set {
    fn from(raw: RawSet) -> Self {
        raw.points.unwrap_or_default().into_iter().collect()
    }
}

impl From<Set> for RawSet {
    fn from(set: Set) -> Self {
        RawSet {
            points: Some(set.points),
        }
    }
}

/// every point of `[0, grid_size_x] x [0, grid_size_y]`, x major.
pub fn board(grid_size_x: u32, grid_size_y: u32) -> Set {
    let capacity = (grid_size_x as usize + 1) * (grid_size_y as usize + 1);
    let mut set = Set::with_capacity(capacity);
    set.extend((0..=grid_size_x).flat_map(|x| (0..=grid_size_y).map(move |y| point!(x, y))));
    set
}

/// a random subset of the board, sorted by `x` then `y`.
///
/// Draws a count below the board size, then that many uniform points, so
/// duplicates make the result smaller than the drawn count.
pub fn random_subset<R>(grid_size_x: u32, grid_size_y: u32, rng: &mut R) -> Set
where
    R: Rng,
{
    let cells = (grid_size_x as usize + 1) * (grid_size_y as usize + 1);
    let count = rng.gen_range(0..cells);
    let mut set: Set = (0..count)
        .map(|_| point!(rng.gen_range(0..=grid_size_x), rng.gen_range(0..=grid_size_y)))
        .collect();
    set.sort();
    set
}
