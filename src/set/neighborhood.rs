use crate::{pos, Point, Pos, Set};

/// Offsets of the radius one Moore neighborhood.
pub const MOORE: [Pos; 8] = [
    pos!(1, 0),
    pos!(-1, 0),
    pos!(0, 1),
    pos!(0, -1),
    pos!(1, 1),
    pos!(1, -1),
    pos!(-1, 1),
    pos!(-1, -1),
];

/// the 8 candidates around `point`. some may lie below zero.
pub fn moore_neighbors(point: Point) -> [Pos; 8] {
    let origin = Pos::from(point);
    MOORE.map(|offset| origin + offset)
}

fn members_around(point: Point, target: &Set) -> impl Iterator<Item = Point> + '_ {
    moore_neighbors(point)
        .into_iter()
        .filter_map(|candidate| Point::try_from(candidate).ok())
        .filter(move |candidate| target.contains(*candidate))
}

/// the neighbors of `point` that belong to `target`.
///
/// The lattice does not wrap, so edge cells have fewer possible matches.
pub fn neighbors_in(point: Point, target: &Set) -> Set {
    members_around(point, target).collect()
}

/// `neighbors_in(point, target).len()` without building the set.
pub fn neighbor_count(point: Point, target: &Set) -> usize {
    members_around(point, target).count()
}
