use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A signed position, used for neighbor candidates and view offsets.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A cell of the lattice. Ordered by `x`, then `y`.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "Y")]
    pub y: u32,
}

#[macro_export]
macro_rules! point {
    ($x:expr, $y:expr) => {
        $crate::Point { x: $x, y: $y }
    };
}

impl From<Point> for Pos {
    fn from(Point { x, y }: Point) -> Self {
        pos!(x as i64, y as i64)
    }
}

impl TryFrom<Pos> for Point {
    type Error = Pos;

    /// Fails with the original position when either coordinate leaves `u32`.
    fn try_from(pos: Pos) -> Result<Self, Self::Error> {
        match (u32::try_from(pos.x), u32::try_from(pos.y)) {
            (Ok(x), Ok(y)) => Ok(point!(x, y)),
            _ => Err(pos),
        }
    }
}

#[test]
fn test_pos_arithmetic() {
    assert_eq!(pos!(1, 2) + pos!(-3, 4), pos!(-2, 6));
    assert_eq!(pos!(1, 2) - pos!(1, 3), pos!(0, -1));
}

#[test]
fn test_point_from_pos() {
    assert_eq!(Point::try_from(pos!(0, 7)), Ok(point!(0, 7)));
    assert_eq!(Point::try_from(pos!(-1, 0)), Err(pos!(-1, 0)));
    assert_eq!(Point::try_from(pos!(0, u32::MAX as i64 + 1)).ok(), None);
    assert_eq!(Pos::from(point!(u32::MAX, 3)), pos!(u32::MAX as i64, 3));
}

#[test]
fn test_point_order() {
    let mut points = vec![point!(2, 0), point!(0, 5), point!(0, 1)];
    points.sort();
    assert_eq!(points, vec![point!(0, 1), point!(0, 5), point!(2, 0)]);
}
