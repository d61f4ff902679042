use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

use crate::orientation::{ccw, Orientation};

/// A point in the plane. Equality and hashing are bitwise on coordinates
/// (via `OrderedFloat`), not approximate; use `close_to` for tolerance
/// comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Point {
    Point { x, y }
  }

  fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
    (OrderedFloat(self.x), OrderedFloat(self.y))
  }

  /// Total order on points, used for deterministic polygon hashing and
  /// for the bounding-triangle's left/right chain walks.
  pub fn total_cmp(&self, other: &Point) -> Ordering {
    self.key().cmp(&other.key())
  }

  pub fn squared_dist(&self, other: &Point) -> f64 {
    let dx = self.x - other.x;
    let dy = self.y - other.y;
    dx * dx + dy * dy
  }

  pub fn dist(&self, other: &Point) -> f64 {
    self.squared_dist(other).sqrt()
  }

  pub fn close_to(&self, other: &Point, epsilon: f64) -> bool {
    self.dist(other) < epsilon
  }

  pub fn orientation(&self, q: &Point, r: &Point) -> Orientation {
    Orientation::of(self, q, r)
  }

  pub fn ccw(&self, q: &Point, r: &Point) -> bool {
    ccw(self, q, r)
  }
}

impl PartialEq for Point {
  fn eq(&self, other: &Self) -> bool {
    self.key() == other.key()
  }
}
impl Eq for Point {}

impl Hash for Point {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key().hash(state)
  }
}

impl From<(f64, f64)> for Point {
  fn from((x, y): (f64, f64)) -> Point {
    Point::new(x, y)
  }
}

impl Add for Point {
  type Output = Point;
  fn add(self, rhs: Point) -> Point {
    Point::new(self.x + rhs.x, self.y + rhs.y)
  }
}

impl Sub for Point {
  type Output = Point;
  fn sub(self, rhs: Point) -> Point {
    Point::new(self.x - rhs.x, self.y - rhs.y)
  }
}

impl Mul<f64> for Point {
  type Output = Point;
  fn mul(self, c: f64) -> Point {
    Point::new(self.x * c, self.y * c)
  }
}

/// Returns `true` if line segments `a1b1` and `a2b2` intersect.
///
/// Endpoint-touching cases inherit `ccw`'s collinearity bias and are
/// treated as non-intersecting.
pub fn segments_intersect(a1: &Point, b1: &Point, a2: &Point, b2: &Point) -> bool {
  ccw(a1, b1, a2) != ccw(a1, b1, b2) && ccw(a2, b2, a1) != ccw(a2, b2, b1)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn equality_is_bitwise() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 2.0001));
  }

  #[test]
  fn crossing_segments_intersect() {
    let a1 = Point::new(0.0, 0.0);
    let b1 = Point::new(2.0, 2.0);
    let a2 = Point::new(0.0, 2.0);
    let b2 = Point::new(2.0, 0.0);
    assert!(segments_intersect(&a1, &b1, &a2, &b2));
  }

  #[test]
  fn parallel_segments_do_not_intersect() {
    let a1 = Point::new(0.0, 0.0);
    let b1 = Point::new(1.0, 0.0);
    let a2 = Point::new(0.0, 1.0);
    let b2 = Point::new(1.0, 1.0);
    assert!(!segments_intersect(&a1, &b1, &a2, &b2));
  }
}
