//! Turn predicates over triples of points.
//!
//! `ccw` is the load-bearing primitive: it returns `false` for collinear
//! triples rather than `true` or a third "collinear" case. That asymmetry
//! is relied on by the funnel algorithm and must not change.

use crate::Point;

/// Three-way classification of the turn `a -> b -> c`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}

impl Orientation {
  pub fn of(a: &Point, b: &Point, c: &Point) -> Orientation {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > 0.0 {
      Orientation::CounterClockWise
    } else if cross < 0.0 {
      Orientation::ClockWise
    } else {
      Orientation::CoLinear
    }
  }
}

/// Strict counter-clockwise predicate: `a -> b -> c` turns left.
///
/// Collinear triples return `false`. This is the exact predicate the
/// funnel algorithm and the segment-intersection test are specified
/// against; do not swap in `Orientation::of(..) == CounterClockWise`
/// thinking it's equivalent at the boundary (it is, but keep the direct
/// form since it documents the strictness at the call sites that matter).
pub fn ccw(a: &Point, b: &Point, c: &Point) -> bool {
  (b.x - a.x) * (c.y - a.y) > (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ccw_basic_triangle() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(0.0, 1.0);
    assert!(ccw(&a, &b, &c));
    assert!(!ccw(&a, &c, &b));
  }

  #[test]
  fn ccw_collinear_is_false() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(2.0, 0.0);
    assert!(!ccw(&a, &b, &c));
  }
}
