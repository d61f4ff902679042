use std::hash::{Hash, Hasher};

use crate::data::PointLocation;
use crate::orientation::Orientation;
use crate::Point;

/// A triangle, specialized from the general `Polygon` case for O(1) area
/// and fast CCW-based containment. Vertices are stored in the order they
/// were given; `orientation()` reports whether that order is CCW.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
  pub a: Point,
  pub b: Point,
  pub c: Point,
}

impl Triangle {
  pub fn new(a: Point, b: Point, c: Point) -> Triangle {
    Triangle { a, b, c }
  }

  pub fn points(&self) -> [Point; 3] {
    [self.a, self.b, self.c]
  }

  pub fn orientation(&self) -> Orientation {
    Orientation::of(&self.a, &self.b, &self.c)
  }

  pub fn signed_area_2x(&self) -> f64 {
    (self.b.x * self.a.y - self.a.x * self.b.y)
      + (self.c.x * self.b.y - self.b.x * self.c.y)
      + (self.a.x * self.c.y - self.c.x * self.a.y)
  }

  pub fn area(&self) -> f64 {
    self.signed_area_2x().abs() / 2.0
  }

  /// Horizontal-ray point-in-polygon test, specialized to three vertices.
  /// `epsilon` widens the boundary band so points that fall exactly on an
  /// edge due to floating-point error still count as inside.
  pub fn locate_eps(&self, p: &Point, epsilon: f64) -> PointLocation {
    let verts = [self.a, self.b, self.c, self.a];
    let mut inside = false;
    let mut on_boundary = false;
    for w in verts.windows(2) {
      let (p1, p2) = (w[0], w[1]);
      if on_segment(p, &p1, &p2, epsilon) {
        on_boundary = true;
      }
      if (p.y > p1.y.min(p2.y)) && (p.y <= p1.y.max(p2.y)) && (p.x <= p1.x.max(p2.x)) {
        let x_ints = if p1.y != p2.y {
          (p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x
        } else {
          f64::NEG_INFINITY
        };
        if p1.x == p2.x || p.x <= x_ints {
          inside = !inside;
        }
      }
    }
    if on_boundary {
      PointLocation::OnBoundary
    } else if inside {
      PointLocation::Inside
    } else {
      PointLocation::Outside
    }
  }

  pub fn contains_point(&self, p: &Point) -> bool {
    !matches!(self.locate_eps(p, 1e-9), PointLocation::Outside)
  }

  fn sorted_points(&self) -> [Point; 3] {
    let mut pts = [self.a, self.b, self.c];
    pts.sort_by(|x, y| x.total_cmp(y));
    pts
  }
}

fn on_segment(p: &Point, a: &Point, b: &Point, epsilon: f64) -> bool {
  let line = crate::data::Line::new(*a, *b);
  let within_x = p.x >= a.x.min(b.x) - epsilon && p.x <= a.x.max(b.x) + epsilon;
  let within_y = p.y >= a.y.min(b.y) - epsilon && p.y <= a.y.max(b.y) + epsilon;
  within_x && within_y && line.distance(p) < epsilon
}

// Triangle identity is order-independent: a hash of the sorted vertex set.
impl PartialEq for Triangle {
  fn eq(&self, other: &Self) -> bool {
    self.sorted_points() == other.sorted_points()
  }
}
impl Eq for Triangle {}

impl Hash for Triangle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    for p in self.sorted_points() {
      p.hash(state);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn area_of_unit_right_triangle() {
    let t = Triangle::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0));
    assert!((t.area() - 0.5).abs() < 1e-12);
  }

  #[test]
  fn contains_centroid() {
    let t = Triangle::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0));
    assert!(t.contains_point(&Point::new(5.0, 3.0)));
    assert!(!t.contains_point(&Point::new(-5.0, 3.0)));
  }

  #[test]
  fn identity_is_order_independent() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(0.0, 1.0);
    assert_eq!(Triangle::new(a, b, c), Triangle::new(c, a, b));
  }
}
