use once_cell::sync::OnceCell;
use std::hash::{Hash, Hasher};

use crate::algorithms::triangulate::triangulate;
use crate::data::{PointLocation, Triangle};
use crate::orientation::Orientation;
use crate::{segments_intersect, Error, Point};

/// An ordered sequence of >= 3 vertices with an implicit closing edge from
/// the last point back to the first. Triangulation is computed on first
/// demand and memoized; callers that want to avoid mutation-on-read can
/// call `triangulation()` once eagerly right after construction.
#[derive(Debug, Clone)]
pub struct Polygon {
  pub points: Vec<Point>,
  pub hole: Option<Vec<Point>>,
  triangulation: OnceCell<Vec<Triangle>>,
}

impl Polygon {
  pub fn new(points: Vec<Point>) -> Result<Polygon, Error> {
    let poly = Polygon {
      points,
      hole: None,
      triangulation: OnceCell::new(),
    };
    poly.validate()?;
    Ok(poly)
  }

  pub fn new_unchecked(points: Vec<Point>) -> Polygon {
    Polygon {
      points,
      hole: None,
      triangulation: OnceCell::new(),
    }
  }

  pub fn with_hole(points: Vec<Point>, hole: Vec<Point>) -> Result<Polygon, Error> {
    let mut poly = Polygon::new(points)?;
    poly.hole = Some(hole);
    Ok(poly)
  }

  pub fn n(&self) -> usize {
    self.points.len()
  }

  pub fn validate(&self) -> Result<(), Error> {
    if self.points.len() < 3 {
      return Err(Error::InvalidPolygon("fewer than three vertices".into()));
    }
    for w in self.points.windows(2) {
      if w[0] == w[1] {
        return Err(Error::InvalidPolygon("duplicate consecutive vertices".into()));
      }
    }
    if self.points[0] == *self.points.last().unwrap() {
      return Err(Error::InvalidPolygon("duplicate consecutive vertices".into()));
    }

    let n = self.points.len();
    for i in 0..n {
      let (a1, a2) = (self.points[i], self.points[(i + 1) % n]);
      for j in (i + 1)..n {
        // Edges adjacent to edge `i` (sharing an endpoint) legitimately
        // touch; only non-adjacent edges crossing is a self-intersection.
        if j == i + 1 || (i == 0 && j == n - 1) {
          continue;
        }
        let (b1, b2) = (self.points[j], self.points[(j + 1) % n]);
        if segments_intersect(&a1, &a2, &b1, &b2) {
          return Err(Error::InvalidPolygon("self-intersecting".into()));
        }
      }
    }

    Ok(())
  }

  /// Indexes vertices modulo `n`, accepting negative indices the way the
  /// original polygon-walk code does (`vertex(-1)` is the last vertex).
  pub fn vertex(&self, idx: isize) -> &Point {
    let n = self.points.len() as isize;
    &self.points[idx.rem_euclid(n) as usize]
  }

  pub fn vertex_orientation(&self, idx: isize) -> Orientation {
    Orientation::of(self.vertex(idx - 1), self.vertex(idx), self.vertex(idx + 1))
  }

  pub fn is_convex(&self) -> bool {
    let n = self.points.len() as isize;
    let mut target = None;
    for i in 0..n {
      let o = self.vertex_orientation(i);
      if o == Orientation::CoLinear {
        continue;
      }
      match target {
        None => target = Some(o),
        Some(t) if t != o => return false,
        _ => {}
      }
    }
    true
  }

  pub fn is_ccw(&self) -> bool {
    self
      .points
      .get(0)
      .zip(self.points.get(1))
      .zip(self.points.get(2))
      .map(|((a, b), c)| Orientation::of(a, b, c) == Orientation::CounterClockWise)
      .unwrap_or(false)
  }

  pub fn signed_area_2x(&self) -> f64 {
    let n = self.points.len();
    let mut sum = 0.0;
    for i in 0..n {
      let p = self.points[i];
      let q = self.points[(i + 1) % n];
      sum += p.x * q.y - q.x * p.y;
    }
    sum
  }

  pub fn area(&self) -> f64 {
    self.signed_area_2x().abs() / 2.0
  }

  /// Triangulates the polygon (and its hole, if any) via the ear-clip
  /// adapter (C2), memoizing the result.
  pub fn triangulation(&self) -> Result<&[Triangle], Error> {
    self
      .triangulation
      .get_or_try_init(|| triangulate(&self.points, self.hole.as_deref()))
      .map(|v| v.as_slice())
  }

  /// Concave-safe containment: triangulate, then test each triangle.
  /// Convex polygons take the faster ray-cast path.
  pub fn contains_point(&self, p: &Point) -> Result<bool, Error> {
    if self.is_convex() {
      return Ok(convex_contains_point(&self.points, p));
    }
    let triangles = self.triangulation()?;
    Ok(
      triangles
        .iter()
        .any(|t| !matches!(t.locate_eps(p, 1e-9), PointLocation::Outside)),
    )
  }

  /// Order-independent identity: the points sorted by x (ties by y).
  fn canonical(&self) -> Vec<Point> {
    let mut pts = self.points.clone();
    pts.sort_by(|a, b| a.total_cmp(b));
    pts
  }
}

pub(crate) fn convex_contains_point(points: &[Point], p: &Point) -> bool {
  let n = points.len();
  let mut inside = false;
  let epsilon = 0.01;
  let mut p1 = points[0];
  for i in 0..=n {
    let p2 = points[i % n];
    if p.y > p1.y.min(p2.y) - epsilon && p.y <= p1.y.max(p2.y) + epsilon {
      if p.x <= p1.x.max(p2.x) + epsilon {
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
    p1 = p2;
  }
  inside
}

impl PartialEq for Polygon {
  fn eq(&self, other: &Self) -> bool {
    self.canonical() == other.canonical()
  }
}
impl Eq for Polygon {}

impl Hash for Polygon {
  fn hash<H: Hasher>(&self, state: &mut H) {
    for p in self.canonical() {
      p.hash(state);
    }
  }
}
